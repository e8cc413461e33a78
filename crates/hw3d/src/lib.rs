pub mod asserts;
pub mod config;
pub mod control;
pub mod error;
pub mod geometry;
pub mod input;
pub mod keys;
pub mod logging;
pub mod math;
pub mod platform;
pub mod scene;
pub mod shader_files;

#[cfg(windows)]
pub mod gfx;
#[cfg(windows)]
pub mod win32;

use config::Config;
use control::Control;
use error::MyResult;
use platform::HeadlessPlatform;
use tracing::info;
use tracing::warn;

/// Frames a headless run gets when no limit was given.
pub const DEFAULT_HEADLESS_FRAMES: u64 = 600;

/// Runs the configured scene until quit.
pub fn run(config: &Config) -> MyResult<()> {
    if config.headless || cfg!(not(windows)) {
        if !config.headless {
            warn!("no window support on this platform, running headless");
        }
        return run_headless(config);
    }
    run_windowed(config)
}

pub fn run_headless(config: &Config) -> MyResult<()> {
    let mut control = headless_control(config);
    control.run()?;
    info!(presented = control.platform().presented(), "headless run complete");
    Ok(())
}

/// Frame driver for an unattended run, capped at
/// [`DEFAULT_HEADLESS_FRAMES`] unless `max_frames` says otherwise.
pub fn headless_control(config: &Config) -> Control<HeadlessPlatform> {
    let mut config = config.clone();
    if config.max_frames.is_none() {
        config.max_frames = Some(DEFAULT_HEADLESS_FRAMES);
    }
    let platform = HeadlessPlatform::new(config.client_size()).without_recording();
    Control::new(platform, &config)
}

#[cfg(windows)]
fn run_windowed(config: &Config) -> MyResult<()> {
    let platform = win32::Win32Platform::new(config)?;
    let mut control = Control::new(platform, config);
    control.run()
}

#[cfg(not(windows))]
fn run_windowed(config: &Config) -> MyResult<()> {
    run_headless(config)
}
