//! Per-frame driver: messages, game logic, scene, render, end of frame.

use crate::config::Config;
use crate::error::MyResult;
use crate::input::InputState;
use crate::input::MouseButton;
use crate::keys;
use crate::platform::Platform;
use crate::scene::Scene;
use tracing::debug;
use tracing::info;

/// Something the game logic wants done in response to input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameAction {
    Quit,
    Log(&'static str),
    MessageBox {
        title: &'static str,
        text: &'static str,
    },
}

/// Exercises the input layer. Only the first matching rule fires each frame.
pub fn input_test(input: &InputState) -> Option<FrameAction> {
    use FrameAction::Log;

    let action = if input.key_pressed(keys::ESCAPE) {
        info!("Escape pressed");
        FrameAction::Quit
    } else if input.key_pressed(b'W') {
        Log("W pressed")
    } else if input.key_released(b'W') {
        Log("W released")
    } else if input.key_pressed(keys::SPACE) {
        FrameAction::MessageBox {
            title: "Space Pressed",
            text: "Something happened!",
        }
    } else if input.key_check(b'Z') {
        Log("Z held")
    } else if input.key_pressed(keys::LEFT) {
        Log("Left pressed")
    } else if input.key_pressed(keys::RIGHT) {
        Log("Right pressed")
    } else if input.key_pressed(keys::UP) {
        Log("Up pressed")
    } else if input.key_pressed(keys::DOWN) {
        Log("Down pressed")
    } else if input.key_check(b'V') && input.key_check(b'C') {
        Log("C + V pressed")
    } else if input.mouse_pressed(MouseButton::Right) {
        Log("Mouse Right pressed")
    } else if input.mouse_pressed(MouseButton::Middle) {
        Log("Mouse Middle pressed")
    } else if input.mouse_released(MouseButton::Left) {
        Log("Mouse Left released")
    } else if input.mouse_released(MouseButton::Right) {
        Log("Mouse Right released")
    } else if input.mouse_released(MouseButton::Middle) {
        Log("Mouse Middle released")
    } else if input.mouse_check(MouseButton::Left) {
        Log("Mouse Left held")
    } else {
        return None;
    };
    Some(action)
}

pub struct Control<P: Platform> {
    platform: P,
    scene: Scene,
    frame_count: u64,
    max_frames: Option<u64>,
}

impl<P: Platform> Control<P> {
    pub fn new(platform: P, config: &Config) -> Self {
        Self {
            platform,
            scene: Scene::new(config),
            frame_count: 0,
            max_frames: config.max_frames,
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn into_platform(self) -> P {
        self.platform
    }

    /// Runs frames until the platform stops.
    pub fn run(&mut self) -> MyResult<()> {
        info!(scene = ?self.scene.kind(), "entering frame loop");
        while self.run_frame()? {}
        info!(frames = self.frame_count, "frame loop finished");
        Ok(())
    }

    /// Runs a single frame and reports whether the platform is still running.
    pub fn run_frame(&mut self) -> MyResult<bool> {
        self.platform.process_messages()?;
        if !self.platform.is_running() {
            return Ok(false);
        }

        self.game_logic();

        let frame = self
            .scene
            .update(self.platform.input(), self.platform.client_size());
        self.platform.render(&frame)?;

        self.end_frame()
    }

    fn game_logic(&mut self) {
        match input_test(self.platform.input()) {
            Some(FrameAction::Quit) => self.platform.request_quit(),
            Some(FrameAction::Log(message)) => info!("{message}"),
            Some(FrameAction::MessageBox { title, text }) => {
                self.platform.show_message(title, text)
            }
            None => {}
        }
    }

    fn end_frame(&mut self) -> MyResult<bool> {
        self.platform.input_mut().end_frame();
        self.platform.present()?;
        self.frame_count += 1;

        if let Some(max_frames) = self.max_frames {
            if self.frame_count >= max_frames {
                debug!(max_frames, "frame limit reached");
                self.platform.request_quit();
            }
        }
        Ok(self.platform.is_running())
    }
}
