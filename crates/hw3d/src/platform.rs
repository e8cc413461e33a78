//! The seam between frame logic and the operating system.
//!
//! [`crate::control::Control`] drives a frame through this trait. On
//! Windows it is backed by a real window and Direct3D device; the
//! [`HeadlessPlatform`] replays scripted input and records what would have
//! been drawn.

use crate::error::MyResult;
use crate::input::InputEvent;
use crate::input::InputState;
use crate::scene::Frame;
use std::collections::VecDeque;
use tracing::debug;
use tracing::info;

pub trait Platform {
    /// Pumps pending OS messages into the input state.
    fn process_messages(&mut self) -> MyResult<()>;

    fn input(&self) -> &InputState;

    fn input_mut(&mut self) -> &mut InputState;

    fn client_size(&self) -> (u32, u32);

    fn render(&mut self, frame: &Frame) -> MyResult<()>;

    fn present(&mut self) -> MyResult<()>;

    fn request_quit(&mut self);

    fn show_message(&mut self, title: &str, text: &str);

    fn is_running(&self) -> bool;
}

/// Platform with no window or GPU.
///
/// Each call to `process_messages` applies the next scripted batch of
/// events. Once the script runs out, frames continue with no input.
#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    input: InputState,
    client_size: (u32, u32),
    script: VecDeque<Vec<InputEvent>>,
    frames: Vec<Frame>,
    messages: Vec<(String, String)>,
    presented: u64,
    running: bool,
    record_frames: bool,
}

impl HeadlessPlatform {
    pub fn new(client_size: (u32, u32)) -> Self {
        Self {
            client_size,
            running: true,
            record_frames: true,
            ..Default::default()
        }
    }

    /// Stops keeping rendered frames; used by long unattended runs.
    pub fn without_recording(mut self) -> Self {
        self.record_frames = false;
        self
    }

    pub fn with_script(mut self, script: impl IntoIterator<Item = Vec<InputEvent>>) -> Self {
        self.script.extend(script);
        self
    }

    pub fn push_frame_events(&mut self, events: Vec<InputEvent>) {
        self.script.push_back(events);
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn messages(&self) -> &[(String, String)] {
        &self.messages
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl Platform for HeadlessPlatform {
    fn process_messages(&mut self) -> MyResult<()> {
        if let Some(events) = self.script.pop_front() {
            for event in events {
                self.input.handle_event(event, self.client_size);
            }
        }
        Ok(())
    }

    fn input(&self) -> &InputState {
        &self.input
    }

    fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    fn client_size(&self) -> (u32, u32) {
        self.client_size
    }

    fn render(&mut self, frame: &Frame) -> MyResult<()> {
        if self.record_frames {
            self.frames.push(frame.clone());
        }
        Ok(())
    }

    fn present(&mut self) -> MyResult<()> {
        self.presented += 1;
        Ok(())
    }

    fn request_quit(&mut self) {
        debug!("quit requested");
        self.running = false;
    }

    fn show_message(&mut self, title: &str, text: &str) {
        info!(title, text, "message box");
        self.messages.push((title.to_string(), text.to_string()));
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_is_consumed_one_batch_per_call() {
        let mut platform = HeadlessPlatform::new((100, 100)).with_script([
            vec![InputEvent::Key { code: b'A', pressed: true }],
            vec![InputEvent::Key { code: b'A', pressed: false }],
        ]);
        platform.process_messages().unwrap();
        assert!(platform.input().key_check(b'A'));
        platform.process_messages().unwrap();
        assert!(!platform.input().key_check(b'A'));
        platform.process_messages().unwrap();
        assert!(!platform.input().key_check(b'A'));
    }

    #[test]
    fn pushed_events_follow_the_script() {
        let mut platform = HeadlessPlatform::new((100, 100))
            .with_script([vec![InputEvent::Key { code: b'A', pressed: true }]]);
        platform.push_frame_events(vec![InputEvent::MouseMove { x: 7, y: 9 }]);
        platform.process_messages().unwrap();
        assert!(platform.input().key_check(b'A'));
        platform.process_messages().unwrap();
        assert_eq!((platform.input().mouse_x(), platform.input().mouse_y()), (7, 9));
    }

    #[test]
    fn records_frames_unless_disabled() {
        let mut platform = HeadlessPlatform::new((1, 1));
        platform.render(&Frame::clear([0.0; 4])).unwrap();
        assert_eq!(platform.frames().len(), 1);

        let mut quiet = HeadlessPlatform::new((1, 1)).without_recording();
        quiet.render(&Frame::clear([0.0; 4])).unwrap();
        assert!(quiet.frames().is_empty());
    }

    #[test]
    fn quit_stops_running() {
        let mut platform = HeadlessPlatform::new((1, 1));
        assert!(platform.is_running());
        platform.request_quit();
        assert!(!platform.is_running());
    }
}
