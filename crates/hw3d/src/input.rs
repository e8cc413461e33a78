//! Double-buffered keyboard and mouse button tracking.
//!
//! The window procedure feeds [`InputEvent`]s in as messages arrive, game
//! logic queries the state during the frame, and [`InputState::end_frame`]
//! rolls the current state into the previous-frame slot.

use tracing::trace;

pub const NUM_KEYS: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub const COUNT: usize = 3;

    pub const ALL: [MouseButton; Self::COUNT] =
        [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Fixed-size set of button flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonSet<const N: usize> {
    bits: [bool; N],
}

impl<const N: usize> Default for ButtonSet<N> {
    fn default() -> Self {
        Self { bits: [false; N] }
    }
}

impl<const N: usize> ButtonSet<N> {
    pub fn get(&self, index: usize) -> bool {
        self.bits[index]
    }

    pub fn set(&mut self, index: usize, value: bool) {
        self.bits[index] = value;
    }

    pub fn clear(&mut self) {
        self.bits = [false; N];
    }

    pub fn any(&self) -> bool {
        self.bits.iter().any(|b| *b)
    }
}

/// Held / pressed / released tracking for one kind of device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ButtonTracker<const N: usize> {
    previous: ButtonSet<N>,
    held: ButtonSet<N>,
    downs: ButtonSet<N>,
    ups: ButtonSet<N>,
}

impl<const N: usize> ButtonTracker<N> {
    fn check(&self, index: usize) -> bool {
        self.held.get(index)
    }

    fn pressed(&self, index: usize) -> bool {
        self.downs.get(index) && !self.previous.get(index)
    }

    fn released(&self, index: usize) -> bool {
        self.ups.get(index)
    }

    fn update(&mut self, index: usize, pressed: bool) {
        self.held.set(index, pressed);
        if pressed {
            self.downs.set(index, true);
        } else {
            self.ups.set(index, true);
        }
    }

    fn clear(&mut self, reset_previous: bool) {
        self.downs.clear();
        self.ups.clear();
        self.held.clear();
        if reset_previous {
            self.previous.clear();
        }
    }

    fn end_frame(&mut self) {
        self.previous = self.held;
        self.downs.clear();
        self.ups.clear();
    }
}

/// Platform-neutral input produced by the window layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key { code: u8, pressed: bool },
    MouseButton { button: MouseButton, pressed: bool },
    MouseMove { x: i32, y: i32 },
    FocusLost,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    keys: ButtonTracker<NUM_KEYS>,
    mouse: ButtonTracker<{ MouseButton::COUNT }>,
    mouse_x: i32,
    mouse_y: i32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_check(&self, code: u8) -> bool {
        self.keys.check(code as usize)
    }

    /// True only on the frame the key went down; auto-repeat does not retrigger.
    pub fn key_pressed(&self, code: u8) -> bool {
        self.keys.pressed(code as usize)
    }

    pub fn key_released(&self, code: u8) -> bool {
        self.keys.released(code as usize)
    }

    pub fn mouse_x(&self) -> i32 {
        self.mouse_x
    }

    pub fn mouse_y(&self) -> i32 {
        self.mouse_y
    }

    pub fn mouse_check(&self, button: MouseButton) -> bool {
        self.mouse.check(button.index())
    }

    pub fn mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse.pressed(button.index())
    }

    pub fn mouse_released(&self, button: MouseButton) -> bool {
        self.mouse.released(button.index())
    }

    pub fn keyboard_update(&mut self, code: u8, pressed: bool) {
        self.keys.update(code as usize, pressed);
    }

    pub fn mouse_update(&mut self, button: MouseButton, pressed: bool) {
        self.mouse.update(button.index(), pressed);
    }

    pub fn set_mouse_position(&mut self, x: i32, y: i32) {
        self.mouse_x = x;
        self.mouse_y = y;
    }

    /// Drops this frame's transitions and all held buttons. With
    /// `reset_previous` the previous-frame state is forgotten as well, so a
    /// key still physically down reports as freshly pressed on its next
    /// message.
    pub fn clear(&mut self, reset_previous: bool) {
        self.keys.clear(reset_previous);
        self.mouse.clear(reset_previous);
    }

    pub fn end_frame(&mut self) {
        self.keys.end_frame();
        self.mouse.end_frame();
    }

    pub fn any_held(&self) -> bool {
        self.keys.held.any() || self.mouse.held.any()
    }

    pub fn handle_event(&mut self, event: InputEvent, client_size: (u32, u32)) {
        match event {
            InputEvent::Key { code, pressed } => self.keyboard_update(code, pressed),
            InputEvent::MouseButton { button, pressed } => self.mouse_update(button, pressed),
            InputEvent::MouseMove { x, y } => {
                let (width, height) = client_size;
                if x >= 0 && (x as i64) < width as i64 && y >= 0 && (y as i64) < height as i64 {
                    self.set_mouse_position(x, y);
                }
            }
            InputEvent::FocusLost => {
                trace!("focus lost, clearing input");
                self.clear(true);
            }
        }
    }
}
