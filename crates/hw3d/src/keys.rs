//! Virtual-key codes used by the demos.
//!
//! Letters and digits use their ASCII upper-case value (`b'W'`), as Win32 does.

pub const ESCAPE: u8 = 0x1B;
pub const SPACE: u8 = 0x20;
pub const LEFT: u8 = 0x25;
pub const UP: u8 = 0x26;
pub const RIGHT: u8 = 0x27;
pub const DOWN: u8 = 0x28;
