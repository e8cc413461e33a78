//! Win32 window, message pump and debugger output.

pub mod debug_output;
pub mod platform;
pub mod window;
pub mod window_class;

pub use debug_output::DebugOutput;
pub use platform::Win32Platform;
pub use window::Window;
