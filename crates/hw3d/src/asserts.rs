//! Debug-build assertions that report and keep going.
//!
//! Unrecoverable failures are not asserted; they are returned as
//! [`MyReport`](crate::error::MyReport) errors and bubble up to `main`.

use tracing::error;

/// Checks a condition in debug builds. On failure the condition, message and
/// location are logged and an attached debugger is asked to break.
///
/// Compiles to nothing observable in release builds (the condition is not
/// evaluated).
#[macro_export]
macro_rules! soft_assert {
    ($cond:expr, $msg:expr $(,)?) => {
        if cfg!(debug_assertions) && !($cond) {
            $crate::asserts::report_assertion_failure(
                stringify!($cond),
                $msg,
                file!(),
                line!(),
            );
            $crate::asserts::debug_break();
        }
    };
}

pub fn assertion_message(condition: &str, message: &str, file: &str, line: u32) -> String {
    format!("[HW3D] Assertion failed: {condition}, Message: {message}, Location: {file}:{line}")
}

pub fn report_assertion_failure(condition: &str, message: &str, file: &str, line: u32) {
    error!("{}", assertion_message(condition, message, file, line));
}

/// Breaks into the debugger if one is attached.
#[cfg(windows)]
pub fn debug_break() {
    use windows::Win32::System::Diagnostics::Debug::DebugBreak;
    use windows::Win32::System::Diagnostics::Debug::IsDebuggerPresent;

    if unsafe { IsDebuggerPresent() }.as_bool() {
        unsafe { DebugBreak() };
    }
}

#[cfg(not(windows))]
pub fn debug_break() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_condition_and_location() {
        let msg = assertion_message("atom != 0", "class not registered", "window.rs", 42);
        assert_eq!(
            msg,
            "[HW3D] Assertion failed: atom != 0, Message: class not registered, Location: window.rs:42"
        );
    }

    #[test]
    fn passing_soft_assert_is_silent() {
        let mut evaluated = false;
        crate::soft_assert!(
            {
                evaluated = true;
                true
            },
            "never reported"
        );
        assert_eq!(evaluated, cfg!(debug_assertions));
    }

    #[test]
    fn failing_soft_assert_does_not_panic() {
        crate::soft_assert!(1 + 1 == 3, "arithmetic is fine, this only logs");
    }
}
