use widestring::U16CString;
use windows::Win32::System::Diagnostics::Debug::OutputDebugStringW;
use windows::core::PCWSTR;

/// Log sink for the debugger's output window.
#[derive(Debug, Default, Clone, Copy)]
pub struct DebugOutput;

impl std::io::Write for DebugOutput {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let text = U16CString::from_str_truncate(String::from_utf8_lossy(buf));
        unsafe { OutputDebugStringW(PCWSTR(text.as_ptr())) };
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
