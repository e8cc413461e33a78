use crate::error::MyResult;
use windows::Win32::Foundation::*;
use windows::Win32::UI::WindowsAndMessaging::*;
use windows::core::*;

/// State that lives behind a window's `GWLP_USERDATA` slot and receives its
/// messages.
pub trait WindowClass {
    /// The name the class is registered under.
    const ID: PCWSTR;

    /// Returns true when the message was fully handled and must not reach
    /// `DefWindowProcW`.
    fn handle(&mut self, message: u32, wparam: WPARAM, lparam: LPARAM) -> bool;
}

pub fn create_window_class_struct<W: WindowClass>(instance: HMODULE) -> MyResult<WNDCLASSEXW> {
    // WNDCLASSEXW - https://learn.microsoft.com/en-us/windows/win32/api/winuser/ns-winuser-wndclassexw
    let wc = WNDCLASSEXW {
        cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
        style: CS_OWNDC | CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(wndproc::<W>),
        hInstance: instance.into(),
        hCursor: unsafe { LoadCursorW(None, IDC_ARROW)? },
        lpszClassName: W::ID,
        ..Default::default()
    };
    Ok(wc)
}

pub fn register_window_class(class: &WNDCLASSEXW) -> MyResult<()> {
    let atom = unsafe { RegisterClassExW(class) };
    if atom == 0 {
        let code = unsafe { GetLastError() }.to_hresult();
        return Err(Error::new(code, "RegisterClassExW failed").into());
    }
    Ok(())
}

extern "system" fn wndproc<W: WindowClass>(
    window: HWND,
    message: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if message == WM_CREATE {
        unsafe {
            let create_struct: &CREATESTRUCTW = &*(lparam.0 as *const CREATESTRUCTW);
            SetWindowLongPtrW(window, GWLP_USERDATA, create_struct.lpCreateParams as _);
        }
        return LRESULT(0);
    }

    let user_data = unsafe { GetWindowLongPtrW(window, GWLP_USERDATA) };
    let Some(mut state) = std::ptr::NonNull::<W>::new(user_data as *mut W) else {
        // messages can arrive before WM_CREATE
        return unsafe { DefWindowProcW(window, message, wparam, lparam) };
    };

    let handled = match message {
        WM_DESTROY => {
            unsafe {
                SetWindowLongPtrW(window, GWLP_USERDATA, 0);
                PostQuitMessage(0);
            }
            true
        }
        // a panic must not unwind across the FFI boundary
        _ => std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| unsafe {
            state.as_mut().handle(message, wparam, lparam)
        }))
        .unwrap_or(false),
    };

    if handled {
        LRESULT(0)
    } else {
        unsafe { DefWindowProcW(window, message, wparam, lparam) }
    }
}
