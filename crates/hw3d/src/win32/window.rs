use crate::config::Config;
use crate::error::MyResult;
use crate::input::InputEvent;
use crate::input::InputState;
use crate::input::MouseButton;
use crate::win32::window_class::WindowClass;
use crate::win32::window_class::create_window_class_struct;
use crate::win32::window_class::register_window_class;
use eyre::eyre;
use std::ptr::NonNull;
use tracing::debug;
use tracing::info;
use tracing::warn;
use windows::Win32::Foundation::*;
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::*;
use windows::core::*;

/// Everything the window procedure writes to.
#[derive(Debug)]
pub struct WindowState {
    pub input: InputState,
    pub client_size: (u32, u32),
    pub running: bool,
}

impl WindowClass for WindowState {
    const ID: PCWSTR = w!("HW3DWindowClass");

    fn handle(&mut self, message: u32, wparam: WPARAM, lparam: LPARAM) -> bool {
        match message {
            WM_CLOSE => {
                unsafe { PostQuitMessage(0) };
                true
            }
            WM_ACTIVATEAPP => {
                debug!(active = wparam.0 != 0, "WM_ACTIVATEAPP");
                true
            }
            // system keys still need DefWindowProcW for Alt+F4 and the menu
            WM_SYSKEYDOWN | WM_SYSKEYUP => {
                if let Some(event) = translate_message(message, wparam, lparam) {
                    self.input.handle_event(event, self.client_size);
                }
                false
            }
            _ => match translate_message(message, wparam, lparam) {
                Some(event) => {
                    self.input.handle_event(event, self.client_size);
                    true
                }
                None => false,
            },
        }
    }
}

/// Converts a window message into the input it carries, if any.
pub fn translate_message(message: u32, wparam: WPARAM, lparam: LPARAM) -> Option<InputEvent> {
    let button = |button, pressed| Some(InputEvent::MouseButton { button, pressed });
    match message {
        WM_KILLFOCUS => Some(InputEvent::FocusLost),
        WM_KEYDOWN | WM_SYSKEYDOWN => Some(InputEvent::Key {
            code: wparam.0 as u8,
            pressed: true,
        }),
        WM_KEYUP | WM_SYSKEYUP => Some(InputEvent::Key {
            code: wparam.0 as u8,
            pressed: false,
        }),
        WM_MOUSEMOVE => {
            // client coordinates are signed 16-bit values packed into lparam
            let x = (lparam.0 & 0xFFFF) as u16 as i16 as i32;
            let y = ((lparam.0 >> 16) & 0xFFFF) as u16 as i16 as i32;
            Some(InputEvent::MouseMove { x, y })
        }
        WM_LBUTTONDOWN => button(MouseButton::Left, true),
        WM_LBUTTONUP => button(MouseButton::Left, false),
        WM_RBUTTONDOWN => button(MouseButton::Right, true),
        WM_RBUTTONUP => button(MouseButton::Right, false),
        WM_MBUTTONDOWN => button(MouseButton::Middle, true),
        WM_MBUTTONUP => button(MouseButton::Middle, false),
        _ => None,
    }
}

/// Overlapped window without a sizing border or maximize box; the swap
/// chain keeps the size it was created with.
pub const FIXED_WINDOW_STYLE: WINDOW_STYLE =
    WINDOW_STYLE(WS_OVERLAPPEDWINDOW.0 & !(WS_THICKFRAME.0 | WS_MAXIMIZEBOX.0));

/// Client rectangle of `width` x `height` placed at (100, 100).
pub fn client_rect(width: u32, height: u32) -> MyResult<RECT> {
    let edge = |origin: i32, extent: u32| {
        i32::try_from(extent)
            .ok()
            .and_then(|extent| origin.checked_add(extent))
            .ok_or_else(|| eyre!("window extent {extent} does not fit a RECT"))
    };
    Ok(RECT {
        left: 100,
        top: 100,
        right: edge(100, width)?,
        bottom: edge(100, height)?,
    })
}

pub struct Window {
    hwnd: HWND,
    instance: HMODULE,
    state: NonNull<WindowState>,
}

impl Window {
    pub fn new(config: &Config) -> MyResult<Self> {
        let instance = unsafe { GetModuleHandleW(None)? };

        let window_class = create_window_class_struct::<WindowState>(instance)?;
        register_window_class(&window_class)?;

        let (width, height) = config.client_size();
        let mut window_rect = client_rect(width, height)?;
        // grow the outer rect so the client area is exactly width x height
        unsafe { AdjustWindowRect(&mut window_rect, FIXED_WINDOW_STYLE, false)? };

        let state = Box::new(WindowState {
            input: InputState::new(),
            client_size: (width, height),
            running: true,
        });
        let state = NonNull::from(Box::leak(state));

        let title = HSTRING::from(config.window_title());
        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE::default(),
                WindowState::ID,
                &title,
                FIXED_WINDOW_STYLE,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                window_rect.right - window_rect.left,
                window_rect.bottom - window_rect.top,
                None,
                None,
                Some(instance.into()),
                Some(state.as_ptr() as _),
            )
        };
        let hwnd = match hwnd {
            Ok(hwnd) => hwnd,
            Err(e) => {
                drop(unsafe { Box::from_raw(state.as_ptr()) });
                unsafe { _ = UnregisterClassW(WindowState::ID, Some(instance.into())) };
                return Err(e.into());
            }
        };
        info!(width, height, "window created");

        Ok(Self {
            hwnd,
            instance,
            state,
        })
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    pub fn state(&self) -> &WindowState {
        unsafe { self.state.as_ref() }
    }

    pub fn state_mut(&mut self) -> &mut WindowState {
        unsafe { self.state.as_mut() }
    }

    pub fn show(&self) {
        unsafe { _ = ShowWindow(self.hwnd, SW_SHOW) };
    }

    /// Drains the message queue without blocking.
    pub fn process_messages(&mut self) {
        let mut message = MSG::default();
        while unsafe { PeekMessageW(&mut message, None, 0, 0, PM_REMOVE) }.as_bool() {
            unsafe {
                _ = TranslateMessage(&message);
                DispatchMessageW(&message);
            }
            if message.message == WM_QUIT {
                self.state_mut().running = false;
            }
        }
    }

    pub fn show_message(&self, title: &str, text: &str) {
        unsafe {
            MessageBoxW(
                Some(self.hwnd),
                &HSTRING::from(text),
                &HSTRING::from(title),
                MB_OK,
            )
        };
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        unsafe {
            if let Err(e) = DestroyWindow(self.hwnd) {
                warn!("DestroyWindow failed: {e}");
            }
            // the window procedure no longer references the state
            drop(Box::from_raw(self.state.as_ptr()));
            if let Err(e) = UnregisterClassW(WindowState::ID, Some(self.instance.into())) {
                warn!("UnregisterClassW failed: {e}");
            }
        }
    }
}
