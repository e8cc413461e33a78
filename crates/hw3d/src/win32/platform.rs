use crate::config::Config;
use crate::error::MyResult;
use crate::gfx::renderer::Renderer;
use crate::input::InputState;
use crate::platform::Platform;
use crate::scene::Frame;
use crate::win32::window::Window;
use windows::Win32::UI::WindowsAndMessaging::PostQuitMessage;

/// A real window presenting through Direct3D 11.
pub struct Win32Platform {
    // dropped before the window so the swap chain never outlives its HWND
    renderer: Renderer,
    window: Window,
    vsync: bool,
}

impl Win32Platform {
    pub fn new(config: &Config) -> MyResult<Self> {
        let window = Window::new(config)?;
        let renderer = Renderer::new(window.hwnd(), config.client_size(), config.use_warp_device)?;
        window.show();
        Ok(Self {
            renderer,
            window,
            vsync: config.vsync,
        })
    }
}

impl Platform for Win32Platform {
    fn process_messages(&mut self) -> MyResult<()> {
        self.window.process_messages();
        Ok(())
    }

    fn input(&self) -> &InputState {
        &self.window.state().input
    }

    fn input_mut(&mut self) -> &mut InputState {
        &mut self.window.state_mut().input
    }

    fn client_size(&self) -> (u32, u32) {
        self.window.state().client_size
    }

    fn render(&mut self, frame: &Frame) -> MyResult<()> {
        self.renderer.render(frame)
    }

    fn present(&mut self) -> MyResult<()> {
        self.renderer.present(self.vsync)
    }

    /// Posts `WM_QUIT`; the loop stops when the next message pump sees it.
    fn request_quit(&mut self) {
        unsafe { PostQuitMessage(0) };
    }

    fn show_message(&mut self, title: &str, text: &str) {
        self.window.show_message(title, text);
    }

    fn is_running(&self) -> bool {
        self.window.state().running
    }
}
