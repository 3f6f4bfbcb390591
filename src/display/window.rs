// Window host - presents frames and feeds input into the emulator
//
// Runs the winit event loop; every redraw renders one emulated frame and
// blits it through pixels. Keyboard events drive the two joypads plus a
// small set of hotkeys (pause, reset, save/load state, screenshot).

use super::framebuffer::{FRAME_HEIGHT, FRAME_WIDTH};
use crate::emulator::Emulator;
use crate::input::{GamepadInput, KeyboardMapping};
use log::{error, info, warn};
use pixels::{Pixels, SurfaceTexture};
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Window configuration
#[derive(Debug, Clone, Copy)]
pub struct WindowConfig {
    /// Integer scale factor
    pub scale: u32,
    /// Enable VSync-style waiting
    pub vsync: bool,
}

impl WindowConfig {
    pub fn new() -> Self {
        WindowConfig {
            scale: 3,
            vsync: true,
        }
    }

    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.clamp(1, 4);
        self
    }

    pub fn window_width(&self) -> u32 {
        FRAME_WIDTH as u32 * self.scale
    }

    pub fn window_height(&self) -> u32 {
        FRAME_HEIGHT as u32 * self.scale
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The winit application wrapping the emulator
struct EmulatorWindow {
    emulator: Emulator,
    config: WindowConfig,
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    keymaps: [KeyboardMapping; 2],
    gamepad: GamepadInput,
}

impl EmulatorWindow {
    fn new(emulator: Emulator, config: WindowConfig) -> Self {
        EmulatorWindow {
            emulator,
            config,
            window: None,
            pixels: None,
            keymaps: [KeyboardMapping::player_one(), KeyboardMapping::player_two()],
            gamepad: GamepadInput::new(),
        }
    }

    /// Emulate one frame and blit it
    fn render(&mut self) -> Result<(), pixels::Error> {
        for (button, pressed) in self.gamepad.poll() {
            self.emulator.set_button(0, button, pressed);
        }

        if !self.emulator.is_paused() {
            self.emulator.render_frame();
        }

        if let Some(pixels) = &mut self.pixels {
            let source = self.emulator.frame_buffer();
            for (dst, src) in pixels.frame_mut().chunks_exact_mut(4).zip(source.chunks_exact(3)) {
                dst[0] = src[0];
                dst[1] = src[1];
                dst[2] = src[2];
                dst[3] = 0xFF;
            }
            pixels.render()?;
        }
        Ok(())
    }

    fn handle_key(&mut self, key: PhysicalKey, pressed: bool, event_loop: &ActiveEventLoop) {
        for (pad, map) in self.keymaps.iter().enumerate() {
            if let Some(button) = map.button_for(key) {
                self.emulator.set_button(pad, button, pressed);
                return;
            }
        }

        if !pressed {
            return;
        }
        match key {
            PhysicalKey::Code(KeyCode::Escape) => event_loop.exit(),
            PhysicalKey::Code(KeyCode::KeyP) => {
                let paused = !self.emulator.is_paused();
                self.emulator.set_paused(paused);
                info!("{}", if paused { "paused" } else { "resumed" });
            }
            PhysicalKey::Code(KeyCode::KeyR) => {
                self.emulator.reset();
                info!("reset");
            }
            PhysicalKey::Code(KeyCode::F5) => {
                if let Err(e) = self.emulator.save_state(0) {
                    warn!("save state failed: {}", e);
                }
            }
            PhysicalKey::Code(KeyCode::F7) => {
                if let Err(e) = self.emulator.load_state(0) {
                    warn!("load state failed: {}", e);
                }
            }
            PhysicalKey::Code(KeyCode::F12) => match self.emulator.screenshot() {
                Ok(path) => info!("screenshot saved to {}", path.display()),
                Err(e) => warn!("screenshot failed: {}", e),
            },
            _ => {}
        }
    }
}

impl ApplicationHandler for EmulatorWindow {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("renes")
            .with_inner_size(LogicalSize::new(
                self.config.window_width(),
                self.config.window_height(),
            ))
            .with_resizable(false);

        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .expect("failed to create the window"),
        );

        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width, size.height, window.clone());
        let pixels = Pixels::new(FRAME_WIDTH as u32, FRAME_HEIGHT as u32, surface)
            .expect("failed to create the pixel surface");

        self.window = Some(window);
        self.pixels = Some(pixels);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event: KeyEvent {
                    physical_key,
                    state,
                    ..
                },
                ..
            } => {
                self.handle_key(physical_key, state == ElementState::Pressed, event_loop);
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.render() {
                    error!("render error: {}", e);
                    event_loop.exit();
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Run the window event loop until the user closes it
pub fn run_window(
    emulator: Emulator,
    config: WindowConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(if config.vsync {
        ControlFlow::Wait
    } else {
        ControlFlow::Poll
    });

    let mut app = EmulatorWindow::new(emulator, config);
    event_loop.run_app(&mut app)?;
    Ok(())
}
