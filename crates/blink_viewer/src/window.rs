//! Window-backed display surface.
//!
//! The render loop drives the window, not the other way round: events are
//! pumped without blocking once per frame, and pixels collect in a CPU
//! buffer that is uploaded when the frame is presented.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use blink_renderer::DisplaySurface;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Window, WindowId},
};

use crate::presenter::Presenter;

/// How long a startup pump may wait for the window to appear.
const STARTUP_PUMP_TIMEOUT: Duration = Duration::from_millis(16);

/// Window and GPU state owned by the event loop callbacks.
struct App {
    size: (u32, u32),
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(size: (u32, u32)) -> Self {
        Self {
            size,
            window: None,
            presenter: None,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attrs = Window::default_attributes()
            .with_title("Blink")
            .with_inner_size(PhysicalSize::new(self.size.0, self.size.1))
            .with_resizable(false);

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let presenter = pollster::block_on(Presenter::new(window.clone(), self.size))?;

        self.window = Some(window);
        self.presenter = Some(presenter);
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            match self.init(event_loop) {
                Ok(()) => log::info!("Window and presenter initialized"),
                Err(e) => {
                    self.error = Some(e);
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                log::info!("Escape pressed");
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(presenter) = &mut self.presenter {
                    presenter.resize((physical_size.width, physical_size.height));
                }
            }
            _ => {}
        }
    }
}

/// A fixed-size window the renderer draws into.
pub struct WindowSurface {
    event_loop: EventLoop<()>,
    app: App,
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
    running: bool,
}

impl WindowSurface {
    /// Open a window of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let mut event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new((width, height));

        // Window creation happens in `resumed`, during the first pumps
        while app.presenter.is_none() {
            let status = event_loop.pump_app_events(Some(STARTUP_PUMP_TIMEOUT), &mut app);
            if let Some(e) = app.error.take() {
                return Err(e);
            }
            if let PumpStatus::Exit(code) = status {
                return Err(anyhow!("Event loop exited during startup (code {code})"));
            }
        }

        Ok(Self {
            event_loop,
            app,
            width,
            height,
            pixels: vec![[0, 0, 0, 255]; width as usize * height as usize],
            running: true,
        })
    }
}

impl DisplaySurface for WindowSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn process_events(&mut self) -> bool {
        if !self.running {
            return false;
        }

        let status = self.event_loop.pump_app_events(Some(Duration::ZERO), &mut self.app);

        if let Some(e) = self.app.error.take() {
            log::error!("Window error: {e:#}");
            self.running = false;
        }
        if let PumpStatus::Exit(code) = status {
            log::info!("Event loop exited with code {code}");
            self.running = false;
        }

        self.running
    }

    fn draw_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let [r, g, b] = rgb;
        self.pixels[y as usize * self.width as usize + x as usize] = [r, g, b, 255];
    }

    fn present(&mut self) {
        let Some(presenter) = &mut self.app.presenter else {
            return;
        };

        match presenter.present(bytemuck::cast_slice(&self.pixels)) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Surface lost, reconfigure
                presenter.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
                self.running = false;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
            }
        }
    }
}
