//! Window host for the visualizer.
//!
//! This module owns:
//! - the winit application lifecycle and event loop
//! - the window and its softbuffer presentation surface
//! - the frame-rate limiter
//!
//! What is drawn is delegated to an [`AppState`], which renders into a CPU
//! [`Pixmap`]; the runner copies that into the surface and presents it.
//!
//! Loop phases: `Running` until the window is closed or a frame fails, then
//! `Closing`. The window and surface are dropped before the event loop exits,
//! and a frame failure is returned from [`run_with_state`].

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context as _};
use log::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

use super::pixmap::{Pixmap, Rgba};
use crate::core::VizError;

/// Window configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Window title.
    pub title: String,
    /// Inner width in physical pixels.
    pub width: u32,
    /// Inner height in physical pixels.
    pub height: u32,
    /// Target frames per second. Zero is treated as one.
    pub frame_rate: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Quantum Circuit Visualizer".to_string(),
            width: 800,
            height: 600,
            frame_rate: 60,
        }
    }
}

impl AppConfig {
    fn frame_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frame_rate.max(1) as f64)
    }
}

/// Something the runner can draw once per frame.
pub trait AppState: 'static {
    /// Draws the next frame. `frame` matches the window's inner size.
    fn render(&mut self, frame: &mut Pixmap) -> Result<(), VizError>;
}

/// Opens the window and drives `state` until the window is closed.
///
/// # Errors
/// Event loop or window creation failures, and the first frame that fails to
/// render or present.
pub fn run_with_state<S: AppState>(config: AppConfig, state: S) -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("winit: failed to create EventLoop")?;
    event_loop.set_control_flow(ControlFlow::Poll);
    debug!("target frame period {:?}", config.frame_period());

    let mut app = App::new(config, state);
    event_loop
        .run_app(&mut app)
        .context("winit: run_app failed")?;

    match app.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// The window plus the surface presenting into it.
///
/// Field order is drop order: the surface goes before its context and window.
struct WindowSurface {
    surface: softbuffer::Surface<Arc<Window>, Arc<Window>>,
    _context: softbuffer::Context<Arc<Window>>,
    window: Arc<Window>,
}

impl WindowSurface {
    fn create(event_loop: &ActiveEventLoop, config: &AppConfig) -> anyhow::Result<Self> {
        let attributes = WindowAttributes::default()
            .with_title(config.title.as_str())
            .with_inner_size(PhysicalSize::new(config.width, config.height))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("winit: failed to create window")?,
        );
        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| anyhow!("softbuffer: failed to create context: {e}"))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| anyhow!("softbuffer: failed to create surface: {e}"))?;
        Ok(Self {
            surface,
            _context: context,
            window,
        })
    }

    /// Copies `frame` into the surface and presents it.
    fn present(&mut self, frame: &Pixmap, background: Rgba) -> anyhow::Result<()> {
        let size = self.window.inner_size();
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
            return Ok(());
        };
        self.surface
            .resize(w, h)
            .map_err(|e| anyhow!("softbuffer: resize failed: {e}"))?;
        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| anyhow!("softbuffer: failed to acquire buffer: {e}"))?;
        frame.write_xrgb(&mut buffer, size.width, size.height, background);
        self.window.pre_present_notify();
        buffer
            .present()
            .map_err(|e| anyhow!("softbuffer: present failed: {e}"))?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopPhase {
    Running,
    Closing,
}

struct App<S: AppState> {
    config: AppConfig,
    state: S,
    window: Option<WindowSurface>,
    frame: Option<Pixmap>,
    phase: LoopPhase,
    failure: Option<anyhow::Error>,
    period: Duration,
    next_frame: Instant,
}

impl<S: AppState> App<S> {
    fn new(config: AppConfig, state: S) -> Self {
        let period = config.frame_period();
        Self {
            config,
            state,
            window: None,
            frame: None,
            phase: LoopPhase::Running,
            failure: None,
            period,
            next_frame: Instant::now(),
        }
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        self.phase = LoopPhase::Closing;
        self.window = None;
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        error!("stopping: {:#}", err);
        if self.failure.is_none() {
            self.failure = Some(err);
        }
        self.close(event_loop);
    }

    fn redraw(&mut self) -> anyhow::Result<()> {
        let Some(target) = self.window.as_mut() else {
            return Ok(());
        };
        let size = target.window.inner_size();
        if size.width == 0 || size.height == 0 {
            return Ok(());
        }
        let frame = match self.frame.take() {
            Some(frame) if frame.width() == size.width && frame.height() == size.height => frame,
            _ => Pixmap::new(size.width, size.height)?,
        };
        let frame = self.frame.insert(frame);
        self.state.render(frame).context("failed to render frame")?;
        target.present(frame, Rgba::WHITE)
    }
}

impl<S: AppState> ApplicationHandler for App<S> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.phase == LoopPhase::Closing {
            return;
        }
        match WindowSurface::create(event_loop, &self.config) {
            Ok(target) => {
                info!(
                    "window '{}' opened at {}x{}",
                    self.config.title, self.config.width, self.config.height
                );
                target.window.request_redraw();
                self.window = Some(target);
                self.next_frame = Instant::now() + self.period;
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.phase == LoopPhase::Closing {
            return;
        }
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested; exiting");
                self.close(event_loop);
            }
            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    warn!("window resized to {}x{}; skipping frames", size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw() {
                    self.fail(event_loop, err);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.phase == LoopPhase::Closing {
            return;
        }
        let now = Instant::now();
        if now >= self.next_frame {
            if let Some(target) = self.window.as_ref() {
                target.window.request_redraw();
            }
            // Skip missed deadlines instead of bursting to catch up.
            while self.next_frame <= now {
                self.next_frame += self.period;
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }
}
