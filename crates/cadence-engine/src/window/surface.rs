use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use ouroboros::self_referencing;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use crate::core::{Color, Surface};
use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::input::InputState;
use crate::input::platform::winit::translate_window_event;

/// Pumps allowed while waiting for the platform to deliver `resumed`.
const OPEN_PUMP_LIMIT: u32 = 100;
const OPEN_PUMP_TIMEOUT: Duration = Duration::from_millis(10);

/// Window configuration.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    /// Initial inner size in logical pixels.
    pub width: u32,
    pub height: u32,
    /// Let the swapchain pace presentation. When off, the loop throttles itself.
    pub vsync: bool,
    pub resizable: bool,
    pub gpu: GpuInit,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "cadence".to_string(),
            width: 600,
            height: 480,
            vsync: true,
            resizable: true,
            gpu: GpuInit::default(),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// winit callback target; owns everything the event pump mutates.
struct EventHandler {
    config: WindowConfig,
    entry: Option<WindowEntry>,
    input: InputState,
    resized: bool,
    close_requested: bool,
    error: Option<anyhow::Error>,
}

impl EventHandler {
    fn new(config: WindowConfig) -> Self {
        Self {
            config,
            entry: None,
            input: InputState::default(),
            resized: false,
            close_requested: false,
            error: None,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let size = LogicalSize::new(f64::from(self.config.width), f64::from(self.config.height));

        // Hidden until the GPU surface is ready.
        let mut attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(size)
            .with_resizable(self.config.resizable)
            .with_visible(false);

        if let Some(monitor) = event_loop.primary_monitor() {
            let physical = size.to_physical::<u32>(monitor.scale_factor());
            attrs = attrs.with_position(centered_position(
                monitor.position(),
                monitor.size(),
                physical,
            ));
        }

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.config.gpu.clone().with_vsync(self.config.vsync);
        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")?;

        entry.with_window(|w| w.set_visible(true));
        log::info!("window \"{}\" opened", self.config.title);

        self.entry = Some(entry);
        Ok(())
    }
}

impl ApplicationHandler for EventHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.error.is_some() {
            return;
        }

        if let Err(e) = self.create_window(event_loop) {
            self.error = Some(e);
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };
        let (id, scale) = entry.with_window(|w| (w.id(), w.scale_factor()));
        if id != window_id {
            return;
        }

        if let Some(ev) = translate_window_event(scale, &event) {
            self.input.apply(ev);
        }

        match &event {
            WindowEvent::CloseRequested => self.close_requested = true,

            WindowEvent::KeyboardInput { event: key, .. }
                if key.state == ElementState::Released
                    && key.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                self.close_requested = true;
            }

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                self.resized = true;
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                self.resized = true;
            }

            _ => {}
        }
    }
}

/// winit + wgpu implementation of [`Surface`].
///
/// Instead of handing control to `EventLoop::run_app`, the loop driver stays in
/// charge and the surface pumps pending events without blocking on every
/// `present()`.
///
/// The event loop is created on whichever thread opens the surface. Linux and
/// Windows allow that to be a spawned thread; macOS requires the main thread,
/// so run the engine with `run_on_calling_thread` there.
pub struct WindowSurface {
    event_loop: EventLoop<()>,
    handler: EventHandler,
    clear_color: Color,
}

impl WindowSurface {
    fn pump(&mut self, timeout: Option<Duration>) -> Result<()> {
        let status = self.event_loop.pump_app_events(timeout, &mut self.handler);
        if let PumpStatus::Exit(code) = status {
            log::debug!("event loop exited with code {code}");
            self.request_close();
        }

        match self.handler.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Surface for WindowSurface {
    type Config = WindowConfig;

    fn open(config: WindowConfig) -> Result<Self> {
        let event_loop = build_event_loop()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut surface = Self {
            event_loop,
            handler: EventHandler::new(config),
            clear_color: Color::black(),
        };

        // The window is created from the first `resumed` callback.
        for _ in 0..OPEN_PUMP_LIMIT {
            surface.pump(Some(OPEN_PUMP_TIMEOUT))?;
            if surface.handler.entry.is_some() {
                return Ok(surface);
            }
            if surface.handler.close_requested {
                bail!("event loop exited before the window was created");
            }
        }

        bail!("platform never resumed the application; no window was created")
    }

    fn close_requested(&self) -> bool {
        self.handler.close_requested
    }

    fn request_close(&mut self) {
        self.handler.close_requested = true;
    }

    fn input(&self) -> &InputState {
        &self.handler.input
    }

    fn present(&mut self) -> Result<()> {
        let clear = self.clear_color;
        if let Some(entry) = self.handler.entry.as_mut() {
            entry.with_mut(|fields| {
                fields.window.pre_present_notify();
                match fields.gpu.clear_and_present(clear) {
                    Ok(()) => Ok(()),
                    Err(err) => match fields.gpu.handle_surface_error(err) {
                        SurfaceErrorAction::Fatal => Err(anyhow!("GPU surface is out of memory")),
                        SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => Ok(()),
                    },
                }
            })?;
        }

        self.handler.input.begin_iteration();
        self.pump(Some(Duration::ZERO))
    }

    fn syncs_presentation(&self) -> bool {
        self.handler.config.vsync
    }

    fn size(&self) -> (u32, u32) {
        self.handler
            .entry
            .as_ref()
            .map(|entry| {
                let size = entry.with_gpu(|gpu| gpu.size());
                (size.width, size.height)
            })
            .unwrap_or((0, 0))
    }

    fn is_resized(&self) -> bool {
        self.handler.resized
    }

    fn set_resized(&mut self, resized: bool) {
        self.handler.resized = resized;
    }

    fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    fn teardown(&mut self) -> Result<()> {
        if let Some(entry) = self.handler.entry.take() {
            entry.with_window(|w| w.set_visible(false));
            // Gpu drops before the window it borrows.
            drop(entry);
            log::info!("window \"{}\" closed", self.handler.config.title);
        }

        // Let the platform process the destroyed window.
        self.pump(Some(Duration::ZERO))
    }
}

fn build_event_loop() -> Result<EventLoop<()>> {
    #[allow(unused_mut)]
    let mut builder = EventLoop::builder();

    #[cfg(all(
        unix,
        not(any(target_os = "macos", target_os = "ios", target_os = "android"))
    ))]
    {
        winit::platform::x11::EventLoopBuilderExtX11::with_any_thread(&mut builder, true);
        winit::platform::wayland::EventLoopBuilderExtWayland::with_any_thread(&mut builder, true);
    }

    #[cfg(target_os = "windows")]
    {
        winit::platform::windows::EventLoopBuilderExtWindows::with_any_thread(&mut builder, true);
    }

    builder.build().context("failed to create winit EventLoop")
}

/// Top-left position that centers a window of `window` size on a monitor.
fn centered_position(
    monitor_origin: PhysicalPosition<i32>,
    monitor_size: PhysicalSize<u32>,
    window: PhysicalSize<u32>,
) -> PhysicalPosition<i32> {
    let offset = |monitor: u32, window: u32| (i64::from(monitor) - i64::from(window)) / 2;
    PhysicalPosition::new(
        monitor_origin.x + offset(monitor_size.width, window.width) as i32,
        monitor_origin.y + offset(monitor_size.height, window.height) as i32,
    )
}
