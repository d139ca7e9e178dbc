use anyhow::{Context, Result};
use ouroboros::self_referencing;
use raw_window_handle::{HasWindowHandle, RawWindowHandle};

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalPosition, LogicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::Viewport;
use crate::core::{logical_size, App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputEvent, InputState, KeyState, MouseButtonState};
use crate::render::RenderCtx;
use crate::time::{FrameClock, FrameTime};

/// When the runtime asks the window for a new frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RedrawPolicy {
    /// Redraw after every pass through the event loop.
    Continuous,
    /// Redraw only when a handler calls [`RuntimeCtx::request_redraw`]
    /// (or the window is resized / exposed).
    OnRequest,
}

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Top-left of the window on screen; `None` lets the platform decide.
    pub position: Option<LogicalPosition<f64>>,
    pub redraw: RedrawPolicy,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "sketchpad".to_string(),
            initial_size: LogicalSize::new(600.0, 600.0),
            position: Some(LogicalPosition::new(100.0, 100.0)),
            redraw: RedrawPolicy::OnRequest,
        }
    }
}

/// Runtime context passed to the application.
///
/// Commands are buffered and applied after the current callback returns.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    /// Schedules a redraw. Multiple requests before the next frame coalesce.
    pub fn request_redraw(&mut self) {
        if !self.redraw_requested() {
            self.commands.push(Command::RequestRedraw);
        }
    }

    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }

    pub fn redraw_requested(&self) -> bool {
        self.commands.contains(&Command::RequestRedraw)
    }

    pub fn exit_requested(&self) -> bool {
        self.commands.contains(&Command::Exit)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Command {
    RequestRedraw,
    Exit,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, initializes the GPU and drives `app` until the window
    /// closes.
    ///
    /// Returns the first fatal error (window, GPU or `App::on_init` failure).
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    initialized: bool,
    exited: bool,
    exit_requested: bool,
    fatal: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            window: None,
            initialized: false,
            exited: false,
            exit_requested: false,
            fatal: None,
        }
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let mut attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);
        if let Some(position) = self.config.position {
            attrs = attrs.with_position(position);
        }

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;
        log_window_handle(&window);

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            input_state: InputState::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")
    }

    /// Records a fatal error and stops the loop without running `on_exit`
    /// for an app that never initialized.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        if self.fatal.is_none() {
            self.fatal = Some(err);
        }
        self.shutdown(event_loop);
    }

    fn run_on_exit(&mut self) {
        if self.initialized && !self.exited {
            self.exited = true;
            self.app.on_exit();
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        self.run_on_exit();
        // Drops the GPU before the window it borrows.
        self.window = None;
        event_loop.exit();
    }

    fn apply_commands(&mut self, event_loop: &ActiveEventLoop, ctx: RuntimeCtx) {
        for cmd in ctx.commands {
            match cmd {
                Command::RequestRedraw => {
                    if let Some(entry) = &self.window {
                        entry.with_window(|w| w.request_redraw());
                    }
                }
                Command::Exit => self.exit_requested = true,
            }
        }

        if self.exit_requested {
            self.shutdown(event_loop);
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.exit_requested {
            return;
        }

        let entry = match self.create_window_entry(event_loop) {
            Ok(entry) => entry,
            Err(e) => {
                self.fail(event_loop, e.context("failed to create initial window"));
                return;
            }
        };

        let app = &mut self.app;
        let init = entry.with(|fields| {
            let (w, h) = logical_size(fields.window);
            let rctx = RenderCtx::new(
                fields.gpu.device(),
                fields.gpu.queue(),
                fields.gpu.surface_format(),
                Viewport::new(w, h),
            );
            app.on_init(&rctx)
        });

        if let Err(e) = init {
            self.fail(event_loop, e.context("application initialization failed"));
            return;
        }

        self.initialized = true;
        entry.with_window(|w| w.request_redraw());
        self.window = Some(entry);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            self.shutdown(event_loop);
            return;
        }

        let Some(entry) = self.window.as_ref() else {
            return;
        };

        event_loop.set_control_flow(ControlFlow::Wait);

        let elapsed = entry.with_clock(|c| c.elapsed_secs());
        let mut runtime_ctx = RuntimeCtx::default();
        self.app.on_idle(elapsed, &mut runtime_ctx);

        if self.config.redraw == RedrawPolicy::Continuous {
            runtime_ctx.request_redraw();
        }

        self.apply_commands(event_loop, runtime_ctx);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            self.shutdown(event_loop);
            return;
        }

        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, slot) = (&mut self.app, &mut self.window);

        let Some(entry) = slot.as_mut() else {
            return;
        };
        if entry.with_window(|w| w.id()) != window_id {
            return;
        }

        let mut runtime_ctx = RuntimeCtx::default();

        entry.with_mut(|fields| {
            let Some(ev) = translate_window_event(fields.window, fields.input_state, &event) else {
                return;
            };
            fields.input_state.apply_event(&ev);

            let (w, h) = logical_size(fields.window);
            dispatch_input(app, &ev, Viewport::new(w, h), &mut runtime_ctx);
        });

        // Runtime-managed window lifecycle / resize / redraw handling.
        match &event {
            WindowEvent::CloseRequested => {
                log::debug!("close requested");
                self.shutdown(event_loop);
                return;
            }

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                runtime_ctx.request_redraw();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                runtime_ctx.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                let mut app_control = AppControl::Continue;

                entry.with_mut(|fields| {
                    let ft: FrameTime = fields.clock.tick();

                    let mut ctx = FrameCtx {
                        window: WindowCtx {
                            id: window_id,
                            window: fields.window,
                        },
                        gpu: fields.gpu,
                        input: fields.input_state,
                        time: ft,
                        runtime: &mut runtime_ctx,
                    };

                    app_control = app.on_display(&mut ctx);
                });

                if app_control == AppControl::Exit {
                    runtime_ctx.exit();
                }
            }

            _ => {}
        }

        self.apply_commands(event_loop, runtime_ctx);
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.run_on_exit();
    }
}

/// Routes a translated input event to the matching `App` callback.
///
/// Pointer motion and button releases only update [`InputState`].
fn dispatch_input<A: CoreApp + ?Sized>(
    app: &mut A,
    ev: &InputEvent,
    viewport: Viewport,
    runtime: &mut RuntimeCtx,
) {
    match ev {
        InputEvent::Key(k) if k.state == KeyState::Pressed => app.on_key_down(k, runtime),
        InputEvent::Key(k) => app.on_key_up(k, runtime),
        InputEvent::PointerButton(b) if b.state == MouseButtonState::Pressed => {
            app.on_mouse_down(b, viewport, runtime)
        }
        _ => {}
    }
}

fn log_window_handle(window: &Window) {
    let handle = match window.window_handle() {
        Ok(handle) => handle,
        Err(err) => {
            log::warn!("window handle unavailable: {err}");
            return;
        }
    };

    let kind = match handle.as_raw() {
        RawWindowHandle::Xlib(_) => "Xlib",
        RawWindowHandle::Xcb(_) => "Xcb",
        RawWindowHandle::Wayland(_) => "Wayland",
        RawWindowHandle::Win32(_) => "Win32",
        RawWindowHandle::AppKit(_) => "AppKit",
        RawWindowHandle::UiKit(_) => "UiKit",
        RawWindowHandle::AndroidNdk(_) => "AndroidNdk",
        RawWindowHandle::Web(_) => "Web",
        _ => "other",
    };
    log::debug!("window created ({kind} handle)");
}
