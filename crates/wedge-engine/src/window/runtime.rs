use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::time::FrameClock;

/// Frame pacing strategy, selected once at process start.
///
/// Both strategies terminate the same way: a quit signal observed between
/// ticks winds the event loop down and `Runtime::run` returns.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum LoopMode {
    /// The platform's redraw scheduling paces frames, typically aligned
    /// with display refresh (the animation-frame-callback strategy).
    #[default]
    HostPaced,

    /// The event loop polls continuously and redraws as fast as
    /// presentation allows. Combined with immediate present mode this is
    /// the unthrottled busy loop; the runtime inserts no delay of its own.
    Unthrottled,
}

impl LoopMode {
    fn control_flow(self) -> ControlFlow {
        match self {
            LoopMode::HostPaced => ControlFlow::Wait,
            LoopMode::Unthrottled => ControlFlow::Poll,
        }
    }
}

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,
    pub loop_mode: LoopMode,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "wedge".to_string(),
            initial_size: LogicalSize::new(640.0, 480.0),
            resizable: false,
            loop_mode: LoopMode::default(),
        }
    }
}

/// Entry point for the runtime.
///
/// Runs the event loop to completion. Returns `Ok(())` after an orderly
/// quit-event shutdown; returns the underlying error when bootstrap (window,
/// surface, adapter, device) or the event loop itself fails, so `main` can
/// log it and exit non-zero.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        // Bootstrap failures are detected inside winit callbacks, which
        // cannot return errors; they are parked here until the loop exits.
        if let Some(err) = state.fatal.take() {
            return Err(err);
        }

        Ok(())
    }
}

#[self_referencing]
struct WindowEntry {
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

    // Exactly one window for the lifetime of the process.
    entry: Option<WindowEntry>,
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
            entry: None,
            exit_requested: false,
            fatal: None,
        }
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    /// Parks a fatal error and requests loop shutdown.
    ///
    /// The error is returned from `Runtime::run` once the loop exits, so
    /// `main` logs it and exits non-zero; a normal quit leaves `fatal`
    /// empty and `run` returns `Ok`. The first error wins.
    fn fail(&mut self, err: anyhow::Error) {
        if self.fatal.is_none() {
            self.fatal = Some(err);
        }
        self.request_exit();
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowId> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(self.config.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let id = window.id();
        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        self.entry = Some(entry);
        Ok(id)
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        // No log here: the error reaches `main` via `Runtime::run`, which
        // is the one place bootstrap failures get reported.
        if let Err(e) = self.create_window_entry(event_loop) {
            self.fail(e);
            event_loop.exit();
            return;
        }

        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(self.config.loop_mode.control_flow());

        // Continuous redraw: one frame per event-loop cycle in either mode.
        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, entry) = (&mut self.app, &mut self.entry);

        let Some(entry) = entry else {
            return;
        };
        if entry.with_window(|w| w.id()) != window_id {
            return;
        }

        // The app sees every event before the runtime acts on it. A quit
        // signal here halts before any drawing happens this tick.
        if app.on_window_event(window_id, &event) == AppControl::Exit {
            self.request_exit();
            event_loop.exit();
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                log::info!("quit requested; shutting down");
                self.entry = None;
                self.request_exit();
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested => {
                let mut app_control = AppControl::Continue;
                let mut render_error = None;

                entry.with_mut(|fields| {
                    let ft = fields.clock.tick();

                    let mut ctx = FrameCtx {
                        window: WindowCtx {
                            id: window_id,
                            window: fields.window,
                        },
                        gpu: fields.gpu,
                        time: ft,
                        fatal: None,
                    };

                    app_control = app.on_frame(&mut ctx);
                    render_error = ctx.fatal.take();
                });

                // A fatal render error exits with code 1; a plain Exit is
                // the normal quit path and exits with code 0.
                if let Some(err) = render_error {
                    self.fail(err);
                    event_loop.exit();
                } else if app_control == AppControl::Exit {
                    self.request_exit();
                    event_loop.exit();
                }
            }

            _ => {}
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── config defaults ───────────────────────────────────────────────────

    #[test]
    fn default_config_is_fixed_640_by_480() {
        let config = RuntimeConfig::default();
        assert_eq!(config.initial_size, LogicalSize::new(640.0, 480.0));
        assert!(!config.resizable);
    }

    #[test]
    fn default_loop_mode_is_host_paced() {
        assert_eq!(RuntimeConfig::default().loop_mode, LoopMode::HostPaced);
    }

    // ── loop mode mapping ─────────────────────────────────────────────────

    #[test]
    fn host_paced_waits_for_the_platform() {
        assert_eq!(LoopMode::HostPaced.control_flow(), ControlFlow::Wait);
    }

    #[test]
    fn unthrottled_polls() {
        assert_eq!(LoopMode::Unthrottled.control_flow(), ControlFlow::Poll);
    }

    // ── fatal vs normal shutdown ──────────────────────────────────────────

    struct NullApp;

    impl CoreApp for NullApp {
        fn on_frame(&mut self, _ctx: &mut FrameCtx<'_, '_>) -> AppControl {
            AppControl::Continue
        }
    }

    fn state() -> AppState<NullApp> {
        AppState::new(RuntimeConfig::default(), GpuInit::default(), NullApp)
    }

    #[test]
    fn fail_parks_the_error_for_run() {
        let mut state = state();
        state.fail(anyhow::anyhow!("surface out of memory"));

        assert!(state.exit_requested);
        // Same extraction `Runtime::run` performs after the loop exits.
        let err = state.fatal.take().expect("fatal error must reach run()");
        assert!(err.to_string().contains("out of memory"));
    }

    #[test]
    fn fail_keeps_the_first_error() {
        let mut state = state();
        state.fail(anyhow::anyhow!("first"));
        state.fail(anyhow::anyhow!("second"));

        let err = state.fatal.take().unwrap();
        assert_eq!(err.to_string(), "first");
    }

    #[test]
    fn normal_quit_leaves_no_fatal_error() {
        let mut state = state();
        state.request_exit();

        assert!(state.exit_requested);
        assert!(state.fatal.is_none());
    }
}
