//! Shaded triangle demo.
//!
//! Opens a fixed 640x480 window, builds the camera-uniform triangle
//! pipeline, and redraws one triangle per frame until the window is closed.
//! The camera uniforms (pan/zoom/aspect) intentionally stay at their
//! zero-initialized GPU defaults; see `ShadedTriangle`.

use anyhow::Result;

use wedge_engine::core::{App, AppControl, FrameCtx};
use wedge_engine::device::GpuInit;
use wedge_engine::logging::{init_logging, LoggingConfig};
use wedge_engine::render::triangle::ShadedTriangle;
use wedge_engine::time::FrameStats;
use wedge_engine::window::{LoopMode, Runtime, RuntimeConfig};

struct ShadedDemo {
    triangle: ShadedTriangle,
    stats: FrameStats,
}

impl App for ShadedDemo {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if let Some(fps) = self.stats.record(ctx.time) {
            log::debug!("{fps:.0} fps");
        }

        let triangle = &mut self.triangle;
        ctx.render(wgpu::Color::BLACK, |rctx, target| {
            triangle.render(rctx, target);
        })
    }
}

fn run() -> Result<()> {
    let config = RuntimeConfig {
        title: "wedge: shaded triangle".to_string(),
        loop_mode: LoopMode::Unthrottled,
        ..RuntimeConfig::default()
    };

    let app = ShadedDemo {
        triangle: ShadedTriangle::new(),
        stats: FrameStats::default(),
    };

    Runtime::run(config, GpuInit::unsynchronized(), app)
}

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(e) = run() {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
