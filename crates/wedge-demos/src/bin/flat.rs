//! Flat white triangle demo.
//!
//! Opens a fixed 640x480 window, clears to black, and redraws one white
//! triangle per frame until the window is closed. No uniforms.

use anyhow::Result;

use wedge_engine::core::{App, AppControl, FrameCtx};
use wedge_engine::device::GpuInit;
use wedge_engine::logging::{init_logging, LoggingConfig};
use wedge_engine::render::triangle::FlatTriangle;
use wedge_engine::time::FrameStats;
use wedge_engine::window::{LoopMode, Runtime, RuntimeConfig};

struct FlatDemo {
    triangle: FlatTriangle,
    stats: FrameStats,
}

impl App for FlatDemo {
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
        title: "wedge: flat triangle".to_string(),
        loop_mode: LoopMode::Unthrottled,
        ..RuntimeConfig::default()
    };

    let app = FlatDemo {
        triangle: FlatTriangle::new(),
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
