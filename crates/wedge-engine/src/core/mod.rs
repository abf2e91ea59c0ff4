//! Core engine-facing contracts.
//!
//! Defines the stable interface between the runtime (platform loop) and the
//! demo applications: the `App` trait, its control directives, and the
//! per-frame context handed to `on_frame`.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
