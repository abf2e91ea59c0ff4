//! Window + event-loop runtime.
//!
//! One window, one GPU context, one loop. The runtime owns the winit event
//! loop, forwards events to the application, and drives one frame per
//! redraw. Pacing is selected once at startup via [`LoopMode`].

mod runtime;

pub use runtime::{LoopMode, Runtime, RuntimeConfig};
