//! Wedge engine crate.
//!
//! Owns the platform + GPU runtime pieces used by the demo binaries:
//! window/event-loop runtime, wgpu device layer, frame timing, logging,
//! and the built-in triangle renderers.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod render;
