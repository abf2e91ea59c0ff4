//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipeline, buffers) and issue draw
//! commands via wgpu. Geometry lives in normalized device coordinates; the
//! vertex shaders do no viewport math.

mod ctx;
pub mod triangle;

pub use ctx::{RenderCtx, RenderTarget};
