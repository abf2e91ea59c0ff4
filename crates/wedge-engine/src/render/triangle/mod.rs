//! Fixed-triangle renderers, one per demo variant.
//!
//! Both renderers draw the same thing structurally: a single non-indexed
//! draw call of 3 vertices from an immutable vertex buffer uploaded once.
//! They differ in vertex layout and shading:
//! - [`ShadedTriangle`]: 3-float positions, pan/zoom/aspect camera uniform
//!   (deliberately never written), color derived from position.
//! - [`FlatTriangle`]: 2-float positions, opaque white fragments.

mod common;
mod flat;
mod shaded;

pub use flat::FlatTriangle;
pub use shaded::ShadedTriangle;
