//! Time subsystem.
//!
//! One `FrameClock` per runtime; `tick()` once per presented frame yields a
//! `FrameTime` snapshot. `FrameStats` aggregates snapshots into a periodic
//! frame-rate readout for the unthrottled loop mode.

mod frame_clock;
mod stats;

pub use frame_clock::{FrameClock, FrameTime};
pub use stats::FrameStats;
