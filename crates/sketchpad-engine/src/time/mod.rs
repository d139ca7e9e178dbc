//! Frame timing.
//!
//! One `FrameClock` per runtime: `tick()` once per presented frame for the
//! delta, `elapsed_secs()` for the animation time passed to idle handlers.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
