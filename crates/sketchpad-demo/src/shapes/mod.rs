//! The two things the sketchpad draws.
//!
//! Each shape keeps a CPU model that produces [`DrawCall`]s and, once
//! `create` has run, the GPU mesh those calls are issued against.
//!
//! [`DrawCall`]: sketchpad_engine::render::DrawCall

mod line_strip;
mod triangle;

pub use line_strip::{LineStrip, StripState, MAX_POINTS, STROKE_COLOR};
pub use triangle::Triangle;
