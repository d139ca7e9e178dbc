//! Coordinate types shared by the runtime, camera and renderers.
//!
//! Spaces in play:
//! - window space: logical pixels, origin top-left, +Y down
//! - normalized device coordinates: `[-1, 1]` on both axes, +Y up
//! - world space: whatever the camera window covers
//!
//! [`Viewport::pixel_to_ndc`] converts window space to NDC; the camera owns
//! the NDC <-> world step.

mod vec2;
mod viewport;

pub use vec2::Vec2;
pub use viewport::Viewport;
