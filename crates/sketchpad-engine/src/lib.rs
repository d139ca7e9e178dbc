//! Sketchpad engine crate.
//!
//! Platform + GPU runtime pieces for small 2D drawing programs: a winit
//! window loop, a wgpu device layer, row-vector matrix math, an orthographic
//! camera and a tiny shader/mesh renderer.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod math;
pub mod camera;
pub mod render;
pub mod paint;
