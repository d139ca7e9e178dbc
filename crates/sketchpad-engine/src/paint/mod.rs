//! Color representation shared by vertex data and frame clears.

pub mod color;

pub use color::Color;
