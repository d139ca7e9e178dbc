//! Matrix and vector primitives.
//!
//! Row-major storage, row-vector convention (`v * M`). Transform chains are
//! written in application order: `model * view * projection`.

mod mat4;
mod vec4;

pub use mat4::Mat4;
pub use vec4::{dot, Vec4};
