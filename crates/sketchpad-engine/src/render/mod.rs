//! GPU rendering subsystem.
//!
//! Shapes describe what to draw as [`DrawCall`]s on the CPU; a
//! [`ShaderProgram`] turns them into wgpu commands against a [`Mesh`].
//!
//! Convention:
//! - CPU geometry is in world units.
//! - The vertex shader applies one MVP matrix per draw; no viewport uniform.

mod ctx;
pub mod draw;
pub mod mesh;
pub mod program;
pub mod vertex;

pub use ctx::{RenderCtx, RenderTarget};
pub use draw::{DrawCall, Topology};
pub use mesh::Mesh;
pub use program::{ProgramStatus, ShaderProgram, UniformLocation, COLOR_WGSL, MVP_UNIFORM};
pub use vertex::{ColorVertex, VertexLayout};
