use std::ops::Range;

use crate::math::Mat4;

/// Primitive assembly for a draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Topology {
    /// Every three vertices form a filled triangle.
    TriangleList,
    /// Consecutive vertices are joined by segments; one vertex draws nothing.
    LineStrip,
}

impl Topology {
    pub const ALL: [Topology; 2] = [Topology::TriangleList, Topology::LineStrip];

    #[inline]
    pub fn to_wgpu(self) -> wgpu::PrimitiveTopology {
        match self {
            Topology::TriangleList => wgpu::PrimitiveTopology::TriangleList,
            Topology::LineStrip => wgpu::PrimitiveTopology::LineStrip,
        }
    }
}

/// A fully resolved draw: what to assemble, which vertices, which transform.
///
/// Shapes produce these on the CPU; [`ShaderProgram::draw`](super::ShaderProgram::draw)
/// turns them into GPU commands.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub topology: Topology,
    pub vertices: Range<u32>,
    pub mvp: Mat4,
}

impl DrawCall {
    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertices.end.saturating_sub(self.vertices.start)
    }
}
