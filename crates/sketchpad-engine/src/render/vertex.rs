use bytemuck::{Pod, Zeroable};

use crate::coords::Vec2;
use crate::paint::Color;

/// Interleaved position + color vertex, 5 floats.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ColorVertex {
    pub pos: [f32; 2],
    pub color: [f32; 3],
}

impl ColorVertex {
    pub const STRIDE: u64 = std::mem::size_of::<ColorVertex>() as u64;

    #[inline]
    pub fn new(pos: Vec2, color: Color) -> Self {
        Self {
            pos: pos.to_array(),
            color: color.to_rgb_array(),
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::from(self.pos)
    }
}

/// How positions and colors are laid out across vertex buffers.
///
/// Both layouts feed the same shader inputs: location 0 is the `vec2`
/// position, location 1 the `vec3` color.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum VertexLayout {
    /// One buffer of [`ColorVertex`].
    Interleaved,
    /// Buffer 0 holds positions, buffer 1 holds colors.
    Split,
}

const POSITION_ATTR: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
const COLOR_ATTR: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];
const INTERLEAVED_ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
    0 => Float32x2, // position
    1 => Float32x3  // color
];

impl VertexLayout {
    pub const ALL: [VertexLayout; 2] = [VertexLayout::Interleaved, VertexLayout::Split];

    /// Number of vertex buffer slots the layout binds.
    #[inline]
    pub fn buffer_count(self) -> usize {
        match self {
            VertexLayout::Interleaved => 1,
            VertexLayout::Split => 2,
        }
    }

    pub fn buffers(self) -> Vec<wgpu::VertexBufferLayout<'static>> {
        const POS_STRIDE: u64 = std::mem::size_of::<[f32; 2]>() as u64;
        const COL_STRIDE: u64 = std::mem::size_of::<[f32; 3]>() as u64;

        match self {
            VertexLayout::Interleaved => vec![slot(ColorVertex::STRIDE, &INTERLEAVED_ATTRS)],
            VertexLayout::Split => vec![
                slot(POS_STRIDE, &POSITION_ATTR),
                slot(COL_STRIDE, &COLOR_ATTR),
            ],
        }
    }
}

fn slot(
    array_stride: u64,
    attributes: &'static [wgpu::VertexAttribute],
) -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleaved_vertex_is_five_floats() {
        assert_eq!(ColorVertex::STRIDE, 20);
        let v = ColorVertex::new(Vec2::new(1.0, 2.0), Color::YELLOW);
        let floats: &[f32; 5] = bytemuck::cast_ref(&v);
        assert_eq!(floats, &[1.0, 2.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn interleaved_color_follows_position() {
        let [pos, color] = INTERLEAVED_ATTRS;
        assert_eq!((pos.shader_location, pos.offset), (0, 0));
        assert_eq!((color.shader_location, color.offset), (1, 8));
    }

    #[test]
    fn split_layout_uses_two_tightly_packed_slots() {
        let buffers = VertexLayout::Split.buffers();
        assert_eq!(buffers.len(), VertexLayout::Split.buffer_count());
        assert_eq!(buffers[0].array_stride, 8);
        assert_eq!(buffers[1].array_stride, 12);
        assert_eq!(buffers[1].attributes[0].shader_location, 1);
    }
}
