use anyhow::{Result, ensure};
use wgpu::util::DeviceExt;

use crate::math::Mat4;

use super::program::{ShaderProgram, UniformLocation};
use super::vertex::{ColorVertex, VertexLayout};
use super::RenderCtx;

/// GPU-side vertex storage plus the transform uniform a draw of it uses.
///
/// Static meshes are uploaded once at creation. Dynamic meshes reserve
/// `capacity` vertices and are rewritten whole with [`upload`](Self::upload).
pub struct Mesh {
    label: String,
    layout: VertexLayout,
    buffers: Vec<wgpu::Buffer>,
    capacity: u32,
    len: u32,
    mvp_ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl Mesh {
    /// Uploads positions and colors into two separate, immutable buffers.
    pub fn split_static(
        ctx: &RenderCtx<'_>,
        program: &ShaderProgram,
        label: &str,
        positions: &[[f32; 2]],
        colors: &[[f32; 3]],
    ) -> Result<Self> {
        ensure!(
            positions.len() == colors.len(),
            "{label}: {} positions but {} colors",
            positions.len(),
            colors.len()
        );
        let len = u32::try_from(positions.len())?;

        let position_vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} positions")),
            contents: bytemuck::cast_slice(positions),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let color_vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} colors")),
            contents: bytemuck::cast_slice(colors),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Ok(Self::assemble(
            ctx,
            program,
            label,
            VertexLayout::Split,
            vec![position_vbo, color_vbo],
            len,
            len,
        ))
    }

    /// Reserves an interleaved buffer for up to `capacity` vertices, initially empty.
    pub fn interleaved_dynamic(
        ctx: &RenderCtx<'_>,
        program: &ShaderProgram,
        label: &str,
        capacity: u32,
    ) -> Result<Self> {
        ensure!(capacity > 0, "{label}: dynamic mesh needs a non-zero capacity");

        let vbo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label} vertices")),
            size: ColorVertex::STRIDE * capacity as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self::assemble(
            ctx,
            program,
            label,
            VertexLayout::Interleaved,
            vec![vbo],
            capacity,
            0,
        ))
    }

    fn assemble(
        ctx: &RenderCtx<'_>,
        program: &ShaderProgram,
        label: &str,
        layout: VertexLayout,
        buffers: Vec<wgpu::Buffer>,
        capacity: u32,
        len: u32,
    ) -> Self {
        let mvp_ubo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} mvp ubo")),
            contents: bytemuck::bytes_of(&Mat4::IDENTITY),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} bind group")),
            layout: program.bind_group_layout(),
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: mvp_ubo.as_entire_binding(),
            }],
        });

        Self {
            label: label.to_owned(),
            layout,
            buffers,
            capacity,
            len,
            mvp_ubo,
            bind_group,
        }
    }

    /// Replaces the whole vertex contents of an interleaved mesh.
    pub fn upload(&mut self, queue: &wgpu::Queue, vertices: &[ColorVertex]) -> Result<()> {
        ensure!(
            self.layout == VertexLayout::Interleaved,
            "{}: only interleaved meshes can be re-uploaded",
            self.label
        );
        let len = u32::try_from(vertices.len())?;
        ensure!(
            len <= self.capacity,
            "{}: {len} vertices exceed capacity {}",
            self.label,
            self.capacity
        );

        if !vertices.is_empty() {
            queue.write_buffer(&self.buffers[0], 0, bytemuck::cast_slice(vertices));
        }
        self.len = len;
        Ok(())
    }

    pub(crate) fn write_uniform(&self, queue: &wgpu::Queue, location: UniformLocation, mvp: &Mat4) {
        debug_assert_eq!(location, UniformLocation(0));
        queue.write_buffer(&self.mvp_ubo, 0, bytemuck::bytes_of(mvp));
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn layout(&self) -> VertexLayout {
        self.layout
    }

    /// Number of valid vertices.
    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub(crate) fn vertex_buffers(&self) -> &[wgpu::Buffer] {
        &self.buffers
    }

    pub(crate) fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
