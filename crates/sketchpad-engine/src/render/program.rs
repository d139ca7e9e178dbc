use std::collections::HashMap;
use std::num::NonZeroU64;

use anyhow::{Result, bail};

use crate::math::Mat4;

use super::draw::{DrawCall, Topology};
use super::mesh::Mesh;
use super::vertex::VertexLayout;
use super::RenderCtx;

/// Name of the transform uniform every program exposes.
pub const MVP_UNIFORM: &str = "MVP";

/// Built-in WGSL source for flat per-vertex color.
pub const COLOR_WGSL: &str = include_str!("shaders/color.wgsl");

const MVP_SIZE: u64 = std::mem::size_of::<Mat4>() as u64;

/// Binding slot of a uniform inside bind group 0.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UniformLocation(pub u32);

/// Outcome of compiling and linking a program.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgramStatus {
    Linked,
    CompileFailed(String),
    LinkFailed(String),
}

/// A compiled shader plus one render pipeline per (topology, vertex layout).
///
/// Compile and link diagnostics are captured with wgpu error scopes. A
/// failing shader does not abort startup: the program is kept in an unlinked
/// state, `uniform_location` answers `None`, and draws through it are skipped.
pub struct ShaderProgram {
    label: String,
    bind_group_layout: wgpu::BindGroupLayout,
    pipelines: HashMap<(Topology, VertexLayout), wgpu::RenderPipeline>,
    status: ProgramStatus,
}

impl ShaderProgram {
    /// Builds the default per-vertex color program.
    pub fn color(ctx: &RenderCtx<'_>) -> Result<Self> {
        Self::build(ctx, "sketchpad color", COLOR_WGSL)
    }

    /// Compiles `wgsl` (entry points `vs_main` / `fs_main`) and links a
    /// pipeline for every topology and vertex layout.
    ///
    /// Only out-of-memory is fatal; shader and pipeline validation errors are
    /// logged and recorded in [`status`](Self::status).
    pub fn build(ctx: &RenderCtx<'_>, label: &str, wgsl: &str) -> Result<Self> {
        let device = ctx.device;

        // Scopes are guards popped in LIFO order; dropping one unpopped loses its errors.
        let oom_scope = device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("{label} bgl")),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(MVP_SIZE),
                },
                count: None,
            }],
        });

        let compile_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{label} shader")),
            source: wgpu::ShaderSource::Wgsl(wgsl.into()),
        });
        let compile_error = pollster::block_on(compile_scope.pop());

        let mut pipelines = HashMap::new();
        let status = match compile_error {
            Some(err) => {
                log::error!("{label}: shader compilation failed!\n{err}");
                ProgramStatus::CompileFailed(err.to_string())
            }
            None => {
                let link_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
                let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some(&format!("{label} pipeline layout")),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });
                for topology in Topology::ALL {
                    for vertex_layout in VertexLayout::ALL {
                        let pipeline = create_pipeline(
                            ctx,
                            label,
                            &shader,
                            &layout,
                            topology,
                            vertex_layout,
                        );
                        pipelines.insert((topology, vertex_layout), pipeline);
                    }
                }
                match pollster::block_on(link_scope.pop()) {
                    Some(err) => {
                        log::error!("{label}: failed to link shader program!\n{err}");
                        pipelines.clear();
                        ProgramStatus::LinkFailed(err.to_string())
                    }
                    None => ProgramStatus::Linked,
                }
            }
        };

        if let Some(err) = pollster::block_on(oom_scope.pop()) {
            bail!("{label}: out of memory while building shader program: {err}");
        }

        if status == ProgramStatus::Linked {
            log::debug!("{label}: linked {} pipelines", pipelines.len());
        }

        Ok(Self {
            label: label.to_owned(),
            bind_group_layout,
            pipelines,
            status,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn status(&self) -> &ProgramStatus {
        &self.status
    }

    #[inline]
    pub fn is_linked(&self) -> bool {
        self.status == ProgramStatus::Linked
    }

    /// Looks up a uniform by name. Unknown names and unlinked programs yield `None`.
    pub fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        if !self.is_linked() {
            return None;
        }
        (name == MVP_UNIFORM).then_some(UniformLocation(0))
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    /// Uploads `call.mvp` into the mesh's transform slot and records the draw.
    ///
    /// When the program has no usable `MVP` uniform the draw is skipped with a
    /// warning. The vertex range is clamped to what the mesh actually holds.
    /// Returns whether anything was recorded.
    pub fn draw(
        &self,
        queue: &wgpu::Queue,
        pass: &mut wgpu::RenderPass<'_>,
        mesh: &Mesh,
        call: &DrawCall,
    ) -> bool {
        let Some(location) = self.uniform_location(MVP_UNIFORM) else {
            log::warn!("uniform {MVP_UNIFORM} cannot be set");
            return false;
        };
        let Some(pipeline) = self.pipelines.get(&(call.topology, mesh.layout())) else {
            log::warn!(
                "{}: no pipeline for {:?}/{:?}",
                self.label,
                call.topology,
                mesh.layout()
            );
            return false;
        };

        let end = call.vertices.end.min(mesh.len());
        if end < call.vertices.end {
            log::debug!(
                "{}: draw range {:?} clamped to {} vertices",
                mesh.label(),
                call.vertices,
                mesh.len()
            );
        }
        if call.vertices.start >= end {
            return false;
        }

        mesh.write_uniform(queue, location, &call.mvp);

        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, mesh.bind_group(), &[]);
        for (slot, buffer) in mesh.vertex_buffers().iter().enumerate() {
            pass.set_vertex_buffer(slot as u32, buffer.slice(..));
        }
        pass.draw(call.vertices.start..end, 0..1);
        true
    }
}

fn create_pipeline(
    ctx: &RenderCtx<'_>,
    label: &str,
    shader: &wgpu::ShaderModule,
    layout: &wgpu::PipelineLayout,
    topology: Topology,
    vertex_layout: VertexLayout,
) -> wgpu::RenderPipeline {
    let buffers = vertex_layout.buffers();

    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{label} pipeline {topology:?}/{vertex_layout:?}")),
        layout: Some(layout),

        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &buffers,
        },

        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: topology.to_wgpu(),
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),

        multiview_mask: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Vec2, Viewport};
    use crate::paint::Color;
    use crate::render::{ColorVertex, RenderTarget};

    const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    fn noop_gpu() -> (wgpu::Device, wgpu::Queue) {
        wgpu::Device::noop(&Default::default())
    }

    fn ctx<'a>(device: &'a wgpu::Device, queue: &'a wgpu::Queue) -> RenderCtx<'a> {
        RenderCtx::new(device, queue, FORMAT, Viewport::new(600.0, 600.0))
    }

    fn target_view(device: &wgpu::Device) -> wgpu::TextureView {
        device
            .create_texture(&wgpu::TextureDescriptor {
                label: Some("test target"),
                size: wgpu::Extent3d {
                    width: 4,
                    height: 4,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            })
            .create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn strip_mesh(ctx: &RenderCtx<'_>, program: &ShaderProgram) -> Mesh {
        let mut mesh = Mesh::interleaved_dynamic(ctx, program, "strip", 4).expect("mesh");
        let vertices = [
            ColorVertex::new(Vec2::new(0.0, 0.0), Color::YELLOW),
            ColorVertex::new(Vec2::new(1.0, 0.0), Color::YELLOW),
            ColorVertex::new(Vec2::new(1.0, 1.0), Color::YELLOW),
        ];
        mesh.upload(ctx.queue, &vertices).expect("fits");
        mesh
    }

    fn record(ctx: &RenderCtx<'_>, program: &ShaderProgram, mesh: &Mesh, call: &DrawCall) -> bool {
        let view = target_view(ctx.device);
        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });
        let mut target = RenderTarget::new(&mut encoder, &view);
        let mut pass = target.begin_pass("test pass");
        program.draw(ctx.queue, &mut pass, mesh, call)
    }

    fn strip_call(vertices: std::ops::Range<u32>) -> DrawCall {
        DrawCall {
            topology: Topology::LineStrip,
            vertices,
            mvp: Mat4::IDENTITY,
        }
    }

    // ── build ─────────────────────────────────────────────────────────────

    #[test]
    fn builtin_color_program_links() {
        let (device, queue) = noop_gpu();
        let program = ShaderProgram::color(&ctx(&device, &queue)).expect("no oom");
        assert_eq!(program.status(), &ProgramStatus::Linked);
        assert!(program.is_linked());
        assert_eq!(program.uniform_location(MVP_UNIFORM), Some(UniformLocation(0)));
    }

    #[test]
    fn unknown_uniform_has_no_location() {
        let (device, queue) = noop_gpu();
        let program = ShaderProgram::color(&ctx(&device, &queue)).expect("no oom");
        assert_eq!(program.uniform_location("model"), None);
    }

    #[test]
    fn broken_source_is_kept_unlinked() {
        let (device, queue) = noop_gpu();
        let program = ShaderProgram::build(&ctx(&device, &queue), "bad", "fn nope(").expect("no oom");
        assert!(matches!(program.status(), ProgramStatus::CompileFailed(_)));
        assert!(!program.is_linked());
        assert_eq!(program.uniform_location(MVP_UNIFORM), None);
        assert_eq!(program.label(), "bad");
    }

    // ── draw ──────────────────────────────────────────────────────────────

    #[test]
    fn linked_program_records_draw() {
        let (device, queue) = noop_gpu();
        let ctx = ctx(&device, &queue);
        let program = ShaderProgram::color(&ctx).expect("no oom");
        let mesh = strip_mesh(&ctx, &program);
        assert!(record(&ctx, &program, &mesh, &strip_call(0..3)));
    }

    #[test]
    fn draw_through_unlinked_program_is_skipped() {
        let (device, queue) = noop_gpu();
        let ctx = ctx(&device, &queue);
        let program = ShaderProgram::build(&ctx, "bad", "fn nope(").expect("no oom");
        let mesh = strip_mesh(&ctx, &program);
        assert!(!record(&ctx, &program, &mesh, &strip_call(0..3)));
    }

    #[test]
    fn range_past_mesh_end_is_clamped() {
        let (device, queue) = noop_gpu();
        let ctx = ctx(&device, &queue);
        let program = ShaderProgram::color(&ctx).expect("no oom");
        let mesh = strip_mesh(&ctx, &program);
        assert!(record(&ctx, &program, &mesh, &strip_call(0..10)));
        assert!(!record(&ctx, &program, &mesh, &strip_call(3..10)));
    }
}
