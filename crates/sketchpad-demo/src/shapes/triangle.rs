use anyhow::Result;

use sketchpad_engine::camera::Camera2D;
use sketchpad_engine::coords::Vec2;
use sketchpad_engine::math::Mat4;
use sketchpad_engine::paint::Color;
use sketchpad_engine::render::{DrawCall, Mesh, RenderCtx, ShaderProgram, Topology};

const POSITIONS: [[f32; 2]; 3] = [[-8.0, -8.0], [-6.0, 10.0], [8.0, -2.0]];
const COLORS: [[f32; 3]; 3] = [
    Color::RED.to_rgb_array(),
    Color::GREEN.to_rgb_array(),
    Color::BLUE.to_rgb_array(),
];

/// Scale then translate, applied to the triangle before the camera.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TriangleTransform {
    pub scale: Vec2,
    pub translation: Vec2,
}

impl TriangleTransform {
    pub const IDENTITY: TriangleTransform = TriangleTransform {
        scale: Vec2::new(1.0, 1.0),
        translation: Vec2::zero(),
    };

    /// `scale * translation`.
    pub fn model(&self) -> Mat4 {
        Mat4::scale(self.scale.x, self.scale.y)
            * Mat4::translation(self.translation.x, self.translation.y)
    }
}

impl Default for TriangleTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Time-driven triangle transform; `t` is elapsed seconds.
pub trait TriangleMotion {
    fn transform_at(&self, t: f32) -> TriangleTransform;
}

/// Keeps the triangle where its vertices put it.
#[derive(Debug, Copy, Clone, Default)]
pub struct Still;

impl TriangleMotion for Still {
    fn transform_at(&self, _t: f32) -> TriangleTransform {
        TriangleTransform::IDENTITY
    }
}

impl<F> TriangleMotion for F
where
    F: Fn(f32) -> TriangleTransform,
{
    fn transform_at(&self, t: f32) -> TriangleTransform {
        self(t)
    }
}

/// Fixed red/green/blue triangle with positions and colors in separate buffers.
pub struct Triangle {
    transform: TriangleTransform,
    motion: Box<dyn TriangleMotion>,
    mesh: Option<Mesh>,
}

impl Triangle {
    pub fn new() -> Self {
        Self::with_motion(Still)
    }

    pub fn with_motion(motion: impl TriangleMotion + 'static) -> Self {
        Self {
            transform: motion.transform_at(0.0),
            motion: Box::new(motion),
            mesh: None,
        }
    }

    /// Uploads the geometry. Later calls keep the existing mesh.
    pub fn create(&mut self, ctx: &RenderCtx<'_>, program: &ShaderProgram) -> Result<()> {
        if self.mesh.is_some() {
            log::warn!("triangle already created");
            return Ok(());
        }
        self.mesh = Some(Mesh::split_static(ctx, program, "triangle", &POSITIONS, &COLORS)?);
        Ok(())
    }

    #[cfg(test)]
    pub fn is_created(&self) -> bool {
        self.mesh.is_some()
    }

    pub fn animate(&mut self, t: f32) {
        self.transform = self.motion.transform_at(t);
    }

    #[cfg(test)]
    pub fn transform(&self) -> TriangleTransform {
        self.transform
    }

    pub fn model(&self) -> Mat4 {
        self.transform.model()
    }

    /// The whole triangle, transformed by `model * view * projection`.
    pub fn draw_call(&self, camera: &Camera2D) -> DrawCall {
        DrawCall {
            topology: Topology::TriangleList,
            vertices: 0..POSITIONS.len() as u32,
            mvp: self.model() * camera.view() * camera.projection(),
        }
    }

    pub fn draw(
        &self,
        ctx: &RenderCtx<'_>,
        pass: &mut wgpu::RenderPass<'_>,
        program: &ShaderProgram,
        camera: &Camera2D,
    ) {
        let Some(mesh) = &self.mesh else {
            log::debug!("triangle drawn before create; skipped");
            return;
        };
        program.draw(ctx.queue, pass, mesh, &self.draw_call(camera));
    }
}

impl Default for Triangle {
    fn default() -> Self {
        Self::new()
    }
}
