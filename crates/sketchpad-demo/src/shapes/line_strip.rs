use std::fmt;

use anyhow::Result;

use sketchpad_engine::camera::Camera2D;
use sketchpad_engine::paint::Color;
use sketchpad_engine::render::{ColorVertex, DrawCall, Mesh, RenderCtx, ShaderProgram, Topology};

/// Most points a strip accepts.
pub const MAX_POINTS: usize = 20;

/// Color of every stroke vertex.
pub const STROKE_COLOR: Color = Color::YELLOW;

/// Returned by [`LineStrip::add_point`] once the strip is full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityExceeded {
    pub capacity: usize,
}

impl fmt::Display for CapacityExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line strip is full ({} points)", self.capacity)
    }
}

impl std::error::Error for CapacityExceeded {}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StripState {
    Empty,
    Growing,
    Full,
}

/// Append-only polyline built from clicks.
///
/// Points arrive in normalized device coordinates and are stored in world
/// space, so later camera motion moves the drawing with the world. After each
/// accepted point the whole vertex array is re-uploaded on the next draw.
pub struct LineStrip {
    vertices: Vec<ColorVertex>,
    max_points: usize,
    color: Color,
    dirty: bool,
    mesh: Option<Mesh>,
}

impl LineStrip {
    pub fn new() -> Self {
        Self::with_capacity(MAX_POINTS, STROKE_COLOR)
    }

    pub fn with_capacity(max_points: usize, color: Color) -> Self {
        Self {
            vertices: Vec::with_capacity(max_points),
            max_points,
            color,
            dirty: false,
            mesh: None,
        }
    }

    /// Reserves GPU storage for `capacity()` vertices. Later calls keep the existing mesh.
    pub fn create(&mut self, ctx: &RenderCtx<'_>, program: &ShaderProgram) -> Result<()> {
        if self.mesh.is_some() {
            log::warn!("line strip already created");
            return Ok(());
        }
        let capacity = u32::try_from(self.max_points)?;
        self.mesh = Some(Mesh::interleaved_dynamic(ctx, program, "line strip", capacity)?);
        self.dirty = !self.vertices.is_empty();
        Ok(())
    }

    #[cfg(test)]
    pub fn is_created(&self) -> bool {
        self.mesh.is_some()
    }

    /// Appends the world-space point under NDC `(ndc_x, ndc_y)`.
    ///
    /// Returns the new point count, or [`CapacityExceeded`] without touching
    /// the stored points once the strip is full.
    pub fn add_point(
        &mut self,
        ndc_x: f32,
        ndc_y: f32,
        camera: &Camera2D,
    ) -> Result<usize, CapacityExceeded> {
        if self.vertices.len() >= self.max_points {
            return Err(CapacityExceeded {
                capacity: self.max_points,
            });
        }

        let world = camera.ndc_to_world(ndc_x, ndc_y);
        self.vertices.push(ColorVertex::new(world, self.color));
        self.dirty = true;
        Ok(self.vertices.len())
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.max_points
    }

    #[cfg(test)]
    pub fn vertices(&self) -> &[ColorVertex] {
        &self.vertices
    }

    pub fn state(&self) -> StripState {
        match self.vertices.len() {
            0 => StripState::Empty,
            n if n >= self.max_points => StripState::Full,
            _ => StripState::Growing,
        }
    }

    /// `None` while empty. Vertices are already in world space, so no model
    /// transform is applied.
    pub fn draw_call(&self, camera: &Camera2D) -> Option<DrawCall> {
        if self.vertices.is_empty() {
            return None;
        }
        Some(DrawCall {
            topology: Topology::LineStrip,
            vertices: 0..self.vertices.len() as u32,
            mvp: camera.view() * camera.projection(),
        })
    }

    /// Uploads pending points, then records the strip.
    pub fn draw(
        &mut self,
        ctx: &RenderCtx<'_>,
        pass: &mut wgpu::RenderPass<'_>,
        program: &ShaderProgram,
        camera: &Camera2D,
    ) {
        let Some(call) = self.draw_call(camera) else {
            return;
        };
        let Some(mesh) = self.mesh.as_mut() else {
            log::debug!("line strip drawn before create; skipped");
            return;
        };

        if self.dirty {
            if let Err(err) = mesh.upload(ctx.queue, &self.vertices) {
                log::error!("{err:#}");
                return;
            }
            self.dirty = false;
        }

        program.draw(ctx.queue, pass, mesh, &call);
    }
}

impl Default for LineStrip {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketchpad_engine::camera::CameraParams;
    use sketchpad_engine::coords::Vec2;

    fn filled(n: usize, camera: &Camera2D) -> LineStrip {
        let mut strip = LineStrip::new();
        for i in 0..n {
            let t = i as f32 / MAX_POINTS as f32;
            strip.add_point(t, -t, camera).expect("room left");
        }
        strip
    }

    // ── growth ────────────────────────────────────────────────────────────

    #[test]
    fn fresh_strip_is_empty_and_not_drawn() {
        let strip = LineStrip::new();
        assert_eq!(strip.len(), 0);
        assert_eq!(strip.state(), StripState::Empty);
        assert!(strip.draw_call(&Camera2D::default()).is_none());
    }

    #[test]
    fn add_point_returns_new_count() {
        let camera = Camera2D::default();
        let mut strip = LineStrip::new();
        assert_eq!(strip.add_point(0.0, 0.0, &camera), Ok(1));
        assert_eq!(strip.add_point(0.5, 0.5, &camera), Ok(2));
        assert_eq!(strip.state(), StripState::Growing);
    }

    #[test]
    fn points_are_stored_in_world_space_with_stroke_color() {
        let camera = Camera2D::default();
        let mut strip = LineStrip::new();
        strip.add_point(0.5, -1.0, &camera).expect("room left");

        let v = strip.vertices()[0];
        assert_eq!(v.position(), Vec2::new(5.0, -10.0));
        assert_eq!(v.color, [1.0, 1.0, 0.0]);
    }

    #[test]
    fn offset_camera_shifts_stored_points() {
        let camera = Camera2D::new(CameraParams::new(Vec2::new(100.0, 50.0), Vec2::new(20.0, 20.0)))
            .expect("valid camera");
        let mut strip = LineStrip::new();
        strip.add_point(0.0, 0.0, &camera).expect("room left");
        assert_eq!(strip.vertices()[0].position(), Vec2::new(100.0, 50.0));
    }

    // ── capacity ──────────────────────────────────────────────────────────

    #[test]
    fn twenty_first_point_is_rejected_without_changes() {
        let camera = Camera2D::default();
        let mut strip = filled(MAX_POINTS, &camera);
        assert_eq!(strip.state(), StripState::Full);
        let before = strip.vertices().to_vec();

        let err = strip.add_point(0.9, 0.9, &camera).expect_err("strip is full");
        assert_eq!(err, CapacityExceeded { capacity: MAX_POINTS });
        assert_eq!(strip.len(), MAX_POINTS);
        assert_eq!(strip.vertices(), before.as_slice());
    }

    #[test]
    fn custom_capacity_is_honored() {
        let camera = Camera2D::default();
        let mut strip = LineStrip::with_capacity(2, Color::RED);
        strip.add_point(0.0, 0.0, &camera).expect("room left");
        strip.add_point(0.1, 0.0, &camera).expect("room left");
        assert!(strip.add_point(0.2, 0.0, &camera).is_err());
        assert_eq!(strip.vertices()[1].color, [1.0, 0.0, 0.0]);
    }

    // ── draw call ─────────────────────────────────────────────────────────

    #[test]
    fn draw_call_covers_every_point_with_view_projection() {
        let camera = Camera2D::default();
        let strip = filled(3, &camera);
        let call = strip.draw_call(&camera).expect("non-empty strip");
        assert_eq!(call.topology, Topology::LineStrip);
        assert_eq!(call.vertices, 0..3);
        assert_eq!(call.mvp, camera.view() * camera.projection());
    }

    #[test]
    fn single_point_still_issues_a_draw() {
        let camera = Camera2D::default();
        let strip = filled(1, &camera);
        assert_eq!(strip.draw_call(&camera).map(|c| c.vertex_count()), Some(1));
    }
}
