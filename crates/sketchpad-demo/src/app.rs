use anyhow::Result;

use sketchpad_engine::camera::Camera2D;
use sketchpad_engine::coords::Viewport;
use sketchpad_engine::core::{App, AppControl, FrameCtx};
use sketchpad_engine::input::{KeyEvent, MouseButton, PointerButtonEvent};
use sketchpad_engine::paint::Color;
use sketchpad_engine::render::{RenderCtx, ShaderProgram};
use sketchpad_engine::window::RuntimeCtx;

use crate::config::SketchConfig;
use crate::shapes::{LineStrip, StripState, Triangle};

/// Character that forces a redraw.
const REDRAW_KEY: char = 'd';

/// The sketchpad: an animated camera over a fixed triangle and a clicked polyline.
pub struct SketchApp {
    camera: Camera2D,
    triangle: Triangle,
    line_strip: LineStrip,
    program: Option<ShaderProgram>,
    clear: Color,
}

impl SketchApp {
    pub fn new(config: &SketchConfig) -> Result<Self> {
        Ok(Self {
            camera: Camera2D::new(config.camera)?,
            triangle: Triangle::new(),
            line_strip: LineStrip::with_capacity(config.max_points, config.stroke),
            program: None,
            clear: config.clear,
        })
    }

    #[cfg(test)]
    fn camera(&self) -> &Camera2D {
        &self.camera
    }

    #[cfg(test)]
    fn line_strip(&self) -> &LineStrip {
        &self.line_strip
    }
}

impl App for SketchApp {
    fn on_init(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        let program = ShaderProgram::color(ctx)?;
        if !program.is_linked() {
            log::warn!("continuing with an unusable shader program; shapes will not be drawn");
        }

        self.triangle.create(ctx, &program)?;
        self.line_strip.create(ctx, &program)?;
        self.program = Some(program);
        Ok(())
    }

    fn on_display(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Self {
            camera,
            triangle,
            line_strip,
            program,
            clear,
        } = self;

        ctx.render(*clear, |rctx, target| {
            let Some(program) = program.as_ref() else {
                return;
            };
            let mut pass = target.begin_pass("sketchpad shapes");
            triangle.draw(rctx, &mut pass, program, camera);
            line_strip.draw(rctx, &mut pass, program, camera);
        })
    }

    fn on_mouse_down(
        &mut self,
        event: &PointerButtonEvent,
        viewport: Viewport,
        runtime: &mut RuntimeCtx,
    ) {
        if event.button != MouseButton::Left {
            return;
        }
        let Some(ndc) = viewport.pixel_to_ndc(event.x, event.y) else {
            return;
        };

        // A full strip simply stops growing.
        if let Ok(count) = self.line_strip.add_point(ndc.x, ndc.y, &self.camera) {
            log::debug!("point {count} at ndc ({:.3}, {:.3})", ndc.x, ndc.y);
            if self.line_strip.state() == StripState::Full {
                log::debug!("line strip full ({} points)", self.line_strip.capacity());
            }
        }
        runtime.request_redraw();
    }

    fn on_key_down(&mut self, event: &KeyEvent, runtime: &mut RuntimeCtx) {
        if event.text == Some(REDRAW_KEY) {
            runtime.request_redraw();
        }
    }

    fn on_idle(&mut self, elapsed: f32, runtime: &mut RuntimeCtx) {
        self.camera.animate(elapsed);
        self.triangle.animate(elapsed);
        runtime.request_redraw();
    }

    fn on_exit(&mut self) {
        self.program = None;
        log::info!("exit");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketchpad_engine::coords::Vec2;
    use sketchpad_engine::input::{Key, MouseButtonState};

    const WINDOW: Viewport = Viewport::new(600.0, 600.0);

    fn app() -> SketchApp {
        SketchApp::new(&SketchConfig::default()).expect("default config is valid")
    }

    fn press(button: MouseButton, x: f32, y: f32) -> PointerButtonEvent {
        PointerButtonEvent {
            button,
            state: MouseButtonState::Pressed,
            x,
            y,
        }
    }

    // ── mouse ─────────────────────────────────────────────────────────────

    #[test]
    fn left_click_adds_world_point_and_redraws() {
        let mut app = app();
        let mut rt = RuntimeCtx::default();

        app.on_mouse_down(&press(MouseButton::Left, 450.0, 150.0), WINDOW, &mut rt);

        assert!(rt.redraw_requested());
        assert_eq!(app.line_strip().len(), 1);
        assert_eq!(app.line_strip().vertices()[0].position(), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn other_buttons_are_ignored() {
        let mut app = app();
        let mut rt = RuntimeCtx::default();

        app.on_mouse_down(&press(MouseButton::Right, 300.0, 300.0), WINDOW, &mut rt);
        app.on_mouse_down(&press(MouseButton::Middle, 300.0, 300.0), WINDOW, &mut rt);

        assert!(app.line_strip().is_empty());
        assert!(!rt.redraw_requested());
    }

    #[test]
    fn clicks_past_capacity_are_swallowed() {
        let mut app = app();
        let mut rt = RuntimeCtx::default();
        for i in 0..25 {
            app.on_mouse_down(&press(MouseButton::Left, 10.0 * i as f32, 300.0), WINDOW, &mut rt);
        }
        assert_eq!(app.line_strip().len(), 20);
        // The 20th accepted click was at x = 190 px.
        let last = app.line_strip().vertices()[19].position();
        assert!((last.x - (190.0 / 30.0 - 10.0)).abs() < 1e-4, "got {last:?}");
    }

    #[test]
    fn degenerate_window_ignores_clicks() {
        let mut app = app();
        let mut rt = RuntimeCtx::default();
        app.on_mouse_down(&press(MouseButton::Left, 0.0, 0.0), Viewport::new(0.0, 0.0), &mut rt);
        assert!(app.line_strip().is_empty());
    }

    // ── keyboard / idle ───────────────────────────────────────────────────

    #[test]
    fn typed_d_requests_redraw() {
        let mut app = app();
        let mut rt = RuntimeCtx::default();
        app.on_key_down(&KeyEvent::pressed(Key::D, Some('d')), &mut rt);
        assert!(rt.redraw_requested());
    }

    #[test]
    fn d_follows_the_layout_not_the_key_position() {
        let mut app = app();

        // Dvorak: the key at QWERTY's E position types 'd'.
        let mut rt = RuntimeCtx::default();
        app.on_key_down(&KeyEvent::pressed(Key::E, Some('d')), &mut rt);
        assert!(rt.redraw_requested());

        // Dvorak: the key at QWERTY's D position types 'e'.
        let mut rt = RuntimeCtx::default();
        app.on_key_down(&KeyEvent::pressed(Key::D, Some('e')), &mut rt);
        assert!(!rt.redraw_requested());
    }

    #[test]
    fn shifted_d_and_releases_do_nothing() {
        let mut app = app();
        let mut rt = RuntimeCtx::default();
        app.on_key_down(&KeyEvent::pressed(Key::D, Some('D')), &mut rt);
        app.on_key_down(&KeyEvent::pressed(Key::A, Some('a')), &mut rt);
        app.on_key_up(&KeyEvent::released(Key::D, Some('d')), &mut rt);
        assert!(!rt.redraw_requested());
    }

    #[test]
    fn idle_animates_and_keeps_redrawing() {
        let mut app = app();
        let mut rt = RuntimeCtx::default();
        app.on_idle(3.0, &mut rt);
        assert!(rt.redraw_requested());
        assert_eq!(app.camera().extent(), Vec2::new(20.0, 20.0));
    }

    #[test]
    fn exit_without_init_is_harmless() {
        let mut app = app();
        app.on_exit();
        assert!(app.program.is_none());
    }
}
