use anyhow::Result;

use crate::coords::Viewport;
use crate::input::{KeyEvent, PointerButtonEvent};
use crate::render::RenderCtx;
use crate::window::RuntimeCtx;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// Every method except [`on_display`](Self::on_display) defaults to a no-op.
/// Handlers that change what is on screen ask for a frame through
/// [`RuntimeCtx::request_redraw`].
pub trait App {
    /// Called once after the window and GPU are ready, before the first frame.
    ///
    /// An error here is fatal: the runtime stops and returns it.
    fn on_init(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Called for every redraw.
    fn on_display(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called when a mouse button is pressed. `event.x/y` are logical pixels
    /// relative to the top-left of a window of size `viewport`.
    fn on_mouse_down(
        &mut self,
        event: &PointerButtonEvent,
        viewport: Viewport,
        runtime: &mut RuntimeCtx,
    ) {
        let _ = (event, viewport, runtime);
    }

    /// Called when a key is pressed, including auto-repeat.
    ///
    /// Match `event.text` for typed characters and `event.key` for keys by
    /// position.
    fn on_key_down(&mut self, event: &KeyEvent, runtime: &mut RuntimeCtx) {
        let _ = (event, runtime);
    }

    fn on_key_up(&mut self, event: &KeyEvent, runtime: &mut RuntimeCtx) {
        let _ = (event, runtime);
    }

    /// Called whenever the event loop runs out of events.
    /// `elapsed` is seconds since the runtime started.
    fn on_idle(&mut self, elapsed: f32, runtime: &mut RuntimeCtx) {
        let _ = (elapsed, runtime);
    }

    /// Called exactly once when the window closes or the runtime exits.
    fn on_exit(&mut self) {}
}
