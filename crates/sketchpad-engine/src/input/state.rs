use std::collections::HashSet;

use super::types::{InputEvent, Key, KeyState, MouseButton, MouseButtonState, PointerButtonEvent};

/// Current input state for the window.
///
/// winit reports button presses without a position, so the last pointer
/// position is tracked here and stamped onto button events.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies an input event to the current state.
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases can be missed while unfocused.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved { x, y } => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key(k) => match k.state {
                KeyState::Pressed => {
                    self.keys_down.insert(k.key);
                }
                KeyState::Released => {
                    self.keys_down.remove(&k.key);
                }
            },

            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y }) => {
                self.pointer_pos = Some((*x, *y));
                match state {
                    MouseButtonState::Pressed => {
                        self.buttons_down.insert(*button);
                    }
                    MouseButtonState::Released => {
                        self.buttons_down.remove(button);
                    }
                }
            }
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyEvent;

    fn press(button: MouseButton, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button,
            state: MouseButtonState::Pressed,
            x,
            y,
        })
    }

    #[test]
    fn pointer_moves_are_tracked() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::PointerMoved { x: 10.0, y: 20.0 });
        assert_eq!(s.pointer_pos, Some((10.0, 20.0)));

        s.apply_event(&InputEvent::PointerLeft);
        assert_eq!(s.pointer_pos, None);
    }

    #[test]
    fn button_events_update_position_and_held_set() {
        let mut s = InputState::default();
        s.apply_event(&press(MouseButton::Left, 300.0, 150.0));
        assert!(s.button_down(MouseButton::Left));
        assert_eq!(s.pointer_pos, Some((300.0, 150.0)));

        s.apply_event(&InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state: MouseButtonState::Released,
            x: 300.0,
            y: 150.0,
        }));
        assert!(!s.button_down(MouseButton::Left));
    }

    #[test]
    fn focus_loss_clears_held_inputs() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::Key(KeyEvent::pressed(Key::D, Some('d'))));
        s.apply_event(&press(MouseButton::Right, 0.0, 0.0));
        assert!(s.key_down(Key::D));

        s.apply_event(&InputEvent::Focused(false));
        assert!(!s.key_down(Key::D));
        assert!(!s.button_down(MouseButton::Right));
        assert!(!s.focused);
    }
}
