/// Keyboard key identifier.
///
/// Physical keys are mapped by position (US layout), so `Key::D` is the key
/// labelled D on a QWERTY board regardless of the active layout.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    /// Any other key, with its platform code when one exists.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Pointer button event. Coordinates are logical pixels, top-left origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub x: f32,
    pub y: f32,
}

/// Keyboard event.
///
/// `key` is the physical key (layout independent); `text` is the character
/// the active layout and modifiers produce, when there is exactly one.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct KeyEvent {
    pub key: Key,
    pub text: Option<char>,
    pub state: KeyState,
    /// True when the event is an auto-repeat of a held key.
    pub repeat: bool,
}

impl KeyEvent {
    /// A non-repeating press of `key` that types `text`.
    pub fn pressed(key: Key, text: Option<char>) -> Self {
        Self {
            key,
            text,
            state: KeyState::Pressed,
            repeat: false,
        }
    }

    /// The release matching [`pressed`](Self::pressed).
    pub fn released(key: Key, text: Option<char>) -> Self {
        Self {
            state: KeyState::Released,
            ..Self::pressed(key, text)
        }
    }
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(KeyEvent),

    /// Pointer moved to `(x, y)` in logical pixels.
    PointerMoved { x: f32, y: f32 },
    PointerButton(PointerButtonEvent),

    /// Pointer left the window surface.
    PointerLeft,

    /// Window focus change.
    Focused(bool),
}
