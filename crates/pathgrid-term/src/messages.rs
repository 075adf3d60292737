//! Input events: [`Msg`], [`Key`], [`MouseAction`].

/// A keyboard key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Space,
    /// A printable character.
    Char(char),
}

/// A mouse action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseAction {
    /// Primary (left) button pressed.
    Main,
    /// Secondary (right) button pressed.
    Secondary,
    /// Button released.
    Release,
    /// Mouse moved, with or without a button held.
    Move,
}

/// An input message delivered to the application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    /// A key was pressed.
    KeyDown(Key),
    /// A mouse event at terminal column `x`, line `y`.
    Mouse { action: MouseAction, x: i32, y: i32 },
    /// The terminal was resized.
    Resize { width: i32, height: i32 },
    /// Request to quit.
    Quit,
}

impl Msg {
    /// Convenience: a key press for a printable character.
    pub fn char(c: char) -> Self {
        Self::KeyDown(Key::Char(c))
    }

    /// Convenience: a mouse event.
    pub fn mouse(action: MouseAction, x: i32, y: i32) -> Self {
        Self::Mouse { action, x, y }
    }

    /// Whether this message asks the application to exit.
    pub fn is_quit(&self) -> bool {
        matches!(self, Self::Quit | Self::KeyDown(Key::Char('q')))
    }
}
