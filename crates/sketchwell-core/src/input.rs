//! Pointer input types.

use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state, as delivered with each pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
    /// Space bar held (temporary panning).
    pub space: bool,
}

impl Modifiers {
    /// Whether the multi-select modifier is held (ctrl, or meta on macOS).
    pub fn multi_select(self) -> bool {
        self.ctrl || self.meta
    }

    /// Whether the duplicate modifier is held.
    pub fn duplicate(self) -> bool {
        self.alt
    }
}
