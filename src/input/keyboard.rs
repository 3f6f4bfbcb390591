// Keyboard input - maps winit key codes to joypad buttons

use crate::controller::Button;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Key bindings for one joypad
#[derive(Debug, Clone, Copy)]
pub struct KeyboardMapping {
    pub a: KeyCode,
    pub b: KeyCode,
    pub select: KeyCode,
    pub start: KeyCode,
    pub up: KeyCode,
    pub down: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
}

impl KeyboardMapping {
    /// Default bindings for player one
    pub fn player_one() -> Self {
        KeyboardMapping {
            a: KeyCode::KeyX,
            b: KeyCode::KeyZ,
            select: KeyCode::ShiftRight,
            start: KeyCode::Enter,
            up: KeyCode::ArrowUp,
            down: KeyCode::ArrowDown,
            left: KeyCode::ArrowLeft,
            right: KeyCode::ArrowRight,
        }
    }

    /// Default bindings for player two
    pub fn player_two() -> Self {
        KeyboardMapping {
            a: KeyCode::KeyK,
            b: KeyCode::KeyJ,
            select: KeyCode::KeyU,
            start: KeyCode::KeyI,
            up: KeyCode::KeyW,
            down: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
        }
    }

    /// Translate a physical key into the joypad button it is bound to
    pub fn button_for(&self, key: PhysicalKey) -> Option<Button> {
        let PhysicalKey::Code(code) = key else {
            return None;
        };
        if code == self.a {
            Some(Button::A)
        } else if code == self.b {
            Some(Button::B)
        } else if code == self.select {
            Some(Button::Select)
        } else if code == self.start {
            Some(Button::Start)
        } else if code == self.up {
            Some(Button::Up)
        } else if code == self.down {
            Some(Button::Down)
        } else if code == self.left {
            Some(Button::Left)
        } else if code == self.right {
            Some(Button::Right)
        } else {
            None
        }
    }
}

impl Default for KeyboardMapping {
    fn default() -> Self {
        Self::player_one()
    }
}
