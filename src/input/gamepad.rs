// Gamepad input - gilrs events mapped onto joypad buttons
//
// The first connected gamepad drives controller 0. Polled once per frame
// from the window loop.

use crate::controller::Button;
use gilrs::{Button as PadButton, Event, EventType, Gilrs};
use log::{info, warn};

/// Gamepad poller; wraps the gilrs context
pub struct GamepadInput {
    gilrs: Option<Gilrs>,
}

impl GamepadInput {
    /// Initialize gilrs; a missing backend only disables gamepad input
    pub fn new() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => Some(gilrs),
            Err(e) => {
                warn!("gamepad support unavailable: {}", e);
                None
            }
        };
        GamepadInput { gilrs }
    }

    /// Drain pending events into (button, pressed) updates
    pub fn poll(&mut self) -> Vec<(Button, bool)> {
        let Some(gilrs) = &mut self.gilrs else {
            return Vec::new();
        };

        let mut updates = Vec::new();
        while let Some(Event { event, .. }) = gilrs.next_event() {
            match event {
                EventType::ButtonPressed(button, _) => {
                    if let Some(mapped) = map_button(button) {
                        updates.push((mapped, true));
                    }
                }
                EventType::ButtonReleased(button, _) => {
                    if let Some(mapped) = map_button(button) {
                        updates.push((mapped, false));
                    }
                }
                EventType::Connected => info!("gamepad connected"),
                EventType::Disconnected => info!("gamepad disconnected"),
                _ => {}
            }
        }
        updates
    }
}

impl Default for GamepadInput {
    fn default() -> Self {
        Self::new()
    }
}

/// Standard-layout mapping: south/west face buttons are A/B
fn map_button(button: PadButton) -> Option<Button> {
    match button {
        PadButton::South => Some(Button::A),
        PadButton::West => Some(Button::B),
        PadButton::Select => Some(Button::Select),
        PadButton::Start => Some(Button::Start),
        PadButton::DPadUp => Some(Button::Up),
        PadButton::DPadDown => Some(Button::Down),
        PadButton::DPadLeft => Some(Button::Left),
        PadButton::DPadRight => Some(Button::Right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_button_mapping() {
        assert_eq!(map_button(PadButton::South), Some(Button::A));
        assert_eq!(map_button(PadButton::West), Some(Button::B));
        assert_eq!(map_button(PadButton::North), None);
    }

    #[test]
    fn test_dpad_mapping() {
        assert_eq!(map_button(PadButton::DPadUp), Some(Button::Up));
        assert_eq!(map_button(PadButton::DPadRight), Some(Button::Right));
    }
}
