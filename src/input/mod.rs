//! Input hosts translating keyboard and gamepad events into joypad
//! button state

pub mod gamepad;
pub mod keyboard;

pub use gamepad::GamepadInput;
pub use keyboard::KeyboardMapping;
