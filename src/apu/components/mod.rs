//! Building blocks shared by the APU channels

mod envelope;
mod frame_counter;
mod length_counter;
mod linear_counter;
mod sweep;

pub use envelope::Envelope;
pub use frame_counter::{FrameClock, FrameCounter};
pub use length_counter::LengthCounter;
pub use linear_counter::LinearCounter;
pub use sweep::Sweep;
