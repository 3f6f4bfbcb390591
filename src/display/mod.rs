//! Display: the PPU's frame buffer and the winit/pixels window host

pub mod framebuffer;
pub mod window;

pub use framebuffer::{FrameBuffer, FRAME_BYTES, FRAME_HEIGHT, FRAME_WIDTH};
pub use window::{run_window, WindowConfig};
