//! Audio host: pulls mixed APU samples through a cpal output stream

mod output;

pub use output::{AudioOutput, AudioOutputConfig};
