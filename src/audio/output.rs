// Audio output - cpal stream over the APU mixer
//
// The callback owns a running time value advanced by one sample period
// per sample and evaluates the analytic mixer at that time. The APU state
// is behind the shared mutex, so emulation-side register writes and the
// frame sequencer interleave safely with the audio thread.

use crate::apu::Apu;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Stream, StreamConfig};
use log::{info, warn};
use std::sync::{Arc, Mutex};

/// Output stream configuration
#[derive(Debug, Clone, Copy)]
pub struct AudioOutputConfig {
    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Output volume (0.0-1.0)
    pub volume: f32,
}

impl Default for AudioOutputConfig {
    fn default() -> Self {
        AudioOutputConfig {
            sample_rate: 44_100,
            volume: 0.8,
        }
    }
}

/// Running audio stream; playback stops when this is dropped
pub struct AudioOutput {
    _stream: Stream,
}

impl AudioOutput {
    /// Open the default output device and start pulling mixer samples
    pub fn start(apu: Arc<Mutex<Apu>>, config: AudioOutputConfig) -> Result<Self, String> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or("no audio output device available")?;
        info!("audio device: {}", device.name().unwrap_or_default());

        let stream_config = StreamConfig {
            channels: 1,
            sample_rate: cpal::SampleRate(config.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let sample_period = 1.0 / config.sample_rate as f32;
        let volume = config.volume.clamp(0.0, 1.0);
        let mut time = 0.0f32;

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _| {
                    let apu = apu.lock().unwrap();
                    for sample in data.iter_mut() {
                        *sample = apu.sample(time) * volume;
                        time += sample_period;
                    }
                },
                |err| warn!("audio stream error: {}", err),
                None,
            )
            .map_err(|e| format!("could not build the audio stream: {}", e))?;

        stream
            .play()
            .map_err(|e| format!("could not start the audio stream: {}", e))?;

        Ok(AudioOutput { _stream: stream })
    }
}
