// Configuration management
//
// User-configurable settings persisted next to the executable as TOML.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// Default configuration file path
const CONFIG_FILE: &str = "renes.toml";

/// Emulator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmulatorConfig {
    /// Video settings
    pub video: VideoConfig,

    /// Audio settings
    pub audio: AudioConfig,
}

/// Video configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Integer window scale (1-4)
    pub scale: u32,

    /// Enable VSync
    pub vsync: bool,
}

/// Audio configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Enable audio output
    pub enabled: bool,

    /// Output volume (0.0-1.0)
    pub volume: f32,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        EmulatorConfig {
            video: VideoConfig {
                scale: 3,
                vsync: true,
            },
            audio: AudioConfig {
                enabled: true,
                volume: 0.8,
            },
        }
    }
}

impl EmulatorConfig {
    /// Load the configuration file, falling back to defaults when it is
    /// missing or malformed
    pub fn load_or_default() -> Self {
        match fs::read_to_string(CONFIG_FILE) {
            Ok(text) => match toml::from_str(&text) {
                Ok(config) => config,
                Err(e) => {
                    warn!("{}: ignoring malformed config: {}", CONFIG_FILE, e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Persist the configuration
    pub fn save(&self) -> io::Result<()> {
        let text = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(CONFIG_FILE, text)
    }

    /// Clamp out-of-range values into their valid ranges
    pub fn sanitize(&mut self) {
        self.video.scale = self.video.scale.clamp(1, 4);
        self.audio.volume = self.audio.volume.clamp(0.0, 1.0);
    }
}
