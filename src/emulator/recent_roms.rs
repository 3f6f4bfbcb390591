// Recent ROMs list
//
// TOML-persisted MRU list of ROM paths for quick reloading.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Where the list is persisted
const RECENT_ROMS_FILE: &str = "recent_roms.toml";

/// Maximum number of entries kept
const MAX_RECENT_ROMS: usize = 10;

/// Most-recently-used ROM list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecentRomsList {
    roms: Vec<RecentRomEntry>,
}

/// One remembered ROM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentRomEntry {
    /// Path to the ROM file
    pub path: PathBuf,

    /// Last time it was opened
    pub last_opened: String,
}

impl RecentRomsList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the persisted list, or an empty one
    pub fn load_or_default() -> Self {
        fs::read_to_string(RECENT_ROMS_FILE)
            .ok()
            .and_then(|text| toml::from_str(&text).ok())
            .unwrap_or_default()
    }

    /// Persist the list
    pub fn save(&self) -> io::Result<()> {
        let text = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(RECENT_ROMS_FILE, text)
    }

    /// Record a ROM as just opened, moving it to the front
    pub fn add<P: AsRef<Path>>(&mut self, path: P) {
        let path = path.as_ref();
        self.roms.retain(|entry| entry.path != path);
        self.roms.insert(
            0,
            RecentRomEntry {
                path: path.to_path_buf(),
                last_opened: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            },
        );
        self.roms.truncate(MAX_RECENT_ROMS);
    }

    /// Entries, most recent first
    pub fn entries(&self) -> &[RecentRomEntry] {
        &self.roms
    }
}
