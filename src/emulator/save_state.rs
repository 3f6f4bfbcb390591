// Save states
//
// Captures the rewindable machine state (CPU registers, work RAM, PPU
// core state, APU channel registers, mapper bank) into a versioned JSON
// file per slot. VRAM-side pipeline latches regenerate within a frame and
// are not stored.

use super::Emulator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Bumped whenever the snapshot layout changes
const SAVE_STATE_VERSION: u32 = 1;

/// Errors from saving or restoring state
#[derive(Debug)]
pub enum SaveStateError {
    /// I/O error
    Io(io::Error),
    /// JSON encoding/decoding error
    Serde(serde_json::Error),
    /// File written by an incompatible emulator version
    VersionMismatch(u32),
    /// No ROM is loaded, so there is nothing to anchor the state to
    NoRomLoaded,
}

impl fmt::Display for SaveStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveStateError::Io(e) => write!(f, "I/O error: {}", e),
            SaveStateError::Serde(e) => write!(f, "serialization error: {}", e),
            SaveStateError::VersionMismatch(v) => {
                write!(f, "save state version {} is not supported", v)
            }
            SaveStateError::NoRomLoaded => write!(f, "no ROM loaded"),
        }
    }
}

impl std::error::Error for SaveStateError {}

impl From<io::Error> for SaveStateError {
    fn from(e: io::Error) -> Self {
        SaveStateError::Io(e)
    }
}

impl From<serde_json::Error> for SaveStateError {
    fn from(e: serde_json::Error) -> Self {
        SaveStateError::Serde(e)
    }
}

/// CPU register snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    pc: u16,
    status: u8,
    cycles: u64,
}

/// PPU register and memory snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PpuState {
    ctrl: u8,
    mask: u8,
    status: u8,
    oam_addr: u8,
    v: u16,
    t: u16,
    fine_x: u8,
    oam: Vec<u8>,
}

/// APU channel register snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ApuChannels {
    control: u8,
    p1_period: u16,
    p1_duty: u8,
    p1_enabled: bool,
    p2_period: u16,
    p2_duty: u8,
    p2_enabled: bool,
    tri_period: u16,
    tri_enabled: bool,
}

/// Complete rewindable machine state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveState {
    version: u32,
    cpu: CpuState,
    ram: Vec<u8>,
    ppu: PpuState,
    apu: ApuChannels,
    mapper_bank: u8,
}

impl SaveState {
    /// Capture the emulator's current state
    pub fn from_emulator(emu: &Emulator) -> Self {
        let cpu = emu.cpu();
        let bus = emu.bus();
        let apu_state = emu.apu_handle().lock().unwrap().state();

        SaveState {
            version: SAVE_STATE_VERSION,
            cpu: CpuState {
                a: cpu.a,
                x: cpu.x,
                y: cpu.y,
                sp: cpu.sp,
                pc: cpu.pc,
                status: cpu.status,
                cycles: cpu.cycles,
            },
            ram: bus.ram().bytes().to_vec(),
            ppu: PpuState {
                ctrl: bus.ppu.ctrl,
                mask: bus.ppu.mask,
                status: bus.ppu.status,
                oam_addr: bus.ppu.oam_addr,
                v: bus.ppu.v,
                t: bus.ppu.t,
                fine_x: bus.ppu.fine_x,
                oam: bus.ppu.oam.to_vec(),
            },
            apu: ApuChannels {
                control: apu_state.control,
                p1_period: apu_state.p1_period,
                p1_duty: apu_state.p1_duty,
                p1_enabled: apu_state.p1_enabled,
                p2_period: apu_state.p2_period,
                p2_duty: apu_state.p2_duty,
                p2_enabled: apu_state.p2_enabled,
                tri_period: apu_state.tri_period,
                tri_enabled: apu_state.tri_enabled,
            },
            mapper_bank: emu
                .cartridge()
                .map(|cart| cart.borrow().bank_state())
                .unwrap_or(0),
        }
    }

    /// Write the emulator's state back from this snapshot
    pub fn restore_to_emulator(&self, emu: &mut Emulator) {
        {
            let cpu = emu.cpu_mut();
            cpu.a = self.cpu.a;
            cpu.x = self.cpu.x;
            cpu.y = self.cpu.y;
            cpu.sp = self.cpu.sp;
            cpu.pc = self.cpu.pc;
            cpu.status = self.cpu.status;
            cpu.cycles = self.cpu.cycles;
        }

        {
            let bus = emu.bus_mut();
            bus.ram_mut().load_bytes(&self.ram);
            bus.ppu.ctrl = self.ppu.ctrl;
            bus.ppu.mask = self.ppu.mask;
            bus.ppu.status = self.ppu.status;
            bus.ppu.oam_addr = self.ppu.oam_addr;
            bus.ppu.v = self.ppu.v;
            bus.ppu.t = self.ppu.t;
            bus.ppu.fine_x = self.ppu.fine_x;
            for (i, &byte) in self.ppu.oam.iter().take(256).enumerate() {
                bus.ppu.oam[i] = byte;
            }
        }

        {
            let apu = emu.apu_handle();
            let mut apu = apu.lock().unwrap();
            apu.restore(&crate::apu::ApuState {
                control: self.apu.control,
                p1_period: self.apu.p1_period,
                p1_duty: self.apu.p1_duty,
                p1_enabled: self.apu.p1_enabled,
                p2_period: self.apu.p2_period,
                p2_duty: self.apu.p2_duty,
                p2_enabled: self.apu.p2_enabled,
                tri_period: self.apu.tri_period,
                tri_enabled: self.apu.tri_enabled,
            });
        }

        if let Some(cart) = emu.cartridge() {
            cart.borrow_mut().set_bank_state(self.mapper_bank);
        }
    }

    /// Slot file path derived from the ROM name
    fn slot_path(slot: u8, rom_path: Option<&Path>) -> Result<PathBuf, SaveStateError> {
        let rom_path = rom_path.ok_or(SaveStateError::NoRomLoaded)?;
        let stem = rom_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "rom".to_string());
        Ok(PathBuf::from(format!("{}.state{}.json", stem, slot)))
    }

    /// Serialize this snapshot into the slot file
    pub fn save_to_file(&self, slot: u8, rom_path: Option<&Path>) -> Result<(), SaveStateError> {
        let path = Self::slot_path(slot, rom_path)?;
        let json = serde_json::to_string(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a snapshot from the slot file
    pub fn load_from_file(slot: u8, rom_path: Option<&Path>) -> Result<Self, SaveStateError> {
        let path = Self::slot_path(slot, rom_path)?;
        let json = fs::read_to_string(path)?;
        let state: SaveState = serde_json::from_str(&json)?;
        if state.version != SAVE_STATE_VERSION {
            return Err(SaveStateError::VersionMismatch(state.version));
        }
        Ok(state)
    }
}
