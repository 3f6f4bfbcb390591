// renes - a cycle-stepped NES emulator
//
// The core is the emulation engine: a 6502 interpreter, a dot-stepped
// PPU with background/sprite shift-register pipelines, an analytic-mixer
// APU, and the bus fabrics and mapper layer connecting them. The
// display/input/audio hosts are thin shells around the `Emulator` API.

pub mod apu;
#[cfg(feature = "audio")]
pub mod audio;
pub mod bus;
pub mod cartridge;
pub mod controller;
pub mod cpu;
pub mod display;
pub mod emulator;
pub mod input;
pub mod ppu;
pub mod ram;

pub use apu::Apu;
#[cfg(feature = "audio")]
pub use audio::{AudioOutput, AudioOutputConfig};
pub use bus::CpuBus;
pub use cartridge::{Cartridge, INesHeader, LoadError, Mapper, Mirroring};
pub use controller::{Button, Controller};
pub use cpu::Cpu;
pub use display::{FrameBuffer, WindowConfig, FRAME_BYTES, FRAME_HEIGHT, FRAME_WIDTH};
pub use emulator::{Emulator, EmulatorConfig, SaveState, SaveStateError};
pub use ppu::Ppu;
pub use ram::Ram;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_components_construct() {
        let _cpu = Cpu::new();
        let _ppu = Ppu::new();
        let _apu = Apu::new();
        let _bus = CpuBus::new();
        let _pad = Controller::new();
        let _ram = Ram::new();
        let _emu = Emulator::new();
    }
}
