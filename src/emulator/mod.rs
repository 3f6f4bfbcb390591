// Emulator module - system clock and host-facing API
//
// Owns every device and drives the master clock: one tick advances the
// PPU by one dot, every third tick the CPU by one cycle, and every sixth
// tick the APU by one cycle. VBlank NMIs and OAM DMA stalls are wired
// here, between the PPU and CPU.

mod config;
mod recent_roms;
mod save_state;
mod screenshot;

pub use config::{AudioConfig, EmulatorConfig, VideoConfig};
pub use recent_roms::RecentRomsList;
pub use save_state::{SaveState, SaveStateError};
pub use screenshot::{save_screenshot, ScreenshotError};

use crate::apu::Apu;
use crate::bus::CpuBus;
use crate::cartridge::{Cartridge, LoadError};
use crate::controller::Button;
use crate::cpu::Cpu;
use crate::display::framebuffer::FRAME_BYTES;
use log::{info, warn};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, Mutex};

/// The emulated console: CPU, buses, PPU, APU, cartridge and the clock
/// divider gluing them together
pub struct Emulator {
    cpu: Cpu,
    bus: CpuBus,
    /// Shared with the PPU bus; kept here for save states and reset
    cartridge: Option<Rc<RefCell<Cartridge>>>,
    /// Shared with the audio callback
    apu: Arc<Mutex<Apu>>,
    config: EmulatorConfig,
    rom_path: Option<PathBuf>,
    paused: bool,
    /// Master clock in PPU dots
    clock: u64,
    /// CPU cycles elapsed; its parity decides the 513/514 DMA stall
    cpu_ticks: u64,
}

impl Emulator {
    /// Create an emulator with no cartridge loaded
    pub fn new() -> Self {
        let bus = CpuBus::new();
        let apu = bus.apu_handle();
        Emulator {
            cpu: Cpu::new(),
            bus,
            cartridge: None,
            apu,
            config: EmulatorConfig::load_or_default(),
            rom_path: None,
            paused: false,
            clock: 0,
            cpu_ticks: 0,
        }
    }

    /// Load an iNES ROM from disk, wire it up and reset
    pub fn load_rom<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadError> {
        let path = path.as_ref();
        let cartridge = Cartridge::from_ines_file(path)?;
        info!(
            "loaded {} (mapper {}, {:?} mirroring)",
            path.display(),
            cartridge.header().mapper_id,
            cartridge.mirroring()
        );

        self.install_cartridge(cartridge);
        self.rom_path = Some(path.to_path_buf());

        let mut recent = RecentRomsList::load_or_default();
        recent.add(path);
        if let Err(e) = recent.save() {
            warn!("could not update the recent ROM list: {}", e);
        }

        self.reset();
        Ok(())
    }

    /// Load a cartridge from iNES bytes already in memory (tests, saves)
    pub fn load_rom_bytes(&mut self, data: &[u8]) -> Result<(), LoadError> {
        let cartridge = Cartridge::from_ines_bytes(data)?;
        self.install_cartridge(cartridge);
        self.reset();
        Ok(())
    }

    fn install_cartridge(&mut self, cartridge: Cartridge) {
        let cartridge = Rc::new(RefCell::new(cartridge));
        self.bus.attach_cartridge(cartridge.clone());
        self.cartridge = Some(cartridge);
    }

    /// Press the reset button: every device returns to power-on state
    pub fn reset(&mut self) {
        self.bus.reset();
        self.cpu.reset(&mut self.bus);
        self.clock = 0;
        self.cpu_ticks = 0;
        self.paused = false;
    }

    /// Advance the system by one PPU dot; returns true when a frame
    /// completed on this tick
    ///
    /// Ordering per dot: the PPU runs first, its NMI (if any) is latched
    /// into the CPU so it is serviced before the next instruction fetch,
    /// then the CPU and APU run on their divided clocks.
    pub fn tick(&mut self) -> bool {
        let frame_done = self.bus.ppu.tick();
        if self.bus.ppu.take_nmi() {
            self.cpu.request_nmi();
        }

        if self.clock % 3 == 0 {
            // A $4014 write during the previous instruction stalls the
            // CPU for the whole copy before anything else executes
            if let Some(page) = self.bus.take_dma_page() {
                self.perform_oam_dma(page);
            }
            self.cpu.tick(&mut self.bus);
            self.cpu_ticks += 1;
        }

        if self.clock % 6 == 0 {
            self.bus.tick_apu();
        }

        self.clock = self.clock.wrapping_add(1);
        frame_done
    }

    /// Run ticks until the current frame completes
    pub fn render_frame(&mut self) {
        while !self.tick() {}
    }

    /// Copy one CPU page into the PPU's primary OAM and stall the CPU
    ///
    /// 513 cycles, or 514 when the transfer starts on an odd CPU cycle.
    fn perform_oam_dma(&mut self, page: u8) {
        let base = (page as u16) << 8;
        let start = self.bus.ppu.oam_addr;
        for offset in 0..=255u8 {
            let byte = self.bus.read(base + offset as u16);
            self.bus.ppu.write_oam(start.wrapping_add(offset), byte);
        }

        let stall = if self.cpu_ticks % 2 == 1 { 514 } else { 513 };
        self.cpu.stall(stall);
    }

    /// The finished RGB888 frame, row-major 256x240
    pub fn frame_buffer(&self) -> &[u8; FRAME_BYTES] {
        self.bus.ppu.frame().bytes()
    }

    /// Update a joypad button (controller 0 or 1)
    pub fn set_button(&mut self, controller: usize, button: Button, pressed: bool) {
        self.bus.set_button(controller, button, pressed);
    }

    /// Mixed audio sample at `time` seconds, in [-1, 1]
    ///
    /// Safe to call from the audio thread; the APU state is behind a
    /// mutex shared with register writes and the frame sequencer.
    pub fn audio_sample(&self, time: f32) -> f32 {
        self.apu.lock().unwrap().sample(time)
    }

    /// Shared APU handle for a dedicated audio thread
    pub fn apu_handle(&self) -> Arc<Mutex<Apu>> {
        self.apu.clone()
    }

    /// Save the emulator state to a numbered slot
    pub fn save_state(&self, slot: u8) -> Result<(), SaveStateError> {
        let state = SaveState::from_emulator(self);
        state.save_to_file(slot, self.rom_path.as_deref())
    }

    /// Restore the emulator state from a numbered slot
    pub fn load_state(&mut self, slot: u8) -> Result<(), SaveStateError> {
        let state = SaveState::load_from_file(slot, self.rom_path.as_deref())?;
        state.restore_to_emulator(self);
        Ok(())
    }

    /// Capture the current frame as a PNG next to the ROM
    pub fn screenshot(&self) -> Result<PathBuf, ScreenshotError> {
        screenshot::save_screenshot(self.bus.ppu.frame(), self.rom_path.as_deref())
    }

    /// Peek a byte from the CPU address space (debugging and tests)
    ///
    /// Register side effects still apply; avoid $2002/$2007 unless they
    /// are what is being inspected.
    pub fn debug_read(&mut self, addr: u16) -> u8 {
        self.bus.read(addr)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn config(&self) -> &EmulatorConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EmulatorConfig {
        &mut self.config
    }

    pub fn rom_path(&self) -> Option<&Path> {
        self.rom_path.as_deref()
    }

    pub(crate) fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub(crate) fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub(crate) fn bus(&self) -> &CpuBus {
        &self.bus
    }

    pub(crate) fn bus_mut(&mut self) -> &mut CpuBus {
        &mut self.bus
    }

    pub(crate) fn cartridge(&self) -> Option<&Rc<RefCell<Cartridge>>> {
        self.cartridge.as_ref()
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::test_rom::build_ines;
    use crate::ppu::{DOTS_PER_SCANLINE, SCANLINES_PER_FRAME};

    /// An iNES image whose reset vector points at an infinite loop
    fn looping_rom() -> Vec<u8> {
        let mut data = build_ines(2, 1, 0, 0);
        let prg_start = 16;
        // JMP $8000 at $8000
        data[prg_start] = 0x4C;
        data[prg_start + 1] = 0x00;
        data[prg_start + 2] = 0x80;
        // Reset vector $FFFC -> $8000 (offset of $FFFC within 32KB PRG)
        let vector = prg_start + 0x7FFC;
        data[vector] = 0x00;
        data[vector + 1] = 0x80;
        data
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut emu = Emulator::new();
        assert!(emu.load_rom_bytes(&[0u8; 32]).is_err());
    }

    #[test]
    fn test_reset_vector_fetched_from_cartridge() {
        let mut emu = Emulator::new();
        emu.load_rom_bytes(&looping_rom()).unwrap();
        assert_eq!(emu.cpu().pc, 0x8000);
    }

    #[test]
    fn test_render_frame_completes() {
        let mut emu = Emulator::new();
        emu.load_rom_bytes(&looping_rom()).unwrap();
        emu.render_frame();

        assert_eq!(emu.bus().ppu.scanline(), 0);
        assert_eq!(emu.bus().ppu.dot(), 0);
    }

    #[test]
    fn test_frame_is_89342_dots_when_blanked() {
        let mut emu = Emulator::new();
        emu.load_rom_bytes(&looping_rom()).unwrap();

        let expected = DOTS_PER_SCANLINE as u64 * SCANLINES_PER_FRAME as u64;
        let mut dots = 0u64;
        while !emu.tick() {
            dots += 1;
        }
        assert_eq!(dots + 1, expected);
    }

    #[test]
    fn test_cpu_runs_every_third_dot() {
        let mut emu = Emulator::new();
        emu.load_rom_bytes(&looping_rom()).unwrap();

        let cycles_before = emu.cpu().cycles;
        for _ in 0..300 {
            emu.tick();
        }
        let elapsed = emu.cpu().cycles - cycles_before;

        // 300 dots = 100 CPU ticks; 8 go to the reset sequence, the rest
        // fetch the 3-cycle JMP loop: ceil(92 / 3) = 31 commits
        assert_eq!(elapsed, 31 * 3, "3:1 PPU:CPU divider");
    }

    #[test]
    fn test_oam_dma_copies_page_and_stalls() {
        let mut emu = Emulator::new();
        emu.load_rom_bytes(&looping_rom()).unwrap();

        // Fill CPU page 2 with a pattern
        for i in 0..=255u8 {
            emu.bus_mut().write(0x0200 + i as u16, i.wrapping_add(1));
        }

        let cycles_before = emu.cpu().cycles;
        emu.bus_mut().write(0x4014, 0x02);

        // Run until the DMA is picked up and the stall burns down
        for _ in 0..(515 * 3 + 6) {
            emu.tick();
        }

        for i in 0..=255u8 {
            assert_eq!(
                emu.bus().ppu.read_oam(i),
                i.wrapping_add(1),
                "OAM byte {} must match CPU page 2",
                i
            );
        }

        let elapsed = emu.cpu().cycles - cycles_before;
        assert!(
            elapsed >= 513,
            "the transfer must cost at least 513 CPU cycles, got {}",
            elapsed
        );
    }

    #[test]
    fn test_frame_buffer_size() {
        let emu = Emulator::new();
        assert_eq!(emu.frame_buffer().len(), 256 * 240 * 3);
    }
}
