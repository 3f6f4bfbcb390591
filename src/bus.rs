// Bus module - CPU-side address decode
//
// Routes CPU reads and writes to work RAM, the PPU registers, the APU,
// the controllers and the cartridge, applying the hardware's mirroring
// masks. Owns the devices it routes into (the cartridge is shared with
// the PPU bus).
//
// # NES Memory Map (CPU address space)
//
// ```text
// $0000-$1FFF: 2KB work RAM, mirrored every $0800
// $2000-$3FFF: PPU registers, mirrored every 8 bytes
// $4000-$4013: APU channel registers
// $4014:       OAM DMA trigger
// $4015:       APU control
// $4016:       Controller 1 (read) / latch strobe (write)
// $4017:       Controller 2 (read) / APU frame counter (write)
// $4020-$FFFF: Cartridge PRG space
// ```
//
// Reads from unmapped regions return 0 (open-bus approximation); writes
// to unmapped regions are dropped.

use crate::apu::Apu;
use crate::cartridge::Cartridge;
use crate::controller::{Button, Controller};
use crate::ppu::Ppu;
use crate::ram::Ram;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

/// PPU register select mask within $2000-$3FFF
const PPU_REGISTER_MASK: u16 = 0x0007;

/// CPU-side bus fabric
pub struct CpuBus {
    /// 2KB work RAM
    ram: Ram,
    /// Picture processor; register window at $2000-$3FFF
    pub ppu: Ppu,
    /// Audio processor, shared with the host audio callback
    apu: Arc<Mutex<Apu>>,
    /// Two joypad ports at $4016/$4017
    controllers: [Controller; 2],
    /// Cartridge PRG space; absent until a ROM is loaded
    cartridge: Option<Rc<RefCell<Cartridge>>>,
    /// Page latched by a $4014 write, consumed by the system clock
    dma_page: Option<u8>,
}

impl CpuBus {
    /// Create a bus with no cartridge attached
    pub fn new() -> Self {
        CpuBus {
            ram: Ram::new(),
            ppu: Ppu::new(),
            apu: Arc::new(Mutex::new(Apu::new())),
            controllers: [Controller::new(), Controller::new()],
            cartridge: None,
            dma_page: None,
        }
    }

    /// Attach a loaded cartridge to both buses
    pub fn attach_cartridge(&mut self, cartridge: Rc<RefCell<Cartridge>>) {
        self.ppu.attach_cartridge(cartridge.clone());
        self.cartridge = Some(cartridge);
    }

    /// Shared handle to the APU for the audio callback
    pub fn apu_handle(&self) -> Arc<Mutex<Apu>> {
        self.apu.clone()
    }

    /// Advance the APU one cycle (called by the system clock)
    pub fn tick_apu(&mut self) {
        self.apu.lock().unwrap().tick();
    }

    /// Update a joypad button from the input host
    pub fn set_button(&mut self, controller: usize, button: Button, pressed: bool) {
        if let Some(pad) = self.controllers.get_mut(controller) {
            pad.set_button(button, pressed);
        }
    }

    /// Consume the page number latched by a $4014 write
    pub fn take_dma_page(&mut self) -> Option<u8> {
        self.dma_page.take()
    }

    /// Read a byte from the CPU address space
    pub fn read(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram.read(addr),
            0x2000..=0x3FFF => self.ppu.read_register(addr & PPU_REGISTER_MASK),
            0x4015 => self.apu.lock().unwrap().read_register(addr),
            0x4016 => self.controllers[0].read(),
            0x4017 => self.controllers[1].read(),
            0x4000..=0x4014 | 0x4018..=0x401F => {
                // Write-only APU/IO range
                0
            }
            0x4020..=0xFFFF => self
                .cartridge
                .as_ref()
                .and_then(|cart| cart.borrow().prg_read(addr))
                .unwrap_or(0),
        }
    }

    /// Write a byte into the CPU address space
    pub fn write(&mut self, addr: u16, data: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram.write(addr, data),
            0x2000..=0x3FFF => self.ppu.write_register(addr & PPU_REGISTER_MASK, data),
            0x4014 => {
                // OAM DMA: the copy and the CPU stall happen at the
                // system clock, before the next instruction executes
                self.dma_page = Some(data);
            }
            0x4016 => {
                // Strobe: latch both pads regardless of the written value
                self.controllers[0].latch();
                self.controllers[1].latch();
            }
            0x4000..=0x4013 | 0x4015 | 0x4017 => {
                self.apu.lock().unwrap().write_register(addr, data);
            }
            0x4018..=0x401F => {
                // Disabled test registers
            }
            0x4020..=0xFFFF => {
                if let Some(cart) = &self.cartridge {
                    cart.borrow_mut().prg_write(addr, data);
                }
            }
        }
    }

    /// Little-endian 16-bit read
    pub fn read_u16(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Reset the bus-owned devices
    pub fn reset(&mut self) {
        self.ram.reset();
        self.ppu.reset();
        self.apu.lock().unwrap().reset();
        for pad in &mut self.controllers {
            pad.reset();
        }
        if let Some(cart) = &self.cartridge {
            cart.borrow_mut().reset();
        }
        self.dma_page = None;
    }

    /// Work RAM contents (save states)
    pub fn ram(&self) -> &Ram {
        &self.ram
    }

    pub fn ram_mut(&mut self) -> &mut Ram {
        &mut self.ram
    }
}

impl Default for CpuBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::test_rom::build_ines;

    fn bus_with_cartridge(prg_chunks: u8, mapper: u8) -> CpuBus {
        let data = build_ines(prg_chunks, 1, mapper, 0);
        let cart = Rc::new(RefCell::new(Cartridge::from_ines_bytes(&data).unwrap()));
        let mut bus = CpuBus::new();
        bus.attach_cartridge(cart);
        bus
    }

    #[test]
    fn test_ram_mirroring_through_bus() {
        let mut bus = CpuBus::new();
        bus.write(0x0123, 0x45);

        assert_eq!(bus.read(0x0123), 0x45);
        assert_eq!(bus.read(0x0923), 0x45);
        assert_eq!(bus.read(0x1123), 0x45);
        assert_eq!(bus.read(0x1923), 0x45);
    }

    #[test]
    fn test_ppu_register_mirroring() {
        let mut bus = CpuBus::new();
        // OAMADDR/OAMDATA through a distant mirror: $3FF3 folds onto $2003
        bus.write(0x3FF3, 0x10);
        bus.write(0x3FF4, 0xAB);

        bus.write(0x2003, 0x10);
        assert_eq!(bus.read(0x2004), 0xAB);
    }

    #[test]
    fn test_cartridge_reads() {
        let mut bus = bus_with_cartridge(2, 0);
        // build_ines fills each PRG chunk with its index
        assert_eq!(bus.read(0x8000), 0);
        assert_eq!(bus.read(0xC000), 1);
    }

    #[test]
    fn test_unmapped_cartridge_region_reads_zero() {
        let mut bus = bus_with_cartridge(1, 0);
        assert_eq!(bus.read(0x4020), 0);
        assert_eq!(bus.read(0x6000), 0);
    }

    #[test]
    fn test_no_cartridge_reads_zero() {
        let mut bus = CpuBus::new();
        assert_eq!(bus.read(0x8000), 0);
        assert_eq!(bus.read(0xFFFF), 0);
    }

    #[test]
    fn test_controller_latch_and_shift() {
        let mut bus = CpuBus::new();
        bus.set_button(0, Button::A, true);
        bus.set_button(0, Button::Start, true);

        bus.write(0x4016, 0x01);
        let stream: Vec<u8> = (0..8).map(|_| bus.read(0x4016)).collect();
        assert_eq!(stream, vec![1, 0, 0, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_second_controller_independent() {
        let mut bus = CpuBus::new();
        bus.set_button(1, Button::B, true);

        bus.write(0x4016, 0x01);
        assert_eq!(bus.read(0x4017), 0, "pad 2 A not pressed");
        assert_eq!(bus.read(0x4017), 1, "pad 2 B pressed");
        assert_eq!(bus.read(0x4016), 0, "pad 1 stream untouched by pad 2 reads");
    }

    #[test]
    fn test_dma_write_latches_page() {
        let mut bus = CpuBus::new();
        bus.write(0x4014, 0x02);

        assert_eq!(bus.take_dma_page(), Some(0x02));
        assert_eq!(bus.take_dma_page(), None, "latch is consumed");
    }

    #[test]
    fn test_apu_region_write_and_read() {
        let mut bus = CpuBus::new();
        bus.write(0x4000, 0xFF);
        bus.write(0x4015, 0x07);
        assert_eq!(bus.read(0x4000), 0, "APU registers read back 0");
        assert_eq!(bus.read(0x4015), 0);
    }

    #[test]
    fn test_mapper2_bank_switch_through_bus() {
        let mut bus = bus_with_cartridge(8, 2);

        assert_eq!(bus.read(0x8000), 0, "bank 0 after load");
        assert_eq!(bus.read(0xC000), 7, "fixed last bank");

        bus.write(0x8000, 0x03);
        assert_eq!(bus.read(0x8000), 3, "switchable window now bank 3");
        assert_eq!(bus.read(0xC000), 7, "fixed bank unchanged");
    }

    #[test]
    fn test_vector_reads_via_read_u16() {
        let mut bus = CpuBus::new();
        bus.write(0x0100, 0x34);
        bus.write(0x0101, 0x12);
        assert_eq!(bus.read_u16(0x0100), 0x1234);
    }
}
