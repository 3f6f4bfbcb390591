// PPU bus - address decode for pattern, nametable and palette memory
//
// # PPU Memory Map
//
// ```text
// $0000-$1FFF: Pattern tables (cartridge CHR-ROM/RAM via the mapper)
// $2000-$2FFF: Nametables (2KB internal VRAM, mirrored per cartridge)
// $3000-$3EFF: Mirror of $2000-$2EFF
// $3F00-$3FFF: Palette RAM (32 bytes, mirrored every 32)
// ```

use crate::cartridge::{Cartridge, Mirroring};
use std::cell::RefCell;
use std::rc::Rc;

/// Size of one nametable (tile grid + attribute table)
const NAMETABLE_SIZE: usize = 0x400;

/// Internal nametable VRAM: 2KB backing the 4KB address window
///
/// Only two of the four addressable tables are RAM; the cartridge's
/// mirroring mode decides which pairs share storage.
pub struct NameTableRam {
    memory: [u8; NAMETABLE_SIZE * 2],
}

impl NameTableRam {
    pub fn new() -> Self {
        NameTableRam {
            memory: [0; NAMETABLE_SIZE * 2],
        }
    }

    /// Fold a $2000-$2FFF address onto the physical 2KB
    fn mirror(addr: u16, mirroring: Mirroring) -> usize {
        let addr = (addr & 0x0FFF) as usize;
        let table = addr / NAMETABLE_SIZE;
        let offset = addr % NAMETABLE_SIZE;

        let physical = match mirroring {
            // $2400 folds onto $2000, $2C00 onto $2800
            Mirroring::Horizontal => match table {
                0 | 1 => 0,
                _ => 1,
            },
            // $2800 folds onto $2000, $2C00 onto $2400
            Mirroring::Vertical => match table {
                0 | 2 => 0,
                _ => 1,
            },
        };

        physical * NAMETABLE_SIZE + offset
    }

    pub fn read(&self, addr: u16, mirroring: Mirroring) -> u8 {
        self.memory[Self::mirror(addr, mirroring)]
    }

    pub fn write(&mut self, addr: u16, data: u8, mirroring: Mirroring) {
        self.memory[Self::mirror(addr, mirroring)] = data;
    }

    pub fn reset(&mut self) {
        self.memory = [0; NAMETABLE_SIZE * 2];
    }
}

impl Default for NameTableRam {
    fn default() -> Self {
        Self::new()
    }
}

/// Palette RAM: 32 bytes with four mirrored holes
///
/// $3F10/$3F14/$3F18/$3F1C fold onto $3F00/$3F04/$3F08/$3F0C because the
/// sprite palettes share their zero entries with the background.
pub struct PaletteRam {
    memory: [u8; 32],
}

impl PaletteRam {
    pub fn new() -> Self {
        PaletteRam { memory: [0; 32] }
    }

    fn mirror(addr: u16) -> usize {
        let index = (addr & 0x001F) as usize;
        if index >= 16 && index % 4 == 0 {
            index - 16
        } else {
            index
        }
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.memory[Self::mirror(addr)]
    }

    pub fn write(&mut self, addr: u16, data: u8) {
        self.memory[Self::mirror(addr)] = data;
    }

    pub fn reset(&mut self) {
        self.memory = [0; 32];
    }
}

impl Default for PaletteRam {
    fn default() -> Self {
        Self::new()
    }
}

/// Address-decode fabric in front of the PPU's three memory spaces
pub struct PpuBus {
    /// Cartridge CHR space; absent until a ROM is attached
    cartridge: Option<Rc<RefCell<Cartridge>>>,
    /// Nametable mirroring, copied from the cartridge at attach time
    mirroring: Mirroring,
    nametables: NameTableRam,
    palette: PaletteRam,
}

impl PpuBus {
    pub fn new() -> Self {
        PpuBus {
            cartridge: None,
            mirroring: Mirroring::Horizontal,
            nametables: NameTableRam::new(),
            palette: PaletteRam::new(),
        }
    }

    /// Wire in a loaded cartridge and adopt its mirroring mode
    pub fn attach_cartridge(&mut self, cartridge: Rc<RefCell<Cartridge>>) {
        self.mirroring = cartridge.borrow().mirroring();
        self.cartridge = Some(cartridge);
    }

    /// Override the mirroring mode (tests drive this directly)
    pub fn set_mirroring(&mut self, mirroring: Mirroring) {
        self.mirroring = mirroring;
    }

    /// Read a byte from PPU address space
    ///
    /// Unmapped CHR reads (no cartridge, or mapper miss) return 0.
    pub fn read(&self, addr: u16) -> u8 {
        let addr = addr & 0x3FFF;
        match addr {
            0x0000..=0x1FFF => self
                .cartridge
                .as_ref()
                .and_then(|cart| cart.borrow().chr_read(addr))
                .unwrap_or(0),
            0x2000..=0x3EFF => self.nametables.read(addr, self.mirroring),
            0x3F00..=0x3FFF => self.palette.read(addr),
            _ => unreachable!(),
        }
    }

    /// Write a byte into PPU address space; unmapped writes are dropped
    pub fn write(&mut self, addr: u16, data: u8) {
        let addr = addr & 0x3FFF;
        match addr {
            0x0000..=0x1FFF => {
                if let Some(cart) = &self.cartridge {
                    cart.borrow_mut().chr_write(addr, data);
                }
            }
            0x2000..=0x3EFF => self.nametables.write(addr, data, self.mirroring),
            0x3F00..=0x3FFF => self.palette.write(addr, data),
            _ => unreachable!(),
        }
    }

    /// Direct palette access for pixel composition (skips full decode)
    pub fn palette_entry(&self, index: u16) -> u8 {
        self.palette.read(0x3F00 | index)
    }

    pub fn reset(&mut self) {
        self.nametables.reset();
        self.palette.reset();
    }
}

impl Default for PpuBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_mirroring() {
        let mut bus = PpuBus::new();
        bus.set_mirroring(Mirroring::Horizontal);

        bus.write(0x2000, 0x55);
        assert_eq!(bus.read(0x2400), 0x55, "$2400 must fold onto $2000");

        bus.write(0x2800, 0x66);
        assert_eq!(bus.read(0x2C00), 0x66, "$2C00 must fold onto $2800");
        assert_eq!(bus.read(0x2000), 0x55, "top pair must stay independent of bottom");
    }

    #[test]
    fn test_vertical_mirroring() {
        let mut bus = PpuBus::new();
        bus.set_mirroring(Mirroring::Vertical);

        bus.write(0x2000, 0x66);
        assert_eq!(bus.read(0x2800), 0x66, "$2800 must fold onto $2000");

        bus.write(0x2400, 0x77);
        assert_eq!(bus.read(0x2C00), 0x77, "$2C00 must fold onto $2400");
    }

    #[test]
    fn test_3000_region_mirrors_nametables() {
        let mut bus = PpuBus::new();
        bus.write(0x2005, 0xAB);
        assert_eq!(bus.read(0x3005), 0xAB);

        bus.write(0x3105, 0xCD);
        assert_eq!(bus.read(0x2105), 0xCD);
    }

    #[test]
    fn test_palette_holes() {
        let mut bus = PpuBus::new();

        bus.write(0x3F00, 0x2A);
        assert_eq!(bus.read(0x3F10), 0x2A, "$3F10 mirrors $3F00");

        bus.write(0x3F14, 0x13);
        assert_eq!(bus.read(0x3F04), 0x13, "$3F14 mirrors $3F04");

        // Non-multiple-of-4 sprite entries are distinct storage
        bus.write(0x3F11, 0x31);
        bus.write(0x3F01, 0x15);
        assert_eq!(bus.read(0x3F11), 0x31);
        assert_eq!(bus.read(0x3F01), 0x15);
    }

    #[test]
    fn test_palette_mirrors_every_32() {
        let mut bus = PpuBus::new();
        bus.write(0x3F02, 0x21);
        assert_eq!(bus.read(0x3F22), 0x21);
        assert_eq!(bus.read(0x3FE2), 0x21);
    }

    #[test]
    fn test_chr_without_cartridge_reads_zero() {
        let bus = PpuBus::new();
        assert_eq!(bus.read(0x0000), 0);
        assert_eq!(bus.read(0x1FFF), 0);
    }

    #[test]
    fn test_address_wraps_at_4000() {
        let mut bus = PpuBus::new();
        bus.write(0x3F00 + 0x4000, 0x0C); // $7F00 folds onto $3F00
        assert_eq!(bus.read(0x3F00), 0x0C);
    }
}
