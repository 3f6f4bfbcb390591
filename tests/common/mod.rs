// Shared helpers for ROM-driven integration tests

#![allow(dead_code)]

use renes::bus::CpuBus;
use renes::cartridge::Cartridge;
use std::cell::RefCell;
use std::rc::Rc;

/// Size of one PRG chunk (16KB)
pub const PRG_CHUNK: usize = 16 * 1024;

/// Size of one CHR chunk (8KB)
pub const CHR_CHUNK: usize = 8 * 1024;

/// Build an iNES image in memory
///
/// PRG bytes are filled with their chunk index so bank mapping is
/// directly observable; CHR starts zeroed.
pub fn build_ines(prg_chunks: u8, chr_chunks: u8, mapper: u8, flags6_low: u8) -> Vec<u8> {
    let mut data = vec![0u8; 16];
    data[0..4].copy_from_slice(b"NES\x1A");
    data[4] = prg_chunks;
    data[5] = chr_chunks;
    data[6] = (mapper << 4) | (flags6_low & 0x0F);
    data[7] = mapper & 0xF0;

    for i in 0..prg_chunks as usize * PRG_CHUNK {
        data.push((i / PRG_CHUNK) as u8);
    }
    data.extend(std::iter::repeat(0).take(chr_chunks as usize * CHR_CHUNK));
    data
}

/// Patch the reset vector of a 32KB-PRG image to `target`
pub fn set_reset_vector(data: &mut [u8], target: u16) {
    let vector = 16 + 0x7FFC;
    data[vector] = target as u8;
    data[vector + 1] = (target >> 8) as u8;
}

/// Place a program at a CPU address within a 32KB-PRG image
pub fn place_program(data: &mut [u8], cpu_addr: u16, code: &[u8]) {
    let offset = 16 + (cpu_addr as usize - 0x8000);
    data[offset..offset + code.len()].copy_from_slice(code);
}

/// A CPU bus wired to a cartridge built from the given image
pub fn bus_with_rom(data: &[u8]) -> CpuBus {
    let cartridge = Rc::new(RefCell::new(
        Cartridge::from_ines_bytes(data).expect("test ROM should parse"),
    ));
    let mut bus = CpuBus::new();
    bus.attach_cartridge(cartridge);
    bus
}
