//! # Packed Nibble Memory
//!
//! The E0C6S46 address space is 4-bit cells at 12-bit logical addresses,
//! physically packed two cells per byte. Four disjoint ranges are backed:
//!
//! | Range            | Addresses       | Size (cells) |
//! |------------------|-----------------|--------------|
//! | RAM              | 0x000..0x280    | 640          |
//! | Display bank 1   | 0xE00..0xE50    | 80           |
//! | Display bank 2   | 0xE80..0xED0    | 80           |
//! | I/O registers    | 0xF00..0xF80    | 128          |
//!
//! ## Design principles
//!
//! Following the hardware, there is no bus error mechanism:
//! - Reads outside all backed ranges return 0 (those gaps are intentionally
//!   unbacked and defined to read as 0).
//! - Writes outside all backed ranges are silently ignored.
//!
//! This module is the raw packed-cell layer only. Side-effecting I/O
//! registers and the LCD projection live above it, on [`Cpu`](crate::Cpu).

/// Start of the RAM range.
pub const RAM_ADDR: u16 = 0x000;
/// Number of RAM cells.
pub const RAM_SIZE: u16 = 0x280;
/// Start of display memory bank 1.
pub const DISPLAY1_ADDR: u16 = 0xE00;
/// Number of cells in display bank 1.
pub const DISPLAY1_SIZE: u16 = 0x050;
/// Start of display memory bank 2.
pub const DISPLAY2_ADDR: u16 = 0xE80;
/// Number of cells in display bank 2.
pub const DISPLAY2_SIZE: u16 = 0x050;
/// Start of the I/O register range.
pub const IO_ADDR: u16 = 0xF00;
/// Number of I/O register cells.
pub const IO_SIZE: u16 = 0x080;

/// Backing buffer size in bytes: two 4-bit cells per byte.
pub const MEM_BUFFER_SIZE: usize =
    ((RAM_SIZE + DISPLAY1_SIZE + DISPLAY2_SIZE + IO_SIZE) / 2) as usize;

/// Packed dual-nibble memory with region dispatch.
///
/// Cells are stored two per byte; even addresses occupy the low nibble,
/// odd addresses the high nibble. The raw buffer footprint (464 bytes)
/// matches the hardware RAM layout.
pub struct Memory {
    bytes: [u8; MEM_BUFFER_SIZE],
}

impl Memory {
    /// Creates a memory with every cell zeroed.
    pub fn new() -> Self {
        Self {
            bytes: [0; MEM_BUFFER_SIZE],
        }
    }

    /// Zeroes every cell. Used by CPU reset.
    pub fn clear(&mut self) {
        self.bytes = [0; MEM_BUFFER_SIZE];
    }

    /// Maps a logical cell address to its backing byte offset, or `None` if
    /// the address falls in a gap. The regions are packed back to back in
    /// the buffer, in address order.
    fn offset(addr: u16) -> Option<usize> {
        if addr < RAM_ADDR + RAM_SIZE {
            Some(((addr - RAM_ADDR) / 2) as usize)
        } else if addr >= DISPLAY1_ADDR && addr < DISPLAY1_ADDR + DISPLAY1_SIZE {
            Some(((addr - DISPLAY1_ADDR + RAM_SIZE) / 2) as usize)
        } else if addr >= DISPLAY2_ADDR && addr < DISPLAY2_ADDR + DISPLAY2_SIZE {
            Some(((addr - DISPLAY2_ADDR + RAM_SIZE + DISPLAY1_SIZE) / 2) as usize)
        } else if addr >= IO_ADDR && addr < IO_ADDR + IO_SIZE {
            Some(((addr - IO_ADDR + RAM_SIZE + DISPLAY1_SIZE + DISPLAY2_SIZE) / 2) as usize)
        } else {
            None
        }
    }

    /// Reads the 4-bit cell at `addr`. Gap addresses read as 0.
    pub fn read(&self, addr: u16) -> u8 {
        match Self::offset(addr) {
            Some(i) => (self.bytes[i] >> ((addr % 2) << 2)) & 0xF,
            None => 0,
        }
    }

    /// Writes the 4-bit cell at `addr` (value masked to a nibble). Gap
    /// addresses ignore the write.
    pub fn write(&mut self, addr: u16, value: u8) {
        if let Some(i) = Self::offset(addr) {
            let shift = (addr % 2) << 2;
            self.bytes[i] = (self.bytes[i] & !(0xF << shift)) | ((value & 0xF) << shift);
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all_regions() {
        let mut mem = Memory::new();
        for addr in [0x000, 0x27F, 0xE00, 0xE4F, 0xE80, 0xECF, 0xF00, 0xF7F] {
            mem.write(addr, 0xA);
            assert_eq!(mem.read(addr), 0xA, "addr 0x{:03X}", addr);
        }
    }

    #[test]
    fn test_value_masked_to_nibble() {
        let mut mem = Memory::new();
        mem.write(0x010, 0x1F);
        assert_eq!(mem.read(0x010), 0xF);
    }

    #[test]
    fn test_neighbor_cells_independent() {
        let mut mem = Memory::new();
        mem.write(0x040, 0x3);
        mem.write(0x041, 0xC);
        assert_eq!(mem.read(0x040), 0x3);
        assert_eq!(mem.read(0x041), 0xC);
        mem.write(0x040, 0x0);
        assert_eq!(mem.read(0x041), 0xC);
    }

    #[test]
    fn test_gap_reads_zero_and_ignores_writes() {
        let mut mem = Memory::new();
        for addr in [0x280u16, 0x500, 0xDFF, 0xE50, 0xE7F, 0xED0, 0xEFF, 0xF80, 0xFFF] {
            mem.write(addr, 0xF);
            assert_eq!(mem.read(addr), 0, "addr 0x{:03X}", addr);
        }
        // Backed cells unaffected by the discarded writes
        assert_eq!(mem.read(0x000), 0);
        assert_eq!(mem.read(0x27F), 0);
    }

    #[test]
    fn test_buffer_footprint_matches_hardware() {
        assert_eq!(MEM_BUFFER_SIZE, 464);
    }
}
