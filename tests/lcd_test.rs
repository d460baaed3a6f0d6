//! Tests for the display-memory to LCD pin projection.
//!
//! Covers:
//! - Per-bit fan-out of display writes to (segment, common) pins
//! - Nibble half and bank half selecting the common-line group
//! - refresh_hardware replaying the full display state

use lib6s46::{Cpu, Hal};

/// A host that records every LCD pin transition.
struct PinHal {
    clock: u64,
    pins: Vec<(u8, u8, bool)>,
}

impl PinHal {
    fn new() -> Self {
        Self {
            clock: 0,
            pins: Vec::new(),
        }
    }
}

impl Hal for PinHal {
    fn now(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn sleep_until(&mut self, deadline: u64) {
        if deadline > self.clock {
            self.clock = deadline;
        }
    }

    fn halt(&mut self) {}

    fn set_lcd_pin(&mut self, seg: u8, com: u8, on: bool) {
        self.pins.push((seg, com, on));
    }

    fn play_tone(&mut self, _on: bool) {}
}

fn setup_cpu() -> Cpu<PinHal> {
    let mut cpu = Cpu::new(PinHal::new(), vec![0xFFFu16; 0x2000], 1_000_000);
    cpu.set_speed(0);
    cpu
}

#[test]
fn test_write_fans_out_four_pins() {
    let mut cpu = setup_cpu();
    cpu.write_memory(0xE10, 0x5); // segment 8, commons 0..4
    assert_eq!(
        cpu.hal().pins,
        vec![(8, 0, true), (8, 1, false), (8, 2, true), (8, 3, false)]
    );
}

#[test]
fn test_odd_address_selects_upper_nibble_commons() {
    let mut cpu = setup_cpu();
    cpu.write_memory(0xE11, 0xF); // segment 8, commons 4..8
    assert_eq!(
        cpu.hal().pins,
        vec![(8, 4, true), (8, 5, true), (8, 6, true), (8, 7, true)]
    );
}

#[test]
fn test_second_bank_drives_commons_eight_and_up() {
    let mut cpu = setup_cpu();
    cpu.write_memory(0xE80, 0x1); // segment 0, commons 8..12
    cpu.write_memory(0xE81, 0x1); // segment 0, commons 12..16
    let pins = &cpu.hal().pins;
    assert_eq!(pins[0], (0, 8, true));
    assert_eq!(pins[4], (0, 12, true));
}

#[test]
fn test_ram_write_does_not_touch_lcd() {
    let mut cpu = setup_cpu();
    cpu.write_memory(0x040, 0xF);
    assert!(cpu.hal().pins.is_empty());
}

#[test]
fn test_refresh_hardware_replays_display_state() {
    let mut cpu = setup_cpu();
    cpu.write_memory(0xE10, 0x5);
    cpu.write_memory(0xE80, 0x1);
    cpu.hal_mut().pins.clear();

    cpu.refresh_hardware();

    // Every display cell is replayed: (80 + 80) cells, 4 pins each
    assert_eq!(cpu.hal().pins.len(), 640);
    assert!(cpu.hal().pins.contains(&(8, 0, true)));
    assert!(cpu.hal().pins.contains(&(8, 1, false)));
    assert!(cpu.hal().pins.contains(&(0, 8, true)));
}
