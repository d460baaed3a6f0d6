//! # I/O Register Bank
//!
//! The 0xF00..0xF80 range is memory like any other — every write lands in
//! the generic packed cell first — but reads and writes of the implemented
//! registers are intercepted here for their side effects: interrupt factor
//! and mask registers, programmable-timer data and reload, input ports,
//! buzzer output, and the timer control register.
//!
//! Reads of factor-flag registers are **read-and-clear**: the stored nibble
//! is returned and the register is atomically zeroed. Unimplemented or
//! write-only addresses read as 0.

use tracing::debug;

use crate::cpu::Cpu;
use crate::hal::Hal;
use crate::interrupts::IntSlot;

/// Clock-timer interrupt factor flags (read-and-clear).
pub const REG_CLK_INT_FACTOR_FLAGS: u16 = 0xF00;
/// Stopwatch interrupt factor flags (read-and-clear).
pub const REG_SW_INT_FACTOR_FLAGS: u16 = 0xF01;
/// Programmable-timer interrupt factor flags (read-and-clear).
pub const REG_PROG_INT_FACTOR_FLAGS: u16 = 0xF02;
/// Serial interrupt factor flags (read-and-clear).
pub const REG_SERIAL_INT_FACTOR_FLAGS: u16 = 0xF03;
/// K00-K03 interrupt factor flags (read-and-clear).
pub const REG_K00_K03_INT_FACTOR_FLAGS: u16 = 0xF04;
/// K10-K13 interrupt factor flags (read-and-clear).
pub const REG_K10_K13_INT_FACTOR_FLAGS: u16 = 0xF05;
/// Clock-timer interrupt masks.
pub const REG_CLOCK_INT_MASKS: u16 = 0xF10;
/// Stopwatch interrupt masks.
pub const REG_SW_INT_MASKS: u16 = 0xF11;
/// Programmable-timer interrupt masks.
pub const REG_PROG_INT_MASKS: u16 = 0xF12;
/// Serial interrupt masks. NOTE: writes configure the K10-K13 slot — see
/// `io_write`.
pub const REG_SERIAL_INT_MASKS: u16 = 0xF13;
/// K00-K03 interrupt masks. NOTE: writes configure the serial slot — see
/// `io_write`.
pub const REG_K00_K03_INT_MASKS: u16 = 0xF14;
/// K10-K13 interrupt masks.
pub const REG_K10_K13_INT_MASKS: u16 = 0xF15;
/// Programmable-timer countdown, low nibble (read-only).
pub const REG_PROG_TIMER_DATA_L: u16 = 0xF24;
/// Programmable-timer countdown, high nibble (read-only).
pub const REG_PROG_TIMER_DATA_H: u16 = 0xF25;
/// Programmable-timer reload value, low nibble.
pub const REG_PROG_TIMER_RELOAD_DATA_L: u16 = 0xF26;
/// Programmable-timer reload value, high nibble.
pub const REG_PROG_TIMER_RELOAD_DATA_H: u16 = 0xF27;
/// K00-K03 input port levels (read-only).
pub const REG_K00_K03_INPUT_PORT: u16 = 0xF40;
/// K10-K13 input port levels (read-only).
pub const REG_K10_K13_INPUT_PORT: u16 = 0xF42;
/// K40-K43 output port; bit 3 gates the buzzer (active low).
pub const REG_K40_K43_BZ_OUTPUT_PORT: u16 = 0xF54;
/// OSC3 oscillator control.
pub const REG_CPU_OSC3_CTRL: u16 = 0xF70;
/// LCD control.
pub const REG_LCD_CTRL: u16 = 0xF71;
/// LCD contrast (write-only here).
pub const REG_LCD_CONTRAST: u16 = 0xF72;
/// Supply voltage detection control.
pub const REG_SVD_CTRL: u16 = 0xF73;
/// Buzzer control 1.
pub const REG_BUZZER_CTRL1: u16 = 0xF74;
/// Buzzer control 2.
pub const REG_BUZZER_CTRL2: u16 = 0xF75;
/// Clock/watchdog timer control.
pub const REG_CLK_WD_TIMER_CTRL: u16 = 0xF76;
/// Stopwatch timer control.
pub const REG_SW_TIMER_CTRL: u16 = 0xF77;
/// Programmable timer control: bit 0 enable, bit 1 reload.
pub const REG_PROG_TIMER_CTRL: u16 = 0xF78;
/// Programmable timer clock selection.
pub const REG_PROG_TIMER_CLK_SEL: u16 = 0xF79;

impl<H: Hal> Cpu<H> {
    /// Computed read of an I/O register. Factor-flag reads clear the
    /// register as a side effect; everything not implemented reads as 0.
    pub(crate) fn io_read(&mut self, addr: u16) -> u8 {
        match addr {
            REG_CLK_INT_FACTOR_FLAGS => self.take_factor_flags(IntSlot::ClockTimer),
            REG_SW_INT_FACTOR_FLAGS => self.take_factor_flags(IntSlot::Stopwatch),
            REG_PROG_INT_FACTOR_FLAGS => self.take_factor_flags(IntSlot::ProgTimer),
            REG_SERIAL_INT_FACTOR_FLAGS => self.take_factor_flags(IntSlot::Serial),
            REG_K00_K03_INT_FACTOR_FLAGS => self.take_factor_flags(IntSlot::K00K03),
            REG_K10_K13_INT_FACTOR_FLAGS => self.take_factor_flags(IntSlot::K10K13),
            REG_CLOCK_INT_MASKS => self.interrupts[IntSlot::ClockTimer as usize].mask,
            REG_SW_INT_MASKS => self.interrupts[IntSlot::Stopwatch as usize].mask & 0x3,
            REG_PROG_INT_MASKS => self.interrupts[IntSlot::ProgTimer as usize].mask & 0x1,
            REG_SERIAL_INT_MASKS => self.interrupts[IntSlot::Serial as usize].mask & 0x1,
            REG_K00_K03_INT_MASKS => self.interrupts[IntSlot::K00K03 as usize].mask,
            REG_K10_K13_INT_MASKS => self.interrupts[IntSlot::K10K13 as usize].mask,
            REG_PROG_TIMER_DATA_L => self.prog_timer.data & 0xF,
            REG_PROG_TIMER_DATA_H => (self.prog_timer.data >> 4) & 0xF,
            REG_PROG_TIMER_RELOAD_DATA_L => self.prog_timer.reload & 0xF,
            REG_PROG_TIMER_RELOAD_DATA_H => (self.prog_timer.reload >> 4) & 0xF,
            REG_K00_K03_INPUT_PORT => self.inputs[0],
            REG_K10_K13_INPUT_PORT => self.inputs[1],
            REG_K40_K43_BZ_OUTPUT_PORT => self.memory.read(addr),
            REG_CPU_OSC3_CTRL => self.memory.read(addr),
            REG_LCD_CTRL => self.memory.read(addr),
            REG_SVD_CTRL => self.memory.read(addr) & 0x7,
            REG_BUZZER_CTRL1 => self.memory.read(addr),
            REG_BUZZER_CTRL2 => self.memory.read(addr) & 0x3,
            REG_PROG_TIMER_CTRL => self.prog_timer.enabled as u8,
            _ => 0,
        }
    }

    /// Register-specific write side effect. The generic packed cell has
    /// already been updated by the caller.
    ///
    /// The serial and K00-K03 mask register mappings are crossed: writing
    /// the serial mask address configures the K10-K13 slot and writing the
    /// K00-K03 mask address configures the serial slot. This matches the
    /// observed behavior of the reference silicon and is preserved as-is
    /// (see DESIGN.md); the corresponding reads are *not* crossed.
    pub(crate) fn io_write(&mut self, addr: u16, v: u8) {
        match addr {
            REG_CLOCK_INT_MASKS => self.interrupts[IntSlot::ClockTimer as usize].mask = v,
            REG_SW_INT_MASKS => self.interrupts[IntSlot::Stopwatch as usize].mask = v,
            REG_PROG_INT_MASKS => self.interrupts[IntSlot::ProgTimer as usize].mask = v,
            REG_SERIAL_INT_MASKS => self.interrupts[IntSlot::K10K13 as usize].mask = v,
            REG_K00_K03_INT_MASKS => self.interrupts[IntSlot::Serial as usize].mask = v,
            REG_K10_K13_INT_MASKS => self.interrupts[IntSlot::K10K13 as usize].mask = v,
            REG_PROG_TIMER_RELOAD_DATA_L => {
                self.prog_timer.reload = v | (self.prog_timer.reload & 0xF0);
            }
            REG_PROG_TIMER_RELOAD_DATA_H => {
                self.prog_timer.reload = (self.prog_timer.reload & 0xF) | (v << 4);
            }
            REG_K40_K43_BZ_OUTPUT_PORT => {
                // Buzzer is gated by bit 3, active low
                self.hal.play_tone(v & 0x8 == 0);
            }
            REG_PROG_TIMER_CTRL => {
                if v & 0x2 != 0 {
                    self.prog_timer.data = self.prog_timer.reload;
                }
                if v & 0x1 != 0 && !self.prog_timer.enabled {
                    self.prog_timer.timestamp = self.tick_counter;
                }
                self.prog_timer.enabled = v & 0x1 != 0;
                debug!(
                    enabled = self.prog_timer.enabled,
                    reload = self.prog_timer.reload,
                    "prog timer control"
                );
            }
            _ => {}
        }
    }

    fn take_factor_flags(&mut self, slot: IntSlot) -> u8 {
        let flags = self.interrupts[slot as usize].factor_flags;
        self.interrupts[slot as usize].factor_flags = 0;
        flags
    }
}
