//! # Hardware Abstraction Layer
//!
//! The [`Hal`] trait decouples the CPU core from the process hosting it.
//! Everything the core needs from the outside world goes through this seam:
//!
//! - a monotonic real-time clock and a blocking sleep (cycle pacing),
//! - process halt (the HALT instruction),
//! - per-pin LCD segment output (display memory writes),
//! - buzzer enable (output port writes).
//!
//! A host integration layer (window, audio, keyboard) implements this trait
//! once; tests use [`NullHal`] or a recording mock.

/// Host services required by the CPU core.
///
/// # Timing
///
/// `now` and `sleep_until` share one unit: the `timestamp_freq` passed to
/// [`Cpu::new`](crate::Cpu::new) is the number of clock units per second
/// (1_000_000 for a microsecond clock). The clock must be monotonic; the
/// core only ever computes deadlines relative to values it read earlier.
///
/// # Output callbacks
///
/// `set_lcd_pin` is invoked up to four times per display-memory write, once
/// per affected common line. `play_tone` is invoked on every write to the
/// buzzer output port, with the decoded enable bit.
pub trait Hal {
    /// Returns the current monotonic timestamp.
    fn now(&mut self) -> u64;

    /// Blocks the calling thread until the deadline. Must return immediately
    /// if the deadline has already passed.
    fn sleep_until(&mut self, deadline: u64);

    /// Invoked by the HALT instruction. A real host terminates the process;
    /// a test host may record the call and return.
    fn halt(&mut self);

    /// Sets one LCD pin identified by segment and common line.
    fn set_lcd_pin(&mut self, seg: u8, com: u8, on: bool);

    /// Enables or disables the buzzer tone.
    fn play_tone(&mut self, on: bool);
}

/// A host that talks to nothing: fake free-running clock, no sleeping, LCD
/// and buzzer output discarded.
///
/// Intended for unthrottled (`set_speed(0)`) deterministic test execution.
/// The clock advances by one unit per `now` call so timestamps are strictly
/// increasing without touching the OS.
///
/// # Examples
///
/// ```
/// use lib6s46::{Cpu, NullHal};
///
/// let cpu = Cpu::new(NullHal::new(), vec![0xFFF; 0x2000], 1_000_000);
/// assert_eq!(cpu.pc(), 0x0100);
/// ```
pub struct NullHal {
    clock: u64,
    /// Number of times the HALT instruction fired.
    pub halts: u32,
}

impl NullHal {
    /// Creates a `NullHal` with the fake clock at zero.
    pub fn new() -> Self {
        Self { clock: 0, halts: 0 }
    }
}

impl Default for NullHal {
    fn default() -> Self {
        Self::new()
    }
}

impl Hal for NullHal {
    fn now(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn sleep_until(&mut self, deadline: u64) {
        if deadline > self.clock {
            self.clock = deadline;
        }
    }

    fn halt(&mut self) {
        self.halts += 1;
    }

    fn set_lcd_pin(&mut self, _seg: u8, _com: u8, _on: bool) {}

    fn play_tone(&mut self, _on: bool) {}
}
