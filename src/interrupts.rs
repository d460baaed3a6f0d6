//! # Interrupt Slots, Input Pins, and Timers
//!
//! Six fixed-priority interrupt sources, each with an edge-triggered
//! factor-flag register (read-and-clear), an independently settable mask,
//! a `triggered` latch, and a fixed dispatch vector in page 1.
//!
//! A free-running tick counter (one tick per CPU cycle at 32768 Hz) drives
//! a 1 Hz clock timer and a 256 Hz reloadable programmable timer. The two
//! input ports raise the pin-group slots on falling edges.

/// CPU oscillator frequency in Hz; one emulated cycle per tick.
pub const TICK_FREQUENCY: u32 = 32_768;
/// Clock timer period in ticks (1 Hz).
pub const TIMER_1HZ_PERIOD: u32 = 32_768;
/// Programmable timer period in ticks (256 Hz).
pub const TIMER_256HZ_PERIOD: u32 = 128;

/// The six interrupt sources, in servicing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntSlot {
    /// Programmable timer underflow (vector 0x0C).
    ProgTimer = 0,
    /// Serial interface (vector 0x0A).
    Serial = 1,
    /// K10-K13 input pins (vector 0x08).
    K10K13 = 2,
    /// K00-K03 input pins (vector 0x06).
    K00K03 = 3,
    /// Stopwatch (vector 0x04).
    Stopwatch = 4,
    /// 1 Hz clock timer (vector 0x02).
    ClockTimer = 5,
}

/// Number of interrupt slots.
pub const INT_SLOT_COUNT: usize = 6;

/// One interrupt source: factor flags, mask, trigger latch, vector.
///
/// `triggered` is set only when a factor bit is raised while the same mask
/// bit is set, and holds until the slot is serviced. Reading the factor
/// register through the I/O bank clears it atomically.
#[derive(Debug, Clone, Copy)]
pub struct InterruptSlot {
    pub(crate) factor_flags: u8,
    pub(crate) mask: u8,
    pub(crate) triggered: bool,
    pub(crate) vector: u8,
}

impl InterruptSlot {
    pub(crate) const fn new(vector: u8) -> Self {
        Self {
            factor_flags: 0,
            mask: 0,
            triggered: false,
            vector,
        }
    }

    /// Current factor-flag nibble (without the read-and-clear side effect).
    pub fn factor_flags(&self) -> u8 {
        self.factor_flags
    }

    /// Current mask nibble.
    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// Whether an unserviced, masked-and-pending interrupt exists.
    pub fn triggered(&self) -> bool {
        self.triggered
    }

    /// Fixed dispatch vector (step within page 1).
    pub fn vector(&self) -> u8 {
        self.vector
    }
}

/// Power-on slot array: vectors 0x0C down to 0x02 in slot order.
pub(crate) const fn power_on_slots() -> [InterruptSlot; INT_SLOT_COUNT] {
    [
        InterruptSlot::new(0x0C),
        InterruptSlot::new(0x0A),
        InterruptSlot::new(0x08),
        InterruptSlot::new(0x06),
        InterruptSlot::new(0x04),
        InterruptSlot::new(0x02),
    ]
}

/// Input pin identifiers. K0x pins belong to port 0, K1x pins to port 1;
/// the low two bits select the pin within its port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pin {
    K00 = 0x0,
    K01 = 0x1,
    K02 = 0x2,
    K03 = 0x3,
    K10 = 0x4,
    K11 = 0x5,
    K12 = 0x6,
    K13 = 0x7,
}

impl Pin {
    /// Port index (0 for K0x, 1 for K1x).
    pub(crate) fn port(self) -> usize {
        (self as usize) >> 2
    }

    /// Bit index within the port.
    pub(crate) fn bit(self) -> u8 {
        (self as u8) & 0x3
    }
}

/// Electrical level of an input pin. Buttons pull pins low when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinState {
    Low = 0,
    High = 1,
}

/// 256 Hz reloadable countdown timer.
///
/// Elapsed ticks are consumed in whole periods; multiple periods elapsed
/// since the last servicing are all applied in one pass. Underflow reloads
/// the countdown and raises the programmable-timer interrupt.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ProgTimer {
    pub(crate) data: u8,
    pub(crate) reload: u8,
    pub(crate) enabled: bool,
    pub(crate) timestamp: u32,
}

/// Fixed 1 Hz timer; only needs to remember when it last fired.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ClockTimer {
    pub(crate) timestamp: u32,
}
