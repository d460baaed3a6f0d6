//! # CPU State and Step Engine
//!
//! The [`Cpu`] struct owns every piece of emulated state — registers, packed
//! memory, interrupt slots, timers — plus the ROM image and the host HAL.
//! It is an explicit context object: no globals, so multiple emulated
//! sessions can coexist (useful for tests).
//!
//! ## Register file
//!
//! - `pc`: 13-bit program counter — bank (bit 12), page (bits 8-11),
//!   step (bits 0-7)
//! - `a`, `b`: 4-bit general registers
//! - `x`, `y`: 12-bit index registers — page / high / low nibbles
//! - `np`: 5-bit new-page latch loaded by PSET, consumed by jumps and calls
//! - `sp`: 8-bit stack pointer into RAM
//! - `flags`: packed C/Z/D/I nibble
//!
//! ## Execution model
//!
//! [`Cpu::step`] runs exactly one fetch-decode-execute-service cycle and
//! returns control to the caller. Pacing against real time happens inside
//! the step via the HAL clock; a speed ratio of 0 disables all waiting for
//! deterministic execution.

use tracing::{debug, info, trace, warn};

use crate::hal::Hal;
use crate::instructions;
use crate::interrupts::{
    ClockTimer, IntSlot, InterruptSlot, Pin, PinState, ProgTimer, power_on_slots, INT_SLOT_COUNT,
    TICK_FREQUENCY, TIMER_1HZ_PERIOD, TIMER_256HZ_PERIOD,
};
use crate::io::{REG_BUZZER_CTRL1, REG_K40_K43_BZ_OUTPUT_PORT, REG_LCD_CTRL};
use crate::memory::{
    Memory, DISPLAY1_ADDR, DISPLAY1_SIZE, DISPLAY2_ADDR, DISPLAY2_SIZE, IO_ADDR, IO_SIZE, RAM_ADDR,
    RAM_SIZE,
};
use crate::opcodes::{decode, extract_args, Opcode};
use crate::{lcd, StepOutcome, StopReason};

/// Carry flag bit.
pub const FLAG_C: u8 = 0x1;
/// Zero flag bit.
pub const FLAG_Z: u8 = 0x2;
/// Decimal (BCD) mode flag bit.
pub const FLAG_D: u8 = 0x4;
/// Interrupt enable flag bit.
pub const FLAG_I: u8 = 0x8;

/// E0C6S46 CPU core.
///
/// Generic over the host abstraction `H`; all real-world coupling (clock,
/// sleep, halt, LCD pins, buzzer) goes through it.
///
/// # Examples
///
/// ```
/// use lib6s46::{Cpu, NullHal};
///
/// let cpu = Cpu::new(NullHal::new(), vec![0xFFF; 0x2000], 1_000_000);
/// assert_eq!(cpu.pc(), 0x0100); // bank 0, page 1, step 0
/// assert_eq!(cpu.sp(), 0x00);
/// assert_eq!(cpu.flags(), 0x0);
/// ```
pub struct Cpu<H: Hal> {
    /// 13-bit program counter.
    pub(crate) pc: u16,
    /// Staged PC for the instruction in flight, committed after the handler.
    pub(crate) next_pc: u16,
    /// 12-bit index register X.
    pub(crate) x: u16,
    /// 12-bit index register Y.
    pub(crate) y: u16,
    /// 4-bit accumulator A.
    pub(crate) a: u8,
    /// 4-bit accumulator B.
    pub(crate) b: u8,
    /// 5-bit new bank/page latch.
    pub(crate) np: u8,
    /// 8-bit stack pointer.
    pub(crate) sp: u8,
    /// Packed C/Z/D/I flags.
    pub(crate) flags: u8,

    /// ROM image of 12-bit words indexed by the full 13-bit PC.
    pub(crate) rom: Vec<u16>,
    /// Packed nibble memory (RAM, display banks, I/O cells).
    pub(crate) memory: Memory,
    /// Input port levels, one nibble per port.
    pub(crate) inputs: [u8; 2],
    /// The six interrupt slots, in servicing order.
    pub(crate) interrupts: [InterruptSlot; INT_SLOT_COUNT],

    /// Unreturned call-class instructions; exposed for debugger stepping.
    pub(crate) call_depth: u32,
    /// 1 Hz clock timer.
    pub(crate) clk_timer: ClockTimer,
    /// 256 Hz programmable timer.
    pub(crate) prog_timer: ProgTimer,
    /// Free-running emulated cycle counter.
    pub(crate) tick_counter: u32,
    /// HAL clock units per second.
    pub(crate) ts_freq: u32,
    /// 0 = unthrottled, N = run at 1/N real-time.
    pub(crate) speed_ratio: u8,
    /// Real-time reference for cycle pacing.
    pub(crate) ref_ts: u64,
    /// Cycle cost of the last executed instruction, paid at the start of
    /// the next step.
    pub(crate) pending_cycles: u8,

    pub(crate) hal: H,
}

impl<H: Hal> Cpu<H> {
    /// Creates a core over `hal`, running `rom`, with the HAL clock ticking
    /// `timestamp_freq` times per second. The core comes up in the
    /// documented power-on state (see [`reset`](Self::reset)) at real-time
    /// speed (ratio 1).
    ///
    /// ROM words are indexed by the 13-bit program counter; fetches past
    /// the end of the image read as 0xFFF, the all-ones pattern of
    /// unprogrammed mask ROM (which decodes as NOP7).
    pub fn new(hal: H, rom: Vec<u16>, timestamp_freq: u32) -> Self {
        let mut cpu = Self {
            pc: 0,
            next_pc: 0,
            x: 0,
            y: 0,
            a: 0,
            b: 0,
            np: 0,
            sp: 0,
            flags: 0,
            rom,
            memory: Memory::new(),
            inputs: [0; 2],
            interrupts: power_on_slots(),
            call_depth: 0,
            clk_timer: ClockTimer::default(),
            prog_timer: ProgTimer::default(),
            tick_counter: 0,
            ts_freq: timestamp_freq,
            speed_ratio: 1,
            ref_ts: 0,
            pending_cycles: 0,
            hal,
        };
        cpu.reset();
        cpu
    }

    /// Resets the core to the documented power-on state: PC at bank 0,
    /// page 1, step 0; registers, flags, and memory zeroed; the buzzer
    /// output port preset to 0xF (buzzer off, active low) and the LCD
    /// control register preset to 0x8; real-time reference resynchronized.
    pub fn reset(&mut self) {
        self.pc = to_pc(0, 1, 0x00);
        self.next_pc = self.pc;
        self.np = to_np(0, 1);
        self.a = 0;
        self.b = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0;
        self.flags = 0;
        self.memory.clear();
        // Raw cell presets: power-on values, no write side effects
        self.memory.write(REG_K40_K43_BZ_OUTPUT_PORT, 0xF);
        self.memory.write(REG_LCD_CTRL, 0x8);
        self.sync_ref_timestamp();
        info!("cpu reset");
    }

    // ========== Stepping ==========

    /// Executes one instruction: fetch, decode, pace, execute, service
    /// timers and interrupts, scan breakpoints.
    ///
    /// `breakpoints` is a borrowed, read-only list of addresses owned by
    /// the caller; it is scanned against the committed PC after every
    /// instruction. Returns [`StepOutcome::Stopped`] on a decode failure
    /// (without advancing past the offending word) or on a breakpoint hit.
    pub fn step(&mut self, breakpoints: &[u16]) -> StepOutcome {
        let word = self.rom.get(self.pc as usize).copied().unwrap_or(0xFFF) & 0xFFF;
        let descriptor = match decode(word) {
            Some(d) => d,
            None => {
                warn!(pc = self.pc, word, "decode failure");
                return StepOutcome::Stopped(StopReason::IllegalOpcode { pc: self.pc, word });
            }
        };

        self.next_pc = (self.pc + 1) & 0x1FFF;
        // Pay the previous instruction's cycles before executing this one,
        // so the wait covers the time the hardware spent running it.
        self.ref_ts = self.wait_for_cycles(self.ref_ts, self.pending_cycles);

        let (arg0, arg1) = extract_args(word, descriptor);
        trace!(pc = self.pc, word, op = descriptor.mnemonic, "exec");
        instructions::dispatch(self, descriptor.op, arg0, arg1);

        self.pc = self.next_pc;
        self.pending_cycles = descriptor.cycles;

        // PSET is the one instruction that must not disturb the np latch it
        // just loaded, and interrupts are deferred across a PSET/jump pair;
        // everything else resynchronizes np from the committed PC.
        let was_pset = descriptor.op == Opcode::Pset;
        if !was_pset {
            self.np = ((self.pc >> 8) & 0x1F) as u8;
        }

        self.service_timers();

        if self.flag_i() && !was_pset {
            self.process_interrupts();
        }

        for &bp in breakpoints {
            if bp == self.pc {
                return StepOutcome::Stopped(StopReason::Breakpoint { pc: self.pc });
            }
        }
        StepOutcome::Continue
    }

    /// Accounts `cycles` emulated ticks and blocks until the matching
    /// real-time deadline. Unthrottled mode (ratio 0) never sleeps and
    /// keeps the reference pinned to the current HAL time.
    pub(crate) fn wait_for_cycles(&mut self, since: u64, cycles: u8) -> u64 {
        self.tick_counter = self.tick_counter.wrapping_add(cycles as u32);
        if self.speed_ratio == 0 {
            return self.hal.now();
        }
        let deadline = since
            + (cycles as u64 * self.ts_freq as u64)
                / (TICK_FREQUENCY as u64 * self.speed_ratio as u64);
        self.hal.sleep_until(deadline);
        deadline
    }

    fn service_timers(&mut self) {
        if self
            .tick_counter
            .wrapping_sub(self.clk_timer.timestamp)
            >= TIMER_1HZ_PERIOD
        {
            loop {
                self.clk_timer.timestamp = self.clk_timer.timestamp.wrapping_add(TIMER_1HZ_PERIOD);
                if self.tick_counter.wrapping_sub(self.clk_timer.timestamp) < TIMER_1HZ_PERIOD {
                    break;
                }
            }
            self.generate_interrupt(IntSlot::ClockTimer, 3);
        }

        if self.prog_timer.enabled
            && self
                .tick_counter
                .wrapping_sub(self.prog_timer.timestamp)
                >= TIMER_256HZ_PERIOD
        {
            // Apply every elapsed period, one at a time, so no underflow is
            // lost under scheduling jitter
            loop {
                self.prog_timer.timestamp =
                    self.prog_timer.timestamp.wrapping_add(TIMER_256HZ_PERIOD);
                self.prog_timer.data = self.prog_timer.data.wrapping_sub(1);
                if self.prog_timer.data == 0 {
                    self.prog_timer.data = self.prog_timer.reload;
                    debug!(reload = self.prog_timer.reload, "prog timer underflow");
                    self.generate_interrupt(IntSlot::ProgTimer, 0);
                }
                if self.tick_counter.wrapping_sub(self.prog_timer.timestamp) < TIMER_256HZ_PERIOD {
                    break;
                }
            }
        }
    }

    // ========== Interrupts ==========

    /// Raises `bit` in `slot`'s factor-flag register; latches the trigger
    /// if the matching mask bit is set.
    pub fn generate_interrupt(&mut self, slot: IntSlot, bit: u8) {
        let s = &mut self.interrupts[slot as usize];
        s.factor_flags |= 0x1 << bit;
        if s.mask & (0x1 << bit) != 0 {
            s.triggered = true;
        }
    }

    /// Services every triggered slot, in fixed slot order. Each serviced
    /// slot pushes the 3-nibble return address, clears the interrupt-enable
    /// flag, redirects execution to its vector in page 1, bumps the call
    /// depth, and consumes a fixed 12-cycle cost through the pacing clock.
    pub(crate) fn process_interrupts(&mut self) {
        for i in 0..INT_SLOT_COUNT {
            if !self.interrupts[i].triggered {
                continue;
            }
            let vector = self.interrupts[i].vector;
            debug!(slot = i, vector, "interrupt dispatch");
            let sp = self.sp as u16;
            self.write_memory(sp.wrapping_sub(1), self.pcp());
            self.write_memory(sp.wrapping_sub(2), self.pcsh());
            self.write_memory(sp.wrapping_sub(3), self.pcsl());
            self.sp = self.sp.wrapping_sub(3);
            self.set_flag(FLAG_I, false);
            self.np = to_np(self.nbp(), 1);
            self.pc = to_pc(self.pcb(), 1, vector);
            self.call_depth += 1;
            self.ref_ts = self.wait_for_cycles(self.ref_ts, 12);
            self.interrupts[i].triggered = false;
        }
    }

    /// Sets an input pin level. A falling edge raises the matching pin-group
    /// slot's factor bit for that pin's index within its port.
    pub fn set_input_pin(&mut self, pin: Pin, state: PinState) {
        let port = pin.port();
        let bit = pin.bit();
        self.inputs[port] =
            (self.inputs[port] & !(0x1 << bit)) | (((state == PinState::High) as u8) << bit);
        if state == PinState::Low {
            let slot = if port == 0 {
                IntSlot::K00K03
            } else {
                IntSlot::K10K13
            };
            self.generate_interrupt(slot, bit);
        }
    }

    // ========== Memory ==========

    /// Reads the 4-bit cell at a logical address, with I/O read semantics
    /// in the register range (factor-flag reads clear the register).
    /// Addresses outside all ranges read as 0.
    pub fn read_memory(&mut self, addr: u16) -> u8 {
        if addr < RAM_ADDR + RAM_SIZE {
            self.memory.read(addr)
        } else if addr >= DISPLAY1_ADDR && addr < DISPLAY1_ADDR + DISPLAY1_SIZE {
            self.memory.read(addr)
        } else if addr >= DISPLAY2_ADDR && addr < DISPLAY2_ADDR + DISPLAY2_SIZE {
            self.memory.read(addr)
        } else if addr >= IO_ADDR && addr < IO_ADDR + IO_SIZE {
            self.io_read(addr)
        } else {
            0
        }
    }

    /// Writes the 4-bit cell at a logical address. Display writes also fan
    /// out to the LCD pins; I/O writes also run the register side effect.
    /// Addresses outside all ranges ignore the write.
    pub fn write_memory(&mut self, addr: u16, value: u8) {
        if addr < RAM_ADDR + RAM_SIZE {
            self.memory.write(addr, value);
        } else if addr >= DISPLAY1_ADDR && addr < DISPLAY1_ADDR + DISPLAY1_SIZE {
            self.memory.write(addr, value);
            self.set_lcd(addr, value);
        } else if addr >= DISPLAY2_ADDR && addr < DISPLAY2_ADDR + DISPLAY2_SIZE {
            self.memory.write(addr, value);
            self.set_lcd(addr, value);
        } else if addr >= IO_ADDR && addr < IO_ADDR + IO_SIZE {
            self.memory.write(addr, value);
            self.io_write(addr, value & 0xF);
        }
    }

    /// Fans a display-memory write out to individual LCD pins.
    pub(crate) fn set_lcd(&mut self, addr: u16, value: u8) {
        let seg = lcd::segment(addr);
        let com0 = lcd::com0(addr);
        for i in 0..4 {
            self.hal.set_lcd_pin(seg, com0 + i, (value >> i) & 0x1 != 0);
        }
    }

    /// Re-emits all display and buzzer state through the HAL by replaying
    /// the relevant memory cells through their write side effects. Hosts
    /// call this after e.g. a window resize.
    pub fn refresh_hardware(&mut self) {
        const REFRESH_RANGES: [(u16, u16); 4] = [
            (DISPLAY1_ADDR, DISPLAY1_SIZE),
            (DISPLAY2_ADDR, DISPLAY2_SIZE),
            (REG_BUZZER_CTRL1, 1),
            (REG_K40_K43_BZ_OUTPUT_PORT, 1),
        ];
        for (base, size) in REFRESH_RANGES {
            for addr in base..base + size {
                let value = self.memory.read(addr);
                self.write_memory(addr, value);
            }
        }
    }

    /// Reads the 4-bit register selected by the low two bits of `r`:
    /// A, B, M(X), or M(Y).
    pub(crate) fn rq(&mut self, r: u8) -> u8 {
        match r & 0x3 {
            0x0 => self.a,
            0x1 => self.b,
            0x2 => self.read_memory(self.x),
            _ => self.read_memory(self.y),
        }
    }

    /// Writes the 4-bit register selected by the low two bits of `r`.
    pub(crate) fn set_rq(&mut self, r: u8, value: u8) {
        match r & 0x3 {
            0x0 => self.a = value,
            0x1 => self.b = value,
            0x2 => self.write_memory(self.x, value),
            _ => self.write_memory(self.y, value),
        }
    }

    // ========== Host controls ==========

    /// Sets the speed ratio: 0 = unthrottled, N = run at 1/N real time.
    pub fn set_speed(&mut self, ratio: u8) {
        self.speed_ratio = ratio;
    }

    /// Resynchronizes the real-time pacing reference to "now". Call after
    /// any host-side pause so the core does not try to catch up.
    pub fn sync_ref_timestamp(&mut self) {
        self.ref_ts = self.hal.now();
    }

    // ========== Register getters ==========

    /// Program counter (13 bits).
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Accumulator A (4 bits).
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Accumulator B (4 bits).
    pub fn b(&self) -> u8 {
        self.b
    }

    /// Index register X (12 bits).
    pub fn x(&self) -> u16 {
        self.x
    }

    /// Index register Y (12 bits).
    pub fn y(&self) -> u16 {
        self.y
    }

    /// Stack pointer (8 bits).
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// New bank/page latch (5 bits).
    pub fn np(&self) -> u8 {
        self.np
    }

    /// Packed flag nibble (C/Z/D/I).
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// Carry flag.
    pub fn flag_c(&self) -> bool {
        self.flags & FLAG_C != 0
    }

    /// Zero flag.
    pub fn flag_z(&self) -> bool {
        self.flags & FLAG_Z != 0
    }

    /// Decimal mode flag.
    pub fn flag_d(&self) -> bool {
        self.flags & FLAG_D != 0
    }

    /// Interrupt enable flag.
    pub fn flag_i(&self) -> bool {
        self.flags & FLAG_I != 0
    }

    /// Count of unreturned call-class instructions (calls and serviced
    /// interrupts increment, returns decrement). Not architectural state;
    /// drives step-over/into/out in an external debugger.
    pub fn call_depth(&self) -> u32 {
        self.call_depth
    }

    /// Free-running emulated cycle counter.
    pub fn tick_counter(&self) -> u32 {
        self.tick_counter
    }

    // ========== Register setters ==========
    //
    // State injection, for hosts restoring a saved session and for tests.

    /// Sets accumulator A (masked to 4 bits).
    pub fn set_a(&mut self, value: u8) {
        self.a = value & 0xF;
    }

    /// Sets accumulator B (masked to 4 bits).
    pub fn set_b(&mut self, value: u8) {
        self.b = value & 0xF;
    }

    /// Sets index register X (masked to 12 bits).
    pub fn set_x(&mut self, value: u16) {
        self.x = value & 0xFFF;
    }

    /// Sets index register Y (masked to 12 bits).
    pub fn set_y(&mut self, value: u16) {
        self.y = value & 0xFFF;
    }

    /// Sets the stack pointer.
    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Sets the program counter (masked to 13 bits).
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value & 0x1FFF;
    }

    /// Sets or clears the carry flag.
    pub fn set_flag_c(&mut self, on: bool) {
        self.set_flag(FLAG_C, on);
    }

    /// Sets or clears the zero flag.
    pub fn set_flag_z(&mut self, on: bool) {
        self.set_flag(FLAG_Z, on);
    }

    /// Sets or clears the decimal flag.
    pub fn set_flag_d(&mut self, on: bool) {
        self.set_flag(FLAG_D, on);
    }

    /// Sets or clears the interrupt-enable flag.
    pub fn set_flag_i(&mut self, on: bool) {
        self.set_flag(FLAG_I, on);
    }

    /// State of one interrupt slot.
    pub fn interrupt(&self, slot: IntSlot) -> &InterruptSlot {
        &self.interrupts[slot as usize]
    }

    /// Borrow of the host HAL.
    pub fn hal(&self) -> &H {
        &self.hal
    }

    /// Mutable borrow of the host HAL.
    pub fn hal_mut(&mut self) -> &mut H {
        &mut self.hal
    }

    // ========== Flag and field helpers ==========

    pub(crate) fn set_flag(&mut self, flag: u8, on: bool) {
        if on {
            self.flags |= flag;
        } else {
            self.flags &= !flag;
        }
    }

    /// Carry flag as a 0/1 operand.
    pub(crate) fn carry(&self) -> u8 {
        self.flag_c() as u8
    }

    /// PC step, low nibble.
    pub(crate) fn pcsl(&self) -> u8 {
        (self.pc & 0xF) as u8
    }

    /// PC step, high nibble.
    pub(crate) fn pcsh(&self) -> u8 {
        ((self.pc >> 4) & 0xF) as u8
    }

    /// PC page.
    pub(crate) fn pcp(&self) -> u8 {
        ((self.pc >> 8) & 0xF) as u8
    }

    /// PC bank.
    pub(crate) fn pcb(&self) -> u8 {
        ((self.pc >> 12) & 0x1) as u8
    }

    /// Bank bit of the new-page latch.
    pub(crate) fn nbp(&self) -> u8 {
        (self.np >> 4) & 0x1
    }

    /// Page bits of the new-page latch.
    pub(crate) fn npp(&self) -> u8 {
        self.np & 0xF
    }

    /// X high+low byte.
    pub(crate) fn xhl(&self) -> u16 {
        self.x & 0xFF
    }

    pub(crate) fn xl(&self) -> u8 {
        (self.x & 0xF) as u8
    }

    pub(crate) fn xh(&self) -> u8 {
        ((self.x >> 4) & 0xF) as u8
    }

    pub(crate) fn xp(&self) -> u8 {
        ((self.x >> 8) & 0xF) as u8
    }

    /// Y high+low byte.
    pub(crate) fn yhl(&self) -> u16 {
        self.y & 0xFF
    }

    pub(crate) fn yl(&self) -> u8 {
        (self.y & 0xF) as u8
    }

    pub(crate) fn yh(&self) -> u8 {
        ((self.y >> 4) & 0xF) as u8
    }

    pub(crate) fn yp(&self) -> u8 {
        ((self.y >> 8) & 0xF) as u8
    }

    pub(crate) fn spl(&self) -> u8 {
        self.sp & 0xF
    }

    pub(crate) fn sph(&self) -> u8 {
        (self.sp >> 4) & 0xF
    }
}

/// Composes a 13-bit PC from bank, page, and step.
pub(crate) fn to_pc(bank: u8, page: u8, step: u8) -> u16 {
    (step as u16) | (((page & 0xF) as u16) << 8) | (((bank & 0x1) as u16) << 12)
}

/// Composes a 5-bit new-page latch from bank and page.
pub(crate) fn to_np(bank: u8, page: u8) -> u8 {
    (page & 0xF) | ((bank & 0x1) << 4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::NullHal;

    fn blank_rom() -> Vec<u16> {
        vec![0xFFF; 0x2000]
    }

    #[test]
    fn test_power_on_state() {
        let cpu = Cpu::new(NullHal::new(), blank_rom(), 1_000_000);
        assert_eq!(cpu.pc(), 0x0100);
        assert_eq!(cpu.np(), 0x01);
        assert_eq!(cpu.a(), 0);
        assert_eq!(cpu.b(), 0);
        assert_eq!(cpu.x(), 0);
        assert_eq!(cpu.y(), 0);
        assert_eq!(cpu.sp(), 0);
        assert_eq!(cpu.flags(), 0);
        assert_eq!(cpu.call_depth(), 0);
    }

    #[test]
    fn test_power_on_io_presets() {
        let cpu = Cpu::new(NullHal::new(), blank_rom(), 1_000_000);
        assert_eq!(cpu.memory.read(REG_K40_K43_BZ_OUTPUT_PORT), 0xF);
        assert_eq!(cpu.memory.read(REG_LCD_CTRL), 0x8);
    }

    #[test]
    fn test_blank_rom_steps_as_nop7() {
        let mut cpu = Cpu::new(NullHal::new(), blank_rom(), 1_000_000);
        cpu.set_speed(0);
        assert_eq!(cpu.step(&[]), StepOutcome::Continue);
        assert_eq!(cpu.pc(), 0x0101);
        // Cycle cost is paid at the start of the following step
        assert_eq!(cpu.step(&[]), StepOutcome::Continue);
        assert_eq!(cpu.tick_counter(), 7);
    }

    #[test]
    fn test_short_rom_fetches_read_as_unprogrammed() {
        // A 2-word image: every fetch lands past the end and reads 0xFFF
        let mut cpu = Cpu::new(NullHal::new(), vec![0xE40, 0x000], 1_000_000);
        cpu.set_speed(0);
        assert_eq!(cpu.step(&[]), StepOutcome::Continue);
        assert_eq!(cpu.pc(), 0x0101);
    }

    #[test]
    fn test_decode_failure_stops_without_advancing() {
        let mut rom = blank_rom();
        rom[0x100] = 0xFFE; // no entry matches 0xFFE
        let mut cpu = Cpu::new(NullHal::new(), rom, 1_000_000);
        cpu.set_speed(0);
        let stop = cpu.step(&[]);
        assert_eq!(
            stop,
            StepOutcome::Stopped(StopReason::IllegalOpcode {
                pc: 0x100,
                word: 0xFFE
            })
        );
        assert_eq!(cpu.pc(), 0x100);
        assert_eq!(cpu.tick_counter(), 0);
        // Stepping again re-reports the same failure
        assert_eq!(cpu.step(&[]), stop);
    }

    #[test]
    fn test_out_of_range_memory_is_inert() {
        let mut cpu = Cpu::new(NullHal::new(), blank_rom(), 1_000_000);
        cpu.write_memory(0x500, 0xF);
        assert_eq!(cpu.read_memory(0x500), 0);
        cpu.write_memory(0x0000, 0x5);
        assert_eq!(cpu.read_memory(0x0000), 0x5);
    }
}
