//! # E0C6S46 CPU Emulator Core
//!
//! A cycle-accurate emulator for the Epson E0C6S46 class of 4-bit
//! dual-accumulator microcontrollers (the silicon behind 1990s LCD handheld
//! toys), faithful at the instruction and cycle level so that binary ROM
//! images written for the real chip run with identical register, memory,
//! timer, and interrupt behavior.
//!
//! ## Quick start
//!
//! ```rust
//! use lib6s46::{Cpu, NullHal, StepOutcome};
//!
//! // An 8K-word ROM image; execution starts at 0x0100 (bank 0, page 1).
//! let mut rom = vec![0xFFFu16; 0x2000]; // unprogrammed ROM decodes as NOP7
//! rom[0x0100] = 0xE40; // PSET #0x00
//! rom[0x0101] = 0x000; // JP   #0x00
//!
//! let mut cpu = Cpu::new(NullHal::new(), rom, 1_000_000);
//! cpu.set_speed(0); // unthrottled, deterministic
//!
//! assert_eq!(cpu.step(&[]), StepOutcome::Continue);
//! assert_eq!(cpu.step(&[]), StepOutcome::Continue);
//! assert_eq!(cpu.pc(), 0x000); // jumped to page 0, step 0
//! ```
//!
//! ## Architecture
//!
//! - **Explicit context**: all state lives in [`Cpu`], generic over the
//!   [`Hal`] host seam; multiple emulated sessions can coexist.
//! - **Table-driven decode**: every instruction is described by one entry in
//!   [`OPCODE_TABLE`], matched by code/mask against the fetched 12-bit word.
//! - **Hardware-fidelity error policy**: out-of-range memory traffic reads 0
//!   and ignores writes; the only "stop" conditions a caller sees are decode
//!   failure and breakpoint hits, both reported through [`StepOutcome`].
//!
//! ## Modules
//!
//! - `cpu` - CPU state, step engine, interrupt and timer servicing
//! - `hal` - host abstraction (clock, sleep, halt, LCD pins, buzzer)
//! - `memory` - packed dual-nibble memory with region dispatch
//! - `io` - memory-mapped I/O register bank
//! - `lcd` - display memory to segment/common pin projection
//! - `interrupts` - interrupt slots, input pins, timers
//! - `opcodes` - opcode descriptor table and decoder

pub mod cpu;
pub mod hal;
pub mod interrupts;
pub mod io;
pub mod lcd;
pub mod memory;
pub mod opcodes;

// Internal instruction implementations (not part of public API)
mod instructions;

// Re-export public API
pub use cpu::Cpu;
pub use hal::{Hal, NullHal};
pub use interrupts::{IntSlot, Pin, PinState};
pub use opcodes::{decode, extract_args, Opcode, OpcodeDescriptor, OPCODE_TABLE};

/// Result of a single [`Cpu::step`] invocation.
///
/// Mirrors the hardware driver contract: `Continue` means "keep stepping",
/// `Stopped` means the caller must stop the stepping loop and decide what to
/// do (resume past a breakpoint, or treat a decode failure as a crash).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Instruction executed; keep stepping.
    Continue,
    /// Stop stepping. See [`StopReason`].
    Stopped(StopReason),
}

/// Why the step engine asked the caller to stop.
///
/// Both conditions share the "stop" channel: a breakpoint is not an error,
/// and a decode failure is recoverable only by re-initializing the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The fetched word matches no entry in the opcode table. The program
    /// counter does not advance past the offending word.
    IllegalOpcode {
        /// Program counter of the failed fetch.
        pc: u16,
        /// The 12-bit word that failed to decode.
        word: u16,
    },
    /// The committed program counter equals an installed breakpoint address.
    Breakpoint {
        /// The matching address.
        pc: u16,
    },
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            StopReason::IllegalOpcode { pc, word } => {
                write!(f, "illegal opcode 0x{:03X} at 0x{:04X}", word, pc)
            }
            StopReason::Breakpoint { pc } => write!(f, "breakpoint at 0x{:04X}", pc),
        }
    }
}

impl std::error::Error for StopReason {}
