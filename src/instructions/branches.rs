//! Jumps and the PSET page latch.
//!
//! All jumps land within the bank/page named by `np`; a PSET immediately
//! before is the only way to leave the current page. The step engine
//! resynchronizes `np` from the committed PC after every non-PSET
//! instruction, so a stale latch never outlives one instruction.

use crate::cpu::Cpu;
use crate::hal::Hal;

pub(super) fn pset<H: Hal>(cpu: &mut Cpu<H>, p: u8) {
    cpu.np = p;
}

pub(super) fn jp<H: Hal>(cpu: &mut Cpu<H>, s: u8) {
    cpu.next_pc = s as u16 | ((cpu.np as u16) << 8);
}

pub(super) fn jp_c<H: Hal>(cpu: &mut Cpu<H>, s: u8) {
    if cpu.flag_c() {
        jp(cpu, s);
    }
}

pub(super) fn jp_nc<H: Hal>(cpu: &mut Cpu<H>, s: u8) {
    if !cpu.flag_c() {
        jp(cpu, s);
    }
}

pub(super) fn jp_z<H: Hal>(cpu: &mut Cpu<H>, s: u8) {
    if cpu.flag_z() {
        jp(cpu, s);
    }
}

pub(super) fn jp_nz<H: Hal>(cpu: &mut Cpu<H>, s: u8) {
    if !cpu.flag_z() {
        jp(cpu, s);
    }
}

/// Indirect jump: step = B:A.
pub(super) fn jpba<H: Hal>(cpu: &mut Cpu<H>) {
    cpu.next_pc = cpu.a as u16 | ((cpu.b as u16) << 4) | ((cpu.np as u16) << 8);
}
