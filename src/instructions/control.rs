//! Calls, returns, and HALT.
//!
//! Return addresses are three nibbles on the stack, pushed high to low
//! (page, step-high, step-low). The bank bit is not saved; returns stay in
//! the current bank.

use crate::cpu::{to_pc, Cpu};
use crate::hal::Hal;

fn push_return_address<H: Hal>(cpu: &mut Cpu<H>) {
    let sp = cpu.sp as u16;
    cpu.write_memory(sp.wrapping_sub(1), cpu.pcp());
    cpu.write_memory(sp.wrapping_sub(2), cpu.pcsh());
    cpu.write_memory(sp.wrapping_sub(3), cpu.pcsl());
    cpu.sp = cpu.sp.wrapping_sub(3);
}

fn pop_return_address<H: Hal>(cpu: &mut Cpu<H>) -> u16 {
    let sp = cpu.sp as u16;
    let addr = cpu.read_memory(sp) as u16
        | ((cpu.read_memory(sp + 1) as u16) << 4)
        | ((cpu.read_memory(sp + 2) as u16) << 8)
        | ((cpu.pcb() as u16) << 12);
    cpu.sp = cpu.sp.wrapping_add(3);
    addr
}

/// Call into the page named by the `np` latch.
pub(super) fn call<H: Hal>(cpu: &mut Cpu<H>, s: u8) {
    cpu.pc = (cpu.pc + 1) & 0x1FFF;
    push_return_address(cpu);
    cpu.next_pc = to_pc(cpu.pcb(), cpu.npp(), s);
    cpu.call_depth += 1;
}

/// Call into page 0 of the current bank.
pub(super) fn calz<H: Hal>(cpu: &mut Cpu<H>, s: u8) {
    cpu.pc = (cpu.pc + 1) & 0x1FFF;
    push_return_address(cpu);
    cpu.next_pc = to_pc(cpu.pcb(), 0, s);
    cpu.call_depth += 1;
}

pub(super) fn ret<H: Hal>(cpu: &mut Cpu<H>) {
    cpu.next_pc = pop_return_address(cpu);
    cpu.call_depth = cpu.call_depth.saturating_sub(1);
}

/// Return-and-skip. The pop only adjusts SP; execution resumes at the word
/// after the RETS itself, matching the hardware.
pub(super) fn rets<H: Hal>(cpu: &mut Cpu<H>) {
    let _ = pop_return_address(cpu);
    cpu.next_pc = (cpu.pc + 1) & 0x1FFF;
    cpu.call_depth = cpu.call_depth.saturating_sub(1);
}

/// Return, then store the immediate byte at M(X), M(X+1) and advance X by
/// two. X+1 is deliberately not wrapped to 12 bits; past 0xFFF it falls
/// outside every memory range and the write is discarded.
pub(super) fn retd<H: Hal>(cpu: &mut Cpu<H>, imm: u8) {
    cpu.next_pc = pop_return_address(cpu);
    cpu.write_memory(cpu.x, imm & 0xF);
    cpu.write_memory(cpu.x + 1, (imm >> 4) & 0xF);
    cpu.x = ((cpu.x + 2) & 0xFF) | ((cpu.xp() as u16) << 8);
    cpu.call_depth = cpu.call_depth.saturating_sub(1);
}

pub(super) fn halt<H: Hal>(cpu: &mut Cpu<H>) {
    cpu.hal.halt();
}
