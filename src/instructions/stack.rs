//! Stack instructions and SP nibble transfers.
//!
//! The stack grows downward in RAM, one nibble per cell. SP wraps within
//! its 8 bits on INC/DEC, but pop reads address the cells above SP without
//! wrapping, so a pop at SP 0xFF reaches into 0x100.

use crate::cpu::Cpu;
use crate::hal::Hal;

fn push<H: Hal>(cpu: &mut Cpu<H>, value: u8) {
    cpu.sp = cpu.sp.wrapping_sub(1);
    cpu.write_memory(cpu.sp as u16, value);
}

fn pop<H: Hal>(cpu: &mut Cpu<H>) -> u8 {
    let value = cpu.read_memory(cpu.sp as u16);
    cpu.sp = cpu.sp.wrapping_add(1);
    value
}

pub(super) fn inc_sp<H: Hal>(cpu: &mut Cpu<H>) {
    cpu.sp = cpu.sp.wrapping_add(1);
}

pub(super) fn dec_sp<H: Hal>(cpu: &mut Cpu<H>) {
    cpu.sp = cpu.sp.wrapping_sub(1);
}

pub(super) fn push_r<H: Hal>(cpu: &mut Cpu<H>, r: u8) {
    let v = cpu.rq(r);
    push(cpu, v);
}

pub(super) fn push_xp<H: Hal>(cpu: &mut Cpu<H>) {
    let v = cpu.xp();
    push(cpu, v);
}

pub(super) fn push_xh<H: Hal>(cpu: &mut Cpu<H>) {
    let v = cpu.xh();
    push(cpu, v);
}

pub(super) fn push_xl<H: Hal>(cpu: &mut Cpu<H>) {
    let v = cpu.xl();
    push(cpu, v);
}

pub(super) fn push_yp<H: Hal>(cpu: &mut Cpu<H>) {
    let v = cpu.yp();
    push(cpu, v);
}

pub(super) fn push_yh<H: Hal>(cpu: &mut Cpu<H>) {
    let v = cpu.yh();
    push(cpu, v);
}

pub(super) fn push_yl<H: Hal>(cpu: &mut Cpu<H>) {
    let v = cpu.yl();
    push(cpu, v);
}

pub(super) fn push_f<H: Hal>(cpu: &mut Cpu<H>) {
    let v = cpu.flags;
    push(cpu, v);
}

pub(super) fn pop_r<H: Hal>(cpu: &mut Cpu<H>, r: u8) {
    let v = pop(cpu);
    cpu.set_rq(r, v);
}

pub(super) fn pop_xp<H: Hal>(cpu: &mut Cpu<H>) {
    let v = pop(cpu);
    cpu.x = cpu.xl() as u16 | ((cpu.xh() as u16) << 4) | ((v as u16) << 8);
}

pub(super) fn pop_xh<H: Hal>(cpu: &mut Cpu<H>) {
    let v = pop(cpu);
    cpu.x = cpu.xl() as u16 | ((v as u16) << 4) | ((cpu.xp() as u16) << 8);
}

pub(super) fn pop_xl<H: Hal>(cpu: &mut Cpu<H>) {
    let v = pop(cpu);
    cpu.x = v as u16 | ((cpu.xh() as u16) << 4) | ((cpu.xp() as u16) << 8);
}

pub(super) fn pop_yp<H: Hal>(cpu: &mut Cpu<H>) {
    let v = pop(cpu);
    cpu.y = cpu.yl() as u16 | ((cpu.yh() as u16) << 4) | ((v as u16) << 8);
}

pub(super) fn pop_yh<H: Hal>(cpu: &mut Cpu<H>) {
    let v = pop(cpu);
    cpu.y = cpu.yl() as u16 | ((v as u16) << 4) | ((cpu.yp() as u16) << 8);
}

pub(super) fn pop_yl<H: Hal>(cpu: &mut Cpu<H>) {
    let v = pop(cpu);
    cpu.y = v as u16 | ((cpu.yh() as u16) << 4) | ((cpu.yp() as u16) << 8);
}

/// POP F restores the whole nibble, interrupt-enable bit included.
pub(super) fn pop_f<H: Hal>(cpu: &mut Cpu<H>) {
    cpu.flags = pop(cpu);
}

pub(super) fn ld_sph_r<H: Hal>(cpu: &mut Cpu<H>, r: u8) {
    let v = cpu.rq(r);
    cpu.sp = cpu.spl() | (v << 4);
}

pub(super) fn ld_spl_r<H: Hal>(cpu: &mut Cpu<H>, r: u8) {
    let v = cpu.rq(r);
    cpu.sp = v | (cpu.sph() << 4);
}

pub(super) fn ld_r_sph<H: Hal>(cpu: &mut Cpu<H>, r: u8) {
    cpu.set_rq(r, cpu.sph());
}

pub(super) fn ld_r_spl<H: Hal>(cpu: &mut Cpu<H>, r: u8) {
    cpu.set_rq(r, cpu.spl());
}
