//! Arithmetic and logic.
//!
//! Add and subtract honor the decimal flag: in BCD mode an add adjusts by
//! -10 on overflow past 9 and a subtract by -6 on borrow, with carry
//! reflecting the decimal overflow/borrow. Logic operations touch only Z.
//!
//! Zero is judged by reading the destination back after the store, so a
//! destination with read side effects (a selector pointing into the I/O
//! range) sees exactly one extra read, as on hardware.

use crate::cpu::{Cpu, FLAG_C, FLAG_Z};
use crate::hal::Hal;
use crate::instructions::load_store::{inc_x, inc_y};

fn add_with<H: Hal>(cpu: &mut Cpu<H>, r: u8, operand: u8, carry_in: u8) {
    let tmp = cpu.rq(r) + operand + carry_in;
    if cpu.flag_d() {
        if tmp >= 10 {
            cpu.set_rq(r, (tmp - 10) & 0xF);
            cpu.set_flag(FLAG_C, true);
        } else {
            cpu.set_rq(r, tmp);
            cpu.set_flag(FLAG_C, false);
        }
    } else {
        cpu.set_rq(r, tmp & 0xF);
        cpu.set_flag(FLAG_C, tmp >> 4 != 0);
    }
    let z = cpu.rq(r) == 0;
    cpu.set_flag(FLAG_Z, z);
}

fn sub_with<H: Hal>(cpu: &mut Cpu<H>, r: u8, operand: u8, borrow_in: u8) {
    let tmp = cpu.rq(r).wrapping_sub(operand).wrapping_sub(borrow_in);
    if cpu.flag_d() {
        if tmp >> 4 != 0 {
            cpu.set_rq(r, tmp.wrapping_sub(6) & 0xF);
        } else {
            cpu.set_rq(r, tmp);
        }
    } else {
        cpu.set_rq(r, tmp & 0xF);
    }
    // Carry reports the raw borrow even after the decimal adjust
    cpu.set_flag(FLAG_C, tmp >> 4 != 0);
    let z = cpu.rq(r) == 0;
    cpu.set_flag(FLAG_Z, z);
}

pub(super) fn add_r_i<H: Hal>(cpu: &mut Cpu<H>, r: u8, i: u8) {
    add_with(cpu, r, i, 0);
}

pub(super) fn add_r_q<H: Hal>(cpu: &mut Cpu<H>, r: u8, q: u8) {
    let v = cpu.rq(q);
    add_with(cpu, r, v, 0);
}

pub(super) fn adc_r_i<H: Hal>(cpu: &mut Cpu<H>, r: u8, i: u8) {
    let c = cpu.carry();
    add_with(cpu, r, i, c);
}

pub(super) fn adc_r_q<H: Hal>(cpu: &mut Cpu<H>, r: u8, q: u8) {
    let v = cpu.rq(q);
    let c = cpu.carry();
    add_with(cpu, r, v, c);
}

pub(super) fn sub_r_q<H: Hal>(cpu: &mut Cpu<H>, r: u8, q: u8) {
    let v = cpu.rq(q);
    sub_with(cpu, r, v, 0);
}

pub(super) fn sbc_r_i<H: Hal>(cpu: &mut Cpu<H>, r: u8, i: u8) {
    let c = cpu.carry();
    sub_with(cpu, r, i, c);
}

pub(super) fn sbc_r_q<H: Hal>(cpu: &mut Cpu<H>, r: u8, q: u8) {
    let v = cpu.rq(q);
    let c = cpu.carry();
    sub_with(cpu, r, v, c);
}

fn logic_store<H: Hal>(cpu: &mut Cpu<H>, r: u8, value: u8) {
    cpu.set_rq(r, value);
    let z = cpu.rq(r) == 0;
    cpu.set_flag(FLAG_Z, z);
}

pub(super) fn and_r_i<H: Hal>(cpu: &mut Cpu<H>, r: u8, i: u8) {
    let v = cpu.rq(r) & i;
    logic_store(cpu, r, v);
}

pub(super) fn and_r_q<H: Hal>(cpu: &mut Cpu<H>, r: u8, q: u8) {
    let v = cpu.rq(r) & cpu.rq(q);
    logic_store(cpu, r, v);
}

pub(super) fn or_r_i<H: Hal>(cpu: &mut Cpu<H>, r: u8, i: u8) {
    let v = cpu.rq(r) | i;
    logic_store(cpu, r, v);
}

pub(super) fn or_r_q<H: Hal>(cpu: &mut Cpu<H>, r: u8, q: u8) {
    let v = cpu.rq(r) | cpu.rq(q);
    logic_store(cpu, r, v);
}

pub(super) fn xor_r_i<H: Hal>(cpu: &mut Cpu<H>, r: u8, i: u8) {
    let v = cpu.rq(r) ^ i;
    logic_store(cpu, r, v);
}

pub(super) fn xor_r_q<H: Hal>(cpu: &mut Cpu<H>, r: u8, q: u8) {
    let v = cpu.rq(r) ^ cpu.rq(q);
    logic_store(cpu, r, v);
}

fn compare<H: Hal>(cpu: &mut Cpu<H>, lhs: u8, rhs: u8) {
    cpu.set_flag(FLAG_C, lhs < rhs);
    cpu.set_flag(FLAG_Z, lhs == rhs);
}

pub(super) fn cp_r_i<H: Hal>(cpu: &mut Cpu<H>, r: u8, i: u8) {
    let lhs = cpu.rq(r);
    compare(cpu, lhs, i);
}

pub(super) fn cp_r_q<H: Hal>(cpu: &mut Cpu<H>, r: u8, q: u8) {
    let lhs = cpu.rq(r);
    let rhs = cpu.rq(q);
    compare(cpu, lhs, rhs);
}

/// Non-destructive AND, Z only.
pub(super) fn fan_r_i<H: Hal>(cpu: &mut Cpu<H>, r: u8, i: u8) {
    let z = cpu.rq(r) & i == 0;
    cpu.set_flag(FLAG_Z, z);
}

pub(super) fn fan_r_q<H: Hal>(cpu: &mut Cpu<H>, r: u8, q: u8) {
    let z = cpu.rq(r) & cpu.rq(q) == 0;
    cpu.set_flag(FLAG_Z, z);
}

/// Rotate left through carry. Z is untouched.
pub(super) fn rlc<H: Hal>(cpu: &mut Cpu<H>, r: u8) {
    let v = cpu.rq(r);
    let tmp = (v << 1) | cpu.carry();
    cpu.set_flag(FLAG_C, v & 0x8 != 0);
    cpu.set_rq(r, tmp & 0xF);
}

/// Rotate right through carry. Z is untouched.
pub(super) fn rrc<H: Hal>(cpu: &mut Cpu<H>, r: u8) {
    let v = cpu.rq(r);
    let tmp = (v >> 1) | (cpu.carry() << 3);
    cpu.set_flag(FLAG_C, v & 0x1 != 0);
    cpu.set_rq(r, tmp & 0xF);
}

pub(super) fn inc_mn<H: Hal>(cpu: &mut Cpu<H>, n: u8) {
    let tmp = cpu.read_memory(n as u16) + 1;
    cpu.write_memory(n as u16, tmp & 0xF);
    cpu.set_flag(FLAG_C, tmp >> 4 != 0);
    let z = cpu.read_memory(n as u16) == 0;
    cpu.set_flag(FLAG_Z, z);
}

pub(super) fn dec_mn<H: Hal>(cpu: &mut Cpu<H>, n: u8) {
    let tmp = cpu.read_memory(n as u16).wrapping_sub(1);
    cpu.write_memory(n as u16, tmp & 0xF);
    cpu.set_flag(FLAG_C, tmp >> 4 != 0);
    let z = cpu.read_memory(n as u16) == 0;
    cpu.set_flag(FLAG_Z, z);
}

fn add_to_mem<H: Hal>(cpu: &mut Cpu<H>, addr: u16, operand: u8) {
    let tmp = cpu.read_memory(addr) + operand + cpu.carry();
    if cpu.flag_d() {
        if tmp >= 10 {
            cpu.write_memory(addr, (tmp - 10) & 0xF);
            cpu.set_flag(FLAG_C, true);
        } else {
            cpu.write_memory(addr, tmp);
            cpu.set_flag(FLAG_C, false);
        }
    } else {
        cpu.write_memory(addr, tmp & 0xF);
        cpu.set_flag(FLAG_C, tmp >> 4 != 0);
    }
    let z = cpu.read_memory(addr) == 0;
    cpu.set_flag(FLAG_Z, z);
}

fn sub_from_mem<H: Hal>(cpu: &mut Cpu<H>, addr: u16, operand: u8) {
    let tmp = cpu
        .read_memory(addr)
        .wrapping_sub(operand)
        .wrapping_sub(cpu.carry());
    if cpu.flag_d() {
        if tmp >> 4 != 0 {
            cpu.write_memory(addr, tmp.wrapping_sub(6) & 0xF);
        } else {
            cpu.write_memory(addr, tmp);
        }
    } else {
        cpu.write_memory(addr, tmp & 0xF);
    }
    cpu.set_flag(FLAG_C, tmp >> 4 != 0);
    let z = cpu.read_memory(addr) == 0;
    cpu.set_flag(FLAG_Z, z);
}

/// Add-with-carry into M(X), post-increment X.
pub(super) fn acpx<H: Hal>(cpu: &mut Cpu<H>, r: u8) {
    let v = cpu.rq(r);
    let addr = cpu.x;
    add_to_mem(cpu, addr, v);
    inc_x(cpu);
}

/// Add-with-carry into M(Y), post-increment Y.
pub(super) fn acpy<H: Hal>(cpu: &mut Cpu<H>, r: u8) {
    let v = cpu.rq(r);
    let addr = cpu.y;
    add_to_mem(cpu, addr, v);
    inc_y(cpu);
}

/// Subtract-with-carry from M(X), post-increment X.
pub(super) fn scpx<H: Hal>(cpu: &mut Cpu<H>, r: u8) {
    let v = cpu.rq(r);
    let addr = cpu.x;
    sub_from_mem(cpu, addr, v);
    inc_x(cpu);
}

/// Subtract-with-carry from M(Y), post-increment Y.
pub(super) fn scpy<H: Hal>(cpu: &mut Cpu<H>, r: u8) {
    let v = cpu.rq(r);
    let addr = cpu.y;
    sub_from_mem(cpu, addr, v);
    inc_y(cpu);
}

/// Complement; shadowed at decode by `XOR r,0xF`, which computes the same
/// result, but kept so the table mirrors the documented instruction set.
pub(super) fn not<H: Hal>(cpu: &mut Cpu<H>, r: u8) {
    let v = !cpu.rq(r) & 0xF;
    logic_store(cpu, r, v);
}

pub(super) fn adc_xh<H: Hal>(cpu: &mut Cpu<H>, i: u8) {
    let tmp = cpu.xh() + i + cpu.carry();
    cpu.x = cpu.xl() as u16 | (((tmp & 0xF) as u16) << 4) | ((cpu.xp() as u16) << 8);
    cpu.set_flag(FLAG_C, tmp >> 4 != 0);
    cpu.set_flag(FLAG_Z, tmp & 0xF == 0);
}

pub(super) fn adc_xl<H: Hal>(cpu: &mut Cpu<H>, i: u8) {
    let tmp = cpu.xl() + i + cpu.carry();
    cpu.x = (tmp & 0xF) as u16 | ((cpu.xh() as u16) << 4) | ((cpu.xp() as u16) << 8);
    cpu.set_flag(FLAG_C, tmp >> 4 != 0);
    cpu.set_flag(FLAG_Z, tmp & 0xF == 0);
}

pub(super) fn adc_yh<H: Hal>(cpu: &mut Cpu<H>, i: u8) {
    let tmp = cpu.yh() + i + cpu.carry();
    cpu.y = cpu.yl() as u16 | (((tmp & 0xF) as u16) << 4) | ((cpu.yp() as u16) << 8);
    cpu.set_flag(FLAG_C, tmp >> 4 != 0);
    cpu.set_flag(FLAG_Z, tmp & 0xF == 0);
}

pub(super) fn adc_yl<H: Hal>(cpu: &mut Cpu<H>, i: u8) {
    let tmp = cpu.yl() + i + cpu.carry();
    cpu.y = (tmp & 0xF) as u16 | ((cpu.yh() as u16) << 4) | ((cpu.yp() as u16) << 8);
    cpu.set_flag(FLAG_C, tmp >> 4 != 0);
    cpu.set_flag(FLAG_Z, tmp & 0xF == 0);
}

pub(super) fn cp_xh<H: Hal>(cpu: &mut Cpu<H>, i: u8) {
    let lhs = cpu.xh();
    compare(cpu, lhs, i);
}

pub(super) fn cp_xl<H: Hal>(cpu: &mut Cpu<H>, i: u8) {
    let lhs = cpu.xl();
    compare(cpu, lhs, i);
}

pub(super) fn cp_yh<H: Hal>(cpu: &mut Cpu<H>, i: u8) {
    let lhs = cpu.yh();
    compare(cpu, lhs, i);
}

pub(super) fn cp_yl<H: Hal>(cpu: &mut Cpu<H>, i: u8) {
    let lhs = cpu.yl();
    compare(cpu, lhs, i);
}
