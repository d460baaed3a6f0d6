//! Register and memory transfers, index-register manipulation.
//!
//! X and Y increments wrap within the low byte; the page nibble is only
//! ever changed by an explicit load (`LD XP r`, `POP XP`, ...).

use crate::cpu::Cpu;
use crate::hal::Hal;

pub(super) fn inc_x<H: Hal>(cpu: &mut Cpu<H>) {
    cpu.x = ((cpu.x + 1) & 0xFF) | ((cpu.xp() as u16) << 8);
}

pub(super) fn inc_y<H: Hal>(cpu: &mut Cpu<H>) {
    cpu.y = ((cpu.y + 1) & 0xFF) | ((cpu.yp() as u16) << 8);
}

pub(super) fn ld_x<H: Hal>(cpu: &mut Cpu<H>, b: u8) {
    cpu.x = b as u16 | ((cpu.xp() as u16) << 8);
}

pub(super) fn ld_y<H: Hal>(cpu: &mut Cpu<H>, b: u8) {
    cpu.y = b as u16 | ((cpu.yp() as u16) << 8);
}

pub(super) fn ld_xp_r<H: Hal>(cpu: &mut Cpu<H>, r: u8) {
    let v = cpu.rq(r);
    cpu.x = cpu.xhl() | ((v as u16) << 8);
}

pub(super) fn ld_xh_r<H: Hal>(cpu: &mut Cpu<H>, r: u8) {
    let v = cpu.rq(r);
    cpu.x = cpu.xl() as u16 | ((v as u16) << 4) | ((cpu.xp() as u16) << 8);
}

pub(super) fn ld_xl_r<H: Hal>(cpu: &mut Cpu<H>, r: u8) {
    let v = cpu.rq(r);
    cpu.x = v as u16 | ((cpu.xh() as u16) << 4) | ((cpu.xp() as u16) << 8);
}

pub(super) fn ld_yp_r<H: Hal>(cpu: &mut Cpu<H>, r: u8) {
    let v = cpu.rq(r);
    cpu.y = cpu.yhl() | ((v as u16) << 8);
}

pub(super) fn ld_yh_r<H: Hal>(cpu: &mut Cpu<H>, r: u8) {
    let v = cpu.rq(r);
    cpu.y = cpu.yl() as u16 | ((v as u16) << 4) | ((cpu.yp() as u16) << 8);
}

pub(super) fn ld_yl_r<H: Hal>(cpu: &mut Cpu<H>, r: u8) {
    let v = cpu.rq(r);
    cpu.y = v as u16 | ((cpu.yh() as u16) << 4) | ((cpu.yp() as u16) << 8);
}

pub(super) fn ld_r_xp<H: Hal>(cpu: &mut Cpu<H>, r: u8) {
    cpu.set_rq(r, cpu.xp());
}

pub(super) fn ld_r_xh<H: Hal>(cpu: &mut Cpu<H>, r: u8) {
    cpu.set_rq(r, cpu.xh());
}

pub(super) fn ld_r_xl<H: Hal>(cpu: &mut Cpu<H>, r: u8) {
    cpu.set_rq(r, cpu.xl());
}

pub(super) fn ld_r_yp<H: Hal>(cpu: &mut Cpu<H>, r: u8) {
    cpu.set_rq(r, cpu.yp());
}

pub(super) fn ld_r_yh<H: Hal>(cpu: &mut Cpu<H>, r: u8) {
    cpu.set_rq(r, cpu.yh());
}

pub(super) fn ld_r_yl<H: Hal>(cpu: &mut Cpu<H>, r: u8) {
    cpu.set_rq(r, cpu.yl());
}

pub(super) fn ld_r_i<H: Hal>(cpu: &mut Cpu<H>, r: u8, i: u8) {
    cpu.set_rq(r, i);
}

pub(super) fn ld_r_q<H: Hal>(cpu: &mut Cpu<H>, r: u8, q: u8) {
    let v = cpu.rq(q);
    cpu.set_rq(r, v);
}

pub(super) fn ld_a_mn<H: Hal>(cpu: &mut Cpu<H>, n: u8) {
    cpu.a = cpu.read_memory(n as u16);
}

pub(super) fn ld_b_mn<H: Hal>(cpu: &mut Cpu<H>, n: u8) {
    cpu.b = cpu.read_memory(n as u16);
}

pub(super) fn ld_mn_a<H: Hal>(cpu: &mut Cpu<H>, n: u8) {
    cpu.write_memory(n as u16, cpu.a);
}

pub(super) fn ld_mn_b<H: Hal>(cpu: &mut Cpu<H>, n: u8) {
    cpu.write_memory(n as u16, cpu.b);
}

/// Store immediate at M(X), post-increment X.
pub(super) fn ldpx_mx<H: Hal>(cpu: &mut Cpu<H>, i: u8) {
    cpu.write_memory(cpu.x, i);
    inc_x(cpu);
}

/// Register transfer, post-increment X.
pub(super) fn ldpx_r<H: Hal>(cpu: &mut Cpu<H>, r: u8, q: u8) {
    let v = cpu.rq(q);
    cpu.set_rq(r, v);
    inc_x(cpu);
}

/// Store immediate at M(Y), post-increment Y.
pub(super) fn ldpy_my<H: Hal>(cpu: &mut Cpu<H>, i: u8) {
    cpu.write_memory(cpu.y, i);
    inc_y(cpu);
}

/// Register transfer, post-increment Y.
pub(super) fn ldpy_r<H: Hal>(cpu: &mut Cpu<H>, r: u8, q: u8) {
    let v = cpu.rq(q);
    cpu.set_rq(r, v);
    inc_y(cpu);
}

/// Store an immediate byte as two nibbles at M(X), M(X+1), advance X by
/// two. Like RETD, X+1 is not wrapped to 12 bits; an overflow write is
/// discarded out of range.
pub(super) fn lbpx<H: Hal>(cpu: &mut Cpu<H>, imm: u8) {
    cpu.write_memory(cpu.x, imm & 0xF);
    cpu.write_memory(cpu.x + 1, (imm >> 4) & 0xF);
    cpu.x = ((cpu.x + 2) & 0xFF) | ((cpu.xp() as u16) << 8);
}
