//! Flag set/reset instructions.
//!
//! SET ors an immediate nibble into the flags; RST ands one. The dedicated
//! single-flag forms (SCF, RCF, ...) are fixed encodings inside those two
//! families.

use crate::cpu::{Cpu, FLAG_C, FLAG_D, FLAG_I, FLAG_Z};
use crate::hal::Hal;

pub(super) fn set<H: Hal>(cpu: &mut Cpu<H>, i: u8) {
    cpu.flags |= i;
}

pub(super) fn rst<H: Hal>(cpu: &mut Cpu<H>, i: u8) {
    cpu.flags &= i;
}

pub(super) fn scf<H: Hal>(cpu: &mut Cpu<H>) {
    cpu.set_flag(FLAG_C, true);
}

pub(super) fn rcf<H: Hal>(cpu: &mut Cpu<H>) {
    cpu.set_flag(FLAG_C, false);
}

pub(super) fn szf<H: Hal>(cpu: &mut Cpu<H>) {
    cpu.set_flag(FLAG_Z, true);
}

pub(super) fn rzf<H: Hal>(cpu: &mut Cpu<H>) {
    cpu.set_flag(FLAG_Z, false);
}

pub(super) fn sdf<H: Hal>(cpu: &mut Cpu<H>) {
    cpu.set_flag(FLAG_D, true);
}

pub(super) fn rdf<H: Hal>(cpu: &mut Cpu<H>) {
    cpu.set_flag(FLAG_D, false);
}

pub(super) fn ei<H: Hal>(cpu: &mut Cpu<H>) {
    cpu.set_flag(FLAG_I, true);
}

pub(super) fn di<H: Hal>(cpu: &mut Cpu<H>) {
    cpu.set_flag(FLAG_I, false);
}
