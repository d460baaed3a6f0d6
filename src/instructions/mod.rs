//! # Instruction Execution
//!
//! One handler per opcode, grouped by category, plus the closed dispatch
//! `match` the step engine calls after decode. Handlers receive the
//! arguments already extracted by the table ([`extract_args`]) and operate
//! directly on the CPU context; control-flow handlers redirect by rewriting
//! the staged `next_pc` rather than the committed PC.
//!
//! [`extract_args`]: crate::opcodes::extract_args

use crate::cpu::Cpu;
use crate::hal::Hal;
use crate::opcodes::Opcode;

mod alu;
mod branches;
mod control;
mod flags;
mod load_store;
mod stack;

pub(crate) fn dispatch<H: Hal>(cpu: &mut Cpu<H>, op: Opcode, arg0: u8, arg1: u8) {
    match op {
        Opcode::Pset => branches::pset(cpu, arg0),
        Opcode::Jp => branches::jp(cpu, arg0),
        Opcode::JpC => branches::jp_c(cpu, arg0),
        Opcode::JpNc => branches::jp_nc(cpu, arg0),
        Opcode::JpZ => branches::jp_z(cpu, arg0),
        Opcode::JpNz => branches::jp_nz(cpu, arg0),
        Opcode::Jpba => branches::jpba(cpu),

        Opcode::Call => control::call(cpu, arg0),
        Opcode::Calz => control::calz(cpu, arg0),
        Opcode::Ret => control::ret(cpu),
        Opcode::Rets => control::rets(cpu),
        Opcode::Retd => control::retd(cpu, arg0),
        Opcode::Nop5 | Opcode::Nop7 => {}
        Opcode::Halt => control::halt(cpu),

        Opcode::IncX => load_store::inc_x(cpu),
        Opcode::IncY => load_store::inc_y(cpu),
        Opcode::LdX => load_store::ld_x(cpu, arg0),
        Opcode::LdY => load_store::ld_y(cpu, arg0),
        Opcode::LdXpR => load_store::ld_xp_r(cpu, arg0),
        Opcode::LdXhR => load_store::ld_xh_r(cpu, arg0),
        Opcode::LdXlR => load_store::ld_xl_r(cpu, arg0),
        Opcode::LdYpR => load_store::ld_yp_r(cpu, arg0),
        Opcode::LdYhR => load_store::ld_yh_r(cpu, arg0),
        Opcode::LdYlR => load_store::ld_yl_r(cpu, arg0),
        Opcode::LdRXp => load_store::ld_r_xp(cpu, arg0),
        Opcode::LdRXh => load_store::ld_r_xh(cpu, arg0),
        Opcode::LdRXl => load_store::ld_r_xl(cpu, arg0),
        Opcode::LdRYp => load_store::ld_r_yp(cpu, arg0),
        Opcode::LdRYh => load_store::ld_r_yh(cpu, arg0),
        Opcode::LdRYl => load_store::ld_r_yl(cpu, arg0),

        Opcode::AdcXh => alu::adc_xh(cpu, arg0),
        Opcode::AdcXl => alu::adc_xl(cpu, arg0),
        Opcode::AdcYh => alu::adc_yh(cpu, arg0),
        Opcode::AdcYl => alu::adc_yl(cpu, arg0),
        Opcode::CpXh => alu::cp_xh(cpu, arg0),
        Opcode::CpXl => alu::cp_xl(cpu, arg0),
        Opcode::CpYh => alu::cp_yh(cpu, arg0),
        Opcode::CpYl => alu::cp_yl(cpu, arg0),

        Opcode::LdRI => load_store::ld_r_i(cpu, arg0, arg1),
        Opcode::LdRQ => load_store::ld_r_q(cpu, arg0, arg1),
        Opcode::LdAMn => load_store::ld_a_mn(cpu, arg0),
        Opcode::LdBMn => load_store::ld_b_mn(cpu, arg0),
        Opcode::LdMnA => load_store::ld_mn_a(cpu, arg0),
        Opcode::LdMnB => load_store::ld_mn_b(cpu, arg0),
        Opcode::LdpxMx => load_store::ldpx_mx(cpu, arg0),
        Opcode::LdpxR => load_store::ldpx_r(cpu, arg0, arg1),
        Opcode::LdpyMy => load_store::ldpy_my(cpu, arg0),
        Opcode::LdpyR => load_store::ldpy_r(cpu, arg0, arg1),
        Opcode::Lbpx => load_store::lbpx(cpu, arg0),

        Opcode::Set => flags::set(cpu, arg0),
        Opcode::Rst => flags::rst(cpu, arg0),
        Opcode::Scf => flags::scf(cpu),
        Opcode::Rcf => flags::rcf(cpu),
        Opcode::Szf => flags::szf(cpu),
        Opcode::Rzf => flags::rzf(cpu),
        Opcode::Sdf => flags::sdf(cpu),
        Opcode::Rdf => flags::rdf(cpu),
        Opcode::Ei => flags::ei(cpu),
        Opcode::Di => flags::di(cpu),

        Opcode::IncSp => stack::inc_sp(cpu),
        Opcode::DecSp => stack::dec_sp(cpu),
        Opcode::PushR => stack::push_r(cpu, arg0),
        Opcode::PushXp => stack::push_xp(cpu),
        Opcode::PushXh => stack::push_xh(cpu),
        Opcode::PushXl => stack::push_xl(cpu),
        Opcode::PushYp => stack::push_yp(cpu),
        Opcode::PushYh => stack::push_yh(cpu),
        Opcode::PushYl => stack::push_yl(cpu),
        Opcode::PushF => stack::push_f(cpu),
        Opcode::PopR => stack::pop_r(cpu, arg0),
        Opcode::PopXp => stack::pop_xp(cpu),
        Opcode::PopXh => stack::pop_xh(cpu),
        Opcode::PopXl => stack::pop_xl(cpu),
        Opcode::PopYp => stack::pop_yp(cpu),
        Opcode::PopYh => stack::pop_yh(cpu),
        Opcode::PopYl => stack::pop_yl(cpu),
        Opcode::PopF => stack::pop_f(cpu),
        Opcode::LdSphR => stack::ld_sph_r(cpu, arg0),
        Opcode::LdSplR => stack::ld_spl_r(cpu, arg0),
        Opcode::LdRSph => stack::ld_r_sph(cpu, arg0),
        Opcode::LdRSpl => stack::ld_r_spl(cpu, arg0),

        Opcode::AddRI => alu::add_r_i(cpu, arg0, arg1),
        Opcode::AddRQ => alu::add_r_q(cpu, arg0, arg1),
        Opcode::AdcRI => alu::adc_r_i(cpu, arg0, arg1),
        Opcode::AdcRQ => alu::adc_r_q(cpu, arg0, arg1),
        Opcode::SubRQ => alu::sub_r_q(cpu, arg0, arg1),
        Opcode::SbcRI => alu::sbc_r_i(cpu, arg0, arg1),
        Opcode::SbcRQ => alu::sbc_r_q(cpu, arg0, arg1),
        Opcode::AndRI => alu::and_r_i(cpu, arg0, arg1),
        Opcode::AndRQ => alu::and_r_q(cpu, arg0, arg1),
        Opcode::OrRI => alu::or_r_i(cpu, arg0, arg1),
        Opcode::OrRQ => alu::or_r_q(cpu, arg0, arg1),
        Opcode::XorRI => alu::xor_r_i(cpu, arg0, arg1),
        Opcode::XorRQ => alu::xor_r_q(cpu, arg0, arg1),
        Opcode::CpRI => alu::cp_r_i(cpu, arg0, arg1),
        Opcode::CpRQ => alu::cp_r_q(cpu, arg0, arg1),
        Opcode::FanRI => alu::fan_r_i(cpu, arg0, arg1),
        Opcode::FanRQ => alu::fan_r_q(cpu, arg0, arg1),
        Opcode::Rlc => alu::rlc(cpu, arg0),
        Opcode::Rrc => alu::rrc(cpu, arg0),
        Opcode::IncMn => alu::inc_mn(cpu, arg0),
        Opcode::DecMn => alu::dec_mn(cpu, arg0),
        Opcode::Acpx => alu::acpx(cpu, arg0),
        Opcode::Acpy => alu::acpy(cpu, arg0),
        Opcode::Scpx => alu::scpx(cpu, arg0),
        Opcode::Scpy => alu::scpy(cpu, arg0),
        Opcode::Not => alu::not(cpu, arg0),
    }
}
