//! Tests for calls, returns, and the stack instructions.
//!
//! Covers:
//! - CALL/CALZ return-address frames and call depth
//! - RET restoring the pushed address
//! - The RETS skip behavior and RETD immediate store
//! - PUSH/POP of registers, index halves, and flags
//! - SP nibble transfers

use lib6s46::{Cpu, NullHal, StepOutcome};

fn setup_cpu(program: &[u16]) -> Cpu<NullHal> {
    let mut rom = vec![0xFFFu16; 0x2000];
    rom[0x100..0x100 + program.len()].copy_from_slice(program);
    let mut cpu = Cpu::new(NullHal::new(), rom, 1_000_000);
    cpu.set_speed(0);
    cpu
}

fn run(cpu: &mut Cpu<NullHal>, steps: usize) {
    for _ in 0..steps {
        assert_eq!(cpu.step(&[]), StepOutcome::Continue);
    }
}

// ========== CALL / RET ==========

#[test]
fn test_call_pushes_three_nibble_frame() {
    // CALL #0x23 (np holds page 1 after reset)
    let mut cpu = setup_cpu(&[0x423]);
    cpu.set_sp(0x80);
    run(&mut cpu, 1);
    assert_eq!(cpu.pc(), 0x123);
    assert_eq!(cpu.sp(), 0x7D);
    assert_eq!(cpu.call_depth(), 1);
    // Return address 0x102, pushed page first
    assert_eq!(cpu.read_memory(0x07F), 0x1); // page
    assert_eq!(cpu.read_memory(0x07E), 0x0); // step high
    assert_eq!(cpu.read_memory(0x07D), 0x2); // step low
}

#[test]
fn test_calz_targets_page_zero() {
    // CALZ #0x40
    let mut cpu = setup_cpu(&[0x540]);
    cpu.set_sp(0x80);
    run(&mut cpu, 1);
    assert_eq!(cpu.pc(), 0x040);
    assert_eq!(cpu.call_depth(), 1);
}

#[test]
fn test_ret_restores_pushed_address() {
    let mut rom = vec![0xFFFu16; 0x2000];
    rom[0x100] = 0x423; // CALL #0x23
    rom[0x123] = 0xFDF; // RET
    let mut cpu = Cpu::new(NullHal::new(), rom, 1_000_000);
    cpu.set_speed(0);
    cpu.set_sp(0x80);
    run(&mut cpu, 2);
    assert_eq!(cpu.pc(), 0x102);
    assert_eq!(cpu.sp(), 0x80);
    assert_eq!(cpu.call_depth(), 0);
}

#[test]
fn test_nested_calls_balance_depth_and_sp() {
    let mut rom = vec![0xFFFu16; 0x2000];
    rom[0x100] = 0x420; // CALL #0x20
    rom[0x120] = 0x430; // CALL #0x30
    rom[0x130] = 0xFDF; // RET
    rom[0x122] = 0xFDF; // RET
    let mut cpu = Cpu::new(NullHal::new(), rom, 1_000_000);
    cpu.set_speed(0);
    cpu.set_sp(0x80);
    run(&mut cpu, 2);
    assert_eq!(cpu.call_depth(), 2);
    assert_eq!(cpu.sp(), 0x7A);
    run(&mut cpu, 2);
    assert_eq!(cpu.call_depth(), 0);
    assert_eq!(cpu.sp(), 0x80);
    assert_eq!(cpu.pc(), 0x102);
}

// ========== RETS / RETD ==========

#[test]
fn test_rets_pops_frame_but_skips_to_next_word() {
    // The popped address only adjusts SP; execution resumes after the RETS
    let mut rom = vec![0xFFFu16; 0x2000];
    rom[0x100] = 0x423; // CALL #0x23
    rom[0x123] = 0xFDE; // RETS
    let mut cpu = Cpu::new(NullHal::new(), rom, 1_000_000);
    cpu.set_speed(0);
    cpu.set_sp(0x80);
    run(&mut cpu, 2);
    assert_eq!(cpu.pc(), 0x124);
    assert_eq!(cpu.sp(), 0x80);
    assert_eq!(cpu.call_depth(), 0);
}

#[test]
fn test_retd_returns_and_stores_immediate_at_x() {
    let mut rom = vec![0xFFFu16; 0x2000];
    rom[0x100] = 0x423; // CALL #0x23
    rom[0x123] = 0x1AB; // RETD #0xAB
    let mut cpu = Cpu::new(NullHal::new(), rom, 1_000_000);
    cpu.set_speed(0);
    cpu.set_sp(0x80);
    cpu.set_x(0x040);
    run(&mut cpu, 2);
    assert_eq!(cpu.pc(), 0x102);
    assert_eq!(cpu.read_memory(0x040), 0xB);
    assert_eq!(cpu.read_memory(0x041), 0xA);
    assert_eq!(cpu.x(), 0x042);
    assert_eq!(cpu.call_depth(), 0);
}

// ========== PUSH / POP ==========

#[test]
fn test_push_pop_register() {
    // PUSH A; POP B
    let mut cpu = setup_cpu(&[0xFC0, 0xFD1]);
    cpu.set_sp(0x10);
    cpu.set_a(0x7);
    run(&mut cpu, 1);
    assert_eq!(cpu.sp(), 0x0F);
    assert_eq!(cpu.read_memory(0x00F), 0x7);
    run(&mut cpu, 1);
    assert_eq!(cpu.b(), 0x7);
    assert_eq!(cpu.sp(), 0x10);
}

#[test]
fn test_push_pop_flags_round_trip() {
    // PUSH F; RCF; POP F
    let mut cpu = setup_cpu(&[0xFCA, 0xF5E, 0xFDA]);
    cpu.set_sp(0x10);
    cpu.set_flag_c(true);
    cpu.set_flag_d(true);
    run(&mut cpu, 2);
    assert!(!cpu.flag_c()); // cleared by RCF
    run(&mut cpu, 1);
    assert!(cpu.flag_c()); // restored by POP F
    assert!(cpu.flag_d());
}

#[test]
fn test_push_pop_index_halves() {
    // PUSH XP; PUSH XL; POP YP; POP YL
    let mut cpu = setup_cpu(&[0xFC4, 0xFC6, 0xFD7, 0xFD9]);
    cpu.set_sp(0x10);
    cpu.set_x(0xA3C);
    run(&mut cpu, 4);
    // YP takes XL's pushed value (LIFO), YL takes XP's
    assert_eq!(cpu.y(), 0xC0A);
    assert_eq!(cpu.sp(), 0x10);
}

#[test]
fn test_inc_dec_sp_wrap() {
    // DEC SP; INC SP
    let mut cpu = setup_cpu(&[0xFCB, 0xFDB]);
    run(&mut cpu, 1);
    assert_eq!(cpu.sp(), 0xFF);
    run(&mut cpu, 1);
    assert_eq!(cpu.sp(), 0x00);
}

// ========== SP nibble transfers ==========

#[test]
fn test_ld_sph_spl_compose_sp() {
    // LD SPH,A ; LD SPL,B
    let mut cpu = setup_cpu(&[0xFE0, 0xFF1]);
    cpu.set_a(0x2);
    cpu.set_b(0x9);
    run(&mut cpu, 2);
    assert_eq!(cpu.sp(), 0x29);
}

#[test]
fn test_ld_r_sph_spl_read_back() {
    // LD A,SPH ; LD B,SPL
    let mut cpu = setup_cpu(&[0xFE4, 0xFF5]);
    cpu.set_sp(0x7C);
    run(&mut cpu, 2);
    assert_eq!(cpu.a(), 0x7);
    assert_eq!(cpu.b(), 0xC);
}
