//! Tests for the step engine: fetch/decode/execute ordering, breakpoints,
//! cycle accounting, HALT, and the speed throttle plumbing.

use lib6s46::{Cpu, NullHal, StepOutcome, StopReason};

fn setup_cpu(program: &[u16]) -> Cpu<NullHal> {
    let mut rom = vec![0xFFFu16; 0x2000];
    rom[0x100..0x100 + program.len()].copy_from_slice(program);
    let mut cpu = Cpu::new(NullHal::new(), rom, 1_000_000);
    cpu.set_speed(0);
    cpu
}

// ========== Breakpoints ==========

#[test]
fn test_breakpoint_stops_on_committed_pc() {
    // PSET #0x00; JP #0x00 - a jump into page 0
    let mut cpu = setup_cpu(&[0xE40, 0x000]);
    let breakpoints = [0x000u16];
    assert_eq!(cpu.step(&breakpoints), StepOutcome::Continue);
    assert_eq!(
        cpu.step(&breakpoints),
        StepOutcome::Stopped(StopReason::Breakpoint { pc: 0x000 })
    );
    assert_eq!(cpu.pc(), 0x000); // instruction committed before the stop
}

#[test]
fn test_no_breakpoints_runs_freely() {
    // PSET #0x01; JP #0x00 - a tight loop back to 0x100
    let mut cpu = setup_cpu(&[0xE41, 0x000]);
    for _ in 0..1000 {
        assert_eq!(cpu.step(&[]), StepOutcome::Continue);
    }
}

#[test]
fn test_resume_past_breakpoint() {
    let mut cpu = setup_cpu(&[0xFFB, 0xFFB, 0xFFB]); // NOP5 x3
    let breakpoints = [0x101u16];
    assert_eq!(
        cpu.step(&breakpoints),
        StepOutcome::Stopped(StopReason::Breakpoint { pc: 0x101 })
    );
    // Host resumes by stepping again without the breakpoint armed
    assert_eq!(cpu.step(&[]), StepOutcome::Continue);
    assert_eq!(cpu.pc(), 0x102);
}

// ========== Decode failure ==========

#[test]
fn test_illegal_word_stops_without_side_effects() {
    let mut cpu = setup_cpu(&[0xFFE]);
    let stop = cpu.step(&[]);
    assert_eq!(
        stop,
        StepOutcome::Stopped(StopReason::IllegalOpcode {
            pc: 0x100,
            word: 0xFFE
        })
    );
    assert_eq!(cpu.pc(), 0x100); // no advance
    assert_eq!(cpu.tick_counter(), 0); // no cycles charged
}

#[test]
fn test_stop_reason_formats_for_hosts() {
    let reason = StopReason::IllegalOpcode {
        pc: 0x100,
        word: 0xFFE,
    };
    assert_eq!(reason.to_string(), "illegal opcode 0xFFE at 0x0100");
    let reason = StopReason::Breakpoint { pc: 0x123 };
    assert_eq!(reason.to_string(), "breakpoint at 0x0123");
}

// ========== Cycle accounting ==========

#[test]
fn test_cycle_cost_charged_on_following_step() {
    let mut cpu = setup_cpu(&[0xFFB, 0xFFB, 0xFFB]); // NOP5 x3
    assert_eq!(cpu.tick_counter(), 0);
    cpu.step(&[]);
    assert_eq!(cpu.tick_counter(), 0); // first step pays nothing
    cpu.step(&[]);
    assert_eq!(cpu.tick_counter(), 5);
    cpu.step(&[]);
    assert_eq!(cpu.tick_counter(), 10);
}

#[test]
fn test_mixed_cycle_costs_accumulate() {
    // NOP5 (5), NOP7 (7), NOP5 (5), NOP5
    let mut cpu = setup_cpu(&[0xFFB, 0xFFF, 0xFFB, 0xFFB]);
    for _ in 0..4 {
        cpu.step(&[]);
    }
    assert_eq!(cpu.tick_counter(), 17); // 5 + 7 + 5, last still pending
}

// ========== HALT ==========

#[test]
fn test_halt_notifies_the_host() {
    let mut cpu = setup_cpu(&[0xFF8]);
    assert_eq!(cpu.step(&[]), StepOutcome::Continue);
    assert_eq!(cpu.hal().halts, 1);
    assert_eq!(cpu.pc(), 0x101); // host decides whether to keep stepping
}

// ========== Page latch resynchronization ==========

#[test]
fn test_np_resyncs_after_non_pset_instruction() {
    // PSET #0x1F; NOP5 - the stale latch must not survive the NOP5
    let mut cpu = setup_cpu(&[0xE5F, 0xFFB]);
    cpu.step(&[]);
    assert_eq!(cpu.np(), 0x1F);
    cpu.step(&[]);
    assert_eq!(cpu.np(), 0x01); // back to the PC's page
}

#[test]
fn test_jp_uses_the_pset_latch() {
    // PSET #0x04; JP #0x56
    let mut cpu = setup_cpu(&[0xE44, 0x056]);
    cpu.step(&[]);
    cpu.step(&[]);
    assert_eq!(cpu.pc(), 0x456);
}

#[test]
fn test_jp_without_pset_stays_in_page() {
    // JP #0x56 with np resynced to page 1
    let mut cpu = setup_cpu(&[0x056]);
    cpu.step(&[]);
    assert_eq!(cpu.pc(), 0x156);
}
