//! Tests for the clock timer and the programmable timer.
//!
//! All programs are straight NOP7 runs (7 cycles each, paid at the start of
//! the following step), so elapsed ticks after N steps are exactly
//! 7 * (N - 1).

use lib6s46::io::{
    REG_PROG_TIMER_CTRL, REG_PROG_TIMER_DATA_H, REG_PROG_TIMER_DATA_L,
    REG_PROG_TIMER_RELOAD_DATA_L,
};
use lib6s46::{Cpu, IntSlot, NullHal, StepOutcome};

fn setup_cpu() -> Cpu<NullHal> {
    let mut cpu = Cpu::new(NullHal::new(), vec![0xFFFu16; 0x2000], 1_000_000);
    cpu.set_speed(0);
    cpu
}

fn run(cpu: &mut Cpu<NullHal>, steps: usize) {
    for _ in 0..steps {
        assert_eq!(cpu.step(&[]), StepOutcome::Continue);
    }
}

// ========== Programmable timer ==========

#[test]
fn test_control_write_reloads_and_enables() {
    let mut cpu = setup_cpu();
    cpu.write_memory(REG_PROG_TIMER_RELOAD_DATA_L, 0x5);
    cpu.write_memory(REG_PROG_TIMER_CTRL, 0x3); // bit 1 reload, bit 0 enable
    assert_eq!(cpu.read_memory(REG_PROG_TIMER_DATA_L), 0x5);
    assert_eq!(cpu.read_memory(REG_PROG_TIMER_DATA_H), 0x0);
    assert_eq!(cpu.read_memory(REG_PROG_TIMER_CTRL), 0x1); // enabled bit
}

#[test]
fn test_countdown_advances_once_per_period() {
    let mut cpu = setup_cpu();
    cpu.write_memory(REG_PROG_TIMER_RELOAD_DATA_L, 0x5);
    cpu.write_memory(REG_PROG_TIMER_CTRL, 0x3);
    // 41 steps -> 280 ticks -> 2 full 128-tick periods
    run(&mut cpu, 41);
    assert_eq!(cpu.read_memory(REG_PROG_TIMER_DATA_L), 0x3);
    assert_eq!(
        cpu.interrupt(IntSlot::ProgTimer).factor_flags(),
        0x0 // no underflow yet
    );
}

#[test]
fn test_underflow_reloads_and_raises_factor() {
    let mut cpu = setup_cpu();
    cpu.write_memory(REG_PROG_TIMER_RELOAD_DATA_L, 0x5);
    cpu.write_memory(REG_PROG_TIMER_CTRL, 0x3);
    // 94 steps -> 651 ticks -> 5 periods: 5,4,3,2,1 -> underflow, reload
    run(&mut cpu, 94);
    assert_eq!(cpu.read_memory(REG_PROG_TIMER_DATA_L), 0x5);
    assert_eq!(cpu.interrupt(IntSlot::ProgTimer).factor_flags() & 0x1, 0x1);
}

#[test]
fn test_disabled_timer_does_not_count() {
    let mut cpu = setup_cpu();
    cpu.write_memory(REG_PROG_TIMER_RELOAD_DATA_L, 0x5);
    cpu.write_memory(REG_PROG_TIMER_CTRL, 0x2); // reload only, not enabled
    run(&mut cpu, 100);
    assert_eq!(cpu.read_memory(REG_PROG_TIMER_DATA_L), 0x5);
    assert_eq!(cpu.interrupt(IntSlot::ProgTimer).factor_flags(), 0x0);
}

#[test]
fn test_enable_edge_rebases_the_period() {
    // Enabling after ticks have accumulated must not consume them
    let mut cpu = setup_cpu();
    run(&mut cpu, 20); // 133 ticks
    cpu.write_memory(REG_PROG_TIMER_RELOAD_DATA_L, 0x5);
    cpu.write_memory(REG_PROG_TIMER_CTRL, 0x3);
    run(&mut cpu, 10); // 70 more ticks, less than one period
    assert_eq!(cpu.read_memory(REG_PROG_TIMER_DATA_L), 0x5);
}

// ========== Clock timer ==========

#[test]
fn test_clock_timer_fires_at_one_hertz() {
    let mut cpu = setup_cpu();
    // 4683 steps -> 32774 ticks, one second of emulated time
    run(&mut cpu, 4683);
    assert_eq!(cpu.interrupt(IntSlot::ClockTimer).factor_flags() & 0x8, 0x8);
}

#[test]
fn test_clock_timer_silent_before_one_second() {
    let mut cpu = setup_cpu();
    run(&mut cpu, 4000); // 27993 ticks
    assert_eq!(cpu.interrupt(IntSlot::ClockTimer).factor_flags(), 0x0);
}
