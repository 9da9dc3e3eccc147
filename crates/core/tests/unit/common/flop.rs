//! Clocked Flop Unit Tests.
//!
//! Verifies next-tick commit, hold-when-undriven, and synchronous reset.

use cache_core::common::Flop;

/// A driven value is not visible until the tick.
#[test]
fn set_commits_at_tick() {
    let mut flop = Flop::new(0u32);
    flop.set(7);
    assert_eq!(flop.get(), 0, "driven value must not appear before the tick");
    flop.tick();
    assert_eq!(flop.get(), 7);
}

/// An undriven cycle holds the registered value.
#[test]
fn holds_when_undriven() {
    let mut flop = Flop::new(0u32);
    flop.set(3);
    flop.tick();
    flop.tick();
    flop.tick();
    assert_eq!(flop.get(), 3, "value must hold across undriven ticks");
}

/// The last drive before a tick wins.
#[test]
fn last_drive_wins() {
    let mut flop = Flop::new(0u32);
    flop.set(1);
    flop.set(2);
    flop.tick();
    assert_eq!(flop.get(), 2);
}

/// Reset restores the construction value and drops any pending drive.
#[test]
fn reset_restores_initial_value() {
    let mut flop = Flop::new(9u32);
    flop.set(1);
    flop.tick();
    flop.set(5);
    flop.reset();
    assert_eq!(flop.get(), 9);
    flop.tick();
    assert_eq!(flop.get(), 9, "reset must also drop the pending drive");
}

/// Option payloads work, as used by the read-with-invalidate latch.
#[test]
fn option_payload() {
    let mut flop: Flop<Option<(usize, usize)>> = Flop::new(None);
    flop.set(Some((3, 1)));
    flop.tick();
    assert_eq!(flop.get(), Some((3, 1)));
    flop.set(None);
    flop.tick();
    assert_eq!(flop.get(), None);
}
