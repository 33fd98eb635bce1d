// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::TimeZone;

#[test]
fn fake_clock_returns_fixed_instant() {
    let t = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let clock = FakeClock::new(t);
    assert_eq!(clock.now(), t);
    assert_eq!(clock.now(), t);
}

#[test]
fn fake_clock_advance_moves_time_forward() {
    let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let clock = FakeClock::new(t0);
    clock.advance(chrono::Duration::seconds(90));
    assert_eq!(clock.now(), t0 + chrono::Duration::seconds(90));
}

#[test]
fn fake_clock_set_is_shared_across_clones() {
    let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let clock = FakeClock::new(t0);
    let clone = clock.clone();
    let t1 = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
    clone.set(t1);
    assert_eq!(clock.now(), t1);
}

#[test]
fn system_clock_advances_monotonically_with_wall_time() {
    let clock = SystemClock;
    let a = clock.now();
    std::thread::sleep(std::time::Duration::from_millis(5));
    let b = clock.now();
    assert!(b >= a);
}
