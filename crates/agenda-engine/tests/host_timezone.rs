//! Zoned minutes must not move when the host's own zone changes.
//!
//! Kept in its own test binary because it rewrites `TZ` for the process,
//! and kept to a single test so no other thread reads `TZ` meanwhile.

use agenda_engine::{minutes_since_midnight, zoned_minutes_since_midnight};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use proptest::test_runner::TestRunner;

const HOST_ZONES: [&str; 4] = ["UTC", "Asia/Tokyo", "America/New_York", "Pacific/Chatham"];
const TARGET_ZONES: [&str; 5] = [
    "America/Sao_Paulo",
    "Europe/Lisbon",
    "Asia/Kolkata",
    "Australia/Lord_Howe",
    "America/St_Johns",
];

#[test]
fn test_minutes_ignore_host_zone() {
    let instant = Utc.with_ymd_and_hms(2026, 3, 15, 14, 0, 0).unwrap();
    for host in HOST_ZONES {
        std::env::set_var("TZ", host);
        assert_eq!(minutes_since_midnight(instant, "America/Sao_Paulo"), 660, "host {host}");
        assert_eq!(minutes_since_midnight(instant, "UTC"), 14 * 60, "host {host}");
    }

    let strategy = (
        0i64..4_102_444_800,
        prop::sample::select(TARGET_ZONES.to_vec()),
        prop::sample::select(HOST_ZONES.to_vec()),
    );
    TestRunner::default()
        .run(&strategy, |(secs, target, host)| {
            let instant = Utc.timestamp_opt(secs, 0).unwrap();
            let expected = zoned_minutes_since_midnight(instant, target).unwrap();
            prop_assert!(expected < 1440);

            std::env::set_var("TZ", host);
            prop_assert_eq!(minutes_since_midnight(instant, target), expected);
            Ok(())
        })
        .unwrap();
}
