//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code never blocks the thread with
//! `std::thread::sleep`. Timed waits use tokio timers, and a bare
//! `tokio::time::sleep` is only allowed where a delay is itself the
//! behavior (the minimum wait before a result is shown). Periodic work uses
//! `tokio::time::interval`.

use std::path::Path;

use architectural_enforcement::{assert_clean, scan};

/// Files allowed to call `tokio::time::sleep`
const TIMED_DELAY_ALLOWED: [&str; 1] = ["analysis/mod.rs"];

fn delay_allowed(path: &Path) -> bool {
    let path = path.to_string_lossy().replace('\\', "/");
    TIMED_DELAY_ALLOWED
        .iter()
        .any(|allowed| path.ends_with(allowed))
}

#[test]
fn test_no_thread_sleep_in_production_code() {
    let violations = scan(|_, line| line.code.contains("thread::sleep").then_some("Thread sleep"));

    assert_clean(
        &violations,
        "Thread sleeps found in production code!",
        &[
            "Use tokio::time::interval for periodic work",
            "Use a tokio::select! arm to wait on events",
        ],
    );
}

#[test]
fn test_timed_waits_only_where_delay_is_the_behavior() {
    let violations = scan(|path, line| {
        (line.code.contains("time::sleep(") && !delay_allowed(path)).then_some("Timed sleep")
    });

    assert_clean(
        &violations,
        "tokio sleeps found outside the result delay!",
        &[
            "Use tokio::time::interval for periodic work",
            "Wait on a channel or CancellationToken instead of polling",
        ],
    );
}
