//! Integration Test: Blocking I/O Prohibition
//!
//! **Policy**: Async functions in the runtime and the terminal surface
//! never use blocking I/O. One blocked call stalls the whole select loop,
//! which freezes the particle animation along with the UI.
//!
//! Blocking file reads are fine in plain functions that run before the
//! loop starts (configuration loading, log file creation).

use architectural_enforcement::{assert_clean, scan};

#[test]
fn test_no_blocking_http_client() {
    let violations = scan(|_, line| {
        line.code
            .contains("reqwest::blocking")
            .then_some("Blocking HTTP client")
    });

    assert_clean(
        &violations,
        "Blocking HTTP client found in production code!",
        &["Use the async reqwest::Client"],
    );
}

#[test]
fn test_no_blocking_io_in_async_functions() {
    let violations = scan(|_, line| {
        if !line.in_async_fn {
            return None;
        }
        if line.code.contains("std::fs::") {
            Some("Blocking file I/O")
        } else if line.code.contains("std::net::") {
            Some("Blocking network I/O")
        } else if line.code.contains("std::process::Command") {
            Some("Blocking process I/O")
        } else if line.code.contains("event::read()") || line.code.contains("event::poll(") {
            Some("Blocking terminal read")
        } else {
            None
        }
    });

    assert_clean(
        &violations,
        "Blocking I/O inside async functions!",
        &[
            "Read terminal events through crossterm's EventStream",
            "Load files before the event loop starts",
        ],
    );
}
