//! Unit tests for perf module.

use dylib_resolver::perf::{ScopedTimer, is_profiling_enabled, measure, measure_and_log, set_profiling_enabled};

#[test]
fn test_scoped_timer_creation() {
    // High threshold, so dropping must not warn
    let timer = ScopedTimer::new("scan_directory", 1000.0);
    assert_eq!(timer.name(), "scan_directory");
    assert!(timer.elapsed_ms() >= 0.0);
}

#[test]
fn test_measure_returns_result() {
    let (value, elapsed_ms) = measure(|| 21 * 2);
    assert_eq!(value, 42);
    assert!(elapsed_ms >= 0.0);
}

#[test]
fn test_measure_and_log_passes_through() {
    // A zero threshold forces the warning path
    let value = measure_and_log("read_config", 0.0, || "done");
    assert_eq!(value, "done");
}

#[test]
fn test_profiling_toggle() {
    let original = is_profiling_enabled();
    set_profiling_enabled(true);
    assert!(is_profiling_enabled());
    set_profiling_enabled(false);
    assert!(!is_profiling_enabled());
    set_profiling_enabled(original);
}
