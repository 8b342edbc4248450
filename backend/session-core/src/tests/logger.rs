// Unit tests for logger initialization
// A single test drives both paths: global Once state makes separate tests
// order-dependent.

use crate::logger::initialize;

use std::path::PathBuf;

/// **VALUE**: Verifies the error path and the idempotence guard in one
/// deterministic sequence.
///
/// **WHY THIS MATTERS**: Logger state is process-global (`Once` +
/// `AtomicBool`); two separate tests would race on it. Running the invalid
/// directory first pins the order: the failure must surface as an error,
/// and every later call must be a quiet no-op instead of a panic from
/// installing a second global logger.
#[test]
fn given_invalid_dir_when_initialize_called_then_errors_once_and_later_calls_are_noops() {
    // GIVEN: a path that cannot hold a log file
    let invalid_dir = PathBuf::from("/dev/null/invalid-path");

    // WHEN: initializing against it
    let result = initialize(&invalid_dir);

    // THEN: a Logger error, not a panic
    let err = result.expect_err("initialization against /dev/null must fail");
    assert!(
        format!("{:?}", err).contains("Logger"),
        "expected CoreError::Logger, got {:?}",
        err
    );

    // AND: subsequent calls (valid dir or not) return Ok without touching
    // the global logger again
    let temp_dir = tempfile::tempdir().unwrap();
    assert!(initialize(temp_dir.path()).is_ok());
    assert!(initialize(temp_dir.path()).is_ok());
}
