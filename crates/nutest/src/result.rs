//! Outcome of a single test invocation

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use serde::Serialize;
use std::fmt;

/// Result of running one test. A test produces exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestResult {
    /// Every assertion held
    Pass,
    /// An assertion did not hold
    Fail,
    /// The test asked to be skipped
    Skip,
    /// The test could not run (unmet precondition, fixture failure, panic)
    Error,
}

impl TestResult {
    /// Whether this result makes the whole run fail
    pub fn is_failure(self) -> bool {
        matches!(self, TestResult::Fail | TestResult::Error)
    }

    /// Status tag printed by the runner
    pub fn tag(self) -> &'static str {
        match self {
            TestResult::Pass => "[       OK ]",
            TestResult::Fail => "[  FAILED  ]",
            TestResult::Skip => "[  SKIPPED ]",
            TestResult::Error => "[  ERROR   ]",
        }
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TestResult::Pass => "pass",
            TestResult::Fail => "fail",
            TestResult::Skip => "skip",
            TestResult::Error => "error",
        };
        f.write_str(name)
    }
}

/// Conversion from the value a test body ends with
///
/// A body that runs to its end without a failing assertion yields `()`,
/// which is a pass. A body may also end with an explicit [`TestResult`], or
/// with a `Result` whose `Err` marks the test as errored. The error's text
/// becomes a diagnostic attributed to the running test.
pub trait IntoTestResult {
    fn into_test_result(self) -> TestResult;
}

impl IntoTestResult for () {
    fn into_test_result(self) -> TestResult {
        TestResult::Pass
    }
}

impl IntoTestResult for TestResult {
    fn into_test_result(self) -> TestResult {
        self
    }
}

impl<T, E> IntoTestResult for Result<T, E>
where
    T: IntoTestResult,
    E: fmt::Display,
{
    fn into_test_result(self) -> TestResult {
        match self {
            Ok(value) => value.into_test_result(),
            Err(err) => {
                Diagnostic::unlocated(DiagnosticKind::Errored, err.to_string()).emit();
                TestResult::Error
            }
        }
    }
}
