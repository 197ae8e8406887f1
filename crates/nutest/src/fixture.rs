//! Set-up / tear-down around a test body

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::error::FixtureError;
use crate::result::TestResult;

/// Per-test state with a paired lifecycle
///
/// A fresh value is built with [`Default`] for every test, `set_up` runs
/// before the body, and `tear_down` runs after it whatever the body's
/// outcome, including a failed assertion's early return or a panic.
pub trait Fixture: Default {
    fn set_up(&mut self) -> Result<(), FixtureError> {
        Ok(())
    }

    fn tear_down(&mut self) {}
}

/// Runs `tear_down` when dropped
struct Installed<F: Fixture>(F);

impl<F: Fixture> Drop for Installed<F> {
    fn drop(&mut self) {
        self.0.tear_down();
    }
}

/// Run `body` with a freshly set-up `F`
///
/// A set-up error is reported as an errored test and the body does not
/// run; tear-down still runs so partial set-up can be released.
pub fn run<F, B>(body: B) -> TestResult
where
    F: Fixture,
    B: FnOnce(&mut F) -> TestResult,
{
    let mut installed = Installed(F::default());

    if let Err(err) = installed.0.set_up() {
        Diagnostic::unlocated(DiagnosticKind::Errored, err.to_string()).emit();
        return TestResult::Error;
    }

    body(&mut installed.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    thread_local! {
        static EVENTS: RefCell<Vec<&'static str>> = const { RefCell::new(Vec::new()) };
    }

    fn record(event: &'static str) {
        EVENTS.with(|e| e.borrow_mut().push(event));
    }

    fn take_events() -> Vec<&'static str> {
        EVENTS.with(|e| std::mem::take(&mut *e.borrow_mut()))
    }

    #[derive(Default)]
    struct Tracked {
        ready: bool,
    }

    impl Fixture for Tracked {
        fn set_up(&mut self) -> Result<(), FixtureError> {
            record("set_up");
            self.ready = true;
            Ok(())
        }

        fn tear_down(&mut self) {
            record("tear_down");
        }
    }

    #[derive(Default)]
    struct Broken;

    impl Fixture for Broken {
        fn set_up(&mut self) -> Result<(), FixtureError> {
            record("set_up");
            Err(FixtureError::set_up("scratch directory missing"))
        }

        fn tear_down(&mut self) {
            record("tear_down");
        }
    }

    #[test]
    fn test_lifecycle_order() {
        take_events();
        let result = run::<Tracked, _>(|state| {
            assert!(state.ready);
            record("body");
            TestResult::Pass
        });

        assert_eq!(result, TestResult::Pass);
        assert_eq!(take_events(), vec!["set_up", "body", "tear_down"]);
    }

    #[test]
    fn test_tear_down_after_failure() {
        take_events();
        let result = run::<Tracked, _>(|_| TestResult::Fail);

        assert_eq!(result, TestResult::Fail);
        assert_eq!(take_events(), vec!["set_up", "tear_down"]);
    }

    #[test]
    fn test_tear_down_after_panic() {
        take_events();
        let caught = std::panic::catch_unwind(|| run::<Tracked, _>(|_| panic!("boom")));

        assert!(caught.is_err());
        assert_eq!(take_events(), vec!["set_up", "tear_down"]);
    }

    #[test]
    fn test_set_up_error_skips_body() {
        take_events();
        let (result, records) = crate::diagnostics::capture_test(
            Default::default(),
            "Devices.open_port".to_string(),
            || {
                run::<Broken, _>(|_| {
                    record("body");
                    TestResult::Pass
                })
            },
        );

        assert_eq!(result, TestResult::Error);
        assert_eq!(take_events(), vec!["set_up", "tear_down"]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].location, None);
        assert_eq!(
            records[0].to_string(),
            "Devices.open_port: fixture set-up failed: scratch directory missing"
        );
    }
}
