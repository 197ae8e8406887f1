//! Test runner - execute every registered test, in order, exactly once

use crate::diagnostics::{self, Diagnostic};
use crate::error::RegistryError;
use crate::registry::{Registry, TestCase};
use crate::reporter::{Palette, Reporter};
use crate::result::TestResult;
use nutest_config::RunnerConfig;
use serde::{Serialize, Serializer};
use std::any::Any;
use std::io::{self, IsTerminal, Write};
use std::panic::{self, AssertUnwindSafe};
use std::process::ExitCode;
use std::time::{Duration, Instant};

fn as_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u128(duration.as_millis())
}

/// Per-bucket counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errored: usize,
}

impl Tally {
    pub fn record(&mut self, result: TestResult) {
        self.total += 1;
        match result {
            TestResult::Pass => self.passed += 1,
            TestResult::Fail => self.failed += 1,
            TestResult::Skip => self.skipped += 1,
            TestResult::Error => self.errored += 1,
        }
    }

    /// Add another tally's counts into this one
    pub fn absorb(&mut self, other: Tally) {
        self.total += other.total;
        self.passed += other.passed;
        self.failed += other.failed;
        self.skipped += other.skipped;
        self.errored += other.errored;
    }

    /// No failures and no errors; skips do not count against success
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.errored == 0
    }
}

/// One test invocation
#[derive(Debug, Clone, Serialize)]
pub struct TestRun {
    pub suite: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub result: TestResult,
    #[serde(rename = "duration_ms", serialize_with = "as_millis")]
    pub duration: Duration,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl TestRun {
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.suite, self.name)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub name: String,
    pub runs: Vec<TestRun>,
    pub tally: Tally,
    #[serde(rename = "duration_ms", serialize_with = "as_millis")]
    pub duration: Duration,
}

/// Aggregate outcome of a whole run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub suites: Vec<SuiteReport>,
    pub totals: Tally,
    #[serde(rename = "duration_ms", serialize_with = "as_millis")]
    pub duration: Duration,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.totals.is_success()
    }

    /// Every test run, suite by suite
    pub fn runs(&self) -> impl Iterator<Item = &TestRun> {
        self.suites.iter().flat_map(|suite| suite.runs.iter())
    }

    /// Process exit status: success iff nothing failed or errored
    pub fn exit_code(&self) -> ExitCode {
        if self.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

/// Sequential, single-threaded runner
#[derive(Debug, Clone, Default)]
pub struct Runner {
    config: RunnerConfig,
}

impl Runner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Run every registered test, reporting progress on stdout
    pub fn run(&self, registry: &Registry) -> RunReport {
        self.run_on(registry, io::stdout())
    }

    /// Report to a terminal-capable stream; colors only if it is a terminal
    pub fn run_on<W: Write + IsTerminal>(&self, registry: &Registry, out: W) -> RunReport {
        let palette = Palette::for_stream(self.config.color, &out);
        self.run_with(Reporter::with_palette(out, self.config, palette), registry)
    }

    /// Run every registered test, reporting progress to `out`
    ///
    /// Suites run in creation order and tests in registration order. Each
    /// test runs to completion before the next starts; a failing, erroring,
    /// or panicking test never stops the run.
    pub fn run_to<W: Write>(&self, registry: &Registry, out: W) -> RunReport {
        self.run_with(Reporter::new(out, self.config), registry)
    }

    fn run_with<W: Write>(&self, mut reporter: Reporter<W>, registry: &Registry) -> RunReport {
        // Diagnostics always go to stderr and are colored on their own terms
        let diagnostics = Palette::for_stream(self.config.color, &io::stderr());
        let started = Instant::now();
        let mut totals = Tally::default();
        let mut suites = Vec::with_capacity(registry.suite_count());

        reporter.run_started(registry);

        for suite in registry.suites() {
            reporter.suite_started(suite);
            let suite_started = Instant::now();
            let mut tally = Tally::default();
            let mut runs = Vec::with_capacity(suite.test_count());

            for test in suite.tests() {
                reporter.test_started(test);
                let run = self.invoke(test, diagnostics);
                reporter.test_finished(&run);
                tally.record(run.result);
                runs.push(run);
            }

            let report = SuiteReport {
                name: suite.name().to_string(),
                runs,
                tally,
                duration: suite_started.elapsed(),
            };
            reporter.suite_finished(&report);
            totals.absorb(tally);
            suites.push(report);
        }

        let report = RunReport {
            suites,
            totals,
            duration: started.elapsed(),
        };
        reporter.run_finished(&report);
        report
    }

    /// Invoke one test, turning a panic into [`TestResult::Error`]
    fn invoke(&self, test: &TestCase, palette: Palette) -> TestRun {
        let started = Instant::now();

        let (outcome, mut diagnostics) =
            diagnostics::capture_test(palette, test.qualified_name(), || {
                panic::catch_unwind(AssertUnwindSafe(|| test.invoke()))
            });

        let result = match outcome {
            Ok(result) => result,
            Err(payload) => {
                let diagnostic = Diagnostic::panicked(panic_message(payload.as_ref()))
                    .in_test(test.qualified_name());
                eprintln!("{} {}", palette.result_tag(TestResult::Error), diagnostic);
                diagnostics.push(diagnostic);
                TestResult::Error
            }
        };

        TestRun {
            suite: test.suite().to_string(),
            name: test.name().to_string(),
            description: test.description().map(str::to_string),
            result,
            duration: started.elapsed(),
            diagnostics,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Populate a registry, run it with the environment's configuration, and
/// return the process exit code
///
/// Configuration comes from `nutest.toml` and `NUTEST_*` variables. A
/// configuration error or a registry that cannot grow is reported on stderr
/// and fails the process before any test runs.
pub fn main_with<P>(populate: P) -> ExitCode
where
    P: FnOnce(&mut Registry) -> Result<(), RegistryError>,
{
    let config = match RunnerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("nutest: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut registry = Registry::new();
    if let Err(err) = populate(&mut registry) {
        eprintln!("nutest: {}", err);
        return ExitCode::FAILURE;
    }

    Runner::new(config).run(&registry).exit_code()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutest_config::ColorMode;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn quiet() -> RunnerConfig {
        RunnerConfig::default()
            .with_color(ColorMode::Disabled)
            .with_timings(false)
            .with_failure_details(false)
    }

    fn run(registry: &Registry) -> (RunReport, String) {
        let mut out = Vec::new();
        let report = Runner::new(quiet()).run_to(registry, &mut out);
        (report, String::from_utf8(out).unwrap())
    }

    #[rstest]
    #[case(&[], true)]
    #[case(&[TestResult::Pass, TestResult::Skip], true)]
    #[case(&[TestResult::Skip, TestResult::Skip], true)]
    #[case(&[TestResult::Pass, TestResult::Fail], false)]
    #[case(&[TestResult::Error], false)]
    fn test_tally_success(#[case] results: &[TestResult], #[case] success: bool) {
        let mut tally = Tally::default();
        for result in results {
            tally.record(*result);
        }
        assert_eq!(tally.total, results.len());
        assert_eq!(tally.is_success(), success);
    }

    #[test]
    fn test_runs_in_registration_order() {
        let mut registry = Registry::new();
        registry.register("b", "Second", || TestResult::Pass, None).unwrap();
        registry.register("a", "First", || TestResult::Pass, None).unwrap();
        registry.register("c", "Second", || TestResult::Pass, None).unwrap();

        let (report, _) = run(&registry);
        let order: Vec<_> = report.runs().map(TestRun::qualified_name).collect();
        assert_eq!(order, vec!["Second.b", "Second.c", "First.a"]);
    }

    #[test]
    fn test_progress_lines() {
        let mut registry = Registry::new();
        registry.register("ok", "S", || TestResult::Pass, None).unwrap();
        registry.register("bad", "S", || TestResult::Fail, None).unwrap();

        let (report, output) = run(&registry);
        assert!(!report.is_success());
        insta::assert_snapshot!(output, @r###"
        [==========] Running 2 tests from 1 test suites
        [----------] 2 tests from S
        [ RUN      ] S.ok
        [       OK ] S.ok
        [ RUN      ] S.bad
        [  FAILED  ] S.bad
        [----------] 2 tests from S

        [==========] 2 tests from 1 test suites ran.
        [  PASSED  ] 1 tests.
        [  FAILED  ] 1 tests.
        [  SKIPPED ] 0 tests.
        [  ERRORS  ] 0 tests.
        "###);
    }

    #[test]
    fn test_panic_is_error_and_run_continues() {
        let mut registry = Registry::new();
        registry
            .register("boom", "S", || -> TestResult { panic!("index out of bounds") }, None)
            .unwrap();
        registry.register("after", "S", || TestResult::Pass, None).unwrap();

        let (report, _) = run(&registry);
        let runs: Vec<_> = report.runs().collect();
        assert_eq!(runs[0].result, TestResult::Error);
        assert_eq!(
            runs[0].diagnostics[0].message,
            "test panicked: index out of bounds"
        );
        assert_eq!(runs[0].diagnostics[0].test.as_deref(), Some("S.boom"));
        assert_eq!(runs[1].result, TestResult::Pass);
        assert_eq!(report.totals.errored, 1);
    }

    #[test]
    fn test_diagnostics_attach_to_their_run() {
        let mut registry = Registry::new();
        registry
            .register(
                "noisy",
                "S",
                || {
                    Diagnostic::failed("s.rs", 4, "Expected: 1 == 2 (1 vs 2)").emit();
                    TestResult::Fail
                },
                None,
            )
            .unwrap();
        registry.register("quiet", "S", || TestResult::Pass, None).unwrap();

        let (report, _) = run(&registry);
        let runs: Vec<_> = report.runs().collect();
        assert_eq!(runs[0].diagnostics.len(), 1);
        assert!(runs[1].diagnostics.is_empty());
    }

    #[test]
    fn test_skip_only_run_succeeds() {
        let mut registry = Registry::new();
        registry.register("skipped", "S", || TestResult::Skip, None).unwrap();
        let (report, _) = run(&registry);
        assert!(report.is_success());
        assert_eq!(report.totals.skipped, 1);

        registry.register("errored", "S", || TestResult::Error, None).unwrap();
        let (report, _) = run(&registry);
        assert!(!report.is_success());
    }

    #[test]
    fn test_panic_message_payloads() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        let borrowed: Box<dyn Any + Send> = Box::new("borrowed");
        let other: Box<dyn Any + Send> = Box::new(7_u8);

        assert_eq!(panic_message(owned.as_ref()), "owned");
        assert_eq!(panic_message(borrowed.as_ref()), "borrowed");
        assert_eq!(panic_message(other.as_ref()), "non-string panic payload");
    }
}
