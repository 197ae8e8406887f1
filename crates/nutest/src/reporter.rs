//! Progress reporter - gtest-style lines as the run advances

use crate::registry::{Registry, Suite, TestCase};
use crate::result::TestResult;
use crate::runner::{RunReport, SuiteReport, TestRun};
use colored::Color;
use nutest_config::{ColorMode, RunnerConfig};
use std::io::{IsTerminal, Write};
use std::time::Duration;

const BANNER: &str = "[==========]";
const DIVIDER: &str = "[----------]";
const RUN: &str = "[ RUN      ]";

/// Decides whether status tags carry terminal colors
///
/// The decision belongs to one output stream: progress on stdout and
/// diagnostics on stderr each get their own palette. The default palette
/// is plain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Colors exactly as `color` says, whatever the sink
    pub fn new(color: ColorMode) -> Self {
        Self {
            enabled: color.is_enabled(),
        }
    }

    /// Colors only when `color` allows it and `stream` is a terminal
    pub fn for_stream(color: ColorMode, stream: &impl IsTerminal) -> Self {
        Self {
            enabled: color.is_enabled() && stream.is_terminal(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Wrap `text` in bold `color` escapes when colors are enabled
    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.enabled {
            format!("\x1b[1;{}m{}\x1b[0m", color.to_fg_str(), text)
        } else {
            text.to_string()
        }
    }

    /// The status tag for `result`
    pub fn result_tag(&self, result: TestResult) -> String {
        let color = match result {
            TestResult::Pass => Color::Green,
            TestResult::Fail | TestResult::Error => Color::Red,
            TestResult::Skip => Color::Yellow,
        };
        self.paint(result.tag(), color)
    }

    fn banner(&self) -> String {
        self.paint(BANNER, Color::Green)
    }

    fn divider(&self) -> String {
        self.paint(DIVIDER, Color::Green)
    }
}

/// Writes run progress to any [`Write`] sink
///
/// Every line is flushed as soon as it is written so partial progress stays
/// visible. Write errors are ignored: a closed pipe must not stop the run.
pub struct Reporter<W: Write> {
    out: W,
    palette: Palette,
    config: RunnerConfig,
}

impl<W: Write> Reporter<W> {
    /// Colors follow `config.color` as is; the caller knows the sink
    pub fn new(out: W, config: RunnerConfig) -> Self {
        Self::with_palette(out, config, Palette::new(config.color))
    }

    pub fn with_palette(out: W, config: RunnerConfig, palette: Palette) -> Self {
        Self {
            out,
            palette,
            config,
        }
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Recover the underlying sink
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{}", text);
        let _ = self.out.flush();
    }

    fn elapsed(&self, duration: Duration, suffix: &str) -> String {
        if self.config.timings {
            format!(" ({} ms{})", duration.as_millis(), suffix)
        } else {
            String::new()
        }
    }

    pub fn run_started(&mut self, registry: &Registry) {
        let text = format!(
            "{} Running {} tests from {} test suites",
            self.palette.banner(),
            registry.test_count(),
            registry.suite_count()
        );
        self.line(&text);
    }

    pub fn suite_started(&mut self, suite: &Suite) {
        let mut text = format!(
            "{} {} tests from {}",
            self.palette.divider(),
            suite.test_count(),
            suite.name()
        );
        if self.config.descriptions {
            if let Some(description) = suite.description() {
                text.push_str(&format!(" - {}", description));
            }
        }
        self.line(&text);
    }

    pub fn test_started(&mut self, test: &TestCase) {
        let mut text = format!(
            "{} {}",
            self.palette.paint(RUN, Color::Green),
            test.qualified_name()
        );
        if self.config.descriptions {
            if let Some(description) = test.description() {
                text.push_str(&format!(" - {}", description));
            }
        }
        self.line(&text);
    }

    pub fn test_finished(&mut self, run: &TestRun) {
        let text = format!(
            "{} {}{}",
            self.palette.result_tag(run.result),
            run.qualified_name(),
            self.elapsed(run.duration, "")
        );
        self.line(&text);
    }

    pub fn suite_finished(&mut self, report: &SuiteReport) {
        let text = format!(
            "{} {} tests from {}{}",
            self.palette.divider(),
            report.tally.total,
            report.name,
            self.elapsed(report.duration, " total")
        );
        self.line(&text);
        self.line("");
    }

    pub fn run_finished(&mut self, report: &RunReport) {
        let totals = report.totals;
        let text = format!(
            "{} {} tests from {} test suites ran.{}",
            self.palette.banner(),
            totals.total,
            report.suites.len(),
            self.elapsed(report.duration, " total")
        );
        self.line(&text);

        let buckets = [
            ("[  PASSED  ]", totals.passed, Color::Green),
            ("[  FAILED  ]", totals.failed, Color::Red),
            ("[  SKIPPED ]", totals.skipped, Color::Yellow),
            ("[  ERRORS  ]", totals.errored, Color::Red),
        ];
        for (tag, count, color) in buckets {
            let text = format!("{} {} tests.", self.palette.paint(tag, color), count);
            self.line(&text);
        }

        if self.config.failure_details {
            self.failures(report);
        }
    }

    /// Recap every failed or errored test with its diagnostics
    pub fn failures(&mut self, report: &RunReport) {
        let failed: Vec<&TestRun> = report
            .runs()
            .filter(|run| run.result.is_failure())
            .collect();

        if failed.is_empty() {
            return;
        }

        self.line("");
        let header = self.palette.paint("Failures:", Color::Red);
        self.line(&header);

        for run in failed {
            let text = format!(
                "  {} {}",
                self.palette.result_tag(run.result),
                run.qualified_name()
            );
            self.line(&text);
            for diagnostic in &run.diagnostics {
                self.line(&format!("      {}", diagnostic));
            }
        }
    }
}
