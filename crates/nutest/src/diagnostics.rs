//! Diagnostics emitted at the point a test fails, skips, or errors
//!
//! A diagnostic is printed to stderr the moment it is emitted. While the
//! runner is invoking a test, the diagnostics emitted on that thread are
//! also collected so they can be attached to the test's [`TestRun`].
//!
//! Assertion diagnostics carry the file and line of the failing check.
//! Diagnostics raised outside the test's own source (a body that ends in
//! `Err`, a fixture that cannot set up, a panic) have no reliable line and
//! name the test instead.
//!
//! [`TestRun`]: crate::runner::TestRun

use crate::reporter::Palette;
use crate::result::TestResult;
use nutest_config::ColorMode;
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::io;

/// What a diagnostic reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    Failed,
    Skipped,
    Errored,
}

impl DiagnosticKind {
    /// The test result this kind of diagnostic accompanies
    pub fn result(self) -> TestResult {
        match self {
            DiagnosticKind::Failed => TestResult::Fail,
            DiagnosticKind::Skipped => TestResult::Skip,
            DiagnosticKind::Errored => TestResult::Error,
        }
    }
}

/// Source position captured at the call site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
}

/// A message tied to the place in a test that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub location: Option<SourceLocation>,
    /// `Suite.test` that raised it, for diagnostics without a location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn failed(file: &'static str, line: u32, message: impl Into<String>) -> Self {
        Self::at(DiagnosticKind::Failed, file, line, message)
    }

    pub fn skipped(file: &'static str, line: u32, message: impl Into<String>) -> Self {
        Self::at(DiagnosticKind::Skipped, file, line, message)
    }

    pub fn errored(file: &'static str, line: u32, message: impl Into<String>) -> Self {
        Self::at(DiagnosticKind::Errored, file, line, message)
    }

    /// An error with no source position; the active capture names the test
    pub fn unlocated(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            location: None,
            test: None,
            message: message.into(),
        }
    }

    /// A panic caught at the invocation boundary; the panic hook has
    /// already printed where it happened.
    pub fn panicked(message: impl Into<String>) -> Self {
        Self::unlocated(
            DiagnosticKind::Errored,
            format!("test panicked: {}", message.into()),
        )
    }

    /// Attribute to the test `Suite.test`
    pub fn in_test(mut self, qualified_name: impl Into<String>) -> Self {
        self.test = Some(qualified_name.into());
        self
    }

    fn at(kind: DiagnosticKind, file: &'static str, line: u32, message: impl Into<String>) -> Self {
        Self {
            kind,
            location: Some(SourceLocation { file, line }),
            test: None,
            message: message.into(),
        }
    }

    /// Print to stderr and record into the active capture, if any
    pub fn emit(mut self) {
        SINK.with(|sink| {
            let mut sink = sink.borrow_mut();
            let palette = match sink.as_ref() {
                Some(capture) => capture.palette,
                None => Palette::for_stream(ColorMode::Enabled, &io::stderr()),
            };
            if self.location.is_none() && self.test.is_none() {
                self.test = sink.as_ref().and_then(|c| c.test.clone());
            }
            eprintln!("{} {}", palette.result_tag(self.kind.result()), self);

            if let Some(capture) = sink.as_mut() {
                capture.records.push(self);
            }
        });
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.location, &self.test) {
            (Some(location), _) => {
                write!(f, "{}:{}: {}", location.file, location.line, self.message)
            }
            (None, Some(test)) => write!(f, "{}: {}", test, self.message),
            (None, None) => f.write_str(&self.message),
        }
    }
}

struct Capture {
    palette: Palette,
    test: Option<String>,
    records: Vec<Diagnostic>,
}

thread_local! {
    static SINK: RefCell<Option<Capture>> = const { RefCell::new(None) };
}

/// Restores the enclosing capture when a nested one ends
struct Restore(Option<Capture>);

impl Drop for Restore {
    fn drop(&mut self) {
        let previous = self.0.take();
        SINK.with(|sink| *sink.borrow_mut() = previous);
    }
}

/// Run `f`, collecting every diagnostic emitted on this thread meanwhile
pub fn capture<R>(palette: Palette, f: impl FnOnce() -> R) -> (R, Vec<Diagnostic>) {
    scoped(palette, None, f)
}

/// Like [`capture`], attributing unlocated diagnostics to `Suite.test`
pub fn capture_test<R>(
    palette: Palette,
    qualified_name: String,
    f: impl FnOnce() -> R,
) -> (R, Vec<Diagnostic>) {
    scoped(palette, Some(qualified_name), f)
}

fn scoped<R>(palette: Palette, test: Option<String>, f: impl FnOnce() -> R) -> (R, Vec<Diagnostic>) {
    let previous = SINK.with(|sink| {
        sink.borrow_mut().replace(Capture {
            palette,
            test,
            records: Vec::new(),
        })
    });
    let restore = Restore(previous);

    let value = f();

    let records = SINK
        .with(|sink| sink.borrow_mut().take())
        .map(|c| c.records)
        .unwrap_or_default();
    drop(restore);

    (value, records)
}
