//! Nutest: a minimalist unit-testing framework
//!
//! Declare tests where they are written, group them into named suites, run
//! them in a fixed order, and turn the outcome into a process exit code.
//!
//! - [`suite!`] declares a suite module and its tests, and generates the
//!   `register` function that records them into a [`Registry`].
//! - [`Runner`] walks the registry suite by suite, test by test, and
//!   aggregates a [`RunReport`].
//! - The `check_*` macros are fail-fast assertions: on mismatch they print a
//!   diagnostic and return [`TestResult::Fail`] from the enclosing test.
//! - [`Fixture`] pairs set-up and tear-down around a test body.
//!
//! # Example
//!
//! ```no_run
//! use nutest::prelude::*;
//!
//! nutest::suite! {
//!     #[describe = "Integer arithmetic"]
//!     mod math = "Math";
//!
//!     fn add_ok() {
//!         check_eq!(2 + 3, 5);
//!     }
//!
//!     #[describe = "Superseded by add_ok"]
//!     fn legacy() {
//!         skip!("kept for reference");
//!     }
//! }
//!
//! fn main() -> std::process::ExitCode {
//!     nutest::main_with(|registry| math::register(registry))
//! }
//! ```
//!
//! # Known limitation
//!
//! Assertions return from the function they are written in. A `check_*`
//! inside a helper called by a test returns from the helper, not from the
//! test; the helper has to hand its [`TestResult`] back explicitly.

pub mod assert;
pub mod bench;
pub mod diagnostics;
pub mod error;
pub mod fixture;
mod macros;
pub mod registry;
pub mod reporter;
pub mod result;
pub mod runner;

pub use bench::Benchmark;
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use error::{FixtureError, RegistryError};
pub use fixture::Fixture;
pub use registry::{Registry, Suite, TestCase, TestFn};
pub use reporter::{Palette, Reporter};
pub use result::{IntoTestResult, TestResult};
pub use runner::{main_with, RunReport, Runner, SuiteReport, Tally, TestRun};

pub use nutest_config::{ColorMode, RunnerConfig};

/// Everything a test file usually needs
pub mod prelude {
    pub use crate::{
        benchmark, check, check_eq, check_f32_eq, check_f64_eq, check_false, check_ge,
        check_gt, check_le, check_lt, check_mem_eq, check_ne, check_near, check_not_null,
        check_null, check_str_eq, check_str_ne, errored, skip,
    };
    pub use crate::{
        Fixture, FixtureError, IntoTestResult, Registry, RegistryError, Runner, RunnerConfig,
        TestResult,
    };
}
