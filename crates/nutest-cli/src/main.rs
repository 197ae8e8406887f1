use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use nutest::{Registry, Runner};
use nutest_config::{ColorMode, RunnerConfig};
use std::io;
use std::process::ExitCode;

mod suites;

/// Demo test program built on nutest.
///
/// Registers the bundled demo suites and runs them in registration order.
/// The `Math` suite contains a deliberately buggy test, so a full run exits
/// with failure.
///
/// EXAMPLES:
///     nutest-demo                      Run every suite
///     nutest-demo --suite Strings      Run tests whose name contains "Strings"
///     nutest-demo --list               List tests without running them
///     nutest-demo --json > report.json Write a JSON summary
///
/// ENVIRONMENT VARIABLES:
///     NUTEST_COLOR            enabled | disabled
///     NUTEST_DESCRIPTIONS     Show test descriptions (true/false)
///     NUTEST_FAILURE_DETAILS  Recap failures after the summary (true/false)
///     NUTEST_TIMINGS          Show durations (true/false)
///     NUTEST_JSON             Set to '1' for JSON output by default
///     NO_COLOR                Set to disable colored output
#[derive(Parser, Debug)]
#[command(name = "nutest-demo")]
#[command(version)]
struct Cli {
    /// Disable colored status tags
    #[arg(long)]
    no_color: bool,

    /// Only run tests whose `Suite.test` name contains PATTERN
    #[arg(long, short = 's', value_name = "PATTERN")]
    suite: Option<String>,

    /// List the selected tests without running them
    #[arg(long)]
    list: bool,

    /// Print a JSON run report on stdout; progress goes to stderr
    #[arg(long, env = "NUTEST_JSON")]
    json: bool,

    /// Show suite and test descriptions in the progress output
    #[arg(long)]
    descriptions: bool,
}

impl Cli {
    /// Flags sit on top of defaults, `nutest.toml`, and environment
    fn config(&self) -> Result<RunnerConfig> {
        let mut config = RunnerConfig::from_env().context("Failed to load nutest configuration")?;
        if self.no_color {
            config = config.with_color(ColorMode::Disabled);
        }
        if self.descriptions {
            config = config.with_descriptions(true);
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = cli.config()?;

    let mut registry = Registry::new();
    suites::register_all(&mut registry).context("Failed to register demo suites")?;
    if let Some(pattern) = &cli.suite {
        registry = registry.filter(pattern);
    }

    if cli.list {
        list(&registry);
        return Ok(ExitCode::SUCCESS);
    }

    let runner = Runner::new(config);
    if cli.json {
        let report = runner.run_on(&registry, io::stderr());
        let json =
            serde_json::to_string_pretty(&report).context("Failed to serialize run report")?;
        println!("{}", json);
        Ok(report.exit_code())
    } else {
        Ok(runner.run(&registry).exit_code())
    }
}

fn list(registry: &Registry) {
    for suite in registry.suites() {
        for test in suite.tests() {
            match test.description() {
                Some(description) => println!("{} - {}", test.qualified_name(), description),
                None => println!("{}", test.qualified_name()),
            }
        }
    }
    println!();
    println!(
        "{} tests from {} test suites",
        registry.test_count(),
        registry.suite_count()
    );
}
