//! Named wall-clock timer for a region of code
//!
//! Timers are independent values; two timers sharing a name are simply two
//! measurements.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Benchmark {
    name: String,
    started: Instant,
}

impl Benchmark {
    /// Start timing now
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            started: Instant::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Print `[ BENCHMARK ] name: S seconds` and return the measurement
    pub fn finish(self) -> Duration {
        let elapsed = self.elapsed();
        println!("{}", Self::line(&self.name, elapsed));
        elapsed
    }

    fn line(name: &str, elapsed: Duration) -> String {
        format!("[ BENCHMARK ] {}: {:.9} seconds", name, elapsed.as_secs_f64())
    }
}
