pub mod interactive;
pub mod run_queue;

use std::{collections::VecDeque, io, ops::RangeInclusive, time::Duration};

use thiserror::Error;

use crate::generators::Algorithm;

/// Accepted number of rows and columns.
pub const DIMENSION_RANGE: RangeInclusive<usize> = 3..=60;
/// Accepted delay between animation steps, in milliseconds.
pub const DELAY_RANGE: RangeInclusive<u64> = 0..=2000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("dimension {0} is outside [3, 60]")]
    Dimension(usize),

    #[error("delay {0} ms is outside [0, 2000]")]
    Delay(u64),
}

/// Everything needed for one generation run. Only constructible with values
/// inside the accepted ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    algorithm: Algorithm,
    rows: usize,
    cols: usize,
    delay_ms: u64,
}

impl RunConfig {
    pub fn new(
        algorithm: Algorithm,
        rows: usize,
        cols: usize,
        delay_ms: u64,
    ) -> Result<Self, ConfigError> {
        for dim in [rows, cols] {
            if !DIMENSION_RANGE.contains(&dim) {
                return Err(ConfigError::Dimension(dim));
            }
        }
        if !DELAY_RANGE.contains(&delay_ms) {
            return Err(ConfigError::Delay(delay_ms));
        }
        Ok(RunConfig {
            algorithm,
            rows,
            cols,
            delay_ms,
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn with_algorithm(self, algorithm: Algorithm) -> Self {
        RunConfig { algorithm, ..self }
    }

    pub fn with_dimensions(self, rows: usize, cols: usize) -> Result<Self, ConfigError> {
        RunConfig::new(self.algorithm, rows, cols, self.delay_ms)
    }

    pub fn with_delay(self, delay_ms: u64) -> Result<Self, ConfigError> {
        RunConfig::new(self.algorithm, self.rows, self.cols, delay_ms)
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            algorithm: Algorithm::RecursiveBacktrack,
            rows: 10,
            cols: 10,
            delay_ms: 10,
        }
    }
}

impl std::fmt::Display for RunConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}x{} @ {} ms",
            self.algorithm, self.rows, self.cols, self.delay_ms
        )
    }
}

/// Where the next run comes from: the pending batch first, then the user.
#[derive(Debug)]
pub struct ConfigSource {
    queue: VecDeque<RunConfig>,
    interactive: bool,
}

impl ConfigSource {
    pub fn new(queue: impl IntoIterator<Item = RunConfig>, interactive: bool) -> Self {
        ConfigSource {
            queue: queue.into_iter().collect(),
            interactive,
        }
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Returns the next configuration, or `None` when there is nothing left to run.
    /// Interactive prompts start from `previous`.
    pub fn next_run(&mut self, previous: RunConfig) -> io::Result<Option<RunConfig>> {
        if let Some(config) = self.queue.pop_front() {
            tracing::debug!("[config] taking queued run {}", config);
            return Ok(Some(config));
        }
        if !self.interactive {
            return Ok(None);
        }
        let stdin = io::stdin();
        interactive::configure_run(&mut stdin.lock(), &mut io::stdout(), previous)
    }
}
