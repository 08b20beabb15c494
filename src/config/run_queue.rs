//! Batch file of runs to play back without prompting.
//!
//! One signed 32-bit integer per line; every four lines describe a run as
//! `delay`, `cols`, `rows`, `algorithm code`. A single bad line rejects the
//! whole batch.

use std::{fs, path::Path};

use thiserror::Error;

use super::{ConfigError, RunConfig};
use crate::generators::Algorithm;

const LINES_PER_RUN: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunQueueError {
    #[error("line {line}: {text:?} is not a 32-bit integer")]
    Parse { line: usize, text: String },

    #[error("{0} lines do not form whole runs of four")]
    Incomplete(usize),

    #[error("line {line}: unknown algorithm code {code}")]
    Algorithm { line: usize, code: i32 },

    #[error("line {line}: {value} is not a valid dimension or delay")]
    Negative { line: usize, value: i32 },

    #[error("run starting at line {line}: {source}")]
    Config { line: usize, source: ConfigError },
}

/// Encodes runs in the batch format.
pub fn encode(runs: &[RunConfig]) -> String {
    runs.iter()
        .flat_map(|run| {
            [
                run.delay_ms().to_string(),
                run.cols().to_string(),
                run.rows().to_string(),
                run.algorithm().code().to_string(),
            ]
        })
        .map(|line| line + "\n")
        .collect()
}

/// Decodes a whole batch, all or nothing.
pub fn decode(text: &str) -> Result<Vec<RunConfig>, RunQueueError> {
    let values = text
        .lines()
        .enumerate()
        .map(|(idx, line)| {
            line.trim().parse::<i32>().map_err(|_| RunQueueError::Parse {
                line: idx + 1,
                text: line.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if values.len() % LINES_PER_RUN != 0 {
        return Err(RunQueueError::Incomplete(values.len()));
    }

    values
        .chunks_exact(LINES_PER_RUN)
        .enumerate()
        .map(|(run_idx, chunk)| {
            let first_line = run_idx * LINES_PER_RUN + 1;
            let non_negative = |offset: usize| {
                let value = chunk[offset];
                u32::try_from(value).map_err(|_| RunQueueError::Negative {
                    line: first_line + offset,
                    value,
                })
            };
            let delay = non_negative(0)?;
            let cols = non_negative(1)?;
            let rows = non_negative(2)?;
            let code = chunk[3];
            let algorithm = Algorithm::from_code(code).ok_or(RunQueueError::Algorithm {
                line: first_line + 3,
                code,
            })?;

            RunConfig::new(algorithm, rows as usize, cols as usize, delay as u64).map_err(
                |source| RunQueueError::Config {
                    line: first_line,
                    source,
                },
            )
        })
        .collect()
}

/// Reads a batch file. A missing or malformed file yields an empty batch so
/// the caller can fall back to asking the user.
pub fn load(path: &Path) -> Vec<RunConfig> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            tracing::info!("[run queue] could not open {}: {}", path.display(), e);
            return Vec::new();
        }
    };
    match decode(&text) {
        Ok(runs) => {
            tracing::info!("[run queue] loaded {} runs from {}", runs.len(), path.display());
            runs
        }
        Err(e) => {
            tracing::warn!("[run queue] discarding {}: {}", path.display(), e);
            Vec::new()
        }
    }
}
