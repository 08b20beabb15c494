use std::io::{self, BufRead, Write};

use super::{DELAY_RANGE, DIMENSION_RANGE, RunConfig};
use crate::generators::Algorithm;

const MENU: &str = "Menu:\n  Set Algorithm (1)\n  Set Maze Size (2)\n  Set Speed (3)\n  Run (4)\n  Exit (5)";

/// Reads integers until one falls inside `[min, max]`.
/// Returns `None` once the input is exhausted.
fn read_in_bounds<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    min: i64,
    max: i64,
) -> io::Result<Option<i64>> {
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match line.trim().parse::<i64>() {
            Ok(n) if (min..=max).contains(&n) => return Ok(Some(n)),
            _ => writeln!(
                output,
                "Invalid input, please enter a number in [{}, {}]",
                min, max
            )?,
        }
    }
}

/// Console menu for editing the next run, starting from the previous one.
/// Returns `None` when the user chooses to exit or input ends.
pub fn configure_run<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    previous: RunConfig,
) -> io::Result<Option<RunConfig>> {
    let mut config = previous;

    loop {
        writeln!(output, "\nCurrent run: {}", config)?;
        writeln!(output, "{}", MENU)?;
        output.flush()?;

        let Some(choice) = read_in_bounds(input, output, 1, 5)? else {
            return Ok(None);
        };
        match choice {
            1 => {
                writeln!(output, "Algorithms:")?;
                for algo in Algorithm::ALL {
                    writeln!(output, "  {} ({})", algo, algo.code())?;
                }
                let Some(code) = read_in_bounds(input, output, 1, 4)? else {
                    return Ok(None);
                };
                if let Some(algorithm) = i32::try_from(code).ok().and_then(Algorithm::from_code) {
                    config = config.with_algorithm(algorithm);
                }
            }
            2 => {
                let (min, max) = (*DIMENSION_RANGE.start() as i64, *DIMENSION_RANGE.end() as i64);
                writeln!(output, "Enter the width of the maze (between {} and {})", min, max)?;
                let Some(cols) = read_in_bounds(input, output, min, max)? else {
                    return Ok(None);
                };
                writeln!(output, "Enter the height of the maze (between {} and {})", min, max)?;
                let Some(rows) = read_in_bounds(input, output, min, max)? else {
                    return Ok(None);
                };
                match config.with_dimensions(rows as usize, cols as usize) {
                    Ok(updated) => config = updated,
                    Err(e) => writeln!(output, "{}", e)?,
                }
            }
            3 => {
                let (min, max) = (*DELAY_RANGE.start() as i64, *DELAY_RANGE.end() as i64);
                writeln!(
                    output,
                    "Enter the delay between frames in milliseconds (between {} and {}). \
Use a lower delay for larger mazes.",
                    min, max
                )?;
                let Some(delay) = read_in_bounds(input, output, min, max)? else {
                    return Ok(None);
                };
                match config.with_delay(delay as u64) {
                    Ok(updated) => config = updated,
                    Err(e) => writeln!(output, "{}", e)?,
                }
            }
            4 => return Ok(Some(config)),
            _ => return Ok(None),
        }
    }
}
