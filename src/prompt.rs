use std::io::{BufRead, Write};
use tracing::warn;

use crate::error::{ArchiveError, Result};
use crate::provider::validate_url;

/// Ask for input until `parse` accepts it, giving up after `max_attempts`
/// tries or at end of input.
pub fn prompt_until<R, W, T, F>(
    input: &mut R,
    output: &mut W,
    message: &str,
    max_attempts: u32,
    parse: F,
) -> Result<T>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> Result<T>,
{
    for attempt in 1..=max_attempts {
        write!(output, "{message}")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(ArchiveError::AttemptsExhausted {
                attempts: attempt - 1,
            });
        }

        match parse(line.trim()) {
            Ok(value) => return Ok(value),
            Err(e) => {
                warn!("Rejected input (attempt {attempt}/{max_attempts}): {e}");
                writeln!(output, "{e}")?;
            }
        }
    }

    Err(ArchiveError::AttemptsExhausted {
        attempts: max_attempts,
    })
}

pub fn prompt_for_url<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
    max_attempts: u32,
) -> Result<String> {
    prompt_until(input, output, message, max_attempts, |s| {
        validate_url(s).map(str::to_string)
    })
}

pub fn prompt_for_path<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
    max_attempts: u32,
) -> Result<String> {
    prompt_until(input, output, message, max_attempts, |s| {
        if s.is_empty() {
            Err(ArchiveError::InvalidInput("a file name is required".into()))
        } else {
            Ok(s.to_string())
        }
    })
}
