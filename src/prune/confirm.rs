use std::io::{BufRead, Write};

use crate::error::{PruneError, Result};

pub const PROMPT: &str = "Are you sure you want to delete these team tokens? (y/n): ";

/// True for `y` or `yes`, ignoring case and surrounding whitespace.
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Prompt on `output` and read one answer line from `input`.
///
/// End of input counts as an empty answer. A failed read is an
/// [`PruneError::Input`].
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<bool> {
    writeln!(output, "{PROMPT}")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer).map_err(PruneError::Input)?;
    Ok(is_affirmative(&answer))
}
