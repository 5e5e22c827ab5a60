//! User input utilities for interactive command-line prompts.

use anyhow::{Context, Result};
use std::io::{self, BufRead};

/// Prompts the user for a yes/no confirmation on stdin.
///
/// Accepts 'y', 'yes', 'n', 'no' (case insensitive).
/// Empty input is treated as 'no'.
pub fn prompt_confirmation(prompt: &str) -> Result<bool> {
    confirm_from(&mut io::stdin().lock(), prompt)
}

/// Same as [`prompt_confirmation`], reading from `reader`.
///
/// End of input counts as 'no'.
pub fn confirm_from<R: BufRead>(reader: &mut R, prompt: &str) -> Result<bool> {
    loop {
        println!("{prompt} (y/N): ");

        let mut input = String::new();
        let read = reader
            .read_line(&mut input)
            .context("Failed to read user input")?;
        if read == 0 {
            return Ok(false);
        }

        match input.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" | "" => return Ok(false),
            _ => eprintln!("Please enter 'y' for yes or 'n' for no."),
        }
    }
}
