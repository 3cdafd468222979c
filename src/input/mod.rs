//! # Input Module
//!
//! The choice-prompt boundary. The engine only ever asks "present these
//! options, give me an index"; how choices are gathered (terminal, test
//! script, remote client) is an implementation detail behind [`Prompter`].

use std::io::{BufRead, Write};

use crate::{SanctumError, SanctumResult};

/// Boundary for presenting options and displaying text.
///
/// `prompt_choice` must return an index within `options`; invalid raw input
/// is the implementation's problem to reprompt, not the engine's.
pub trait Prompter {
    fn prompt_choice(&mut self, title: &str, options: &[String]) -> SanctumResult<usize>;
    fn show(&mut self, text: &str);
}

/// Line-based terminal prompter: numbered menu on stdout, selection read from
/// stdin, invalid input reprompted indefinitely.
#[derive(Debug, Default)]
pub struct StdioPrompter;

impl StdioPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for StdioPrompter {
    fn prompt_choice(&mut self, title: &str, options: &[String]) -> SanctumResult<usize> {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        writeln!(stdout, "{title}")?;
        for (index, option) in options.iter().enumerate() {
            writeln!(stdout, "{}) {option}", index + 1)?;
        }
        loop {
            write!(stdout, "> ")?;
            stdout.flush()?;
            let mut line = String::new();
            let bytes = stdin.lock().read_line(&mut line)?;
            if bytes == 0 {
                return Err(SanctumError::Io(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "input closed while waiting for a choice",
                )));
            }
            if let Ok(selection) = line.trim().parse::<usize>() {
                if (1..=options.len()).contains(&selection) {
                    return Ok(selection - 1);
                }
            }
            writeln!(stdout, "Invalid input. Please enter a valid number.")?;
        }
    }

    fn show(&mut self, text: &str) {
        println!("{text}");
        println!();
    }
}
