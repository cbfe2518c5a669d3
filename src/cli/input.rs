//! Line-based user input
//!
//! Answers and menu choices are whole lines read from stdin. End of input
//! (Ctrl+D, or an exhausted pipe) is reported as `None` and treated by
//! callers as a normal abort, never as an error.

use std::io::{self, BufRead, Write};

use crate::session::AnswerSource;

/// Prompting line reader over stdin.
pub struct LineInput;

impl LineInput {
    pub fn new() -> Self {
        LineInput
    }

    /// Print `prompt`, then read one line. `Ok(None)` on end of input.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;

        let mut line = String::new();
        let n = io::stdin().lock().read_line(&mut line)?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    /// "Press Enter to continue" pause; end of input just falls through.
    pub fn pause(&mut self, prompt: &str) -> io::Result<()> {
        self.read_line(prompt)?;
        Ok(())
    }
}

impl Default for LineInput {
    fn default() -> Self {
        Self::new()
    }
}

impl AnswerSource for LineInput {
    fn read_answer(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.read_line(prompt)
    }
}
