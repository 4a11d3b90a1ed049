// File: src/operator.rs
//! The person answering prompts, and a console implementation of them.

use crate::core::types::ResponseIndex;
use crate::error::ReviewError;
use crossterm::style::{style, Stylize};
use std::io::{BufRead, Write};

/// Everything the review loop says to, or asks of, the operator.
pub trait Operator {
    /// Called once per response that has at least one flagged word.
    fn show_response(&mut self, index: ResponseIndex, text: &str) -> Result<(), ReviewError>;

    /// Shows `prompt` and returns the answer without its line terminator.
    fn prompt(&mut self, prompt: &str) -> Result<String, ReviewError>;

    fn notify(&mut self, message: &str) -> Result<(), ReviewError>;
}

/// Line-oriented operator over any reader/writer pair (stdin/stdout in the CLI).
pub struct ConsoleOperator<R, W> {
    input: R,
    output: W,
    color: bool,
}

impl<R: BufRead, W: Write> ConsoleOperator<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            color: false,
        }
    }

    /// Highlights the response header and warnings.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Operator for ConsoleOperator<R, W> {
    fn show_response(&mut self, index: ResponseIndex, text: &str) -> Result<(), ReviewError> {
        writeln!(self.output)?;
        if self.color {
            writeln!(self.output, "{}", style(format!("Index: {index}")).bold().cyan())?;
            writeln!(self.output, "{} {}", style("Response:").bold(), text)?;
        } else {
            writeln!(self.output, "Index: {index}")?;
            writeln!(self.output, "Response: {text}")?;
        }
        Ok(())
    }

    fn prompt(&mut self, prompt: &str) -> Result<String, ReviewError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ReviewError::OperatorInputClosed);
        }
        let answer = line.trim_end_matches(['\n', '\r']);
        Ok(answer.to_string())
    }

    fn notify(&mut self, message: &str) -> Result<(), ReviewError> {
        if self.color {
            writeln!(self.output, "{}", style(message).yellow())?;
        } else {
            writeln!(self.output, "{message}")?;
        }
        Ok(())
    }
}
