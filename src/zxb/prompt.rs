//! Interactive questions asked while a command runs.

use crate::error::Result;
use std::io::{self, BufRead, Write};

/// Confirmation and selection prompts. Commands only talk to the user through this.
pub trait Prompter {
    /// Asks a yes/no question. An empty answer picks `default`.
    fn confirm(&self, question: &str, default: bool) -> Result<bool>;

    /// Asks the user to pick one of `options`; returns its index.
    fn select(&self, question: &str, options: &[String]) -> Result<Option<usize>>;
}

/// Reads answers from stdin, one line per question.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompter;

impl StdinPrompter {
    fn read_answer(&self) -> Result<String> {
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }
}

impl Prompter for StdinPrompter {
    fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        print!("{} {} ", question, hint);
        let answer = self.read_answer()?;
        Ok(parse_confirmation(&answer, default))
    }

    fn select(&self, question: &str, options: &[String]) -> Result<Option<usize>> {
        println!("{}", question);
        for (i, option) in options.iter().enumerate() {
            println!("  {}) {}", i + 1, option);
        }
        print!("> ");
        let answer = self.read_answer()?;
        Ok(parse_selection(&answer, options.len()))
    }
}

pub fn parse_confirmation(answer: &str, default: bool) -> bool {
    match answer.to_lowercase().as_str() {
        "" => default,
        "y" | "yes" => true,
        _ => false,
    }
}

/// Parses a 1-based choice. Out of range or non-numeric answers select nothing.
pub fn parse_selection(answer: &str, count: usize) -> Option<usize> {
    answer
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=count).contains(n))
        .map(|n| n - 1)
}
