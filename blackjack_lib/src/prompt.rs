//! Asking the player a question until a valid answer arrives.
//!
//! A bad answer is explained and the same question asked again, up to a fixed number of attempts.

use crate::console::Console;
use crate::error::{BlackjackError, Result};
use std::fmt::Display;
use tracing::warn;

/// The player's choice during their turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Hit,
    Stand,
}

impl Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Hit => write!(f, "hit"),
            Decision::Stand => write!(f, "stand"),
        }
    }
}

pub fn parse_decision(answer: &str) -> Result<Decision> {
    match answer.trim().to_lowercase().as_str() {
        "h" | "hit" => Ok(Decision::Hit),
        "s" | "stand" => Ok(Decision::Stand),
        _ => Err(BlackjackError::InvalidDecision {
            answer: answer.trim().to_string(),
            expected: "H or S",
        }),
    }
}

pub fn parse_yes_no(answer: &str) -> Result<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err(BlackjackError::InvalidDecision {
            answer: answer.trim().to_string(),
            expected: "Y or N",
        }),
    }
}

/// The explanation shown to the player after a bad answer.
pub fn explain(error: &BlackjackError) -> String {
    match error {
        BlackjackError::InvalidWager(_) => "Wager must be a positive whole number!".to_string(),
        BlackjackError::InsufficientFunds { balance, .. } => {
            format!("Insufficient funds! You can wager at most {}.", balance)
        }
        BlackjackError::InvalidDecision { expected, .. } => {
            format!("Answer must be {}!", expected)
        }
        other => other.to_string(),
    }
}

/// Asks `question` until `parse` accepts the answer. Recoverable errors are explained on the console
/// and the question is repeated; any other error is returned straight away. Gives up with
/// `TooManyAttempts` after `max_attempts` rejected answers and with `InputClosed` at end of input.
pub fn ask<C, T, F>(console: &mut C, question: &str, max_attempts: u32, mut parse: F) -> Result<T>
where
    C: Console + ?Sized,
    F: FnMut(&str) -> Result<T>,
{
    for attempt in 1..=max_attempts {
        let answer = console
            .read_line(question)?
            .ok_or(BlackjackError::InputClosed)?;
        match parse(&answer) {
            Ok(value) => return Ok(value),
            Err(e) if e.is_recoverable() => {
                warn!(question, attempt, error = %e, "answer rejected");
                console.print_line(&explain(&e));
            }
            Err(e) => return Err(e),
        }
    }

    Err(BlackjackError::TooManyAttempts {
        question: question.trim().to_string(),
        attempts: max_attempts,
    })
}
