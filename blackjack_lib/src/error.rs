use thiserror::Error;

/// Errors produced while playing a game of blackjack.
///
/// `InvalidWager`, `InsufficientFunds` and `InvalidDecision` are recoverable: the session explains
/// them to the player and asks the same question again. The remaining variants end the session.
#[derive(Debug, Error)]
pub enum BlackjackError {
    #[error("invalid card: rank {rank} of {suit}")]
    InvalidCard { rank: u8, suit: String },

    #[error("wager must be a positive whole number, got {0:?}")]
    InvalidWager(String),

    #[error("insufficient funds: cannot wager {requested} with a balance of {balance}")]
    InsufficientFunds { requested: u32, balance: u32 },

    #[error("unrecognised answer {answer:?}, expected {expected}")]
    InvalidDecision {
        answer: String,
        expected: &'static str,
    },

    #[error("attempted to draw from an empty shoe")]
    ShoeEmpty,

    #[error("input closed while waiting for an answer")]
    InputClosed,

    #[error("no valid answer to {question:?} after {attempts} attempts")]
    TooManyAttempts { question: String, attempts: u32 },

    #[error("console error: {0}")]
    Io(#[from] std::io::Error),
}

impl BlackjackError {
    /// Returns true for errors caused by a bad answer from the player, which are handled by asking again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BlackjackError::InvalidWager(_)
                | BlackjackError::InsufficientFunds { .. }
                | BlackjackError::InvalidDecision { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, BlackjackError>;
