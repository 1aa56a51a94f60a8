//! A single player game of blackjack against the house.
//!
//! The crate holds the game itself: cards, the shoe, hands, the wager bookkeeping, the round state
//! machine and the session loop. Reading answers and drawing the screen are left to an implementer
//! of the `Screen` and `Input` traits in [`console`].

pub mod card;
pub mod config;
pub mod console;
pub mod error;
pub mod hand;
pub mod participant;
pub mod prompt;
pub mod round;
pub mod rules;
pub mod session;
pub mod shoe;

pub use card::{Card, Suit};
pub use config::{SessionConfig, SessionConfigBuilder};
pub use console::{Console, Input, Screen, BANNER};
#[doc(hidden)]
pub use console::ScriptedConsole;
pub use error::{BlackjackError, Result};
pub use hand::{AceRule, Hand};
pub use participant::Participant;
pub use round::{RoundEngine, RoundPhase, RoundReport, RoundState};
pub use rules::{judge, Outcome, Reason, Verdict};
pub use session::{SessionController, SessionEnd, SessionSummary};
pub use shoe::{NoShuffle, PresetOrder, RandomShuffle, Shoe, Shuffler};

pub mod prelude {
    pub use super::{
        AceRule, BlackjackError, Card, Console, Hand, Input, Outcome, Participant, RoundEngine,
        Screen, SessionConfig, SessionController, SessionSummary, Shoe, Shuffler, Suit, Verdict,
    };
}
