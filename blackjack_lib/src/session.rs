//! Module that runs a whole session at the table: naming the player, playing rounds until the
//! player declines another one or runs out of money, and summarising the results.

use crate::config::SessionConfig;
use crate::console::Console;
use crate::error::{BlackjackError, Result};
use crate::participant::Participant;
use crate::prompt;
use crate::round::{RoundEngine, RoundReport};
use crate::rules::Outcome;
use crate::shoe::{NoShuffle, RandomShuffle, Shoe, Shuffler};
use serde::Serialize;
use std::fmt::Display;
use tracing::{info, warn};

pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// How a session came to an end.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum SessionEnd {
    /// The player answered no to another round.
    Declined,
    /// The player's balance reached zero.
    OutOfFunds,
    /// Input was closed or the player kept giving answers that made no sense.
    Abandoned(String),
}

/// Record of everything that happened during a session.
#[derive(Clone, Debug, Serialize)]
pub struct SessionSummary {
    pub player_name: String,
    pub rounds_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub starting_balance: u32,
    pub final_balance: u32,
    pub ending: SessionEnd,
    pub rounds: Vec<RoundReport>,
}

impl SessionSummary {
    fn new(player_name: String, starting_balance: u32) -> SessionSummary {
        SessionSummary {
            player_name,
            rounds_played: 0,
            wins: 0,
            losses: 0,
            starting_balance,
            final_balance: starting_balance,
            ending: SessionEnd::Declined,
            rounds: vec![],
        }
    }

    fn record(&mut self, report: RoundReport) {
        self.rounds_played += 1;
        match report.verdict.outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
        }
        self.final_balance = report.balance;
        self.rounds.push(report);
    }

    /// Money won (positive) or lost (negative) over the session.
    pub fn net(&self) -> i64 {
        i64::from(self.final_balance) - i64::from(self.starting_balance)
    }

    /// The process exit code for this session, zero unless the session was abandoned.
    pub fn exit_code(&self) -> i32 {
        match self.ending {
            SessionEnd::Declined | SessionEnd::OutOfFunds => 0,
            SessionEnd::Abandoned(_) => 1,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const WIDTH: usize = 60;
        const TEXT_WIDTH: usize = "starting balance".len() + 20;
        const NUM_WIDTH: usize = WIDTH - TEXT_WIDTH;
        write!(
            f,
            "{:-^WIDTH$}\n\
            {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
            {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
            {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
            {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
            {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
            {:<TEXT_WIDTH$}{:>NUM_WIDTH$}\n\
            {}",
            format!(" {}'s session ", self.player_name),
            "rounds played",
            self.rounds_played,
            "rounds won",
            self.wins,
            "rounds lost",
            self.losses,
            "starting balance",
            self.starting_balance,
            "final balance",
            self.final_balance,
            "net",
            self.net(),
            "-".repeat(WIDTH)
        )
    }
}

/// Owns the shoe and the participants for a session and plays rounds until the session ends.
pub struct SessionController {
    config: SessionConfig,
    engine: RoundEngine,
    shuffler: Box<dyn Shuffler>,
    shoe: Shoe,
    dealer: Participant,
}

impl SessionController {
    /// Associated function that picks the shuffle from `config`: none at all, seeded, or from entropy.
    pub fn new(config: SessionConfig) -> SessionController {
        let shuffler: Box<dyn Shuffler> = match (config.shuffle, config.seed) {
            (false, _) => Box::new(NoShuffle),
            (true, Some(seed)) => Box::new(RandomShuffle::seeded(seed, config.shuffle_passes)),
            (true, None) => Box::new(RandomShuffle::new(config.shuffle_passes)),
        };
        SessionController::with_shuffler(config, shuffler)
    }

    /// Associated function for a session that arranges every new shoe with `shuffler`.
    pub fn with_shuffler(config: SessionConfig, shuffler: Box<dyn Shuffler>) -> SessionController {
        let engine = RoundEngine::new(&config);
        let mut controller = SessionController {
            config,
            engine,
            shuffler,
            shoe: Shoe::build(),
            dealer: Participant::dealer(),
        };
        controller.fresh_shoe();
        controller
    }

    /// Replaces the shoe with a newly built and shuffled one.
    fn fresh_shoe(&mut self) {
        self.shoe = Shoe::build();
        self.shoe.shuffle(self.shuffler.as_mut());
    }

    /// Plays the session on `console`. Returns the summary once the player declines another round,
    /// runs out of money or stops answering. Only errors that break the game itself are returned.
    pub fn run<C: Console + ?Sized>(&mut self, console: &mut C) -> Result<SessionSummary> {
        console.clear_screen();
        console.print_banner();

        let name = match &self.config.player_name {
            Some(name) => name.clone(),
            None => match console.read_line("Enter your name: ")? {
                Some(name) if !name.trim().is_empty() => name.trim().to_string(),
                Some(_) => DEFAULT_PLAYER_NAME.to_string(),
                None => {
                    warn!("input closed before the player was named");
                    let mut summary = SessionSummary::new(
                        DEFAULT_PLAYER_NAME.to_string(),
                        self.config.starting_balance,
                    );
                    summary.ending = SessionEnd::Abandoned(BlackjackError::InputClosed.to_string());
                    return Ok(summary);
                }
            },
        };
        let mut player = Participant::new(name, self.config.starting_balance);
        let mut summary = SessionSummary::new(player.name().to_string(), player.balance());
        info!(player = %player.name(), balance = player.balance(), "session started");

        summary.ending = loop {
            if !player.can_wager() {
                console.print_line(&format!("{} is out of money!", player.name()));
                break SessionEnd::OutOfFunds;
            }

            // The session starts with a fresh shoe, later rounds need a new one
            if summary.rounds_played > 0 {
                self.fresh_shoe();
            }
            match self
                .engine
                .play_round(&mut self.shoe, &mut player, &self.dealer, console)
            {
                Ok(report) => summary.record(report),
                Err(e) => break abandoned(e)?,
            }

            if !player.can_wager() {
                continue;
            }

            let again = prompt::ask(
                console,
                "Would you like to play again? Y/N ",
                self.config.max_attempts,
                prompt::parse_yes_no,
            );
            match again {
                Ok(true) => {}
                Ok(false) => {
                    console.print_line("Okay! Have a great day!");
                    break SessionEnd::Declined;
                }
                Err(e) => break abandoned(e)?,
            }
        };

        summary.final_balance = player.balance();
        info!(
            rounds = summary.rounds_played,
            wins = summary.wins,
            losses = summary.losses,
            balance = summary.final_balance,
            ending = ?summary.ending,
            "session finished"
        );
        Ok(summary)
    }
}

/// Turns an error that stops the player from answering into a session ending, any other error is
/// handed back to the caller.
fn abandoned(error: BlackjackError) -> Result<SessionEnd> {
    match error {
        BlackjackError::InputClosed | BlackjackError::TooManyAttempts { .. } => {
            warn!(error = %error, "session abandoned");
            Ok(SessionEnd::Abandoned(error.to_string()))
        }
        other => Err(other),
    }
}
