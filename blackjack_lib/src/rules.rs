//! The house rule deciding who wins a hand.
//!
//! The rule is only a terminal check: it produces a verdict when the hand is over and nothing while
//! the dealer is still below 17 and nobody has reached or passed 21.

use crate::hand::BLACKJACK;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The dealer draws until reaching this total.
pub const DEALER_STANDS_ON: u8 = 17;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Loss,
}

/// Why a hand ended the way it did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    DealerTwentyOne,
    PlayerBust,
    PlayerTwentyOne,
    DealerBust,
    /// Dealer stood on a total at least as high as the player's, ties included.
    DealerHolds,
    PlayerHigher,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub outcome: Outcome,
    pub reason: Reason,
}

impl Verdict {
    fn win(reason: Reason) -> Verdict {
        Verdict {
            outcome: Outcome::Win,
            reason,
        }
    }

    fn loss(reason: Reason) -> Verdict {
        Verdict {
            outcome: Outcome::Loss,
            reason,
        }
    }

    pub fn player_wins(&self) -> bool {
        self.outcome == Outcome::Win
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.outcome {
            Outcome::Win => write!(f, "You win!"),
            Outcome::Loss => write!(f, "You lose!"),
        }
    }
}

/// Applies the win rule to the player's total and the dealer's known total.
/// Returns `None` when the hand must continue.
pub fn judge(player_total: u8, dealer_total: u8) -> Option<Verdict> {
    if dealer_total == BLACKJACK {
        return Some(Verdict::loss(Reason::DealerTwentyOne));
    }
    if player_total > BLACKJACK {
        return Some(Verdict::loss(Reason::PlayerBust));
    }
    if player_total == BLACKJACK {
        return Some(Verdict::win(Reason::PlayerTwentyOne));
    }
    if dealer_total > BLACKJACK {
        return Some(Verdict::win(Reason::DealerBust));
    }
    if dealer_total >= DEALER_STANDS_ON {
        return if dealer_total >= player_total {
            Some(Verdict::loss(Reason::DealerHolds))
        } else {
            Some(Verdict::win(Reason::PlayerHigher))
        };
    }
    None
}

/// Final comparison once the dealer has stopped drawing. Falls back to comparing totals when the
/// win rule has nothing to say, so a verdict is always produced.
pub fn showdown(player_total: u8, dealer_total: u8) -> Verdict {
    judge(player_total, dealer_total).unwrap_or(if dealer_total >= player_total {
        Verdict::loss(Reason::DealerHolds)
    } else {
        Verdict::win(Reason::PlayerHigher)
    })
}
