use crate::error::{BlackjackError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// The four suits of a standard deck, in the order the shoe is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,
    Diamonds,
    Spades,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Spades, Suit::Clubs];

    pub fn name(&self) -> &'static str {
        match self {
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Spades => "spades",
            Suit::Clubs => "clubs",
        }
    }
}

impl Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Suit {
    type Err = BlackjackError;

    /// Parses a suit name, ignoring case. Rank is reported as 0 in the error since no card exists yet.
    fn from_str(s: &str) -> Result<Self> {
        Suit::ALL
            .into_iter()
            .find(|suit| suit.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BlackjackError::InvalidCard {
                rank: 0,
                suit: s.to_string(),
            })
    }
}

/// A single playing card. Ranks run from 1 (ace) to 13 (king).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    rank: u8,
    suit: Suit,
}

impl Card {
    pub const ACE: u8 = 1;
    pub const JACK: u8 = 11;
    pub const QUEEN: u8 = 12;
    pub const KING: u8 = 13;

    /// Associated function to create a new `Card`, fails with `InvalidCard` if `rank` is not in `1..=13`.
    pub fn new(rank: u8, suit: Suit) -> Result<Card> {
        if !(Card::ACE..=Card::KING).contains(&rank) {
            return Err(BlackjackError::InvalidCard {
                rank,
                suit: suit.to_string(),
            });
        }
        Ok(Card { rank, suit })
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn is_ace(&self) -> bool {
        self.rank == Card::ACE
    }

    /// The blackjack value of the card. Face cards count 10 and an ace always counts 11 here;
    /// counting an ace as 1 is the hand's decision, see `AceRule`.
    pub fn point_value(&self) -> u8 {
        match self.rank {
            Card::ACE => 11,
            r if r > 10 => 10,
            r => r,
        }
    }

    /// Human readable name, e.g. `"Ace of spades"` or `"7 of clubs"`.
    pub fn display_name(&self) -> String {
        let rank = match self.rank {
            Card::ACE => "Ace".to_string(),
            Card::JACK => "Jack".to_string(),
            Card::QUEEN => "Queen".to_string(),
            Card::KING => "King".to_string(),
            r => r.to_string(),
        };
        format!("{} of {}", rank, self.suit)
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
