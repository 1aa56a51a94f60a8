use crate::error::{BlackjackError, Result};
use crate::rules::Outcome;
use serde::Serialize;
use std::fmt::Display;
use tracing::debug;

pub const DEALER_NAME: &str = "Dealer";

/// Checks a wager typed by the player against `balance`. The amount must be a positive whole number
/// no larger than the balance; nothing is ever clamped.
pub fn validate_wager(input: &str, balance: u32) -> Result<u32> {
    let requested = input
        .trim()
        .parse::<i64>()
        .map_err(|_| BlackjackError::InvalidWager(input.trim().to_string()))?;
    if requested <= 0 {
        return Err(BlackjackError::InvalidWager(input.trim().to_string()));
    }

    match u32::try_from(requested) {
        Ok(amount) if amount <= balance => Ok(amount),
        Ok(amount) => Err(BlackjackError::InsufficientFunds {
            requested: amount,
            balance,
        }),
        Err(_) => Err(BlackjackError::InsufficientFunds {
            requested: u32::MAX,
            balance,
        }),
    }
}

/// A named seat at the table. Only the player's balance matters, the dealer is a name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Participant {
    name: String,
    balance: u32,
}

impl Participant {
    /// Associated function to create a new `Participant` with a starting balance.
    pub fn new<S: Into<String>>(name: S, balance: u32) -> Participant {
        Participant {
            name: name.into(),
            balance,
        }
    }

    pub fn dealer() -> Participant {
        Participant::new(DEALER_NAME, 0)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Getter method for the current balance.
    pub fn balance(&self) -> u32 {
        self.balance
    }

    pub fn can_wager(&self) -> bool {
        self.balance > 0
    }

    /// Validates `input` as a wager and takes it out of the balance. Returns the amount wagered.
    pub fn place_wager(&mut self, input: &str) -> Result<u32> {
        let wager = validate_wager(input, self.balance)?;
        self.balance -= wager;
        debug!(player = %self.name, wager, balance = self.balance, "wager placed");
        Ok(wager)
    }

    /// Pays out a finished hand, a win returns the wager twice over and a loss returns nothing.
    /// Returns the amount credited.
    pub fn settle(&mut self, outcome: Outcome, wager: u32) -> u32 {
        let credit = match outcome {
            Outcome::Win => wager.saturating_mul(2),
            Outcome::Loss => 0,
        };
        self.deposit(credit);
        credit
    }

    /// Method for depositing money into the participant's balance.
    pub fn deposit(&mut self, amount: u32) {
        self.balance = self.balance.saturating_add(amount);
    }
}

impl Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (balance {})", self.name, self.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wager_larger_than_balance_is_rejected() {
        assert!(matches!(
            validate_wager("150", 100),
            Err(BlackjackError::InsufficientFunds {
                requested: 150,
                balance: 100
            })
        ));
        assert!(matches!(
            validate_wager("99999999999", 100),
            Err(BlackjackError::InsufficientFunds { .. })
        ));
    }

    #[test]
    fn non_positive_or_non_numeric_wagers_are_invalid() {
        for input in ["-5", "0", "abc", "", "12.5", "1e3"] {
            assert!(
                matches!(validate_wager(input, 100), Err(BlackjackError::InvalidWager(_))),
                "{input:?} should be invalid"
            );
        }
    }

    #[test]
    fn valid_wager_reduces_balance() {
        let mut player = Participant::new("Ada", 100);
        assert_eq!(player.place_wager(" 50\n").unwrap(), 50);
        assert_eq!(player.balance(), 50);
        assert_eq!(player.place_wager("50").unwrap(), 50);
        assert_eq!(player.balance(), 0);
        assert!(!player.can_wager());
    }

    #[test]
    fn failed_wager_leaves_balance_alone() {
        let mut player = Participant::new("Ada", 100);
        assert!(player.place_wager("150").is_err());
        assert!(player.place_wager("abc").is_err());
        assert_eq!(player.balance(), 100);
    }

    #[test]
    fn settlement_pays_double_on_a_win() {
        let mut player = Participant::new("Ada", 1000);
        let wager = player.place_wager("100").unwrap();
        assert_eq!(player.settle(Outcome::Win, wager), 200);
        // 1000 - 100 + 200
        assert_eq!(player.balance(), 1100);

        let mut player = Participant::new("Ada", 1000);
        let wager = player.place_wager("100").unwrap();
        assert_eq!(player.settle(Outcome::Loss, wager), 0);
        assert_eq!(player.balance(), 900);
    }

    #[test]
    fn dealer_is_a_named_role() {
        let dealer = Participant::dealer();
        assert_eq!(dealer.name(), "Dealer");
        assert_eq!(dealer.balance(), 0);
    }
}
