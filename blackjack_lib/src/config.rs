use crate::hand::AceRule;
use serde::Serialize;
use std::time::Duration;

/// Struct for configuring a blackjack session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SessionConfig {
    pub player_name: Option<String>,
    pub starting_balance: u32,
    pub shuffle: bool,
    pub shuffle_passes: u32,
    pub seed: Option<u64>,
    pub ace_rule: AceRule,
    pub deal_delay: Duration,
    pub max_attempts: u32,
}

impl SessionConfig {
    /// Associated method for returning a new `SessionConfigBuilder` object, every setting not chosen on the
    /// builder falls back to the house defaults.
    pub fn new() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }
}

impl Default for SessionConfig {
    /// Returns the standard configuration: 1000 to start, five shuffle passes, aces always 11.
    fn default() -> Self {
        SessionConfig::new().build()
    }
}

/// Struct to implement builder pattern for `SessionConfig`
#[derive(Clone, Debug, Default)]
pub struct SessionConfigBuilder {
    player_name: Option<String>,
    starting_balance: Option<u32>,
    shuffle: Option<bool>,
    shuffle_passes: Option<u32>,
    seed: Option<u64>,
    ace_rule: Option<AceRule>,
    deal_delay: Option<Duration>,
    max_attempts: Option<u32>,
}

impl SessionConfigBuilder {
    /// Method for naming the player, when left unset the player is asked for a name.
    pub fn player_name<S: Into<String>>(&mut self, name: S) -> &mut Self {
        self.player_name = Some(name.into());
        self
    }

    /// Method for changing the starting balance of the player.
    pub fn starting_balance(&mut self, balance: u32) -> &mut Self {
        self.starting_balance = Some(balance);
        self
    }

    /// Method for turning shuffling on or off. With shuffling off every round is dealt from a shoe in build order.
    pub fn shuffle(&mut self, shuffle: bool) -> &mut Self {
        self.shuffle = Some(shuffle);
        self
    }

    /// Method for setting the number of shuffle passes applied to each new shoe.
    pub fn shuffle_passes(&mut self, passes: u32) -> &mut Self {
        self.shuffle_passes = Some(passes);
        self
    }

    /// Method for seeding the shuffle so a session can be replayed.
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }

    pub fn ace_rule(&mut self, rule: AceRule) -> &mut Self {
        self.ace_rule = Some(rule);
        self
    }

    /// Method for setting the pause between dealt cards.
    pub fn deal_delay(&mut self, delay: Duration) -> &mut Self {
        self.deal_delay = Some(delay);
        self
    }

    /// Method for setting how many bad answers to a single question are tolerated.
    pub fn max_attempts(&mut self, attempts: u32) -> &mut Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Method for building a `SessionConfig` object from the given `SessionConfigBuilder` object.
    pub fn build(&mut self) -> SessionConfig {
        SessionConfig {
            player_name: self.player_name.clone(),
            starting_balance: self.starting_balance.unwrap_or(1000),
            shuffle: self.shuffle.unwrap_or(true),
            shuffle_passes: self.shuffle_passes.unwrap_or(5).max(1),
            seed: self.seed,
            ace_rule: self.ace_rule.unwrap_or_default(),
            deal_delay: self.deal_delay.unwrap_or(Duration::ZERO),
            max_attempts: self.max_attempts.unwrap_or(25).max(1),
        }
    }
}
