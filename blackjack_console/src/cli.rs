use anyhow::Context;
use blackjack_lib::{AceRule, SessionConfig, SessionConfigBuilder};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Pause between dealt cards when nothing else is configured.
pub const DEFAULT_DEAL_DELAY_MS: u64 = 400;

/// Play single player blackjack against the house.
#[derive(Debug, Parser)]
#[command(name = "blackjack", version, about)]
pub struct Args {
    /// Name of the player, asked for at the start when left out
    #[arg(long)]
    pub name: Option<String>,

    /// Starting balance of the player
    #[arg(long)]
    pub balance: Option<u32>,

    /// Seed for the shuffle, the same seed deals the same cards
    #[arg(long)]
    pub seed: Option<u64>,

    /// Deal every round from an unshuffled shoe
    #[arg(long)]
    pub no_shuffle: bool,

    /// Number of shuffle passes applied to each new shoe
    #[arg(long)]
    pub shuffle_passes: Option<u32>,

    /// Count an ace as 1 whenever 11 would bust the hand
    #[arg(long)]
    pub soft_aces: bool,

    /// Milliseconds to wait between dealt cards
    #[arg(long)]
    pub deal_delay_ms: Option<u64>,

    /// Bad answers tolerated for a single question before the session is abandoned
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// JSON file with session settings, flags given on the command line take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the session summary as JSON
    #[arg(long)]
    pub summary_json: bool,
}

/// A struct for deserializing session settings from json.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub player_name: Option<String>,
    pub starting_balance: Option<u32>,
    pub shuffle: Option<bool>,
    pub shuffle_passes: Option<u32>,
    pub seed: Option<u64>,
    pub ace_rule: Option<AceRule>,
    pub deal_delay_ms: Option<u64>,
    pub max_attempts: Option<u32>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> anyhow::Result<ConfigFile> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config file {}", path.display()))?;
        ConfigFile::parse(&text)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<ConfigFile> {
        Ok(serde_json::from_str(text)?)
    }

    fn apply(&self, builder: &mut SessionConfigBuilder) {
        if let Some(name) = &self.player_name {
            builder.player_name(name.clone());
        }
        if let Some(balance) = self.starting_balance {
            builder.starting_balance(balance);
        }
        if let Some(shuffle) = self.shuffle {
            builder.shuffle(shuffle);
        }
        if let Some(passes) = self.shuffle_passes {
            builder.shuffle_passes(passes);
        }
        if let Some(seed) = self.seed {
            builder.seed(seed);
        }
        if let Some(rule) = self.ace_rule {
            builder.ace_rule(rule);
        }
        if let Some(ms) = self.deal_delay_ms {
            builder.deal_delay(Duration::from_millis(ms));
        }
        if let Some(attempts) = self.max_attempts {
            builder.max_attempts(attempts);
        }
    }
}

impl Args {
    /// Builds the session configuration. Flags override `file`, which overrides the defaults.
    pub fn session_config(&self, file: &ConfigFile) -> SessionConfig {
        let mut builder = SessionConfig::new();
        builder.deal_delay(Duration::from_millis(DEFAULT_DEAL_DELAY_MS));
        file.apply(&mut builder);

        if let Some(name) = &self.name {
            builder.player_name(name.clone());
        }
        if let Some(balance) = self.balance {
            builder.starting_balance(balance);
        }
        if let Some(seed) = self.seed {
            builder.seed(seed);
        }
        if self.no_shuffle {
            builder.shuffle(false);
        }
        if let Some(passes) = self.shuffle_passes {
            builder.shuffle_passes(passes);
        }
        if self.soft_aces {
            builder.ace_rule(AceRule::Soft);
        }
        if let Some(ms) = self.deal_delay_ms {
            builder.deal_delay(Duration::from_millis(ms));
        }
        if let Some(attempts) = self.max_attempts {
            builder.max_attempts(attempts);
        }
        builder.build()
    }
}
