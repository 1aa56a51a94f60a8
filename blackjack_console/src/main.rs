mod cli;
mod terminal;

use anyhow::Context;
use blackjack_lib::SessionController;
use clap::Parser;
use cli::{Args, ConfigFile};
use terminal::Terminal;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging();

    let file = match &args.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };
    let config = args.session_config(&file);
    info!(?config, "starting session");

    let summary = SessionController::new(config)
        .run(&mut Terminal::new())
        .context("blackjack session failed")?;

    if args.summary_json {
        println!("{}", summary.to_json()?);
    } else {
        println!("{summary}");
    }
    std::process::exit(summary.exit_code());
}

/// Logs go to stderr so they never mix with the game on stdout.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("blackjack_lib=warn,blackjack_console=warn"));

    if std::env::var("BLACKJACK_LOG_JSON").is_ok() {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .init();
    }
}
