//! The display and input collaborators the game talks to. The game keeps no state in them, every
//! card, total and outcome is reported as a line of text.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

pub const BANNER: &str = r#"__          __  _                            _______      ____  _            _        _            _
\ \        / / | |                          |__   __|    |  _ \| |          | |      | |          | |
 \ \  /\  / /__| | ___ ___  _ __ ___   ___     | | ___   | |_) | | __ _  ___| | __   | | __ _  ___| | __
  \ \/  \/ / _ \ |/ __/ _ \| '_ ` _ \ / _ \    | |/ _ \  |  _ <| |/ _` |/ __| |/ /   | |/ _` |/ __| |/ /
   \  /\  /  __/ | (_| (_) | | | | | |  __/    | | (_) | | |_) | | (_| | (__|   < |__| | (_| | (__|   <
    \/  \/ \___|_|\___\___/|_| |_| |_|\___|    |_|\___/  |____/|_|\__,_|\___|_|\_\____/ \__,_|\___|_|\_\"#;

/// Output side of the console.
pub trait Screen {
    fn clear_screen(&mut self);
    fn print_banner(&mut self);
    fn print_line(&mut self, text: &str);
    /// Paces the reveal of dealt cards. Does nothing unless the implementer cares about timing.
    fn pause(&mut self, _duration: Duration) {}
}

/// Input side of the console.
pub trait Input {
    /// Shows `prompt` and blocks until a line is typed. Returns `Ok(None)` once input is closed.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Anything that is both a `Screen` and an `Input`.
pub trait Console: Screen + Input {}

impl<T: Screen + Input + ?Sized> Console for T {}

/// A console that answers from a fixed script and records everything printed to it.
/// Useful for replaying a game without a terminal.
#[doc(hidden)]
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    pub lines: Vec<String>,
    pub prompts: Vec<String>,
    pub clears: usize,
    pub banners: usize,
    pub paused: Duration,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> ScriptedConsole
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedConsole {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Number of scripted answers not yet read.
    pub fn remaining_answers(&self) -> usize {
        self.answers.len()
    }

    /// True if any printed line contains `needle`.
    pub fn printed(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }

    /// Number of printed lines containing `needle`.
    pub fn count_printed(&self, needle: &str) -> usize {
        self.lines.iter().filter(|line| line.contains(needle)).count()
    }
}

impl Screen for ScriptedConsole {
    fn clear_screen(&mut self) {
        self.clears += 1;
    }

    fn print_banner(&mut self) {
        self.banners += 1;
    }

    fn print_line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn pause(&mut self, duration: Duration) {
        self.paused += duration;
    }
}

impl Input for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }
}
