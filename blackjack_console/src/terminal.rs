use blackjack_lib::{Input, Screen, BANNER};
use std::io::{self, BufRead, Write};
use std::time::Duration;

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// The real console: prints to stdout and reads answers from stdin.
#[derive(Debug, Default)]
pub struct Terminal;

impl Terminal {
    pub fn new() -> Terminal {
        Terminal
    }
}

impl Screen for Terminal {
    fn clear_screen(&mut self) {
        print!("{CLEAR_SCREEN}");
    }

    fn print_banner(&mut self) {
        println!("{BANNER}");
        println!();
    }

    fn print_line(&mut self, text: &str) {
        println!("{text}");
    }

    fn pause(&mut self, duration: Duration) {
        if !duration.is_zero() {
            io::stdout().flush().ok();
            std::thread::sleep(duration);
        }
    }
}

impl Input for Terminal {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
