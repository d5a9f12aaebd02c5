use std::io::{BufRead, Write};

use glazed_core::presenter::Presenter;

/// Prints to the terminal and reads answers from stdin.
pub struct TerminalPresenter {
    assume_yes: bool,
}

impl TerminalPresenter {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Presenter for TerminalPresenter {
    fn confirm(&self, message: &str) -> bool {
        print!("{message} [y/N] ");

        if self.assume_yes {
            println!("y");
            return true;
        }
        if let Err(err) = std::io::stdout().flush() {
            tracing::debug!("Cannot flush stdout: {err}");
        }

        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(err) => {
                tracing::warn!("Cannot read answer: {err}");
                false
            }
        }
    }

    fn notify(&self, message: &str) {
        println!("{message}");
    }

    fn report_error(&self, message: &str) {
        eprintln!("Error: {message}");
    }

    fn report_success(&self, message: &str) {
        println!("{message}");
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
