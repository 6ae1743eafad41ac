use async_trait::async_trait;
use colored::*;
use shipaddr::host::{HostPage, Prompter};
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Every CLI invocation is a fresh page load, so page signals only get logged.
pub struct TerminalPage;

impl HostPage for TerminalPage {
    fn open_edit_surface(&self) {
        debug!("edit surface opened");
    }

    fn close_modal(&self) {
        debug!("modal closed");
    }

    fn reload(&self) {
        debug!("reload requested");
    }
}

pub struct TerminalPrompter {
    assume_yes: bool,
}

impl TerminalPrompter {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

#[async_trait(?Send)]
impl Prompter for TerminalPrompter {
    async fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        eprint!("{} [y/N] ", message);
        let _ = io::stderr().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }

    async fn alert(&self, message: &str) {
        eprintln!("{}", message.yellow());
    }
}
