//! CLI console utilities

use chatsurvey_core::conversation::{ConversationMessage, MessageKind, Sender};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// CLI console for formatted output
pub struct CliConsole {
    verbose: bool,
}

impl CliConsole {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Print an info message (verbose only)
    pub fn info(&self, message: &str) {
        if self.verbose {
            println!("{} {}", "ℹ".blue().bold(), message);
        }
    }

    /// Print a note regardless of verbosity
    pub fn note(&self, message: &str) {
        println!("{} {}", "ℹ".blue().bold(), message);
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", "✓".green().bold(), message.green());
    }

    pub fn warn(&self, message: &str) {
        println!("{} {}", "⚠".yellow().bold(), message.yellow());
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    }

    pub fn print_header(&self, title: &str) {
        println!();
        println!("{}", title.bold().underline());
        println!("{}", "=".repeat(title.chars().count()).dimmed());
    }

    pub fn print_separator(&self) {
        println!("{}", "-".repeat(50).dimmed());
    }

    /// Key/value line used by the show commands
    pub fn field(&self, label: &str, value: &str) {
        println!("  {} {}", format!("{}:", label).dimmed(), value);
    }

    /// Spinner shown while a request is in flight
    pub fn spinner(&self, message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.blue} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Render one transcript entry
    pub fn print_message(&self, message: &ConversationMessage) {
        match (&message.kind, message.sender) {
            (MessageKind::Question(q), _) => {
                self.print_bot(&message.text);
                if q.question.kind.needs_options() {
                    for option in &q.question.options {
                        println!("      {} {}", "•".dimmed(), option.dimmed());
                    }
                }
                if let Some(answer) = q.answer.as_ref().filter(|a| !a.is_empty()) {
                    self.print_user(&answer.to_string());
                }
            }
            (MessageKind::Error, _) => {
                println!("{} {}", "bot".red().bold(), message.text.red());
            }
            (MessageKind::SubmitPrompt, _) => {
                println!("{} {}", "bot".cyan().bold(), message.text.italic());
            }
            (MessageKind::Chat, Sender::Bot) => self.print_bot(&message.text),
            (MessageKind::Chat, Sender::User) => self.print_user(&message.text),
        }
    }

    pub fn print_bot(&self, text: &str) {
        println!("{} {}", "bot".cyan().bold(), text);
    }

    pub fn print_user(&self, text: &str) {
        println!("{} {}", "you".green().bold(), text);
    }
}
