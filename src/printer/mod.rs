//! Console status lines (emoji-prefixed, optionally coloured).

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

const RULE_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Fail,
    Warn,
    Done,
}

impl Status {
    fn emoji(self) -> &'static str {
        match self {
            Status::Ok => "✅",
            Status::Fail => "❌",
            Status::Warn => "⚠️ ",
            Status::Done => "✨",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Printer {
    pub color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self { color: std::io::stdout().is_terminal() }
    }
}

impl Printer {
    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn rule(&self) {
        println!("{}", "=".repeat(RULE_WIDTH));
    }

    /// Title between two rules.
    pub fn banner(&self, title: &str) {
        self.rule();
        if self.color {
            println!("{}", title.bold());
        } else {
            println!("{}", title);
        }
        self.rule();
    }

    pub fn line(&self, text: &str) {
        println!("{}", text);
    }

    pub fn status(&self, status: Status, text: &str) {
        println!("{}", self.format_status(status, text));
    }

    pub fn ok(&self, text: &str) {
        self.status(Status::Ok, text);
    }

    pub fn fail(&self, text: &str) {
        self.status(Status::Fail, text);
    }

    pub fn warn(&self, text: &str) {
        self.status(Status::Warn, text);
    }

    pub fn done(&self, text: &str) {
        self.status(Status::Done, text);
    }

    pub fn format_status(&self, status: Status, text: &str) -> String {
        let prefix = status.emoji();
        if !self.color {
            return format!("{} {}", prefix, text);
        }
        match status {
            Status::Ok => format!("{} {}", prefix, text.green()),
            Status::Fail => format!("{} {}", prefix, text.red()),
            Status::Warn => format!("{} {}", prefix, text.yellow()),
            Status::Done => format!("{} {}", prefix, text.cyan()),
        }
    }
}
