//! Status printer (owo-colors), plain when stdout is not a terminal.

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

pub struct TextPrinter {
    pub color: bool,
}

impl Default for TextPrinter {
    fn default() -> Self {
        Self { color: std::io::stdout().is_terminal() }
    }
}

impl TextPrinter {
    pub fn heading(&self, text: &str) {
        if self.color {
            println!("{}", text.cyan().bold());
        } else {
            println!("{}", text);
        }
    }

    pub fn ok(&self, label: &str, text: &str) {
        if self.color {
            println!("{} {}", label.green(), text);
        } else {
            println!("{} {}", label, text);
        }
    }

    pub fn warn(&self, label: &str, text: &str) {
        if self.color {
            println!("{} {}", label.yellow(), text);
        } else {
            println!("{} {}", label, text);
        }
    }

    pub fn line(&self, text: &str) {
        println!("{}", text);
    }
}
