use anyhow::Result;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::{self, IsTerminal, Write};

/// Color scheme for terminal output.
struct Colors;

impl Colors {
    const HEADER: Color = Color::Magenta;
    const OK: Color = Color::Green;
    const WARNING: Color = Color::Yellow;
    const ERROR: Color = Color::Red;
    const DIM: Color = Color::DarkGrey;
}

/// Report printer. Colors are used only when stdout is a terminal.
pub struct Terminal {
    color: bool,
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            color: io::stdout().is_terminal(),
        }
    }

    fn styled(&self, color: Color, text: &str) -> Result<()> {
        let mut stdout = io::stdout();
        if self.color {
            execute!(stdout, SetForegroundColor(color), Print(text), ResetColor)?;
        } else {
            stdout.write_all(text.as_bytes())?;
        }
        stdout.flush()?;
        Ok(())
    }

    /// Schedule name, followed by where it came from.
    pub fn print_header(&self, name: &str, source: &str) -> Result<()> {
        self.styled(Colors::HEADER, name)?;
        self.styled(Colors::DIM, &format!("  ({source})\n"))
    }

    pub fn print_line(&self, text: &str) -> Result<()> {
        let mut stdout = io::stdout();
        stdout.write_all(detail("", text).as_bytes())?;
        Ok(())
    }

    pub fn print_ok(&self, msg: &str) -> Result<()> {
        self.styled(Colors::OK, &detail("", msg))
    }

    pub fn print_warning(&self, msg: &str) -> Result<()> {
        self.styled(Colors::WARNING, &detail("warning: ", msg))
    }

    /// Print an error message.
    pub fn print_error(&self, msg: &str) -> Result<()> {
        self.styled(Colors::ERROR, &detail("error: ", msg))
    }

    /// Dimmed detail under a header.
    pub fn print_note(&self, msg: &str) -> Result<()> {
        self.styled(Colors::DIM, &detail("", msg))
    }

    /// Print an info message.
    pub fn print_info(&self, msg: &str) -> Result<()> {
        self.styled(Colors::DIM, &format!("{msg}\n"))
    }

    /// Pretty-printed JSON, uncolored so it stays machine-readable.
    pub fn print_json(&self, value: &serde_json::Value) -> Result<()> {
        let mut stdout = io::stdout();
        serde_json::to_writer_pretty(&mut stdout, value)?;
        writeln!(stdout)?;
        Ok(())
    }
}

/// A line nested under a schedule header.
fn detail(label: &str, msg: &str) -> String {
    format!("  {label}{msg}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_share_one_indent() {
        assert_eq!(detail("", "no occurrences"), "  no occurrences\n");
        assert_eq!(detail("error: ", "bad freq"), "  error: bad freq\n");
    }

    #[test]
    fn default_matches_new() {
        assert_eq!(Terminal::default().color, Terminal::new().color);
    }
}
