//! # dtool Diagnostic Panel
//!
//! File: cli/src/common/ui/panel.rs
//!
//! A bordered box for user-facing diagnostics, used when the Docker daemon
//! cannot be reached. Borders are drawn with box characters and coloured;
//! the body is padded by display width so the right border lines up.
//!
use colored::{Color, Colorize};
use std::fmt;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone)]
pub struct Panel {
    title: String,
    lines: Vec<String>,
    border: Color,
}

impl Panel {
    pub fn new(title: impl Into<String>, border: Color) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
            border,
        }
    }

    pub fn line(mut self, text: impl Into<String>) -> Self {
        self.lines.push(text.into());
        self
    }

    fn inner_width(&self) -> usize {
        let body = self.lines.iter().map(|l| l.width()).max().unwrap_or(0);
        body.max(self.title.width() + 2)
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.inner_width();
        let title = format!(" {} ", self.title);
        let rest = (width + 2).saturating_sub(title.width() + 1);

        writeln!(
            f,
            "{}{}{}",
            "╭─".color(self.border),
            title.bold(),
            format!("{}╮", "─".repeat(rest)).color(self.border)
        )?;
        for line in &self.lines {
            let fill = width.saturating_sub(line.width());
            writeln!(
                f,
                "{} {}{} {}",
                "│".color(self.border),
                line,
                " ".repeat(fill),
                "│".color(self.border)
            )?;
        }
        writeln!(
            f,
            "{}",
            format!("╰{}╯", "─".repeat(width + 2)).color(self.border)
        )
    }
}

/// The panel shown when the daemon health check fails.
pub fn daemon_unavailable() -> Panel {
    Panel::new("Docker Error", Color::Red)
        .line("Docker daemon is not running!")
        .line("")
        .line("Please start Docker and try again.")
        .line("")
        .line("Common solutions:")
        .line("• macOS: Start Docker Desktop")
        .line("• Linux: sudo systemctl start docker")
        .line("• WSL: sudo service docker start")
}
