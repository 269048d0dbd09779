//! Colored terminal output for migration runs

use std::io::Write;
use termcolor::{Buffer, BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Progress and summary lines on stdout, fatal errors on stderr
#[derive(Debug)]
pub struct OutputManager {
    stdout: BufferWriter,
}

impl Default for OutputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputManager {
    /// Create a new output manager
    pub fn new() -> Self {
        Self {
            stdout: BufferWriter::stdout(ColorChoice::Auto),
        }
    }

    /// `✓ <message>` with a bold green mark
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        let mut buffer = self.stdout.buffer();
        mark(&mut buffer, "✓", Color::Green);
        let _ = writeln!(&mut buffer, " {message}");
        self.stdout.print(&buffer)
    }

    /// `⚠ <message>`, all in yellow
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        let mut buffer = self.stdout.buffer();
        mark(&mut buffer, "⚠", Color::Yellow);
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)));
        let _ = writeln!(&mut buffer, " {message}");
        let _ = buffer.reset();
        self.stdout.print(&buffer)
    }

    /// `✗ <message>` on stderr; falls back to plain `eprintln!`
    pub fn error(&self, message: &str) {
        let stderr = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = stderr.buffer();
        mark(&mut buffer, "✗", Color::Red);
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
        let _ = writeln!(&mut buffer, " {message}");
        let _ = buffer.reset();
        if stderr.print(&buffer).is_err() {
            eprintln!("✗ {message}");
        }
    }

    /// Header naming the repository pair being migrated
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        let mut buffer = self.stdout.buffer();
        let _ = writeln!(&mut buffer);
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true));
        let _ = writeln!(&mut buffer, "═══ {title} ═══");
        let _ = buffer.reset();
        self.stdout.print(&buffer)
    }

    /// Detail line under a release
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.println(&format!("    {message}"))
    }

    /// Plain line
    pub fn println(&self, message: &str) -> std::io::Result<()> {
        let mut buffer = self.stdout.buffer();
        let _ = writeln!(&mut buffer, "{message}");
        self.stdout.print(&buffer)
    }
}

fn mark(buffer: &mut Buffer, symbol: &str, color: Color) {
    let _ = buffer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = write!(buffer, "{symbol}");
    let _ = buffer.reset();
}
