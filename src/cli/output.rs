//! Terminal output for the publish CLI.
//!
//! User-facing lines go to stdout; diagnostics go through `log`.

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use std::io::{self, IsTerminal, Write};

/// Output manager for colored terminal output
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    color_choice: ColorChoice,
}

impl OutputManager {
    pub fn new(verbose: bool) -> Self {
        // CI logs and pipes get plain text
        let color_choice = if io::stdout().is_terminal() {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };

        Self {
            verbose,
            color_choice,
        }
    }

    /// Progress line, only in verbose mode
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.verbose {
            return Ok(());
        }

        let mut spec = ColorSpec::new();
        spec.set_dimmed(true);
        self.write_line(&spec, &format!("   {}", message))
    }

    /// Result line, always printed
    pub fn success(&self, message: &str) -> io::Result<()> {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Green)).set_bold(true);
        self.write_line(&spec, message)
    }

    fn write_line(&self, spec: &ColorSpec, message: &str) -> io::Result<()> {
        let mut stdout = StandardStream::stdout(self.color_choice);
        stdout.set_color(spec)?;
        write!(stdout, "{}", message)?;
        stdout.reset()?;
        writeln!(stdout)?;
        stdout.flush()
    }
}
