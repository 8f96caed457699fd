//! Console views: screen rendering and line input.
//!
//! Views hold no business logic. Reads return `None` once input is closed.

use mailroom_core::MenuCommand;
use std::io::{self, BufRead, Write};

const CLEAR_SCREEN: &str = "\x1bc";
const APP_TITLE: &str = "Donation Manager";

/// Line-oriented console over any reader/writer pair.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Clears the screen and prints the view title followed by a blank gap.
    pub fn open_view(&mut self, view_name: &str) -> io::Result<()> {
        self.clear_screen()?;
        self.print_title(view_name)?;
        self.newline()
    }

    pub fn clear_screen(&mut self) -> io::Result<()> {
        write!(self.output, "{CLEAR_SCREEN}")
    }

    pub fn print_title(&mut self, view_name: &str) -> io::Result<()> {
        writeln!(self.output, "{APP_TITLE} - {view_name}")
    }

    pub fn newline(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n")
    }

    pub fn print_content(&mut self, content: &str) -> io::Result<()> {
        writeln!(self.output, "{content}")
    }

    /// Report view: one line per entry.
    pub fn print_lines(&mut self, lines: &[String]) -> io::Result<()> {
        for line in lines {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    /// Menu view: `<key> - <label>` per command.
    pub fn print_menu(&mut self, commands: &[MenuCommand]) -> io::Result<()> {
        for command in commands {
            writeln!(self.output, "{} - {}", command.key(), command.label())?;
        }
        Ok(())
    }

    /// Prompts with `<prompt> >>> ` and reads one line.
    pub fn collect_user_input(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt} >>> ")?;
        self.read_line()
    }

    /// Waits for ENTER. Returns `false` when input is closed.
    pub fn pause_screen(&mut self) -> io::Result<bool> {
        write!(self.output, "Press ENTER to continue")?;
        Ok(self.read_line()?.is_some())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}
