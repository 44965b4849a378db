//! Interactive terminal selection.
//!
//! Reads commands line by line, applies them to a [`SelectionSurface`] and
//! re-renders the [`Summary`] after every change. Generic over reader, writer
//! and clipboard so it can be driven from tests.

use std::io::{BufRead, Write};

use crate::clipboard::{ClipboardSink, export_selection};
use crate::error::{Error, Result};
use crate::selection::{Action, SelectionSurface};
use crate::summary::Summary;

const CLIPBOARD_EXIT_NOTE: &str = "note: the copied numbers stay on the clipboard only while galpick \
runs unless a clipboard manager is active; paste them before quitting.";

const HELP: &str = "Commands: <numbers> toggle (e.g. `3 7, 12`), a = select all, \
c = clear, l = list, y = copy numbers, h = help, q = quit";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Toggle(Vec<u32>),
    SelectAll,
    Clear,
    List,
    Copy,
    Help,
    Quit,
}

fn parse_command(line: &str) -> std::result::Result<Option<Command>, String> {
    let line = line.trim();
    let cmd = match line.to_ascii_lowercase().as_str() {
        "" => return Ok(None),
        "a" | "all" => Command::SelectAll,
        "c" | "clear" => Command::Clear,
        "l" | "ls" | "list" => Command::List,
        "y" | "copy" => Command::Copy,
        "h" | "?" | "help" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        _ => {
            let numbers = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty())
                .map(|t| t.parse::<u32>().map_err(|_| format!("not a number: {}", t)))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Command::Toggle(numbers)
        }
    };
    Ok(Some(cmd))
}

pub struct Session<'a, C: ClipboardSink> {
    surface: SelectionSurface,
    summary: Summary,
    clipboard: &'a mut C,
    copied: bool,
}

impl<'a, C: ClipboardSink> Session<'a, C> {
    pub fn new(surface: SelectionSurface, clipboard: &'a mut C) -> Self {
        let summary = Summary::project(&surface);
        Self {
            surface,
            summary,
            clipboard,
            copied: false,
        }
    }

    /// Drive the session until `q` or end of input and return the final
    /// number string.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<String> {
        let io_err = |e: std::io::Error| Error::io("<terminal>", e);

        self.write_list(out).map_err(io_err)?;
        writeln!(out, "{}", HELP).map_err(io_err)?;

        for line in input.lines() {
            let line = line.map_err(io_err)?;
            let cmd = match parse_command(&line) {
                Ok(Some(cmd)) => cmd,
                Ok(None) => continue,
                Err(msg) => {
                    writeln!(out, "error: {}", msg).map_err(io_err)?;
                    continue;
                }
            };
            if cmd == Command::Quit {
                break;
            }
            self.handle(cmd, out).map_err(io_err)?;
        }

        if self.copied && self.clipboard.releases_on_exit() {
            writeln!(out, "{}", CLIPBOARD_EXIT_NOTE).map_err(io_err)?;
        }

        Ok(self.summary.numbers.clone())
    }

    fn handle<W: Write>(&mut self, cmd: Command, out: &mut W) -> std::io::Result<()> {
        match cmd {
            Command::Toggle(numbers) => {
                for number in numbers {
                    if let Err(e) = self.dispatch(Action::Toggle(number)) {
                        writeln!(out, "error: {}", e)?;
                    }
                }
                self.write_summary(out)
            }
            Command::SelectAll => {
                self.dispatch(Action::SelectAll).ok();
                self.write_summary(out)
            }
            Command::Clear => {
                self.dispatch(Action::Clear).ok();
                self.write_summary(out)
            }
            Command::List => self.write_list(out),
            Command::Copy => {
                let outcome = export_selection(&self.summary, &mut *self.clipboard);
                self.copied |= outcome.is_success();
                writeln!(out, "{}", outcome.message())
            }
            Command::Help => writeln!(out, "{}", HELP),
            Command::Quit => Ok(()),
        }
    }

    fn dispatch(&mut self, action: Action) -> Result<()> {
        self.summary = self.surface.apply(action)?;
        Ok(())
    }

    fn write_summary<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        write!(out, "{}", self.summary)?;
        if self.summary.export_visible() {
            writeln!(out, "(y to copy)")?;
        }
        Ok(())
    }

    fn write_list<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for entry in self.surface.entries() {
            let mark = if self.surface.is_selected(entry.number) {
                'x'
            } else {
                ' '
            };
            writeln!(out, "[{}] #{}: {}", mark, entry.number, entry.filename)?;
        }
        Ok(())
    }
}
