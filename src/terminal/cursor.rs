//! Cursor control that degrades to no-ops off a terminal.

use std::io::{self, Write};

use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor, Command, QueueableCommand};

/// Cursor controller.
///
/// Every operation writes its escape sequence only when the output is
/// interactive; otherwise nothing is written (except where noted), so the
/// output degrades to linear plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    interactive: bool,
}

impl Cursor {
    /// Create a cursor controller.
    pub const fn new(interactive: bool) -> Self {
        Self { interactive }
    }

    fn emit<W: Write + ?Sized>(self, out: &mut W, command: impl Command) -> io::Result<()> {
        if self.interactive {
            out.queue(command)?;
        }
        Ok(())
    }

    /// Hide the cursor.
    pub fn hide<W: Write + ?Sized>(self, out: &mut W) -> io::Result<()> {
        self.emit(out, cursor::Hide)
    }

    /// Show the cursor.
    pub fn show<W: Write + ?Sized>(self, out: &mut W) -> io::Result<()> {
        self.emit(out, cursor::Show)
    }

    /// Clear the current line.
    pub fn delete_line<W: Write + ?Sized>(self, out: &mut W) -> io::Result<()> {
        self.emit(out, Clear(ClearType::CurrentLine))
    }

    /// Move to the first column of the current line.
    pub fn to_line_start<W: Write + ?Sized>(self, out: &mut W) -> io::Result<()> {
        self.emit(out, cursor::MoveToColumn(0))
    }

    /// Clear the line and return to its start.
    ///
    /// Off a terminal this writes a bare `\r` instead.
    pub fn carriage_return<W: Write + ?Sized>(self, out: &mut W) -> io::Result<()> {
        if self.interactive {
            self.delete_line(out)?;
            self.to_line_start(out)
        } else {
            out.write_all(b"\r")
        }
    }

    /// Move up `n` rows.
    pub fn move_up<W: Write + ?Sized>(self, out: &mut W, n: u16) -> io::Result<()> {
        self.emit(out, cursor::MoveUp(n))
    }

    /// Move down `n` rows.
    pub fn move_down<W: Write + ?Sized>(self, out: &mut W, n: u16) -> io::Result<()> {
        self.emit(out, cursor::MoveDown(n))
    }

    /// Move right `n` columns.
    ///
    /// Off a terminal this pads with `n` spaces so columns still line up.
    pub fn move_right<W: Write + ?Sized>(self, out: &mut W, n: u16) -> io::Result<()> {
        if self.interactive {
            self.emit(out, cursor::MoveRight(n))
        } else {
            write!(out, "{:width$}", "", width = usize::from(n))
        }
    }
}
