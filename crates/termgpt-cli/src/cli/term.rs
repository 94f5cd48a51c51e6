//! Line-oriented terminal helpers shared by the picker and live renderer.

use std::io::Write;

use crossterm::cursor::MoveToPreviousLine;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};

/// Erase exactly `lines` lines above the cursor, leaving it at the start
/// of the first erased line.
///
/// Callers pass back the count they rendered; nothing is guessed from
/// terminal state.
pub fn erase_lines<W: Write>(out: &mut W, lines: usize) -> std::io::Result<()> {
    for _ in 0..lines {
        queue!(out, MoveToPreviousLine(1), Clear(ClearType::CurrentLine))?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_erase_lines_emits_one_erase_per_line() {
        let mut buf: Vec<u8> = Vec::new();
        erase_lines(&mut buf, 3).unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert_eq!(output.matches("\u{1b}[1F").count(), 3);
        assert_eq!(output.matches("\u{1b}[2K").count(), 3);
    }

    #[test]
    fn test_erase_zero_lines_writes_nothing() {
        let mut buf: Vec<u8> = Vec::new();
        erase_lines(&mut buf, 0).unwrap();
        assert!(buf.is_empty());
    }
}
