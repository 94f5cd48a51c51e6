//! Arrow-key option picker.
//!
//! Renders one line per option with a `[x]` marker on the cursor row, blocks
//! for one key, and erases everything it drew after every keypress so the
//! panel leaves no residue in the scrollback. The cursor clamps at both ends
//! of the list. Enter confirms the cursor row; Esc or Ctrl+C cancels.

use std::io::{self, Write};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use super::term::erase_lines;

/// Keys the picker reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    Cancel,
    Other,
}

/// Source of keypresses for the picker.
///
/// Production uses [`TerminalKeySource`]; tests script the sequence.
pub trait KeySource {
    fn read_key(&mut self) -> io::Result<Key>;
}

/// Blocking crossterm-backed key source. Expects raw mode to be active.
pub struct TerminalKeySource;

impl KeySource for TerminalKeySource {
    fn read_key(&mut self) -> io::Result<Key> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let mapped = match key.code {
                    KeyCode::Up => Key::Up,
                    KeyCode::Down => Key::Down,
                    KeyCode::Enter => Key::Enter,
                    KeyCode::Esc => Key::Cancel,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        Key::Cancel
                    }
                    _ => Key::Other,
                };
                return Ok(mapped);
            }
        }
    }
}

/// Errors from the picker.
#[derive(Debug, thiserror::Error)]
pub enum PickerError {
    #[error("no options to pick from")]
    NoOptions,

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Render one line per option, marking the cursor row. Returns the number
/// of lines drawn so the caller can erase exactly that many.
fn render_options<W: Write>(out: &mut W, options: &[String], cursor: usize) -> io::Result<usize> {
    for (i, label) in options.iter().enumerate() {
        let marker = if i == cursor { "[x]" } else { "[ ]" };
        queue!(out, Print(format!("{marker} {label}\r\n")))?;
    }
    out.flush()?;
    Ok(options.len())
}

/// Run the option panel over explicit output and key source.
///
/// Returns `Ok(Some(index))` when a row is confirmed with Enter and
/// `Ok(None)` when the user cancels. An empty `options` slice fails with
/// [`PickerError::NoOptions`] before anything is written. Every keypress
/// erases the full panel before the next render or before returning.
pub fn pick_option<W: Write, K: KeySource>(
    out: &mut W,
    keys: &mut K,
    options: &[String],
) -> Result<Option<usize>, PickerError> {
    if options.is_empty() {
        return Err(PickerError::NoOptions);
    }

    let mut cursor: usize = 0;

    loop {
        let drawn = render_options(out, options, cursor)?;
        let key = keys.read_key()?;
        erase_lines(out, drawn)?;

        match key {
            Key::Down => cursor = (cursor + 1).min(options.len() - 1),
            Key::Up => cursor = cursor.saturating_sub(1),
            Key::Enter => return Ok(Some(cursor)),
            Key::Cancel => return Ok(None),
            Key::Other => {}
        }
    }
}

/// Restores cooked mode when dropped, so early returns and errors cannot
/// leave the terminal raw.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Run the picker on stdout with the real keyboard.
pub fn pick_option_interactive(options: &[String]) -> Result<Option<usize>, PickerError> {
    let _guard = RawModeGuard::enable()?;
    let mut stdout = io::stdout();
    pick_option(&mut stdout, &mut TerminalKeySource, options)
}
