//! Terminal collaborator used by commands for output and raw input.
//!
//! [`ConsoleTerminal`] drives the real terminal through crossterm, and
//! [`BufferedTerminal`] replays scripted input into an in-memory transcript
//! for tests and embedders.

use crate::tui::settings;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, IsTerminal, Read, Write};
use std::rc::Rc;

/// Character-level terminal surface consumed by the shell.
pub trait Terminal {
    /// Block until one raw character is available.
    fn read_raw_char(&mut self) -> io::Result<char>;
    /// Visually erase the character left of the cursor.
    fn backspace(&mut self) -> io::Result<()>;
    /// Install the (already styled) prompt shown before each input line.
    fn set_prompt(&mut self, prompt: String);
    /// Prompt currently installed.
    fn prompt(&self) -> String;
    /// Write text without a trailing newline.
    fn print(&mut self, text: &str);

    /// Write text followed by a newline.
    fn println(&mut self, text: &str) {
        self.print(text);
        self.print(settings::NEWLINE_FALLBACK);
    }
}

// ---------------------------------------------------------------------------
// ConsoleTerminal
// ---------------------------------------------------------------------------

/// Stdout/stdin terminal backed by crossterm key events when attached to a TTY.
pub struct ConsoleTerminal {
    prompt: String,
    interactive: bool,
}

impl ConsoleTerminal {
    pub fn new() -> Self {
        Self {
            prompt: String::new(),
            interactive: io::stdin().is_terminal() && io::stdout().is_terminal(),
        }
    }

    fn read_key_char(&mut self) -> io::Result<char> {
        let _guard = RawModeGuard::acquire()?;
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
                continue;
            }
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match key.code {
                    KeyCode::Char('c') => {
                        return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"));
                    }
                    KeyCode::Char('d') => {
                        return Err(io::Error::new(
                            io::ErrorKind::UnexpectedEof,
                            "end of input",
                        ));
                    }
                    // Other control chords carry no character.
                    _ => continue,
                }
            }
            let ch = match key.code {
                KeyCode::Char(ch) => ch,
                KeyCode::Enter => '\r',
                KeyCode::Backspace => '\u{8}',
                KeyCode::Tab => '\t',
                KeyCode::Esc => '\u{1b}',
                _ => continue,
            };
            return Ok(ch);
        }
    }

    fn read_stdin_char(&mut self) -> io::Result<char> {
        let mut stdin = io::stdin().lock();
        let mut bytes = [0u8; 4];
        stdin.read_exact(&mut bytes[..1])?;
        let width = utf8_width(bytes[0]);
        if width > 1 {
            stdin.read_exact(&mut bytes[1..width])?;
        }
        std::str::from_utf8(&bytes[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "invalid UTF-8 input"))
    }
}

impl Default for ConsoleTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for ConsoleTerminal {
    fn read_raw_char(&mut self) -> io::Result<char> {
        if self.interactive {
            self.read_key_char()
        } else {
            self.read_stdin_char()
        }
    }

    fn backspace(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.write_all(settings::ERASE_SEQUENCE.as_bytes())?;
        stdout.flush()
    }

    fn set_prompt(&mut self, prompt: String) {
        self.prompt = prompt;
    }

    fn prompt(&self) -> String {
        self.prompt.clone()
    }

    fn print(&mut self, text: &str) {
        let mut stdout = io::stdout();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }
}

/// Expected byte length of a UTF-8 sequence from its first byte.
fn utf8_width(first: u8) -> usize {
    match first {
        0x00..=0x7f => 1,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => 1,
    }
}

/// Keeps raw mode enabled for the duration of one key read.
struct RawModeGuard;

impl RawModeGuard {
    /// Enable terminal raw mode and return a guard that disables it on drop.
    fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

// ---------------------------------------------------------------------------
// BufferedTerminal
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct BufferedState {
    input: VecDeque<char>,
    output: String,
    prompt: String,
    reads: usize,
}

/// In-memory terminal with scripted input and a captured transcript.
///
/// Clones share the same buffers, so a caller can keep one handle while the
/// shell owns another. Reading past the scripted input fails with
/// `UnexpectedEof`.
#[derive(Debug, Clone, Default)]
pub struct BufferedTerminal {
    state: Rc<RefCell<BufferedState>>,
}

impl BufferedTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Terminal pre-loaded with `input` as raw characters.
    pub fn with_input(input: &str) -> Self {
        let terminal = Self::new();
        terminal.push_input(input);
        terminal
    }

    /// Append raw characters to the pending input.
    pub fn push_input(&self, input: &str) {
        self.state.borrow_mut().input.extend(input.chars());
    }

    /// Everything printed so far.
    pub fn output(&self) -> String {
        self.state.borrow().output.clone()
    }

    /// Return and clear everything printed so far.
    pub fn take_output(&self) -> String {
        std::mem::take(&mut self.state.borrow_mut().output)
    }

    /// Number of characters consumed from the scripted input.
    pub fn reads(&self) -> usize {
        self.state.borrow().reads
    }

    /// Characters still waiting to be read.
    pub fn pending_input(&self) -> usize {
        self.state.borrow().input.len()
    }
}

impl Terminal for BufferedTerminal {
    fn read_raw_char(&mut self) -> io::Result<char> {
        let mut state = self.state.borrow_mut();
        let ch = state
            .input
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "scripted input exhausted"))?;
        state.reads += 1;
        Ok(ch)
    }

    fn backspace(&mut self) -> io::Result<()> {
        self.state
            .borrow_mut()
            .output
            .push_str(settings::ERASE_SEQUENCE);
        Ok(())
    }

    fn set_prompt(&mut self, prompt: String) {
        self.state.borrow_mut().prompt = prompt;
    }

    fn prompt(&self) -> String {
        self.state.borrow().prompt.clone()
    }

    fn print(&mut self, text: &str) {
        self.state.borrow_mut().output.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffered_terminal_replays_input_then_fails() {
        let mut term = BufferedTerminal::with_input("ab");
        assert_eq!(term.read_raw_char().unwrap(), 'a');
        assert_eq!(term.read_raw_char().unwrap(), 'b');
        let err = term.read_raw_char().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        assert_eq!(term.reads(), 2);
    }

    #[test]
    fn buffered_terminal_clones_share_transcript() {
        let handle = BufferedTerminal::new();
        let mut owned = handle.clone();
        owned.println("hello");
        owned.backspace().unwrap();
        owned.set_prompt("p> ".into());
        assert_eq!(handle.output(), "hello\n\u{8} \u{8}");
        assert_eq!(handle.prompt(), "p> ");
        assert_eq!(handle.take_output(), "hello\n\u{8} \u{8}");
        assert!(handle.output().is_empty());
    }

    #[test]
    fn utf8_width_from_leading_byte() {
        assert_eq!(utf8_width(b'a'), 1);
        assert_eq!(utf8_width(0xc3), 2);
        assert_eq!(utf8_width(0xe2), 3);
        assert_eq!(utf8_width(0xf0), 4);
    }
}
