//! Character-level line editing for prompts and confirmations.
//!
//! The editor reads one raw character at a time from a [`Terminal`], echoes
//! printable characters, honors backspace, and returns the buffer on
//! carriage-return or newline. Other control characters are dropped.

use crate::tui::settings;
use crate::tui::terminal::Terminal;
use std::io;

const BACKSPACE: char = '\u{8}';
const DELETE: char = '\u{7f}';

/// Read one response line from the terminal.
///
/// Read failures are returned unchanged; callers decide whether they cancel
/// the current command or end the session.
pub fn read_response(terminal: &mut dyn Terminal) -> io::Result<String> {
    let mut buffer = String::new();
    loop {
        match terminal.read_raw_char()? {
            '\r' | '\n' => {
                terminal.print(settings::NEWLINE_FALLBACK);
                return Ok(buffer);
            }
            BACKSPACE | DELETE => {
                if buffer.pop().is_some() {
                    terminal.backspace()?;
                }
            }
            ch if ch.is_control() => {}
            ch => {
                buffer.push(ch);
                let mut utf8 = [0u8; 4];
                terminal.print(ch.encode_utf8(&mut utf8));
            }
        }
    }
}

/// True when a captured response means "yes".
pub fn is_affirmative(response: &str) -> bool {
    response.trim().eq_ignore_ascii_case(settings::CONFIRM_YES)
}
