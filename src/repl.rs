//! Interactive read-dispatch-print loop.

use crate::commands::CommandRegistry;
use crate::tui::settings;
use std::io;
use tracing::debug;

/// What happened to one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Blank line, nothing ran.
    Empty,
    /// The command ran to completion.
    Executed,
    /// No command has that name.
    Unknown(String),
    /// The command was cancelled.
    Cancelled,
}

/// Tokenize `line` and run the named command, printing its result.
pub fn dispatch_line(registry: &CommandRegistry, line: &str) -> LineOutcome {
    let args: Vec<String> = line.split_whitespace().map(str::to_string).collect();
    let Some(name) = args.first() else {
        return LineOutcome::Empty;
    };
    let context = registry.context();
    let Some(command) = registry.get_command(name) else {
        context.print(&format!("Unknown command '{name}'. Type '?' for help."));
        return LineOutcome::Unknown(name.clone());
    };
    match command.execute(&args) {
        Ok(result) => {
            if !result.is_empty() {
                context.print(&result);
            }
            LineOutcome::Executed
        }
        Err(cancel) => {
            debug!(reason = %cancel.reason, "command cancelled");
            context.print(settings::MSG_CANCELLED);
            LineOutcome::Cancelled
        }
    }
}

/// Run until a command requests quit or the input ends.
pub fn run_repl(registry: &CommandRegistry) {
    let context = registry.context();
    while !context.quit_requested() {
        let line = match context.read_command_line() {
            Ok(line) => line,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {
                context.print("");
                continue;
            }
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                debug!("end of input");
                context.print("");
                break;
            }
            Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                context.print_failure(&err);
                continue;
            }
            Err(err) => {
                context.print_failure(&err);
                break;
            }
        };
        dispatch_line(registry, &line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionSettings;
    use crate::testsupport::{builtin_registry, collaborators};
    use crate::tui::{BufferedTerminal, Terminal};

    /// Fails one read with `InvalidData` after `after` characters.
    struct GarbledOnce {
        inner: BufferedTerminal,
        after: usize,
        failed: bool,
    }

    impl Terminal for GarbledOnce {
        fn read_raw_char(&mut self) -> io::Result<char> {
            if !self.failed && self.inner.reads() == self.after {
                self.failed = true;
                return Err(io::Error::new(io::ErrorKind::InvalidData, "invalid UTF-8 input"));
            }
            self.inner.read_raw_char()
        }
        fn backspace(&mut self) -> io::Result<()> {
            self.inner.backspace()
        }
        fn set_prompt(&mut self, prompt: String) {
            self.inner.set_prompt(prompt)
        }
        fn prompt(&self) -> String {
            self.inner.prompt()
        }
        fn print(&mut self, text: &str) {
            self.inner.print(text)
        }
    }

    #[test]
    fn blank_lines_are_skipped() {
        let (registry, terminal) = builtin_registry("");
        assert_eq!(dispatch_line(&registry, "   \t "), LineOutcome::Empty);
        assert!(terminal.output().is_empty());
    }

    #[test]
    fn unknown_command_prints_hint() {
        let (registry, terminal) = builtin_registry("");
        assert_eq!(
            dispatch_line(&registry, "frobnicate now"),
            LineOutcome::Unknown("frobnicate".into())
        );
        assert_eq!(
            terminal.output(),
            "Unknown command 'frobnicate'. Type '?' for help.\n"
        );
    }

    #[test]
    fn tokens_are_split_on_whitespace() {
        let (registry, terminal) = builtin_registry("");
        assert_eq!(dispatch_line(&registry, "  ac   on "), LineOutcome::Executed);
        assert_eq!(terminal.output(), "Autoconfirm set to ('on')\n");
    }

    #[test]
    fn cancellation_is_reported_and_loop_continues() {
        let (registry, terminal) = builtin_registry("");
        registry.context().set_current_home("/p".into());
        assert_eq!(dispatch_line(&registry, "init"), LineOutcome::Cancelled);
        assert!(terminal.output().ends_with("Command cancelled\n"));
    }

    #[test]
    fn loop_runs_until_quit() {
        let (registry, terminal) = builtin_registry("ac on\r\rq\rpwd\r");
        run_repl(&registry);
        let out = terminal.output();
        assert!(out.starts_with("gensh> ac on\nAutoconfirm set to ('on')\n"), "{out}");
        assert!(out.contains("Bye\n"), "{out}");
        assert!(!out.contains("/work"), "{out}");
        assert_eq!(terminal.pending_input(), 4);
    }

    #[test]
    fn loop_ends_at_end_of_input() {
        let (registry, terminal) = builtin_registry("pwd\r");
        run_repl(&registry);
        assert!(terminal.output().contains("/work\n"));
        assert!(!registry.context().quit_requested());
    }

    #[test]
    fn undecodable_input_is_reported_and_loop_continues() {
        let (mut collaborators, terminal, _) = collaborators("q\r");
        collaborators.terminal = Box::new(GarbledOnce {
            inner: terminal.clone(),
            after: 0,
            failed: false,
        });
        let registry =
            CommandRegistry::with_builtin_commands(&SessionSettings::new("/work"), collaborators)
                .unwrap();
        run_repl(&registry);
        let out = terminal.output();
        assert!(out.contains("[ERROR] Failure message : invalid UTF-8 input"), "{out}");
        assert!(out.ends_with("Bye\n"), "{out}");
        assert!(registry.context().quit_requested());
        assert_eq!(registry.context().last_error().unwrap().kind, "Error");
    }
}
