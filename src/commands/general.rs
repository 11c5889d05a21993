//! Session-wide commands: help, navigation, environment, editor, errors, quit.

use super::{Command, CommandContext, CommandResult};
use crate::tui::settings;
use std::fs;
use std::path::Path;
use std::rc::Rc;

pub(crate) fn commands(context: &Rc<CommandContext>) -> Vec<Rc<dyn Command>> {
    vec![
        Rc::new(HelpCommand::new(context)),
        Rc::new(CdCommand::new(context)),
        Rc::new(PwdCommand::new(context)),
        Rc::new(LsCommand::new(context)),
        Rc::new(EnvCommand::new(context)),
        Rc::new(EditCommand::new(context)),
        Rc::new(LastErrorCommand::new(context)),
        Rc::new(QuitCommand::new(context)),
    ]
}

context_command!(
    HelpCommand,
    CdCommand,
    PwdCommand,
    LsCommand,
    EnvCommand,
    EditCommand,
    LastErrorCommand,
    QuitCommand,
);

// ---------------------------------------------------------------------------
// ?
// ---------------------------------------------------------------------------

impl Command for HelpCommand {
    describe! {
        name: "?",
        short: "Help",
        description: "Print the list of commands, or the description of one command",
        usage: "? [command]",
    }

    fn execute(&self, args: &[String]) -> CommandResult {
        if !self.context.check_arguments(args, &[0, 1]) {
            return Ok(String::new());
        }
        if let Some(name) = args.get(1) {
            return Ok(match self.context.help_entry(name) {
                Some(entry) => format!(
                    "{} : {}\nUsage : {}",
                    entry.name, entry.description, entry.usage
                ),
                None => format!("Unknown command '{name}'"),
            });
        }
        let lines: Vec<String> = self
            .context
            .help_entries()
            .iter()
            .map(|entry| format!(" {:<5} : {}", entry.name, entry.short_description))
            .collect();
        Ok(lines.join("\n"))
    }
}

// ---------------------------------------------------------------------------
// cd / pwd / ls
// ---------------------------------------------------------------------------

impl Command for CdCommand {
    describe! {
        name: "cd",
        short: "Change directory",
        description: "Change the current directory (home directory or user directory if no argument)",
        usage: "cd [directory]",
    }

    fn execute(&self, args: &[String]) -> CommandResult {
        if !self.context.check_arguments(args, &[0, 1]) {
            return Ok(String::new());
        }
        let target = match args.get(1) {
            Some(raw) => self.context.resolve_path(raw),
            None => {
                let home = self.context.session().home_directory().cloned();
                match home.or_else(dirs::home_dir) {
                    Some(dir) => dir,
                    None => return Ok(String::new()),
                }
            }
        };
        if !self.context.check_directory(&target) {
            return Ok(String::new());
        }
        let shown = target.display().to_string();
        self.context.set_current_directory(target);
        Ok(shown)
    }
}

impl Command for PwdCommand {
    describe! {
        name: "pwd",
        short: "Print working directory",
        description: "Print the current directory",
        usage: "pwd",
    }

    fn execute(&self, args: &[String]) -> CommandResult {
        if !self.context.check_arguments(args, &[0]) {
            return Ok(String::new());
        }
        Ok(self.context.session().current_directory().display().to_string())
    }
}

impl Command for LsCommand {
    describe! {
        name: "ls",
        short: "List directory",
        description: "List the files and folders of the current directory",
        usage: "ls",
    }

    fn execute(&self, args: &[String]) -> CommandResult {
        if !self.context.check_arguments(args, &[0]) {
            return Ok(String::new());
        }
        let dir = self.context.session().current_directory().clone();
        match list_directory(&dir) {
            Ok(entries) if entries.is_empty() => Ok("(empty)".to_string()),
            Ok(entries) => Ok(entries.join("\n")),
            Err(err) => {
                self.context.print_failure(&err);
                Ok(format!("Cannot list '{}'", dir.display()))
            }
        }
    }
}

/// Entry names sorted, folders suffixed with `/`.
fn list_directory(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type()?.is_dir() {
            name.push('/');
        }
        entries.push(name);
    }
    entries.sort();
    Ok(entries)
}

// ---------------------------------------------------------------------------
// env
// ---------------------------------------------------------------------------

impl Command for EnvCommand {
    describe! {
        name: "env",
        short: "Environment",
        description: "Print the current session environment",
        usage: "env",
    }

    fn execute(&self, args: &[String]) -> CommandResult {
        if !self.context.check_arguments(args, &[0]) {
            return Ok(String::new());
        }
        let session = self.context.session();
        let home = session.home_directory().map(|h| h.display().to_string());
        let lines = [
            format!(
                "Current directory : {}",
                session.current_directory().display()
            ),
            format!("Home directory    : {}", undefined_if_none(home.as_deref())),
            format!("Current model     : {}", undefined_if_none(session.current_model())),
            format!("Current bundle    : {}", undefined_if_none(session.current_bundle())),
            format!("Autoconfirm       : {}", on_off(session.autoconfirm())),
            format!(
                "GitHub store      : {} (default : {})",
                undefined_if_none(session.current_github_store()),
                session.default_github_store()
            ),
            format!("Editor command    : {}", undefined_if_none(session.editor_command())),
            format!("OS type           : {}", session.os_kind()),
        ];
        Ok(lines.join("\n"))
    }
}

pub(crate) fn undefined_if_none(value: Option<&str>) -> &str {
    value.unwrap_or(settings::MSG_UNDEFINED)
}

pub(crate) fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

// ---------------------------------------------------------------------------
// e / err / q
// ---------------------------------------------------------------------------

impl Command for EditCommand {
    describe! {
        name: "e",
        short: "Edit",
        description: "Edit the given file with the configured editor",
        usage: "e <file>",
    }

    fn execute(&self, args: &[String]) -> CommandResult {
        if !self.context.check_arguments(args, &[1]) {
            return Ok(String::new());
        }
        let file = self.context.resolve_path(&args[1]);
        Ok(self.context.launch_editor(&file.display().to_string()))
    }
}

impl Command for LastErrorCommand {
    describe! {
        name: "err",
        short: "Last error",
        description: "Print the last error reported in this session",
        usage: "err",
    }

    fn execute(&self, args: &[String]) -> CommandResult {
        if !self.context.check_arguments(args, &[0]) {
            return Ok(String::new());
        }
        let Some(last) = self.context.last_error() else {
            return Ok("No error".to_string());
        };
        let mut lines = vec![
            format!("Failure kind    : {}", last.kind),
            format!("Failure message : {}", last.message),
        ];
        lines.extend(last.causes.iter().map(|c| format!("Caused by       : {c}")));
        Ok(lines.join("\n"))
    }
}

impl Command for QuitCommand {
    describe! {
        name: "q",
        short: "Quit",
        description: "Quit the shell",
        usage: "q",
    }

    fn execute(&self, args: &[String]) -> CommandResult {
        if !self.context.check_arguments(args, &[0]) {
            return Ok(String::new());
        }
        self.context.request_quit();
        Ok("Bye".to_string())
    }
}
