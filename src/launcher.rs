//! Fire-and-forget launching of external OS commands (editors, viewers).

use crate::session::OsKind;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// OS-command collaborator.
///
/// Implementations never report failures to the caller; they log them.
pub trait SystemLauncher {
    fn run(&self, command_line: &str, os_kind: OsKind);
}

/// Spawns the command line through the platform shell without waiting.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpawnLauncher;

impl SystemLauncher for SpawnLauncher {
    fn run(&self, command_line: &str, os_kind: OsKind) {
        let mut command = shell_command(command_line, os_kind);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        match command.spawn() {
            Ok(child) => debug!(pid = child.id(), command_line, "launched system command"),
            Err(err) => warn!(%err, command_line, "failed to launch system command"),
        }
    }
}

/// Build the platform shell invocation for a full command line.
pub fn shell_command(command_line: &str, os_kind: OsKind) -> Command {
    match os_kind {
        OsKind::Windows => {
            let mut command = Command::new("cmd");
            command.arg("/C").arg(command_line);
            command
        }
        OsKind::MacOs | OsKind::Linux | OsKind::Other => {
            let mut command = Command::new("sh");
            command.arg("-c").arg(command_line);
            command
        }
    }
}
