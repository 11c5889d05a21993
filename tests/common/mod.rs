//! Shared fixtures for integration tests.

#![allow(dead_code)]

use gensh::commands::{Collaborators, CommandRegistry};
use gensh::launcher::SystemLauncher;
use gensh::project::LocalProjectFactory;
use gensh::session::{OsKind, SessionSettings};
use gensh::tui::BufferedTerminal;
use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

/// Launcher that records command lines instead of spawning them.
#[derive(Debug, Clone, Default)]
pub struct RecordingLauncher {
    calls: Rc<RefCell<Vec<String>>>,
}

impl RecordingLauncher {
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl SystemLauncher for RecordingLauncher {
    fn run(&self, command_line: &str, _os_kind: OsKind) {
        self.calls.borrow_mut().push(command_line.to_string());
    }
}

pub struct Shell {
    pub registry: CommandRegistry,
    pub terminal: BufferedTerminal,
    pub launcher: RecordingLauncher,
}

/// Built-in registry over a local project factory, started in `dir`.
pub fn shell_in(dir: &Path, input: &str, backend: Option<String>) -> Shell {
    let mut settings = SessionSettings::new(dir);
    settings.editor_command = Some("ed $FILE".to_string());
    let terminal = BufferedTerminal::with_input(input);
    let launcher = RecordingLauncher::default();
    let collaborators = Collaborators {
        terminal: Box::new(terminal.clone()),
        launcher: Box::new(launcher.clone()),
        projects: Box::new(LocalProjectFactory::new(backend)),
    };
    let registry = CommandRegistry::with_builtin_commands(&settings, collaborators)
        .expect("built-in commands register");
    Shell {
        registry,
        terminal,
        launcher,
    }
}

/// Project with one DSL model and one bundle of two templates and a resource.
pub fn seed_project(home: &Path) {
    let tools = home.join("TelosysTools");
    fs::create_dir_all(tools.join("templates/java-basic")).unwrap();
    fs::create_dir_all(tools.join("templates/python-flask")).unwrap();
    fs::write(tools.join("telosys-tools.cfg"), "").unwrap();
    fs::write(tools.join("databases.dbcfg"), "").unwrap();
    fs::write(tools.join("cars.model"), "").unwrap();
    fs::write(tools.join("legacy.dbrep"), "").unwrap();
    fs::write(
        tools.join("templates/java-basic/templates.cfg"),
        "# java bundle\n\
         Bean ; ${BEANNAME}.java ; src ; bean.vm ; *\n\
         Dao  ; ${BEANNAME}Dao.java ; src ; dao.vm ; *\n\
         Logo ; logo.png ; static ; logo.png ; R\n",
    )
    .unwrap();
}

pub fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}
