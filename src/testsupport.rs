//! Shared test fixtures: temp dirs, a recording launcher, a scripted project
//! and registry/context harnesses wired with a [`BufferedTerminal`].

use crate::commands::{Collaborators, CommandContext, CommandRegistry};
use crate::error::ProjectError;
use crate::launcher::SystemLauncher;
use crate::project::{
    GenerationReport, GenerationRequest, ProjectApi, ProjectFactory, TargetDefinitions,
};
use crate::session::{OsKind, SessionSettings};
use crate::tui::BufferedTerminal;
use std::cell::{RefCell, RefMut};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!("gensh-{prefix}-{millis}-{suffix}"));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    /// Root directory path for this fixture.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build a child path under the fixture root.
    pub fn child(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.child(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

// ---------------------------------------------------------------------------
// RecordingLauncher
// ---------------------------------------------------------------------------

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

// ---------------------------------------------------------------------------
// ScriptedProjects
// ---------------------------------------------------------------------------

/// What the scripted project answers, and what it was asked.
#[derive(Debug, Default)]
pub struct ProjectScript {
    pub models: Vec<String>,
    pub bundles: Vec<String>,
    pub targets: HashMap<String, TargetDefinitions>,
    pub report: GenerationReport,
    /// Every fallible operation fails with `NotFound` when set.
    pub failing: bool,
    pub opened: Vec<PathBuf>,
    pub init_calls: usize,
    pub db_calls: Vec<String>,
    pub requests: Vec<GenerationRequest>,
}

/// Project factory whose handles all share one [`ProjectScript`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedProjects {
    state: Rc<RefCell<ProjectScript>>,
}

impl ScriptedProjects {
    pub fn script(&self) -> RefMut<'_, ProjectScript> {
        self.state.borrow_mut()
    }
}

impl ProjectFactory for ScriptedProjects {
    fn open(&self, home: &Path) -> Box<dyn ProjectApi> {
        self.state.borrow_mut().opened.push(home.to_path_buf());
        Box::new(ScriptedProject {
            home: home.to_path_buf(),
            state: Rc::clone(&self.state),
        })
    }
}

struct ScriptedProject {
    home: PathBuf,
    state: Rc<RefCell<ProjectScript>>,
}

impl ScriptedProject {
    fn check(&self) -> Result<(), ProjectError> {
        if self.state.borrow().failing {
            return Err(ProjectError::NotFound("scripted failure".into()));
        }
        Ok(())
    }
}

impl ProjectApi for ScriptedProject {
    fn home(&self) -> &Path {
        &self.home
    }

    fn init(&self) -> Result<Vec<String>, ProjectError> {
        self.check()?;
        self.state.borrow_mut().init_calls += 1;
        Ok(vec!["Project initialized".to_string()])
    }

    fn models(&self) -> Result<Vec<String>, ProjectError> {
        self.check()?;
        Ok(self.state.borrow().models.clone())
    }

    fn resolve_model(&self, name: &str) -> Result<Option<String>, ProjectError> {
        self.check()?;
        let state = self.state.borrow();
        let dsl = format!("{name}.model");
        Ok(state
            .models
            .iter()
            .find(|m| m.as_str() == name || m.as_str() == dsl)
            .cloned())
    }

    fn bundles(&self) -> Result<Vec<String>, ProjectError> {
        self.check()?;
        Ok(self.state.borrow().bundles.clone())
    }

    fn target_definitions(&self, bundle: &str) -> Result<TargetDefinitions, ProjectError> {
        self.check()?;
        self.state
            .borrow()
            .targets
            .get(bundle)
            .cloned()
            .ok_or_else(|| ProjectError::NotFound(format!("bundle '{bundle}'")))
    }

    fn new_db_model(&self, database: &str) -> Result<String, ProjectError> {
        self.check()?;
        self.state.borrow_mut().db_calls.push(format!("ndbm {database}"));
        Ok(format!("Model created from database '{database}'"))
    }

    fn update_db_model(&self, model: &str, database: &str) -> Result<String, ProjectError> {
        self.check()?;
        self.state
            .borrow_mut()
            .db_calls
            .push(format!("udbm {model} {database}"));
        Ok(format!("Model '{model}' updated from database '{database}'"))
    }

    fn generate(&self, request: &GenerationRequest) -> Result<GenerationReport, ProjectError> {
        self.check()?;
        let mut state = self.state.borrow_mut();
        state.requests.push(request.clone());
        Ok(state.report.clone())
    }
}

// ---------------------------------------------------------------------------
// Harnesses
// ---------------------------------------------------------------------------

/// A context wired to scripted collaborators, with handles on each of them.
pub struct Harness {
    pub context: Rc<CommandContext>,
    pub terminal: BufferedTerminal,
    pub launcher: RecordingLauncher,
    pub projects: ScriptedProjects,
}

/// Scripted collaborators plus handles on the terminal and launcher.
pub fn collaborators(input: &str) -> (Collaborators, BufferedTerminal, RecordingLauncher) {
    let (collaborators, terminal, launcher, _) = scripted(input);
    (collaborators, terminal, launcher)
}

fn scripted(input: &str) -> (Collaborators, BufferedTerminal, RecordingLauncher, ScriptedProjects) {
    let terminal = BufferedTerminal::with_input(input);
    let launcher = RecordingLauncher::default();
    let projects = ScriptedProjects::default();
    let collaborators = Collaborators {
        terminal: Box::new(terminal.clone()),
        launcher: Box::new(launcher.clone()),
        projects: Box::new(projects.clone()),
    };
    (collaborators, terminal, launcher, projects)
}

/// Context rooted at `/work` with no editor.
pub fn harness(input: &str) -> Harness {
    harness_with_settings(SessionSettings::new("/work"), input)
}

/// Context rooted at `/work` with the given editor template.
pub fn harness_with_editor(input: &str, editor: Option<&str>) -> Harness {
    let mut settings = SessionSettings::new("/work");
    settings.editor_command = editor.map(str::to_string);
    harness_with_settings(settings, input)
}

pub fn harness_with_settings(settings: SessionSettings, input: &str) -> Harness {
    let (collaborators, terminal, launcher, projects) = scripted(input);
    Harness {
        context: Rc::new(CommandContext::new(&settings, collaborators)),
        terminal,
        launcher,
        projects,
    }
}

/// Registry with every built-in command, rooted at `/work`.
pub fn builtin_registry(input: &str) -> (CommandRegistry, BufferedTerminal) {
    let (registry, terminal, _) = builtin_registry_in(Path::new("/work"), input);
    (registry, terminal)
}

/// Registry with every built-in command, rooted at `dir`.
pub fn builtin_registry_in(
    dir: &Path,
    input: &str,
) -> (CommandRegistry, BufferedTerminal, ScriptedProjects) {
    let (collaborators, terminal, _, projects) = scripted(input);
    let registry = CommandRegistry::with_builtin_commands(&SessionSettings::new(dir), collaborators)
        .expect("built-in commands register once");
    (registry, terminal, projects)
}
