//! Shared command context: the session plus the helpers every command uses.
//!
//! One [`CommandContext`] is built by the registry and handed to every
//! command. Execution is single-threaded, so interior mutability goes through
//! `RefCell`/`Cell`; borrows are kept short and never span a call back into
//! another helper.

use crate::error::CancelCommand;
use crate::launcher::SystemLauncher;
use crate::project::{ProjectApi, ProjectFactory, TargetDefinitions};
use crate::session::{Session, SessionSettings};
use crate::tui::settings;
use crate::tui::terminal::Terminal;
use crate::tui::{colorize, is_affirmative, read_response, styled_prompt};
use std::cell::{Cell, Ref, RefCell};
use std::collections::BTreeMap;
use std::error::Error;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// External collaborators a context is wired with.
pub struct Collaborators {
    pub terminal: Box<dyn Terminal>,
    pub launcher: Box<dyn SystemLauncher>,
    pub projects: Box<dyn ProjectFactory>,
}

/// Most recent failure reported through [`CommandContext::print_failure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastError {
    /// Short type name of the failure.
    pub kind: String,
    pub message: String,
    /// Messages of the source chain, outermost first.
    pub causes: Vec<String>,
}

/// Help metadata copied from each registered command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    pub name: String,
    pub short_description: String,
    pub description: String,
    pub usage: String,
}

pub struct CommandContext {
    session: RefCell<Session>,
    terminal: RefCell<Box<dyn Terminal>>,
    last_error: RefCell<Option<LastError>>,
    help: RefCell<BTreeMap<String, HelpEntry>>,
    quit_requested: Cell<bool>,
    launcher: Box<dyn SystemLauncher>,
    projects: Box<dyn ProjectFactory>,
    color: bool,
}

impl CommandContext {
    pub(crate) fn new(settings: &SessionSettings, collaborators: Collaborators) -> Self {
        let context = Self {
            session: RefCell::new(Session::new(settings)),
            terminal: RefCell::new(collaborators.terminal),
            last_error: RefCell::new(None),
            help: RefCell::new(BTreeMap::new()),
            quit_requested: Cell::new(false),
            launcher: collaborators.launcher,
            projects: collaborators.projects,
            color: settings.color,
        };
        context.update_prompt();
        context
    }

    /// Read access to the session.
    pub fn session(&self) -> Ref<'_, Session> {
        self.session.borrow()
    }

    /// Prompt currently installed on the terminal.
    pub fn prompt(&self) -> String {
        self.terminal.borrow().prompt()
    }

    pub fn color(&self) -> bool {
        self.color
    }

    // -----------------------------------------------------------------------
    // Output
    // -----------------------------------------------------------------------

    /// Print one line.
    pub fn print(&self, message: &str) {
        self.terminal.borrow_mut().println(message);
    }

    /// Print text without a newline.
    pub fn print_inline(&self, text: &str) {
        self.terminal.borrow_mut().print(text);
    }

    /// Print each item prefixed with ` . `.
    pub fn print_list<S: AsRef<str>>(&self, items: &[S]) {
        let mut terminal = self.terminal.borrow_mut();
        for item in items {
            terminal.println(&format!(" . {}", item.as_ref()));
        }
    }

    pub fn print_error(&self, message: &str) {
        self.print(&format!("{} : {message}", self.error_label()));
    }

    fn error_label(&self) -> String {
        colorize(settings::LABEL_ERROR, settings::COLOR_ERROR, self.color)
    }

    /// Record `err` as the last error and print its diagnostic.
    pub fn print_failure<E: Error + ?Sized>(&self, err: &E) {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }
        let last = LastError {
            kind: short_type_name::<E>().to_string(),
            message: err.to_string(),
            causes,
        };
        let label = self.error_label();
        self.print(&format!("{label} Failure kind    : {}", last.kind));
        self.print(&format!("{label} Failure message : {}", last.message));
        if let Some(cause) = last.causes.first() {
            self.print(&format!("{label} Caused by       : {cause}"));
        }
        *self.last_error.borrow_mut() = Some(last);
    }

    pub fn last_error(&self) -> Option<LastError> {
        self.last_error.borrow().clone()
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Read a response line; a read failure cancels the current command.
    pub fn read_response(&self) -> Result<String, CancelCommand> {
        let result = read_response(self.terminal.borrow_mut().as_mut());
        result.map_err(|err| {
            self.print_failure(&err);
            CancelCommand::new(format!("read failure: {err}"))
        })
    }

    /// Print the prompt and read one command line.
    ///
    /// Unlike [`Self::read_response`], read failures are returned as is so
    /// the interactive loop can tell end of input from interruption.
    pub fn read_command_line(&self) -> std::io::Result<String> {
        let mut terminal = self.terminal.borrow_mut();
        let prompt = terminal.prompt();
        terminal.print(&prompt);
        read_response(terminal.as_mut())
    }

    /// Ask a yes/no question, honoring autoconfirm.
    pub fn confirm(&self, message: &str) -> Result<bool, CancelCommand> {
        self.print_inline(&format!("{message}{}", settings::CONFIRM_SUFFIX));
        if self.session().autoconfirm() {
            self.print(settings::MSG_AUTOCONFIRMED);
            return Ok(true);
        }
        let response = self.read_response()?;
        Ok(is_affirmative(&response))
    }

    // -----------------------------------------------------------------------
    // Arguments and guards
    // -----------------------------------------------------------------------

    /// True when `args` (command token included) carries one of `counts`
    /// positional arguments.
    pub fn check_arguments(&self, args: &[String], counts: &[usize]) -> bool {
        let count = args.len().saturating_sub(1);
        if counts.contains(&count) {
            return true;
        }
        self.print(settings::MSG_INVALID_ARGUMENT_COUNT);
        false
    }

    pub fn check_home_directory_defined(&self) -> bool {
        self.guard(
            self.session().home_directory().is_some(),
            settings::MSG_HOME_REQUIRED,
        )
    }

    pub fn check_model_defined(&self) -> bool {
        self.guard(
            self.session().current_model().is_some(),
            settings::MSG_MODEL_REQUIRED,
        )
    }

    pub fn check_dsl_model_defined(&self) -> bool {
        if !self.check_model_defined() {
            return false;
        }
        self.guard(self.session().has_dsl_model(), settings::MSG_DSL_MODEL_REQUIRED)
    }

    pub fn check_bundle_defined(&self) -> bool {
        self.guard(
            self.session().current_bundle().is_some(),
            settings::MSG_BUNDLE_REQUIRED,
        )
    }

    pub fn check_github_store_defined(&self) -> bool {
        self.guard(
            self.session().current_github_store().is_some(),
            settings::MSG_GITHUB_STORE_REQUIRED,
        )
    }

    fn guard(&self, ok: bool, advisory: &str) -> bool {
        if !ok {
            self.print(advisory);
        }
        ok
    }

    /// True when `dir` is an existing directory, otherwise prints why not.
    pub fn check_directory(&self, dir: &Path) -> bool {
        if !dir.exists() {
            self.print(&format!("'{}' doesn't exist !", dir.display()));
            return false;
        }
        if !dir.is_dir() {
            self.print(&format!("'{}' is not a directory !", dir.display()));
            return false;
        }
        true
    }

    /// Resolve a user-supplied path against the current directory.
    pub fn resolve_path(&self, raw: &str) -> PathBuf {
        resolve_path(self.session().current_directory(), raw)
    }

    // -----------------------------------------------------------------------
    // Session mutators
    // -----------------------------------------------------------------------

    pub fn set_current_directory(&self, dir: PathBuf) {
        self.session.borrow_mut().current_directory = dir;
    }

    pub fn set_current_home(&self, dir: PathBuf) {
        self.session.borrow_mut().home_directory = Some(dir);
        self.update_prompt();
    }

    /// Use the current directory as the home directory.
    pub fn set_current_home_to_current_directory(&self) {
        let current = self.session().current_directory().clone();
        self.set_current_home(current);
    }

    pub fn set_current_model(&self, name: &str) {
        self.session.borrow_mut().current_model = Some(name.to_string());
        self.update_prompt();
    }

    /// Select the model stored in `file` when it exists.
    pub fn set_current_model_file(&self, file: &Path) {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if file.is_file() {
            self.set_current_model(&name);
        } else {
            self.print_error(&format!("Model file '{name}' does not exist"));
        }
    }

    /// True when `file` is the file of the current model.
    pub fn is_current_model(&self, file: &Path) -> bool {
        let session = self.session();
        match (file.file_name(), session.current_model()) {
            (Some(name), Some(model)) => name == model,
            _ => false,
        }
    }

    pub fn unset_current_model(&self) {
        self.session.borrow_mut().current_model = None;
        self.update_prompt();
    }

    pub fn set_current_bundle(&self, name: &str) {
        self.session.borrow_mut().current_bundle = Some(name.to_string());
        self.update_prompt();
    }

    pub fn set_current_autoconfirm(&self, on: bool) {
        self.session.borrow_mut().autoconfirm = on;
        self.update_prompt();
    }

    pub fn set_current_github_store(&self, store: &str) {
        self.session.borrow_mut().current_github_store = Some(store.to_string());
        self.update_prompt();
    }

    pub fn unset_current_github_store(&self) {
        self.session.borrow_mut().current_github_store = None;
        self.update_prompt();
    }

    /// Recompute the prompt from the session and install it.
    pub fn update_prompt(&self) {
        let text = self.session().prompt_text();
        self.terminal
            .borrow_mut()
            .set_prompt(styled_prompt(&text, self.color));
    }

    // -----------------------------------------------------------------------
    // Collaborators
    // -----------------------------------------------------------------------

    /// Build the editor command line for `file`, launch it, and return it.
    pub fn launch_editor(&self, file: &str) -> String {
        let session = self.session();
        let Some(template) = session.editor_command() else {
            return settings::MSG_NO_EDITOR.to_string();
        };
        let command_line = editor_command_line(template, file);
        debug!(command_line, "launching editor");
        self.launcher.run(&command_line, session.os_kind());
        command_line
    }

    /// Project handle for the home directory, if the home guard passes.
    pub fn project(&self) -> Option<Box<dyn ProjectApi>> {
        if !self.check_home_directory_defined() {
            return None;
        }
        let home = self.session().home_directory()?.clone();
        Some(self.projects.open(&home))
    }

    /// Target definitions of the current bundle.
    ///
    /// `None` when the home or bundle guard fails or the project reports a
    /// failure; the failure is recorded as the last error.
    pub fn current_target_definitions(&self) -> Option<TargetDefinitions> {
        let project = self.project()?;
        if !self.check_bundle_defined() {
            return None;
        }
        let bundle = self.session().current_bundle()?.to_string();
        match project.target_definitions(&bundle) {
            Ok(definitions) => Some(definitions),
            Err(err) => {
                self.print_failure(&err);
                None
            }
        }
    }

    // -----------------------------------------------------------------------
    // Registry plumbing
    // -----------------------------------------------------------------------

    pub(crate) fn add_help_entry(&self, key: &str, entry: HelpEntry) {
        self.help.borrow_mut().insert(key.to_string(), entry);
    }

    /// Help entry for a command name or alias.
    pub fn help_entry(&self, name: &str) -> Option<HelpEntry> {
        self.help.borrow().get(name).cloned()
    }

    /// One entry per distinct command, in name order.
    pub fn help_entries(&self) -> Vec<HelpEntry> {
        self.help
            .borrow()
            .iter()
            .filter(|(key, entry)| *key == &entry.name)
            .map(|(_, entry)| entry.clone())
            .collect()
    }

    pub fn request_quit(&self) {
        self.quit_requested.set(true);
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested.get()
    }
}

/// Substitute `$FILE` (or else `${FILE}`) in `template`, or append the file.
pub fn editor_command_line(template: &str, file: &str) -> String {
    let file = file.trim();
    if template.contains("$FILE") {
        template.replace("$FILE", file)
    } else if template.contains("${FILE}") {
        template.replace("${FILE}", file)
    } else {
        format!("{template} {file}")
    }
}

/// Resolve `raw` against `base` and normalize `.`/`..` lexically.
pub fn resolve_path(base: &Path, raw: &str) -> PathBuf {
    let joined = base.join(raw);
    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
