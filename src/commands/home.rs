//! Project home commands: home directory, autoconfirm, init and config editing.

use super::general::{on_off, undefined_if_none};
use super::{Command, CommandContext, CommandResult};
use crate::project::ProjectApi;
use std::path::PathBuf;
use std::rc::Rc;

pub(crate) fn commands(context: &Rc<CommandContext>) -> Vec<Rc<dyn Command>> {
    vec![
        Rc::new(HomeCommand::new(context)),
        Rc::new(AutoConfirmCommand::new(context)),
        Rc::new(InitCommand::new(context)),
        Rc::new(EditConfigCommand::new(context)),
        Rc::new(EditDatabasesCommand::new(context)),
    ]
}

context_command!(
    HomeCommand,
    AutoConfirmCommand,
    InitCommand,
    EditConfigCommand,
    EditDatabasesCommand,
);

impl Command for HomeCommand {
    describe! {
        name: "h",
        short: "Home",
        description: "Print or set the project home directory",
        usage: "h [directory]",
    }

    fn execute(&self, args: &[String]) -> CommandResult {
        if !self.context.check_arguments(args, &[0, 1]) {
            return Ok(String::new());
        }
        let Some(raw) = args.get(1) else {
            let session = self.context.session();
            let home = session.home_directory().map(|h| h.display().to_string());
            return Ok(undefined_if_none(home.as_deref()).to_string());
        };
        let dir = self.context.resolve_path(raw);
        if !self.context.check_directory(&dir) {
            return Ok(String::new());
        }
        let shown = dir.display().to_string();
        self.context.set_current_home(dir);
        Ok(shown)
    }
}

impl Command for AutoConfirmCommand {
    describe! {
        name: "ac",
        short: "Auto confirm",
        description: "Print or set the 'Autoconfirm'",
        usage: "ac [on|off]",
    }

    fn execute(&self, args: &[String]) -> CommandResult {
        if !self.context.check_arguments(args, &[0, 1]) {
            return Ok(String::new());
        }
        let Some(raw) = args.get(1) else {
            return Ok(on_off(self.context.session().autoconfirm()).to_string());
        };
        let value = raw.trim().to_lowercase();
        let on = match value.as_str() {
            "on" => true,
            "off" => false,
            _ => return Ok(format!("Invalid Autoconfirm parameter (<> on or off) '{value}'")),
        };
        self.context.set_current_autoconfirm(on);
        Ok(format!(
            "Autoconfirm set to ('{}')",
            on_off(self.context.session().autoconfirm())
        ))
    }
}

impl Command for InitCommand {
    describe! {
        name: "init",
        short: "Init",
        description: "Initialize the project in the home directory",
        usage: "init",
    }

    fn execute(&self, args: &[String]) -> CommandResult {
        if !self.context.check_arguments(args, &[0]) {
            return Ok(String::new());
        }
        let Some(project) = self.context.project() else {
            return Ok(String::new());
        };
        let question = format!(
            "Do you want to initialize the project in '{}'",
            project.home().display()
        );
        if !self.context.confirm(&question)? {
            return Ok("Project initialization cancelled".to_string());
        }
        match project.init() {
            Ok(steps) => {
                self.context.print_list(&steps);
                Ok("Project initialized".to_string())
            }
            Err(err) => {
                self.context.print_failure(&err);
                Ok("Project initialization failed".to_string())
            }
        }
    }
}

/// Launch the editor on a project file if it exists.
fn edit_project_file(
    context: &CommandContext,
    args: &[String],
    file: fn(&dyn ProjectApi) -> PathBuf,
) -> CommandResult {
    if !context.check_arguments(args, &[0]) {
        return Ok(String::new());
    }
    let Some(project) = context.project() else {
        return Ok(String::new());
    };
    let path = file(project.as_ref());
    if !path.is_file() {
        return Ok(format!("File '{}' not found", path.display()));
    }
    Ok(context.launch_editor(&path.display().to_string()))
}

impl Command for EditConfigCommand {
    describe! {
        name: "ecfg",
        short: "Edit configuration",
        description: "Edit the project configuration file",
        usage: "ecfg",
    }

    fn execute(&self, args: &[String]) -> CommandResult {
        edit_project_file(&self.context, args, |p| p.config_file())
    }
}

impl Command for EditDatabasesCommand {
    describe! {
        name: "edb",
        short: "Edit databases",
        description: "Edit the databases configuration file",
        usage: "edb",
    }

    fn execute(&self, args: &[String]) -> CommandResult {
        edit_project_file(&self.context, args, |p| p.databases_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::to_args;
    use crate::session::SessionSettings;
    use crate::testsupport::{harness, harness_with_settings, Harness, TestTempDir};
    use crate::tui::{settings, Terminal};

    #[test]
    fn home_prints_undefined_then_sets() {
        let dir = TestTempDir::new("home");
        let Harness { context, terminal, .. } =
            harness_with_settings(SessionSettings::new(dir.path()), "");
        let h = HomeCommand::new(&context);
        assert_eq!(h.execute(&to_args(&["h"])).unwrap(), settings::MSG_UNDEFINED);
        let out = h.execute(&to_args(&["h", "."])).unwrap();
        assert_eq!(out, dir.path().display().to_string());
        assert_eq!(terminal.prompt(), "gensh#> ");
        assert_eq!(h.execute(&to_args(&["h"])).unwrap(), out);
    }

    #[test]
    fn home_keeps_model_and_bundle() {
        let dir = TestTempDir::new("home-keep");
        let Harness { context, .. } = harness_with_settings(SessionSettings::new(dir.path()), "");
        context.set_current_model("cars.model");
        context.set_current_bundle("b1");
        HomeCommand::new(&context)
            .execute(&to_args(&["h", "."]))
            .unwrap();
        assert_eq!(context.session().current_model(), Some("cars.model"));
        assert_eq!(context.session().current_bundle(), Some("b1"));
    }

    #[test]
    fn home_rejects_missing_directory_without_mutation() {
        let dir = TestTempDir::new("home-missing");
        let Harness { context, terminal, .. } =
            harness_with_settings(SessionSettings::new(dir.path()), "");
        let out = HomeCommand::new(&context)
            .execute(&to_args(&["h", "missing"]))
            .unwrap();
        assert!(out.is_empty());
        assert!(context.session().home_directory().is_none());
        assert!(terminal.output().contains("doesn't exist !"));
    }

    #[test]
    fn autoconfirm_messages() {
        let Harness { context, .. } = harness("");
        let ac = AutoConfirmCommand::new(&context);
        assert_eq!(ac.execute(&to_args(&["ac"])).unwrap(), "off");
        assert_eq!(
            ac.execute(&to_args(&["ac", "ON"])).unwrap(),
            "Autoconfirm set to ('on')"
        );
        assert!(context.session().autoconfirm());
        assert_eq!(
            ac.execute(&to_args(&["ac", "maybe"])).unwrap(),
            "Invalid Autoconfirm parameter (<> on or off) 'maybe'"
        );
        assert!(context.session().autoconfirm());
        assert_eq!(
            ac.execute(&to_args(&["ac", "off"])).unwrap(),
            "Autoconfirm set to ('off')"
        );
    }

    #[test]
    fn init_requires_home() {
        let Harness { context, terminal, projects, .. } = harness("");
        let out = InitCommand::new(&context)
            .execute(&to_args(&["init"]))
            .unwrap();
        assert!(out.is_empty());
        assert!(terminal.output().contains(settings::MSG_HOME_REQUIRED));
        assert!(projects.script().opened.is_empty());
    }

    #[test]
    fn init_runs_after_confirmation() {
        let Harness { context, projects, .. } = harness("y\r");
        context.set_current_home(PathBuf::from("/p"));
        let out = InitCommand::new(&context)
            .execute(&to_args(&["init"]))
            .unwrap();
        assert_eq!(out, "Project initialized");
        assert_eq!(projects.script().init_calls, 1);
    }

    #[test]
    fn init_declined_does_nothing() {
        let Harness { context, projects, .. } = harness("n\r");
        context.set_current_home(PathBuf::from("/p"));
        let out = InitCommand::new(&context)
            .execute(&to_args(&["init"]))
            .unwrap();
        assert_eq!(out, "Project initialization cancelled");
        assert_eq!(projects.script().init_calls, 0);
    }

    #[test]
    fn init_cancelled_by_read_failure() {
        let Harness { context, projects, .. } = harness("");
        context.set_current_home(PathBuf::from("/p"));
        let err = InitCommand::new(&context)
            .execute(&to_args(&["init"]))
            .unwrap_err();
        assert!(err.reason.starts_with("read failure"));
        assert_eq!(projects.script().init_calls, 0);
    }

    #[test]
    fn ecfg_reports_missing_file() {
        let dir = TestTempDir::new("ecfg");
        let Harness { context, launcher, .. } =
            harness_with_settings(SessionSettings::new(dir.path()), "");
        context.set_current_home(dir.path().to_path_buf());
        let out = EditConfigCommand::new(&context)
            .execute(&to_args(&["ecfg"]))
            .unwrap();
        assert!(out.starts_with("File '"), "{out}");
        assert!(out.ends_with("telosys-tools.cfg' not found"), "{out}");
        assert!(launcher.calls().is_empty());
    }

    #[test]
    fn edb_launches_editor_on_existing_file() {
        let dir = TestTempDir::new("edb");
        let file = dir.write_text("TelosysTools/databases.dbcfg", "");
        let mut settings = SessionSettings::new(dir.path());
        settings.editor_command = Some("vim $FILE".into());
        let Harness { context, launcher, .. } = harness_with_settings(settings, "");
        context.set_current_home(dir.path().to_path_buf());
        let out = EditDatabasesCommand::new(&context)
            .execute(&to_args(&["edb"]))
            .unwrap();
        assert_eq!(out, format!("vim {}", file.display()));
        assert_eq!(launcher.calls(), [out]);
    }
}
