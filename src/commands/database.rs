//! Database model commands.

use super::{Command, CommandContext, CommandResult};
use std::rc::Rc;

pub(crate) fn commands(context: &Rc<CommandContext>) -> Vec<Rc<dyn Command>> {
    vec![
        Rc::new(NewDbModelCommand::new(context)),
        Rc::new(UpdateDbModelCommand::new(context)),
    ]
}

context_command!(NewDbModelCommand, UpdateDbModelCommand);

impl Command for NewDbModelCommand {
    describe! {
        name: "ndbm",
        short: "New DB model",
        description: "Create a new model from the given database",
        usage: "ndbm <database-id>",
    }

    fn execute(&self, args: &[String]) -> CommandResult {
        if !self.context.check_arguments(args, &[1]) {
            return Ok(String::new());
        }
        let Some(project) = self.context.project() else {
            return Ok(String::new());
        };
        let database = &args[1];
        match project.new_db_model(database) {
            Ok(message) => Ok(message),
            Err(err) => {
                self.context.print_failure(&err);
                Ok(format!("Cannot create model from database '{database}'"))
            }
        }
    }
}

impl Command for UpdateDbModelCommand {
    describe! {
        name: "udbm",
        short: "Update DB model",
        description: "Update the current model from the given database",
        usage: "udbm <database-id>",
    }

    fn execute(&self, args: &[String]) -> CommandResult {
        if !self.context.check_arguments(args, &[1]) {
            return Ok(String::new());
        }
        if !self.context.check_home_directory_defined() || !self.context.check_model_defined() {
            return Ok(String::new());
        }
        let Some(project) = self.context.project() else {
            return Ok(String::new());
        };
        let model = self
            .context
            .session()
            .current_model()
            .map(str::to_string)
            .unwrap_or_default();
        let database = &args[1];
        match project.update_db_model(&model, database) {
            Ok(message) => Ok(message),
            Err(err) => {
                self.context.print_failure(&err);
                Ok(format!("Cannot update model '{model}' from database '{database}'"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::to_args;
    use crate::testsupport::harness;
    use crate::tui::settings;
    use std::path::PathBuf;

    #[test]
    fn new_db_model_delegates_to_project() {
        let h = harness("");
        h.context.set_current_home(PathBuf::from("/p"));
        let out = NewDbModelCommand::new(&h.context)
            .execute(&to_args(&["ndbm", "db1"]))
            .unwrap();
        assert_eq!(out, "Model created from database 'db1'");
        assert_eq!(h.projects.script().db_calls, ["ndbm db1"]);
    }

    #[test]
    fn new_db_model_failure_is_recorded() {
        let h = harness("");
        h.context.set_current_home(PathBuf::from("/p"));
        h.projects.script().failing = true;
        let out = NewDbModelCommand::new(&h.context)
            .execute(&to_args(&["ndbm", "db1"]))
            .unwrap();
        assert_eq!(out, "Cannot create model from database 'db1'");
        assert!(h.terminal.output().contains("[ERROR] Failure message : not found"));
    }

    #[test]
    fn update_db_model_requires_model() {
        let h = harness("");
        h.context.set_current_home(PathBuf::from("/p"));
        let udbm = UpdateDbModelCommand::new(&h.context);
        assert_eq!(udbm.execute(&to_args(&["udbm", "db1"])).unwrap(), "");
        assert!(h.terminal.output().contains(settings::MSG_MODEL_REQUIRED));
        assert!(h.projects.script().db_calls.is_empty());

        h.context.set_current_model("legacy.dbrep");
        let out = udbm.execute(&to_args(&["udbm", "db1"])).unwrap();
        assert_eq!(out, "Model 'legacy.dbrep' updated from database 'db1'");
    }

    #[test]
    fn arity_is_checked_before_guards() {
        let h = harness("");
        let out = NewDbModelCommand::new(&h.context)
            .execute(&to_args(&["ndbm"]))
            .unwrap();
        assert!(out.is_empty());
        let transcript = h.terminal.output();
        assert!(transcript.contains(settings::MSG_INVALID_ARGUMENT_COUNT));
        assert!(!transcript.contains(settings::MSG_HOME_REQUIRED));
    }
}
