//! Model commands: select, list and edit models of the project.

use super::general::undefined_if_none;
use super::{Command, CommandContext, CommandResult};
use std::rc::Rc;

/// Argument of `m` and `gh` that unsets the current value.
pub(crate) const UNSET_ARGUMENT: &str = "-";

pub(crate) fn commands(context: &Rc<CommandContext>) -> Vec<Rc<dyn Command>> {
    vec![
        Rc::new(ModelCommand::new(context)),
        Rc::new(ListModelsCommand::new(context)),
        Rc::new(EditModelCommand::new(context)),
    ]
}

context_command!(ModelCommand, ListModelsCommand, EditModelCommand);

impl Command for ModelCommand {
    describe! {
        name: "m",
        short: "Model",
        description: "Print, set or unset ('m -') the current model",
        usage: "m [model-name|-]",
    }

    fn execute(&self, args: &[String]) -> CommandResult {
        if !self.context.check_arguments(args, &[0, 1]) {
            return Ok(String::new());
        }
        let Some(name) = args.get(1) else {
            return Ok(undefined_if_none(self.context.session().current_model()).to_string());
        };
        if name == UNSET_ARGUMENT {
            self.context.unset_current_model();
            return Ok("Current model unset".to_string());
        }
        let Some(project) = self.context.project() else {
            return Ok(String::new());
        };
        match project.resolve_model(name) {
            Ok(Some(model)) => {
                self.context.set_current_model(&model);
                Ok(format!("Current model is now '{model}'"))
            }
            Ok(None) => Ok(format!("Model '{name}' not found")),
            Err(err) => {
                self.context.print_failure(&err);
                Ok(format!("Cannot set model '{name}'"))
            }
        }
    }
}

impl Command for ListModelsCommand {
    describe! {
        name: "lm",
        short: "List models",
        description: "List the models of the project, the current one marked with '*'",
        usage: "lm",
    }

    fn execute(&self, args: &[String]) -> CommandResult {
        if !self.context.check_arguments(args, &[0]) {
            return Ok(String::new());
        }
        let Some(project) = self.context.project() else {
            return Ok(String::new());
        };
        match project.models() {
            Ok(models) if models.is_empty() => Ok("No model".to_string()),
            Ok(models) => {
                let current = self.context.session().current_model().map(str::to_string);
                Ok(marked_list(&models, current.as_deref()))
            }
            Err(err) => {
                self.context.print_failure(&err);
                Ok("Cannot list models".to_string())
            }
        }
    }
}

/// One line per item, ` * ` before `current` and ` . ` before the others.
pub(crate) fn marked_list(items: &[String], current: Option<&str>) -> String {
    items
        .iter()
        .map(|item| {
            let marker = if Some(item.as_str()) == current { '*' } else { '.' };
            format!(" {marker} {item}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl Command for EditModelCommand {
    describe! {
        name: "em",
        short: "Edit model",
        description: "Edit the current DSL model with the configured editor",
        usage: "em",
    }

    fn execute(&self, args: &[String]) -> CommandResult {
        if !self.context.check_arguments(args, &[0]) {
            return Ok(String::new());
        }
        if !self.context.check_home_directory_defined() || !self.context.check_dsl_model_defined()
        {
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
        let file = project.model_file(&model);
        Ok(self.context.launch_editor(&file.display().to_string()))
    }
}
