//! Code generation command.

use super::{Command, CommandContext, CommandResult};
use crate::project::GenerationRequest;
use std::cell::Cell;
use std::rc::Rc;

/// Option of `gen` that also copies the bundle's static resources.
const RESOURCES_OPTION: &str = "-r";

pub(crate) fn commands(context: &Rc<CommandContext>) -> Vec<Rc<dyn Command>> {
    vec![Rc::new(GenerateCommand::new(context))]
}

pub struct GenerateCommand {
    context: Rc<CommandContext>,
    has_errors: Cell<bool>,
}

impl GenerateCommand {
    pub fn new(context: &Rc<CommandContext>) -> Self {
        Self {
            context: Rc::clone(context),
            has_errors: Cell::new(false),
        }
    }

    fn run(&self, args: &[String]) -> CommandResult {
        if !self.context.check_arguments(args, &[2, 3]) {
            return Ok(String::new());
        }
        let copy_resources = match args.get(3).map(String::as_str) {
            None => false,
            Some(RESOURCES_OPTION) => true,
            Some(other) => return Ok(format!("Invalid option '{other}'")),
        };
        if !self.context.check_home_directory_defined()
            || !self.context.check_dsl_model_defined()
            || !self.context.check_bundle_defined()
        {
            return Ok(String::new());
        }
        let Some(definitions) = self.context.current_target_definitions() else {
            self.has_errors.set(true);
            return Ok("Generation failed".to_string());
        };
        let patterns: Vec<&str> = args[2].split(',').filter(|p| !p.is_empty()).collect();
        let templates: Vec<String> = definitions
            .select_templates(&patterns)
            .into_iter()
            .map(|t| t.template.clone())
            .collect();
        if templates.is_empty() {
            return Ok("No template selected".to_string());
        }
        let entities = args[1].clone();
        let question = format!(
            "Generate {} template(s) for entities '{entities}'",
            templates.len()
        );
        if !self.context.confirm(&question)? {
            return Ok("Generation cancelled".to_string());
        }
        let Some(project) = self.context.project() else {
            return Ok(String::new());
        };
        let (model, bundle) = {
            let session = self.context.session();
            (
                session.current_model().unwrap_or_default().to_string(),
                session.current_bundle().unwrap_or_default().to_string(),
            )
        };
        let request = GenerationRequest {
            model,
            bundle,
            entities,
            templates,
            copy_resources,
        };
        match project.generate(&request) {
            Ok(report) => {
                for error in &report.errors {
                    self.context.print_error(error);
                }
                self.has_errors.set(report.has_errors());
                Ok(format!(
                    "{} file(s) generated, {} error(s)",
                    report.generated,
                    report.errors.len()
                ))
            }
            Err(err) => {
                self.context.print_failure(&err);
                self.has_errors.set(true);
                Ok("Generation failed".to_string())
            }
        }
    }
}

impl Command for GenerateCommand {
    describe! {
        name: "gen",
        short: "Generate",
        description: "Generate the given entities with the given templates ('*' for all), '-r' to copy resources",
        usage: "gen <entities|*> <templates|*> [-r]",
    }

    fn execute(&self, args: &[String]) -> CommandResult {
        self.has_errors.set(false);
        self.run(args)
    }

    fn has_errors(&self) -> bool {
        self.has_errors.get()
    }
}
