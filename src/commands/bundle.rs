//! Bundle commands: select and list bundles, list targets, GitHub store.

use super::general::undefined_if_none;
use super::model::{marked_list, UNSET_ARGUMENT};
use super::{Command, CommandContext, CommandResult};
use crate::project::TargetDefinition;
use std::rc::Rc;

pub(crate) fn commands(context: &Rc<CommandContext>) -> Vec<Rc<dyn Command>> {
    vec![
        Rc::new(BundleCommand::new(context)),
        Rc::new(ListBundlesCommand::new(context)),
        Rc::new(ListTargetsCommand::new(context)),
        Rc::new(GitHubStoreCommand::new(context)),
    ]
}

context_command!(
    BundleCommand,
    ListBundlesCommand,
    ListTargetsCommand,
    GitHubStoreCommand,
);

impl Command for BundleCommand {
    describe! {
        name: "b",
        short: "Bundle",
        description: "Print or set the current bundle (an unambiguous part of the name is enough)",
        usage: "b [bundle-name]",
    }

    fn execute(&self, args: &[String]) -> CommandResult {
        if !self.context.check_arguments(args, &[0, 1]) {
            return Ok(String::new());
        }
        let Some(name) = args.get(1) else {
            return Ok(undefined_if_none(self.context.session().current_bundle()).to_string());
        };
        let Some(project) = self.context.project() else {
            return Ok(String::new());
        };
        let bundles = match project.bundles() {
            Ok(bundles) => bundles,
            Err(err) => {
                self.context.print_failure(&err);
                return Ok(format!("Cannot set bundle '{name}'"));
            }
        };
        match select_bundle(&bundles, name) {
            BundleMatch::One(bundle) => {
                self.context.set_current_bundle(&bundle);
                Ok(format!("Current bundle is now '{bundle}'"))
            }
            BundleMatch::None => Ok(format!("Bundle '{name}' not found")),
            BundleMatch::Ambiguous(candidates) => {
                self.context.print_list(&candidates);
                Ok(format!("Bundle '{name}' is ambiguous"))
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum BundleMatch {
    One(String),
    None,
    Ambiguous(Vec<String>),
}

/// Exact name first, then a unique substring match.
fn select_bundle(bundles: &[String], name: &str) -> BundleMatch {
    if bundles.iter().any(|b| b == name) {
        return BundleMatch::One(name.to_string());
    }
    let mut candidates: Vec<String> = bundles
        .iter()
        .filter(|b| b.contains(name))
        .cloned()
        .collect();
    match candidates.len() {
        0 => BundleMatch::None,
        1 => BundleMatch::One(candidates.remove(0)),
        _ => BundleMatch::Ambiguous(candidates),
    }
}

impl Command for ListBundlesCommand {
    describe! {
        name: "lb",
        short: "List bundles",
        description: "List the bundles installed in the project, the current one marked with '*'",
        usage: "lb",
    }

    fn execute(&self, args: &[String]) -> CommandResult {
        if !self.context.check_arguments(args, &[0]) {
            return Ok(String::new());
        }
        let Some(project) = self.context.project() else {
            return Ok(String::new());
        };
        match project.bundles() {
            Ok(bundles) if bundles.is_empty() => Ok("No bundle".to_string()),
            Ok(bundles) => {
                let current = self.context.session().current_bundle().map(str::to_string);
                Ok(marked_list(&bundles, current.as_deref()))
            }
            Err(err) => {
                self.context.print_failure(&err);
                Ok("Cannot list bundles".to_string())
            }
        }
    }
}

impl Command for ListTargetsCommand {
    describe! {
        name: "lt",
        short: "List targets",
        description: "List the templates of the current bundle, optionally filtered by a part of their name",
        usage: "lt [pattern]",
    }

    fn execute(&self, args: &[String]) -> CommandResult {
        if !self.context.check_arguments(args, &[0, 1]) {
            return Ok(String::new());
        }
        if !self.context.check_home_directory_defined() || !self.context.check_bundle_defined() {
            return Ok(String::new());
        }
        let Some(definitions) = self.context.current_target_definitions() else {
            return Ok("Cannot list targets".to_string());
        };
        let patterns: Vec<&str> = args.get(1).map(String::as_str).into_iter().collect();
        let selected = definitions.select_templates(&patterns);
        if selected.is_empty() {
            return Ok("No template".to_string());
        }
        let mut lines: Vec<String> = selected.into_iter().map(target_line).collect();
        if !definitions.resources.is_empty() {
            lines.push(format!("{} resource(s)", definitions.resources.len()));
        }
        Ok(lines.join("\n"))
    }
}

fn target_line(target: &TargetDefinition) -> String {
    format!(
        " {} : {} : {} -> {}",
        target.kind.symbol(),
        target.template,
        target.name,
        target.file
    )
}

impl Command for GitHubStoreCommand {
    describe! {
        name: "gh",
        short: "GitHub store",
        description: "Print, set or unset ('gh -') the GitHub store used to install bundles",
        usage: "gh [store-name|-]",
    }

    fn execute(&self, args: &[String]) -> CommandResult {
        if !self.context.check_arguments(args, &[0, 1]) {
            return Ok(String::new());
        }
        match args.get(1) {
            Some(store) if store == UNSET_ARGUMENT => {
                self.context.unset_current_github_store();
                Ok("Current GitHub store unset".to_string())
            }
            Some(store) => {
                self.context.set_current_github_store(store);
                Ok(format!("Current GitHub store is now '{store}'"))
            }
            None => {
                if !self.context.check_github_store_defined() {
                    return Ok(String::new());
                }
                let session = self.context.session();
                let text = format!(
                    "{} (default : {})",
                    undefined_if_none(session.current_github_store()),
                    session.default_github_store()
                );
                Ok(text)
            }
        }
    }
}
