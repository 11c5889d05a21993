//! Translation of launch arguments into command invocations.
//!
//! Flags are scanned first, in any order, then applied in a fixed order:
//! home, autoconfirm, model, bundle, database model update, database model
//! creation, generation. Each flag consumes the token that follows it; the
//! first occurrence that has a value wins.

use crate::commands::context::resolve_path;
use crate::commands::{Command, CommandContext, CommandRegistry};
use crate::error::LaunchError;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::debug;

/// Value of `-gen` that quits once generation succeeded.
const AUTOEND: &str = "+autoend";

const GENERATION_BANNER: &str = "Start generating from templates...";
const ERROR_BANNER_RULE: &str = "!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!";
const ERROR_BANNER_TEXT: &str = "  Generation has errors - please check ";

/// Launch flags found on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchArguments {
    pub home: Option<PathBuf>,
    /// Rejected `-h` values, in the order they were seen.
    pub invalid_homes: Vec<String>,
    pub autoconfirm: Option<String>,
    pub model: Option<String>,
    pub bundle: Option<String>,
    pub update_db_model: Option<String>,
    pub new_db_model: Option<String>,
    pub generate: Option<String>,
}

impl LaunchArguments {
    /// Scan `args`, resolving `-h` against `base`.
    ///
    /// The first `-h` naming an existing directory wins; earlier ones that
    /// do not are recorded in `invalid_homes`.
    pub fn scan(args: &[String], base: &Path) -> Self {
        let mut scanned = Self::default();
        for (index, arg) in args.iter().enumerate() {
            if arg != "-h" {
                continue;
            }
            let Some(raw) = args.get(index + 1) else {
                continue;
            };
            let home = resolve_path(base, raw);
            if home.is_dir() {
                scanned.home = Some(home);
                break;
            }
            scanned.invalid_homes.push(home.display().to_string());
        }
        scanned.autoconfirm = flag_value(args, "-ac");
        scanned.model = flag_value(args, "-m");
        scanned.bundle = flag_value(args, "-b");
        scanned.update_db_model = flag_value(args, "-udbm");
        scanned.new_db_model = flag_value(args, "-ndbm");
        scanned.generate = flag_value(args, "-gen");
        scanned
    }

    /// Run the synthesized commands in their fixed order.
    pub fn apply(&self, registry: &CommandRegistry) -> Result<(), LaunchError> {
        let context = registry.context();
        for home in &self.invalid_homes {
            context.print(&format!("Invalid 'home' argument : '{home}'"));
        }
        if let Some(home) = &self.home {
            let home = home.display().to_string();
            debug!(home, "setting home from launch arguments");
            run(registry, "cd", &[home.as_str()])?;
            print_result(context, &run(registry, "h", &[home.as_str()])?.1);
        }
        let single_value_flags = [
            ("ac", &self.autoconfirm),
            ("m", &self.model),
            ("b", &self.bundle),
            ("udbm", &self.update_db_model),
            ("ndbm", &self.new_db_model),
        ];
        for (name, value) in single_value_flags {
            if let Some(value) = value {
                print_result(context, &run(registry, name, &[value.as_str()])?.1);
            }
        }
        if let Some(value) = &self.generate {
            context.print("");
            context.print(GENERATION_BANNER);
            context.print("");
            let (generate, result) = run(registry, "gen", &["*", "*", "-r"])?;
            print_result(context, &result);
            if generate.has_errors() {
                context.print(ERROR_BANNER_RULE);
                context.print(ERROR_BANNER_TEXT);
                context.print(ERROR_BANNER_RULE);
            } else if value.trim().eq_ignore_ascii_case(AUTOEND) {
                print_result(context, &run(registry, "q", &[])?.1);
            }
        }
        Ok(())
    }
}

/// Scan and apply launch arguments, reporting any failure on one line.
pub fn process_launch_arguments(registry: &CommandRegistry, args: &[String]) {
    if args.is_empty() {
        return;
    }
    debug!(?args, "processing launch arguments");
    let base = registry.context().session().current_directory().clone();
    let launch = LaunchArguments::scan(args, &base);
    if let Err(err) = launch.apply(registry) {
        registry
            .context()
            .print(&format!("ERROR : Unexpected failure {err}"));
    }
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .enumerate()
        .filter(|(_, arg)| arg.as_str() == flag)
        .find_map(|(index, _)| args.get(index + 1).cloned())
}

fn run(
    registry: &CommandRegistry,
    name: &str,
    values: &[&str],
) -> Result<(Rc<dyn Command>, String), LaunchError> {
    let command = registry
        .get_command(name)
        .ok_or_else(|| LaunchError::UnknownCommand(name.to_string()))?;
    let mut args = vec![name.to_string()];
    args.extend(values.iter().map(|v| v.to_string()));
    let result = command.execute(&args)?;
    Ok((command, result))
}

fn print_result(context: &CommandContext, result: &str) {
    if !result.is_empty() {
        context.print(result);
    }
}
