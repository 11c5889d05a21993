//! CLI entry point for gensh.

mod cli;

use clap::Parser;
use gensh::build_info;
use gensh::commands::{Collaborators, CommandRegistry};
use gensh::config::{load_config, ConfigSource};
use gensh::launch::process_launch_arguments;
use gensh::launcher::SpawnLauncher;
use gensh::project::LocalProjectFactory;
use gensh::repl::run_repl;
use gensh::tui::{colorize, settings, ConsoleTerminal};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    let args = cli::Args::parse();
    init_tracing();

    let loaded = match load_config(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    let mut config = loaded.config;
    if args.no_color {
        config.display.color = false;
    }
    match &loaded.source {
        ConfigSource::Explicit(path) | ConfigSource::Global(path) => {
            debug!(path = %path.display(), "loaded config file")
        }
        ConfigSource::Local => debug!("loaded local config file"),
        ConfigSource::BuiltInDefaults => debug!("using built-in config defaults"),
    }

    let current_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("error: cannot determine current directory: {e}");
            std::process::exit(1);
        }
    };
    let session_settings = config.session_settings(&current_dir);
    let collaborators = Collaborators {
        terminal: Box::new(ConsoleTerminal::new()),
        launcher: Box::new(SpawnLauncher),
        projects: Box::new(LocalProjectFactory::new(config.project.backend.clone())),
    };
    let registry = match CommandRegistry::with_builtin_commands(&session_settings, collaborators) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let context = registry.context();
    context.print(&colorize(
        &format!("gensh {}", build_info::startup_metadata_line()),
        settings::COLOR_BANNER,
        config.display.color,
    ));
    context.print("Type '?' for help.");

    process_launch_arguments(&registry, &args.launch_args);
    if context.quit_requested() {
        info!("quit requested by launch arguments");
        return;
    }
    run_repl(&registry);
}

/// Diagnostics go to stderr, filtered by `GENSH_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("GENSH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
