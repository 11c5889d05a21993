//! CLI argument parsing via clap.

use clap::Parser;
use gensh::build_info;
use std::path::PathBuf;

/// Interactive shell for code-generation projects.
///
/// Launch arguments are translated into shell commands before the prompt
/// appears: -h <dir>, -ac <on|off>, -m <model>, -b <bundle>,
/// -udbm <db-id>, -ndbm <db-id>, -gen <+autoend|any>.
#[derive(Debug, Parser)]
#[command(
    name = "gensh",
    version = build_info::VERSION,
    long_version = build_info::CLI_LONG_VERSION,
    after_help = build_info::HELP_BUILD_METADATA,
    disable_help_flag = true
)]
pub struct Args {
    /// Path to config file (default: ./gensh.toml or <config dir>/gensh/gensh.toml).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable color output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Print help.
    #[arg(long = "help", action = clap::ArgAction::Help)]
    pub help: Option<bool>,

    /// Launch arguments translated into shell commands.
    #[arg(
        value_name = "LAUNCH_ARGS",
        allow_hyphen_values = true,
        trailing_var_arg = true
    )]
    pub launch_args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn launch_flags_are_positional() {
        let args = Args::parse_from(["gensh", "-h", ".", "-m", "cars", "-gen", "+autoend"]);
        assert_eq!(
            args.launch_args,
            ["-h", ".", "-m", "cars", "-gen", "+autoend"]
        );
        assert!(args.config.is_none());
        assert!(!args.no_color);
    }

    #[test]
    fn own_options_come_first() {
        let args = Args::parse_from(["gensh", "--config", "x.toml", "--no-color", "-ac", "on"]);
        assert_eq!(args.config, Some(PathBuf::from("x.toml")));
        assert!(args.no_color);
        assert_eq!(args.launch_args, ["-ac", "on"]);
    }

    #[test]
    fn no_arguments_is_interactive() {
        let args = Args::parse_from(["gensh"]);
        assert!(args.launch_args.is_empty());
    }

    #[test]
    fn long_help_is_still_available() {
        let err = Args::try_parse_from(["gensh", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
