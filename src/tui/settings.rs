//! Centralized, hardcoded UI settings for the terminal interface.
//!
//! This is the single place to tweak prompt strings, fixed messages, and
//! colors.

use crossterm::style::Color;

// ---------------------------------------------------------------------------
// Prompt strings
// ---------------------------------------------------------------------------

pub const PROMPT_BASE: &str = "gensh";
pub const PROMPT_HOME_MARKER: &str = "#";
pub const PROMPT_TERMINATOR: &str = "> ";

pub const CONFIRM_SUFFIX: &str = " [y/n] ? ";
pub const CONFIRM_YES: &str = "Y";

pub const NEWLINE_FALLBACK: &str = "\n";
pub const ERASE_SEQUENCE: &str = "\u{8} \u{8}";

// ---------------------------------------------------------------------------
// Fixed messages
// ---------------------------------------------------------------------------

pub const MSG_INVALID_ARGUMENT_COUNT: &str = "Invalid usage : unexpected number of arguments";
pub const MSG_HOME_REQUIRED: &str = "Home directory must be set before using this command!";
pub const MSG_MODEL_REQUIRED: &str = "This command requires a model.";
pub const MSG_DSL_MODEL_REQUIRED: &str = "This command requires a DSL model.";
pub const MSG_BUNDLE_REQUIRED: &str = "Bundle-name must be set before using this command!";
pub const MSG_GITHUB_STORE_REQUIRED: &str = "GitHub store must be set before using this command!";
pub const MSG_AUTOCONFIRMED: &str = "Automatically confirmed because autoconfirm is set to on";
pub const MSG_NO_EDITOR: &str = "No editor command. Check the configuration.";
pub const MSG_CANCELLED: &str = "Command cancelled";
pub const MSG_UNDEFINED: &str = "(undefined)";

pub const LABEL_ERROR: &str = "[ERROR]";

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_GITHUB_STORE: &str = "telosys-templates-v3";

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

pub const COLOR_PROMPT: Color = Color::Green;
pub const COLOR_ERROR: Color = Color::Red;
pub const COLOR_BANNER: Color = Color::Yellow;
