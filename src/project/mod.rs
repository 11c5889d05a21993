//! Project-automation collaborator.
//!
//! Commands reach a project through [`ProjectFactory::open`] once the home
//! directory is known. The shell only depends on the [`ProjectApi`] surface;
//! [`LocalProject`] is the filesystem implementation wired by the binary.

pub mod local;
pub mod targets;

use crate::error::ProjectError;
use std::path::{Path, PathBuf};

pub use local::{LocalProject, LocalProjectFactory};
pub use targets::{parse_target_definitions, TargetDefinition, TargetDefinitions, TargetKind};

/// Folder under the project home holding configuration, models and bundles.
pub const TOOLS_FOLDER: &str = "TelosysTools";
/// Project configuration file name.
pub const CONFIG_FILE: &str = "telosys-tools.cfg";
/// Database definitions file name.
pub const DATABASES_FILE: &str = "databases.dbcfg";
/// Folder under [`TOOLS_FOLDER`] holding installed bundles.
pub const TEMPLATES_FOLDER: &str = "templates";
/// Target definitions file inside each bundle.
pub const TARGETS_FILE: &str = "templates.cfg";
/// Suffix of database models.
pub const DB_MODEL_SUFFIX: &str = ".dbrep";

/// Everything the `gen` command hands to the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub model: String,
    pub bundle: String,
    /// Entity names, or `*` for all entities.
    pub entities: String,
    /// Selected template targets.
    pub templates: Vec<String>,
    pub copy_resources: bool,
}

/// Outcome of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub generated: usize,
    pub errors: Vec<String>,
}

impl GenerationReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Operations a project handle exposes to commands.
pub trait ProjectApi {
    /// Project home directory.
    fn home(&self) -> &Path;

    /// Create the project skeleton; returns one line per step taken.
    fn init(&self) -> Result<Vec<String>, ProjectError>;

    /// Model file names, sorted.
    fn models(&self) -> Result<Vec<String>, ProjectError>;

    /// Canonical model file name for `name`, if such a model exists.
    fn resolve_model(&self, name: &str) -> Result<Option<String>, ProjectError>;

    /// Installed bundle names, sorted.
    fn bundles(&self) -> Result<Vec<String>, ProjectError>;

    /// Target definitions of an installed bundle.
    fn target_definitions(&self, bundle: &str) -> Result<TargetDefinitions, ProjectError>;

    /// Create a database model from a configured database.
    fn new_db_model(&self, database: &str) -> Result<String, ProjectError>;

    /// Refresh an existing database model from its database.
    fn update_db_model(&self, model: &str, database: &str) -> Result<String, ProjectError>;

    /// Run code generation.
    fn generate(&self, request: &GenerationRequest) -> Result<GenerationReport, ProjectError>;

    /// Path of the project configuration file.
    fn config_file(&self) -> PathBuf {
        self.home().join(TOOLS_FOLDER).join(CONFIG_FILE)
    }

    /// Path of the databases configuration file.
    fn databases_file(&self) -> PathBuf {
        self.home().join(TOOLS_FOLDER).join(DATABASES_FILE)
    }

    /// Path of a model file.
    fn model_file(&self, model: &str) -> PathBuf {
        self.home().join(TOOLS_FOLDER).join(model)
    }
}

/// Opens project handles rooted at a home directory.
pub trait ProjectFactory {
    fn open(&self, home: &Path) -> Box<dyn ProjectApi>;
}
