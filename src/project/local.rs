//! Filesystem-backed project handle.
//!
//! Layout, project operations and bundle inspection are handled natively.
//! Database reverse-engineering and code generation are delegated to an
//! optional backend executable invoked as
//! `<backend> <operation> --home <dir> [options]`. The backend reports each
//! produced file on stdout as `generated: <path>` and each problem as
//! `error: <message>`.

use super::targets::parse_target_definitions;
use super::{
    GenerationReport, GenerationRequest, ProjectApi, ProjectFactory, TargetDefinitions,
    CONFIG_FILE, DATABASES_FILE, DB_MODEL_SUFFIX, TARGETS_FILE, TEMPLATES_FOLDER, TOOLS_FOLDER,
};
use crate::error::ProjectError;
use crate::session::DSL_MODEL_SUFFIX;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::debug;

const DEFAULT_CONFIG_CONTENT: &str = "\
# Project configuration
ProjectVariable.SRC=src/main/java
ProjectVariable.RES=src/main/resources
ProjectVariable.ROOT_PKG=org.demo
";

const DEFAULT_DATABASES_CONTENT: &str = "\
# Database definitions
# id ; name ; jdbc url ; driver ; user ; password
";

/// Opens [`LocalProject`] handles sharing one backend configuration.
#[derive(Debug, Clone, Default)]
pub struct LocalProjectFactory {
    backend: Option<String>,
}

impl LocalProjectFactory {
    pub fn new(backend: Option<String>) -> Self {
        Self { backend }
    }
}

impl ProjectFactory for LocalProjectFactory {
    fn open(&self, home: &Path) -> Box<dyn ProjectApi> {
        Box::new(LocalProject::new(home, self.backend.clone()))
    }
}

/// Project rooted at a home directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalProject {
    home: PathBuf,
    backend: Option<String>,
}

impl LocalProject {
    pub fn new(home: impl Into<PathBuf>, backend: Option<String>) -> Self {
        Self {
            home: home.into(),
            backend,
        }
    }

    fn tools_dir(&self) -> PathBuf {
        self.home.join(TOOLS_FOLDER)
    }

    fn templates_dir(&self) -> PathBuf {
        self.tools_dir().join(TEMPLATES_FOLDER)
    }

    fn run_backend(&self, operation: &'static str, args: &[String]) -> Result<Output, ProjectError> {
        let backend = self
            .backend
            .as_deref()
            .ok_or(ProjectError::BackendUnavailable(operation))?;
        debug!(backend, operation, ?args, "running project backend");
        let output = Command::new(backend)
            .arg(operation)
            .arg("--home")
            .arg(&self.home)
            .args(args)
            .output()?;
        Ok(output)
    }

    fn run_backend_message(
        &self,
        operation: &'static str,
        args: &[String],
    ) -> Result<String, ProjectError> {
        let output = self.run_backend(operation, args)?;
        if !output.status.success() {
            return Err(ProjectError::BackendFailed {
                operation,
                detail: failure_detail(&output),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl ProjectApi for LocalProject {
    fn home(&self) -> &Path {
        &self.home
    }

    fn init(&self) -> Result<Vec<String>, ProjectError> {
        let mut steps = Vec::new();
        let tools = self.tools_dir();
        if tools.is_dir() {
            steps.push(format!("Folder '{}' already exists", tools.display()));
        } else {
            fs::create_dir_all(&tools)?;
            steps.push(format!("Folder '{}' created", tools.display()));
        }
        for (name, content) in [
            (CONFIG_FILE, DEFAULT_CONFIG_CONTENT),
            (DATABASES_FILE, DEFAULT_DATABASES_CONTENT),
        ] {
            let file = tools.join(name);
            if file.exists() {
                steps.push(format!("File '{name}' already exists"));
            } else {
                fs::write(&file, content)?;
                steps.push(format!("File '{name}' created"));
            }
        }
        let templates = self.templates_dir();
        if !templates.is_dir() {
            fs::create_dir_all(&templates)?;
            steps.push(format!("Folder '{TEMPLATES_FOLDER}' created"));
        }
        Ok(steps)
    }

    fn models(&self) -> Result<Vec<String>, ProjectError> {
        let tools = self.tools_dir();
        if !tools.is_dir() {
            return Err(ProjectError::NotFound(format!(
                "folder '{}'",
                tools.display()
            )));
        }
        let mut models = Vec::new();
        for entry in fs::read_dir(&tools)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(DSL_MODEL_SUFFIX) || name.ends_with(DB_MODEL_SUFFIX) {
                models.push(name);
            }
        }
        models.sort();
        Ok(models)
    }

    fn resolve_model(&self, name: &str) -> Result<Option<String>, ProjectError> {
        let tools = self.tools_dir();
        let candidates = [name.to_string(), format!("{name}{DSL_MODEL_SUFFIX}")];
        Ok(candidates
            .into_iter()
            .find(|candidate| tools.join(candidate).is_file()))
    }

    fn bundles(&self) -> Result<Vec<String>, ProjectError> {
        let templates = self.templates_dir();
        if !templates.is_dir() {
            return Ok(Vec::new());
        }
        let mut bundles = Vec::new();
        for entry in fs::read_dir(&templates)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                bundles.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        bundles.sort();
        Ok(bundles)
    }

    fn target_definitions(&self, bundle: &str) -> Result<TargetDefinitions, ProjectError> {
        let path = self.templates_dir().join(bundle).join(TARGETS_FILE);
        if !path.is_file() {
            return Err(ProjectError::NotFound(format!("file '{}'", path.display())));
        }
        let content = fs::read_to_string(&path)?;
        parse_target_definitions(&path, &content)
    }

    fn new_db_model(&self, database: &str) -> Result<String, ProjectError> {
        self.run_backend_message("ndbm", &["--database".to_string(), database.to_string()])
    }

    fn update_db_model(&self, model: &str, database: &str) -> Result<String, ProjectError> {
        self.run_backend_message(
            "udbm",
            &[
                "--model".to_string(),
                model.to_string(),
                "--database".to_string(),
                database.to_string(),
            ],
        )
    }

    fn generate(&self, request: &GenerationRequest) -> Result<GenerationReport, ProjectError> {
        let mut args = vec![
            "--model".to_string(),
            request.model.clone(),
            "--bundle".to_string(),
            request.bundle.clone(),
            "--entities".to_string(),
            request.entities.clone(),
            "--templates".to_string(),
            request.templates.join(","),
        ];
        if request.copy_resources {
            args.push("--resources".to_string());
        }
        let output = self.run_backend("generate", &args)?;
        let mut report = parse_generation_output(&String::from_utf8_lossy(&output.stdout));
        if !output.status.success() && !report.has_errors() {
            report.errors.push(failure_detail(&output));
        }
        Ok(report)
    }
}

/// Parse backend stdout into a report.
pub(crate) fn parse_generation_output(stdout: &str) -> GenerationReport {
    let mut report = GenerationReport::default();
    for line in stdout.lines() {
        let line = line.trim();
        if line.starts_with("generated:") {
            report.generated += 1;
        } else if let Some(message) = line.strip_prefix("error:") {
            report.errors.push(message.trim().to_string());
        }
    }
    report
}

fn failure_detail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let first = stderr.lines().map(str::trim).find(|l| !l.is_empty());
    match first {
        Some(line) => format!("{} ({line})", output.status),
        None => output.status.to_string(),
    }
}
