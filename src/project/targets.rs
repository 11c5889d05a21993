//! Bundle target definitions (`templates.cfg`).
//!
//! Each non-comment line reads `name ; file ; folder ; template ; type` where
//! the type is `*` (one file per entity), `1` (a single file) or `R` (a static
//! resource). A missing type means `*`.

use crate::error::ProjectError;
use std::path::Path;

/// Generation cardinality of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    PerEntity,
    Once,
    Resource,
}

impl TargetKind {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "" | "*" => Some(Self::PerEntity),
            "1" => Some(Self::Once),
            "R" | "r" => Some(Self::Resource),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::PerEntity => "*",
            Self::Once => "1",
            Self::Resource => "R",
        }
    }
}

/// One line of a bundle's target definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDefinition {
    pub name: String,
    pub file: String,
    pub folder: String,
    pub template: String,
    pub kind: TargetKind,
}

/// Templates and resources declared by a bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetDefinitions {
    pub templates: Vec<TargetDefinition>,
    pub resources: Vec<TargetDefinition>,
}

impl TargetDefinitions {
    /// Templates whose template file name contains any of `patterns`.
    ///
    /// `*` (or no pattern at all) selects every template.
    pub fn select_templates(&self, patterns: &[&str]) -> Vec<&TargetDefinition> {
        if patterns.is_empty() || patterns.contains(&"*") {
            return self.templates.iter().collect();
        }
        self.templates
            .iter()
            .filter(|t| patterns.iter().any(|p| t.template.contains(p)))
            .collect()
    }
}

/// Parse `templates.cfg` content. `path` only labels errors.
pub fn parse_target_definitions(
    path: &Path,
    content: &str,
) -> Result<TargetDefinitions, ProjectError> {
    let mut definitions = TargetDefinitions::default();
    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split(';').map(str::trim).collect();
        if fields.len() != 4 && fields.len() != 5 {
            return Err(invalid(
                path,
                index,
                format!("expected 4 or 5 fields, found {}", fields.len()),
            ));
        }
        let kind_raw = fields.get(4).copied().unwrap_or("");
        let kind = TargetKind::parse(kind_raw)
            .ok_or_else(|| invalid(path, index, format!("unknown target type `{kind_raw}`")))?;
        if fields[3].is_empty() {
            return Err(invalid(path, index, "missing template".to_string()));
        }
        let target = TargetDefinition {
            name: fields[0].to_string(),
            file: fields[1].to_string(),
            folder: fields[2].to_string(),
            template: fields[3].to_string(),
            kind,
        };
        match kind {
            TargetKind::Resource => definitions.resources.push(target),
            TargetKind::PerEntity | TargetKind::Once => definitions.templates.push(target),
        }
    }
    Ok(definitions)
}

fn invalid(path: &Path, index: usize, reason: String) -> ProjectError {
    ProjectError::InvalidTargets {
        path: path.to_path_buf(),
        line: index + 1,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# Java bundle
Entity class ; ${BEANNAME}.java ; ${SRC}/${ROOT_PKG}/bean ; bean.vm ; *
Pom          ; pom.xml          ;                       ; pom.vm
Readme       ; README.md        ;                       ; readme.vm ; 1

Static files ; static           ; src/main/resources    ; static    ; R
";

    #[test]
    fn parses_templates_and_resources() {
        let defs = parse_target_definitions(Path::new("templates.cfg"), SAMPLE).unwrap();
        assert_eq!(defs.templates.len(), 3);
        assert_eq!(defs.resources.len(), 1);
        assert_eq!(defs.templates[0].name, "Entity class");
        assert_eq!(defs.templates[0].kind, TargetKind::PerEntity);
        assert_eq!(defs.templates[1].kind, TargetKind::PerEntity);
        assert_eq!(defs.templates[1].folder, "");
        assert_eq!(defs.templates[2].kind, TargetKind::Once);
        assert_eq!(defs.resources[0].template, "static");
    }

    #[test]
    fn rejects_bad_field_count_with_line_number() {
        let err = parse_target_definitions(Path::new("b/templates.cfg"), "# c\na ; b\n")
            .unwrap_err();
        match err {
            ProjectError::InvalidTargets { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_unknown_type() {
        let err =
            parse_target_definitions(Path::new("t.cfg"), "a ; b ; c ; d.vm ; X").unwrap_err();
        assert!(err.to_string().contains("unknown target type `X`"), "{err}");
    }

    #[test]
    fn select_templates_by_pattern() {
        let defs = parse_target_definitions(Path::new("templates.cfg"), SAMPLE).unwrap();
        assert_eq!(defs.select_templates(&["*"]).len(), 3);
        assert_eq!(defs.select_templates(&[]).len(), 3);
        let picked = defs.select_templates(&["pom", "readme"]);
        let names: Vec<_> = picked.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Pom", "Readme"]);
        assert!(defs.select_templates(&["nothing"]).is_empty());
    }
}
