use indexmap::IndexMap;
use serde::Deserialize;
use std::{fs, io, path::Path, path::PathBuf};
use thiserror::Error;

pub const MANIFEST_FILE_NAME: &str = "package.json";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
struct PackageJson {
    #[serde(default)]
    scripts: Option<IndexMap<String, String>>,
}

/// The scripts declared in a project's `package.json`, in declaration order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Manifest {
    pub scripts: IndexMap<String, String>,
}

#[derive(Debug)]
pub enum ManifestLoad {
    Missing,
    Loaded(Manifest),
}

impl Manifest {
    pub fn load(project_dir: &Path) -> Result<ManifestLoad, ManifestError> {
        let path = project_dir.join(MANIFEST_FILE_NAME);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no manifest");
            return Ok(ManifestLoad::Missing);
        }

        let content = fs::read_to_string(&path).map_err(|source| ManifestError::Read {
            path: path.clone(),
            source,
        })?;
        let manifest = Self::parse(&content).map_err(|source| ManifestError::Parse {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(
            path = %path.display(),
            scripts = manifest.scripts.len(),
            "loaded manifest"
        );
        Ok(ManifestLoad::Loaded(manifest))
    }

    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        let package: PackageJson = serde_json::from_str(content)?;
        Ok(Self {
            scripts: package.scripts.unwrap_or_default(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    pub fn command(&self, name: &str) -> Option<&str> {
        self.scripts.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_manifest_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Manifest::load(dir.path()).unwrap(),
            ManifestLoad::Missing
        ));
    }

    #[test]
    fn keeps_declaration_order() {
        let manifest = Manifest::parse(
            r#"{"scripts": {"start": "node index.js", "build": "tsc", "alpha": "echo a"}}"#,
        )
        .unwrap();
        let names: Vec<_> = manifest.scripts.keys().map(String::as_str).collect();
        assert_eq!(names, ["start", "build", "alpha"]);
        assert_eq!(manifest.command("build"), Some("tsc"));
    }

    #[test]
    fn absent_and_empty_scripts_are_empty() {
        assert!(Manifest::parse(r#"{"name": "x"}"#).unwrap().is_empty());
        assert!(Manifest::parse(r#"{"scripts": {}}"#).unwrap().is_empty());
        assert!(Manifest::parse(r#"{"scripts": null}"#).unwrap().is_empty());
    }

    #[test]
    fn malformed_manifest_reports_the_path() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE_NAME), "{ not json").unwrap();

        let err = Manifest::load(dir.path()).unwrap_err();
        assert!(matches!(err, ManifestError::Parse { .. }));
        assert!(err.to_string().contains(MANIFEST_FILE_NAME));
    }

    #[test]
    fn non_string_script_is_a_parse_error() {
        assert!(Manifest::parse(r#"{"scripts": {"build": 3}}"#).is_err());
    }
}
