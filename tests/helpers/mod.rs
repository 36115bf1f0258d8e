#![allow(dead_code)]

use anyhow::Result;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub struct TestProject {
    pub dir: PathBuf,
}

impl TestProject {
    pub fn new(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn create_file(&self, path: &str, content: &str) -> Result<()> {
        let full_path = self.dir.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(full_path, content)?;
        Ok(())
    }

    pub fn write_manifest(&self, manifest: &Value) -> Result<()> {
        self.create_file("package.json", &manifest.to_string())
    }
}

pub fn create_npm_project(dir: &Path) -> Result<TestProject> {
    let project = TestProject::new(dir)?;
    project.write_manifest(&json!({
        "name": "npm-test",
        "scripts": {
            "start": "node index.js",
            "test": "true",
            "build": "tsc",
            "lint": "false"
        }
    }))?;
    Ok(project)
}

pub fn create_yarn_project(dir: &Path) -> Result<TestProject> {
    let project = TestProject::new(dir)?;
    project.write_manifest(&json!({
        "name": "yarn-test",
        "scripts": {
            "start": "node index.js",
            "test": "jest"
        }
    }))?;
    project.create_file("yarn.lock", "")?;
    Ok(project)
}

pub fn create_empty_scripts_project(dir: &Path) -> Result<TestProject> {
    let project = TestProject::new(dir)?;
    project.write_manifest(&json!({ "name": "no-scripts", "scripts": {} }))?;
    Ok(project)
}

pub fn create_malformed_project(dir: &Path) -> Result<TestProject> {
    let project = TestProject::new(dir)?;
    project.create_file("package.json", "{ \"scripts\": { \"build\": ")?;
    Ok(project)
}
