//! YAML Problem Source - Reads a ProblemDocument from a file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::problem::{DecisionProblem, ProblemDocument};
use crate::ports::{ProblemSource, ProblemSourceError};

/// Loads a decision problem from a YAML file.
#[derive(Debug, Clone)]
pub struct YamlProblemSource {
    path: PathBuf,
}

impl YamlProblemSource {
    /// Creates a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses a problem document from YAML text.
    pub fn parse(origin: &str, yaml: &str) -> Result<ProblemDocument, ProblemSourceError> {
        serde_yaml::from_str(yaml).map_err(|e| ProblemSourceError::parse(origin, e.to_string()))
    }

    /// Serializes a problem document to YAML text.
    pub fn to_yaml(document: &ProblemDocument) -> Result<String, ProblemSourceError> {
        serde_yaml::to_string(document)
            .map_err(|e| ProblemSourceError::parse("problem document", e.to_string()))
    }
}

impl ProblemSource for YamlProblemSource {
    fn load(&self, tolerance: f64) -> Result<DecisionProblem, ProblemSourceError> {
        let origin = self.path.display().to_string();
        let yaml = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ProblemSourceError::NotFound {
                path: origin.clone(),
            },
            _ => ProblemSourceError::unreadable(&origin, e.to_string()),
        })?;

        let document = Self::parse(&origin, &yaml)?;
        let problem = document.into_problem(tolerance)?;

        debug!(
            path = %origin,
            alternatives = problem.costs.len(),
            scenarios = problem.scenarios.len(),
            "Problem loaded"
        );

        Ok(problem)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
