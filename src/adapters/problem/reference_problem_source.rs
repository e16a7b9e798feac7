//! Built-in reference problem as a ProblemSource.

use crate::domain::problem::{DecisionProblem, ProblemDocument};
use crate::ports::{ProblemSource, ProblemSourceError};

/// Serves the Caribbean-coast expansion case.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceProblemSource;

impl ProblemSource for ReferenceProblemSource {
    fn load(&self, tolerance: f64) -> Result<DecisionProblem, ProblemSourceError> {
        // Round-trip through the document so the configured tolerance applies.
        Ok(ProblemDocument::reference()?.into_problem(tolerance)?)
    }

    fn describe(&self) -> String {
        "built-in reference problem".to_string()
    }
}
