//! Problem source adapters.

mod reference_problem_source;
mod yaml_problem_source;

pub use reference_problem_source::ReferenceProblemSource;
pub use yaml_problem_source::YamlProblemSource;
