use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::domain::analysis::{StudyBaseline, TieBreak};
use crate::ports::ReportFormat;

/// Default path written by `init`.
pub const DEFAULT_PROBLEM_PATH: &str = "expansion_problem.yaml";

#[derive(Parser, Debug)]
#[command(name = "expansion-analysis")]
#[command(
    about = "Decision analysis under uncertainty and risk for regional site selection",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the analysis and write the report
    Report(ReportArgs),

    /// Write the reference problem as an editable YAML file
    Init {
        /// Destination file
        #[arg(short, long, default_value = DEFAULT_PROBLEM_PATH)]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    /// Problem definition (YAML); the built-in reference problem when omitted
    #[arg(short, long)]
    pub problem: Option<PathBuf>,

    /// Configuration file (YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Directory the report is written into
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Print the report instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    /// Hurwicz optimism coefficient in [0, 1]
    #[arg(long)]
    pub hurwicz_alpha: Option<f64>,

    /// Resolution of equally scored alternatives
    #[arg(long, value_enum)]
    pub tie_break: Option<TieBreakArg>,

    /// Value the net-of-study result is compared against
    #[arg(long, value_enum)]
    pub baseline: Option<BaselineArg>,

    /// Omit the generation timestamp
    #[arg(long)]
    pub no_metadata: bool,
}

impl ReportArgs {
    /// Applies command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(format) = self.format {
            config.output.format = format.into();
        }
        if let Some(dir) = &self.output_dir {
            config.output.directory = dir.clone();
        }
        if let Some(alpha) = self.hurwicz_alpha {
            config.analysis.hurwicz_alpha = alpha;
        }
        if let Some(tie_break) = self.tie_break {
            config.analysis.tie_break = tie_break.into();
        }
        if let Some(baseline) = self.baseline {
            config.analysis.study_baseline = baseline.into();
        }
        if self.no_metadata {
            config.output.include_metadata = false;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Markdown document
    Markdown,
    /// JSON bundle
    Json,
}

impl From<FormatArg> for ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Markdown => ReportFormat::Markdown,
            FormatArg::Json => ReportFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TieBreakArg {
    /// Earliest alternative in input order (default)
    FirstInOrder,
    /// Alternative whose name sorts first
    Lexicographic,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::FirstInOrder => TieBreak::FirstInOrder,
            TieBreakArg::Lexicographic => TieBreak::Lexicographic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BaselineArg {
    /// Best expected value under the prior
    Prior,
    /// Best gross expected value under the posterior (default)
    PosteriorGross,
}

impl From<BaselineArg> for StudyBaseline {
    fn from(arg: BaselineArg) -> Self {
        match arg {
            BaselineArg::Prior => StudyBaseline::Prior,
            BaselineArg::PosteriorGross => StudyBaseline::PosteriorGross,
        }
    }
}
