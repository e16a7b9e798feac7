use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::Utc;
use clap::Parser;
use tracing::{info, warn};

use expansion_analysis::adapters::{
    JsonReportRenderer, LocalReportStorage, MarkdownReportRenderer, ReferenceProblemSource,
    YamlProblemSource,
};
use expansion_analysis::application::{GenerateReportCommand, GenerateReportHandler};
use expansion_analysis::cli::{Cli, Commands, ReportArgs};
use expansion_analysis::config::{AppConfig, LoggingConfig};
use expansion_analysis::domain::problem::ProblemDocument;
use expansion_analysis::logging::setup_tracing;
use expansion_analysis::ports::{ProblemSource, ReportFormat, ReportRenderer};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Report(args) => run_report(&args),
        Commands::Init { path, force } => run_init(&path, force),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run_report(args: &ReportArgs) -> Result<(), Box<dyn Error>> {
    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply(&mut config);
    config.validate()?;
    setup_tracing(&config.logging)?;

    let settings = config.analysis.to_settings()?;
    let source: Box<dyn ProblemSource> = match &args.problem {
        Some(path) => Box::new(YamlProblemSource::new(path)),
        None => Box::new(ReferenceProblemSource),
    };
    let problem = source.load(settings.probability_tolerance)?;
    info!(source = %source.describe(), title = %problem.title, "Problem loaded");

    let renderer: Arc<dyn ReportRenderer> = match config.output.format {
        ReportFormat::Markdown => Arc::new(MarkdownReportRenderer::new()),
        ReportFormat::Json if config.output.pretty_json => Arc::new(JsonReportRenderer::pretty()),
        ReportFormat::Json => Arc::new(JsonReportRenderer::compact()),
    };

    let mut handler = GenerateReportHandler::new(renderer);
    if !args.stdout {
        handler = handler.with_storage(Arc::new(LocalReportStorage::new(
            config.output.directory.clone(),
        )));
    }

    let mut render_options = config.output.render_options();
    if render_options.include_metadata {
        render_options.generated_at = Some(Utc::now());
    }

    let result = handler.handle(GenerateReportCommand {
        problem,
        settings,
        render_options,
        file_stem: config.output.file_stem.clone(),
    })?;

    match &result.stored {
        Some(stored) => {
            println!("Report written to {}", stored.path.display());
            println!(
                "Recommended site: {} | Market study recommended: {}",
                result.report.recommendation.alternative,
                if result.report.information_value.recommend_study {
                    "yes"
                } else {
                    "no"
                }
            );
        }
        None => print!("{}", result.rendered),
    }

    Ok(())
}

fn run_init(path: &Path, force: bool) -> Result<(), Box<dyn Error>> {
    setup_tracing(&LoggingConfig::default())?;

    if path.exists() && !force {
        warn!(path = %path.display(), "Problem file already exists");
        return Err(format!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        )
        .into());
    }

    let document = ProblemDocument::reference()?;
    let yaml = YamlProblemSource::to_yaml(&document)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, yaml)?;

    info!(path = %path.display(), "Reference problem written");
    println!("Reference problem written to {}", path.display());
    Ok(())
}
