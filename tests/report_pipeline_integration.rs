//! Integration tests for the report pipeline.
//!
//! These tests verify the end-to-end flow:
//! 1. A problem source yields a validated decision problem
//! 2. The handler runs the analysis and renders the report
//! 3. Local storage writes the rendered report atomically
//!
//! Uses the built-in reference problem and temporary directories.

use std::fs;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use expansion_analysis::adapters::{
    JsonReportRenderer, LocalReportStorage, MarkdownReportRenderer, ReferenceProblemSource,
    YamlProblemSource,
};
use expansion_analysis::application::{GenerateReportCommand, GenerateReportHandler};
use expansion_analysis::domain::analysis::{
    assemble_report, AnalysisReport, AnalysisSettings, Criterion, StudyBaseline,
};
use expansion_analysis::domain::foundation::{AlternativeId, ErrorCode};
use expansion_analysis::domain::problem::{
    DecisionProblem, ProblemDocument, DEFAULT_PROBABILITY_TOLERANCE,
};
use expansion_analysis::ports::{ProblemSource, RenderOptions, ReportFormat};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn aid(id: &str) -> AlternativeId {
    AlternativeId::new(id).unwrap()
}

fn reference_problem() -> DecisionProblem {
    ReferenceProblemSource
        .load(DEFAULT_PROBABILITY_TOLERANCE)
        .unwrap()
}

fn command(settings: AnalysisSettings, render_options: RenderOptions) -> GenerateReportCommand {
    GenerateReportCommand {
        problem: reference_problem(),
        settings,
        render_options,
        file_stem: "expansion_analysis".to_string(),
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

// =============================================================================
// Reference Results
// =============================================================================

#[test]
fn reference_problem_yields_expected_winners() {
    let report = assemble_report(&reference_problem(), &AnalysisSettings::default()).unwrap();

    assert_eq!(report.criteria.get(Criterion::Laplace).best, aid("Santa Marta"));
    assert_eq!(report.criteria.get(Criterion::Maximax).best, aid("Cartagena"));
    assert_eq!(report.criteria.get(Criterion::Maximin).best, aid("Barranquilla"));
    assert_eq!(report.criteria.get(Criterion::Hurwicz).best, aid("Cartagena"));
    assert_eq!(report.criteria.get(Criterion::Savage).best, aid("Santa Marta"));
    assert_eq!(report.criteria.get(Criterion::ExpectedValue).best, aid("Santa Marta"));
}

#[test]
fn reference_payoffs_and_costs() {
    let report = assemble_report(&reference_problem(), &AnalysisSettings::default()).unwrap();
    let santa_marta = aid("Santa Marta");

    let summary = report
        .problem
        .costs
        .iter()
        .find(|c| c.costs.alternative == santa_marta)
        .unwrap();
    assert!(close(summary.total, 9_500_000.0));

    let high = &report.payoff_matrix.scenario_ids()[0];
    assert!(close(report.payoff_matrix.get(&santa_marta, high).unwrap(), 5_500_000.0));
}

#[test]
fn reference_study_is_not_recommended_by_default() {
    let report = assemble_report(&reference_problem(), &AnalysisSettings::default()).unwrap();
    let voi = &report.information_value;

    assert_eq!(voi.baseline, StudyBaseline::PosteriorGross);
    assert!(!voi.recommend_study);
    assert!(close(voi.best_posterior_net.value, 300_000.0));
    assert!(close(voi.baseline_value, 1_300_000.0));
    assert!(close(voi.delta, 1_000_000.0));
}

#[test]
fn prior_baseline_recommends_reference_study() {
    let settings = AnalysisSettings {
        study_baseline: StudyBaseline::Prior,
        ..Default::default()
    };
    let report = assemble_report(&reference_problem(), &settings).unwrap();

    assert!(report.information_value.recommend_study);
    assert!(close(report.information_value.delta, -700_000.0));
}

#[test]
fn recommendation_and_consensus() {
    let report = assemble_report(&reference_problem(), &AnalysisSettings::default()).unwrap();

    assert_eq!(report.recommendation.alternative, aid("Santa Marta"));
    assert_eq!(
        report.recommendation.supporting_criteria,
        vec![Criterion::Laplace, Criterion::Savage, Criterion::ExpectedValue]
    );

    let cartagena = report
        .consensus
        .iter()
        .find(|e| e.alternative == aid("Cartagena"))
        .unwrap();
    assert_eq!(cartagena.criteria, vec![Criterion::Maximax, Criterion::Hurwicz]);
}

#[test]
fn pipeline_is_idempotent() {
    let problem = reference_problem();
    let settings = AnalysisSettings::default();

    let first = assemble_report(&problem, &settings).unwrap();
    let second = assemble_report(&problem, &settings).unwrap();

    assert_eq!(first, second);
}

// =============================================================================
// Handler + Storage
// =============================================================================

#[test]
fn markdown_report_is_written_to_disk() {
    let dir = TempDir::new().unwrap();
    let handler = GenerateReportHandler::new(Arc::new(MarkdownReportRenderer::new()))
        .with_storage(Arc::new(LocalReportStorage::new(dir.path().join("reports"))));

    let at = Utc.with_ymd_and_hms(2024, 5, 10, 8, 0, 0).unwrap();
    let result = handler
        .handle(command(
            AnalysisSettings::default(),
            RenderOptions::with_metadata(at),
        ))
        .unwrap();

    let stored = result.stored.unwrap();
    assert_eq!(stored.path, dir.path().join("reports").join("expansion_analysis.md"));
    assert_eq!(stored.checksum.len(), 64);

    let on_disk = fs::read_to_string(&stored.path).unwrap();
    assert_eq!(on_disk, result.rendered);
    assert!(on_disk.starts_with("# Regional Expansion - Caribbean Coast\n"));
    assert!(on_disk.contains("2024-05-10 08:00:00 UTC"));
}

#[test]
fn json_report_round_trips_through_serde() {
    let dir = TempDir::new().unwrap();
    let handler = GenerateReportHandler::new(Arc::new(JsonReportRenderer::pretty()))
        .with_storage(Arc::new(LocalReportStorage::new(dir.path())));

    let result = handler
        .handle(command(AnalysisSettings::default(), RenderOptions::default()))
        .unwrap();

    let stored = result.stored.unwrap();
    assert!(stored.path.ends_with("expansion_analysis.json"));

    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&stored.path).unwrap()).unwrap();
    assert_eq!(parsed["recommendation"]["alternative"], "Santa Marta");
    assert_eq!(parsed["settings"]["hurwicz_alpha"], 0.6);
    assert_eq!(parsed["settings"]["study_baseline"], "posterior_gross");
}

#[test]
fn serialized_report_reloads_with_validated_inputs() {
    let report = assemble_report(&reference_problem(), &AnalysisSettings::default()).unwrap();
    let value = serde_json::to_value(&report).unwrap();

    let reloaded: AnalysisReport = serde_json::from_value(value).unwrap();

    assert_eq!(reloaded.payoff_matrix, report.payoff_matrix);
    assert_eq!(reloaded.problem.prior, report.problem.prior);
    assert_eq!(reloaded.recommendation.alternative, aid("Santa Marta"));
}

#[test]
fn tampered_report_is_rejected_on_load() {
    let report = assemble_report(&reference_problem(), &AnalysisSettings::default()).unwrap();

    let mut ragged = serde_json::to_value(&report).unwrap();
    ragged["payoff_matrix"]["payoffs"][1] = serde_json::json!([1.0]);
    assert!(serde_json::from_value::<AnalysisReport>(ragged).is_err());

    let mut inflated = serde_json::to_value(&report).unwrap();
    inflated["problem"]["prior"]["entries"][0][1] = serde_json::json!(0.9);
    assert!(serde_json::from_value::<AnalysisReport>(inflated).is_err());
}

#[test]
fn rendered_markdown_is_stable_without_metadata() {
    let handler = GenerateReportHandler::new(Arc::new(MarkdownReportRenderer::new()));

    let first = handler
        .handle(command(AnalysisSettings::default(), RenderOptions::default()))
        .unwrap();
    let second = handler
        .handle(command(AnalysisSettings::default(), RenderOptions::default()))
        .unwrap();

    assert_eq!(first.rendered, second.rendered);
    assert!(first.stored.is_none());
}

#[test]
fn invalid_stem_surfaces_storage_error() {
    let dir = TempDir::new().unwrap();
    let handler = GenerateReportHandler::new(Arc::new(MarkdownReportRenderer::new()))
        .with_storage(Arc::new(LocalReportStorage::new(dir.path())));

    let mut cmd = command(AnalysisSettings::default(), RenderOptions::default());
    cmd.file_stem = "../outside".to_string();

    let err = handler.handle(cmd).unwrap_err();
    assert_eq!(err.code, ErrorCode::StorageFailed);
}

// =============================================================================
// YAML Problem Files
// =============================================================================

#[test]
fn yaml_problem_file_drives_the_pipeline() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("problem.yaml");
    let yaml = YamlProblemSource::to_yaml(&ProblemDocument::reference().unwrap()).unwrap();
    fs::write(&path, yaml).unwrap();

    let problem = YamlProblemSource::new(&path)
        .load(DEFAULT_PROBABILITY_TOLERANCE)
        .unwrap();
    let report = assemble_report(&problem, &AnalysisSettings::default()).unwrap();

    assert_eq!(report.recommendation.alternative, aid("Santa Marta"));
}

#[test]
fn edited_yaml_problem_changes_the_result() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("problem.yaml");
    let mut document = ProblemDocument::reference().unwrap();
    // Certain high demand favours the site with the best high-demand payoff.
    for probability in document.prior.values_mut() {
        *probability = 0.0;
    }
    document.prior.insert("high".to_string(), 1.0);
    fs::write(&path, YamlProblemSource::to_yaml(&document).unwrap()).unwrap();

    let problem = YamlProblemSource::new(&path)
        .load(DEFAULT_PROBABILITY_TOLERANCE)
        .unwrap();
    let report = assemble_report(&problem, &AnalysisSettings::default()).unwrap();

    assert_eq!(report.recommendation.alternative, aid("Cartagena"));
    assert!(close(report.recommendation.expected_value, 5_700_000.0));
}

#[test]
fn missing_problem_file_maps_to_problem_not_found() {
    let dir = TempDir::new().unwrap();
    let source = YamlProblemSource::new(dir.path().join("absent.yaml"));

    let err: expansion_analysis::domain::foundation::DomainError =
        source.load(DEFAULT_PROBABILITY_TOLERANCE).unwrap_err().into();

    assert_eq!(err.code, ErrorCode::ProblemNotFound);
}

#[test]
fn report_format_extension_matches_renderer() {
    use expansion_analysis::ports::ReportRenderer;

    assert_eq!(MarkdownReportRenderer::new().format(), ReportFormat::Markdown);
    assert_eq!(JsonReportRenderer::compact().format().extension(), "json");
}

#[test]
fn bundled_demo_problem_matches_reference() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("demos")
        .join("reference_problem.yaml");

    let problem = YamlProblemSource::new(path)
        .load(DEFAULT_PROBABILITY_TOLERANCE)
        .unwrap();

    assert_eq!(problem, DecisionProblem::reference().unwrap());
}
