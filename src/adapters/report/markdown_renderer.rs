//! Markdown report renderer.
//!
//! Lays the report out in five sections: base data, decision criteria,
//! decision tree, the study comparison and the recommendations.

use crate::domain::analysis::{
    AnalysisReport, Criterion, CriterionResult, ExpectedValueBreakdown, StudyBaseline,
};
use crate::ports::{RenderError, RenderOptions, ReportFormat, ReportRenderer};

/// Markdown implementation of ReportRenderer.
#[derive(Debug, Clone, Default)]
pub struct MarkdownReportRenderer;

impl MarkdownReportRenderer {
    /// Creates a new Markdown renderer.
    pub fn new() -> Self {
        Self
    }

    fn render_header(&self, report: &AnalysisReport, options: &RenderOptions) -> String {
        let mut header = format!("# {}\n\n", options.title(report));

        header.push_str(&format!("> **Currency:** {}", report.problem.currency));
        if let Some(investment) = &report.problem.initial_investment {
            header.push_str(&format!(
                " | **Initial investment:** {} {}",
                format_amount(investment.amount),
                investment.currency
            ));
        }
        header.push('\n');

        if let Some(at) = options.timestamp() {
            header.push_str(&format!(
                "> **Generated:** {}\n",
                at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }
        header.push('\n');
        header
    }

    /// Generates the Base Data section.
    fn render_base_data(&self, report: &AnalysisReport) -> String {
        let problem = &report.problem;
        let mut section = String::from("## 1. Base Data\n\n");

        // Cost components, one column per distinct component name
        let mut components: Vec<&str> = Vec::new();
        for summary in &problem.costs {
            for component in &summary.costs.components {
                if !components.contains(&component.name.as_str()) {
                    components.push(component.name.as_str());
                }
            }
        }

        section.push_str("### Monthly Operating Costs\n\n");
        let mut headers = vec!["Alternative".to_string()];
        headers.extend(components.iter().map(|c| title_case(c)));
        headers.push("Total".to_string());
        let rows = problem
            .costs
            .iter()
            .map(|summary| {
                let mut row = vec![summary.costs.alternative.to_string()];
                for name in &components {
                    let cell = summary
                        .costs
                        .components
                        .iter()
                        .find(|c| c.name == *name)
                        .map(|c| format_amount(c.amount))
                        .unwrap_or_else(|| "-".to_string());
                    row.push(cell);
                }
                row.push(format_amount(summary.total));
                row
            })
            .collect::<Vec<_>>();
        section.push_str(&table(&headers, &rows));

        section.push_str("### Projected Monthly Revenue\n\n");
        let headers = scenario_headers(report, "Alternative", "", &[]);
        let rows = problem
            .revenues
            .iter()
            .map(|revenue| {
                let mut row = vec![revenue.alternative.to_string()];
                for scenario in &problem.scenarios {
                    row.push(
                        revenue
                            .amount(&scenario.id)
                            .map(format_amount)
                            .unwrap_or_else(|| "-".to_string()),
                    );
                }
                row
            })
            .collect::<Vec<_>>();
        section.push_str(&table(&headers, &rows));

        section.push_str("### Scenario Probabilities\n\n");
        let headers = vec![
            "Scenario".to_string(),
            "Prior".to_string(),
            "Posterior (with study)".to_string(),
        ];
        let rows = problem
            .scenarios
            .iter()
            .map(|scenario| {
                vec![
                    scenario.label.clone(),
                    problem
                        .prior
                        .probability_of(&scenario.id)
                        .map(|p| format_percent(p.value()))
                        .unwrap_or_else(|| "-".to_string()),
                    problem
                        .posterior
                        .probability_of(&scenario.id)
                        .map(|p| format_percent(p.value()))
                        .unwrap_or_else(|| "-".to_string()),
                ]
            })
            .collect::<Vec<_>>();
        section.push_str(&table(&headers, &rows));

        section.push_str(&format!(
            "**Market study cost:** {}\n\n",
            format_amount(problem.study_cost)
        ));
        section
    }

    /// Generates the Decision Criteria section.
    fn render_criteria(&self, report: &AnalysisReport) -> String {
        let mut section = String::from("## 2. Decision Criteria\n\n");

        section.push_str("### Payoff Matrix\n\n");
        section.push_str("*Payoff = projected revenue - total monthly cost*\n\n");
        let headers = scenario_headers(report, "Alternative", "", &[]);
        let rows = report
            .payoff_matrix
            .alternative_ids()
            .iter()
            .zip(report.payoff_matrix.rows())
            .map(|(alternative, payoffs)| {
                let mut row = vec![alternative.to_string()];
                row.extend(payoffs.iter().map(|p| format_amount(*p)));
                row
            })
            .collect::<Vec<_>>();
        section.push_str(&table(&headers, &rows));

        for (index, result) in report.criteria.iter().enumerate() {
            section.push_str(&format!(
                "### 2.{} {}\n\n",
                index + 1,
                criterion_heading(result)
            ));
            section.push_str(&format!("*{}*\n\n", result.criterion.description()));

            if result.criterion == Criterion::Savage {
                section.push_str(&self.render_regret(report));
            } else {
                let headers = vec![
                    "Alternative".to_string(),
                    score_label(result.criterion).to_string(),
                ];
                let rows = result
                    .scores
                    .iter()
                    .map(|s| vec![s.alternative.to_string(), format_amount(s.score)])
                    .collect::<Vec<_>>();
                section.push_str(&table(&headers, &rows));
            }

            section.push_str(&format!(
                "**Best alternative:** {} ({})\n\n",
                result.best,
                format_amount(result.best_score)
            ));
        }

        section.push_str("### Summary\n\n");
        let headers = vec![
            "Criterion".to_string(),
            "Best Alternative".to_string(),
            "Score".to_string(),
        ];
        let rows = report
            .criteria
            .iter()
            .map(|r| {
                vec![
                    criterion_heading(r),
                    r.best.to_string(),
                    format_amount(r.best_score),
                ]
            })
            .collect::<Vec<_>>();
        section.push_str(&table(&headers, &rows));
        section
    }

    fn render_regret(&self, report: &AnalysisReport) -> String {
        let regret = &report.regret;
        let mut out = String::new();

        let mut best_row = vec!["*Best payoff*".to_string()];
        best_row.extend(regret.column_max.iter().map(|v| format_amount(*v)));
        best_row.push(String::new());

        let headers = scenario_headers(report, "Alternative", "Regret ", &["Max Regret"]);
        let mut rows = vec![best_row];
        for ((alternative, regrets), max) in regret
            .alternative_ids
            .iter()
            .zip(&regret.regrets)
            .zip(regret.max_regrets())
        {
            let mut row = vec![alternative.to_string()];
            row.extend(regrets.iter().map(|v| format_amount(*v)));
            row.push(format_amount(max));
            rows.push(row);
        }
        out.push_str(&table(&headers, &rows));
        out
    }

    /// Generates the Decision Tree section (no study, prior probabilities).
    fn render_decision_tree(&self, report: &AnalysisReport) -> String {
        let voi = &report.information_value;
        let mut section = String::from("## 3. Decision Tree\n\n");

        section.push_str("### Expected Value Without Study (prior probabilities)\n\n");
        let headers = scenario_headers(report, "Alternative", "EV ", &["Total Expected Value"]);
        section.push_str(&table(&headers, &breakdown_rows(&voi.prior_breakdown, false)));

        section.push_str(&format!(
            "**Best decision without study:** {} ({})\n\n",
            voi.best_prior.alternative,
            format_amount(voi.best_prior.value)
        ));

        section.push_str("### Tree Structure\n\n");
        section.push_str("```text\n");
        section.push_str("DECISION\n");
        let branches = &voi.prior_tree.branches;
        for (index, branch) in branches.iter().enumerate() {
            let last_branch = index + 1 == branches.len();
            let (branch_mark, indent) = if last_branch {
                ("└──", "    ")
            } else {
                ("├──", "│   ")
            };
            section.push_str(&format!(
                "{} {} (EV {})\n",
                branch_mark,
                branch.alternative,
                format_amount(branch.expected_value)
            ));
            for (leaf_index, leaf) in branch.outcomes.iter().enumerate() {
                let leaf_mark = if leaf_index + 1 == branch.outcomes.len() {
                    "└──"
                } else {
                    "├──"
                };
                section.push_str(&format!(
                    "{}{} {} ({}) → {}\n",
                    indent,
                    leaf_mark,
                    report.problem.scenario_label(leaf.scenario.as_str()),
                    format_percent(leaf.probability),
                    format_amount(leaf.payoff)
                ));
            }
        }
        section.push_str("```\n\n");
        section
    }

    /// Generates the With Study section.
    fn render_with_study(&self, report: &AnalysisReport) -> String {
        let voi = &report.information_value;
        let mut section = String::from("## 4. With Market Study\n\n");

        section.push_str(&format!(
            "A market study costing {} updates the scenario probabilities to the posterior.\n\n",
            format_amount(voi.study_cost)
        ));

        section.push_str("### Expected Value With Study (posterior probabilities)\n\n");
        let headers = scenario_headers(
            report,
            "Alternative",
            "EV ",
            &["Total Expected Value", "Net of Study"],
        );
        section.push_str(&table(&headers, &breakdown_rows(&voi.posterior_breakdown, true)));
        section.push_str("*Net of study = total expected value - study cost*\n\n");

        section.push_str(&format!(
            "**Best decision with study:** {} ({} net)\n\n",
            voi.best_posterior_net.alternative,
            format_amount(voi.best_posterior_net.value)
        ));

        section.push_str("### Comparison\n\n");
        let headers = vec![
            "Option".to_string(),
            "Alternative".to_string(),
            "Value".to_string(),
        ];
        let baseline_label = match voi.baseline {
            StudyBaseline::Prior => "Baseline: best without study (prior)",
            StudyBaseline::PosteriorGross => "Baseline: best without study (posterior)",
        };
        let rows = vec![
            vec![
                "Best without study (prior)".to_string(),
                voi.best_prior.alternative.to_string(),
                format_amount(voi.best_prior.value),
            ],
            vec![
                "Best without study (posterior)".to_string(),
                voi.best_posterior_gross.alternative.to_string(),
                format_amount(voi.best_posterior_gross.value),
            ],
            vec![
                "Best with study (net)".to_string(),
                voi.best_posterior_net.alternative.to_string(),
                format_amount(voi.best_posterior_net.value),
            ],
            vec![
                baseline_label.to_string(),
                String::new(),
                format_amount(voi.baseline_value),
            ],
            vec![
                "Difference (baseline - with study)".to_string(),
                String::new(),
                format_amount(voi.delta),
            ],
        ];
        section.push_str(&table(&headers, &rows));

        let verdict = if voi.recommend_study {
            "The market study IS recommended"
        } else {
            "The market study is NOT recommended"
        };
        section.push_str(&format!("**Recommendation:** {}\n\n", verdict));
        section
    }

    /// Generates the Recommendations section.
    fn render_recommendations(&self, report: &AnalysisReport, options: &RenderOptions) -> String {
        let recommendation = &report.recommendation;
        let mut section = String::from("## 5. Recommendations\n\n");

        section.push_str("### Main Recommendation\n\n");
        section.push_str(&format!(
            "Select **{}**: it has the highest expected value ({}) \
             under the prior probabilities.\n\n",
            recommendation.alternative,
            format_amount(recommendation.expected_value)
        ));
        if recommendation.supporting_criteria.is_empty() {
            section.push_str("No other criterion selects the same alternative.\n\n");
        } else {
            let names: Vec<&str> = recommendation
                .supporting_criteria
                .iter()
                .map(|c| c.name())
                .collect();
            section.push_str(&format!(
                "Selected by {} of {} criteria: {}.\n\n",
                names.len(),
                Criterion::ALL.len(),
                names.join(", ")
            ));
        }

        section.push_str("### Criteria Consensus\n\n");
        let headers = vec![
            "Alternative".to_string(),
            "Selected By".to_string(),
            "Count".to_string(),
        ];
        let rows = report
            .consensus
            .iter()
            .map(|entry| {
                let names: Vec<&str> = entry.criteria.iter().map(|c| c.name()).collect();
                vec![
                    entry.alternative.to_string(),
                    if names.is_empty() {
                        "-".to_string()
                    } else {
                        names.join(", ")
                    },
                    names.len().to_string(),
                ]
            })
            .collect::<Vec<_>>();
        section.push_str(&table(&headers, &rows));

        section.push_str("### Analysis Information\n\n");
        section.push_str(&format!(
            "- **Alternatives evaluated:** {}\n",
            report.payoff_matrix.alternative_count()
        ));
        section.push_str(&format!(
            "- **Scenarios evaluated:** {}\n",
            report.payoff_matrix.scenario_count()
        ));
        section.push_str(&format!(
            "- **Methods applied:** {} decision criteria + decision tree\n",
            Criterion::ALL.len()
        ));
        section.push_str(&format!(
            "- **Hurwicz coefficient:** {}\n",
            report.settings.hurwicz_alpha
        ));
        section.push_str(&format!("- **Tie-break:** {}\n", report.settings.tie_break));
        section.push_str(&format!(
            "- **Study baseline:** {}\n",
            report.settings.study_baseline
        ));
        if let Some(investment) = &report.problem.initial_investment {
            section.push_str(&format!(
                "- **Initial investment evaluated:** {} {}\n",
                format_amount(investment.amount),
                investment.currency
            ));
        }
        if let Some(at) = options.timestamp() {
            section.push_str(&format!("- **Analysis date:** {}\n", at.format("%Y-%m-%d")));
        }
        section.push('\n');
        section
    }
}

impl ReportRenderer for MarkdownReportRenderer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }

    fn render(
        &self,
        report: &AnalysisReport,
        options: &RenderOptions,
    ) -> Result<String, RenderError> {
        if report.payoff_matrix.is_empty() {
            return Err(RenderError::missing_data("payoff_matrix"));
        }

        let mut doc = self.render_header(report, options);
        doc.push_str(&self.render_base_data(report));
        doc.push_str(&self.render_criteria(report));
        doc.push_str(&self.render_decision_tree(report));
        doc.push_str(&self.render_with_study(report));
        doc.push_str(&self.render_recommendations(report, options));
        Ok(doc)
    }
}

fn criterion_heading(result: &CriterionResult) -> String {
    match result.parameter {
        Some(alpha) if result.criterion == Criterion::Hurwicz => {
            format!("{} (α = {})", result.criterion, alpha)
        }
        _ => result.criterion.name().to_string(),
    }
}

fn score_label(criterion: Criterion) -> &'static str {
    match criterion {
        Criterion::Laplace => "Average Payoff",
        Criterion::Maximax => "Best Outcome",
        Criterion::Maximin => "Worst Outcome",
        Criterion::Hurwicz => "Hurwicz Value",
        Criterion::Savage => "Max Regret",
        Criterion::ExpectedValue => "Expected Value",
    }
}

/// Header row: first column, one column per scenario label, then trailing columns.
fn scenario_headers(
    report: &AnalysisReport,
    first: &str,
    prefix: &str,
    trailing: &[&str],
) -> Vec<String> {
    let mut headers = vec![first.to_string()];
    headers.extend(
        report
            .problem
            .scenarios
            .iter()
            .map(|s| format!("{}{}", prefix, s.label)),
    );
    headers.extend(trailing.iter().map(|t| t.to_string()));
    headers
}

fn breakdown_rows(breakdowns: &[ExpectedValueBreakdown], with_net: bool) -> Vec<Vec<String>> {
    breakdowns
        .iter()
        .map(|b| {
            let mut row = vec![b.alternative.to_string()];
            row.extend(b.contributions.iter().map(|c| format_amount(c.weighted)));
            row.push(format_amount(b.expected_value));
            if with_net {
                row.push(format_amount(b.net_value));
            }
            row
        })
        .collect()
}

fn table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut out = format!("| {} |\n", headers.join(" | "));
    out.push_str(&format!(
        "|{}|\n",
        headers.iter().map(|_| "---").collect::<Vec<_>>().join("|")
    ));
    for row in rows {
        out.push_str(&format!("| {} |\n", row.join(" | ")));
    }
    out.push('\n');
    out
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Formats a monetary amount rounded to whole units with thousands separators.
pub(crate) fn format_amount(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Formats a probability as a percentage with one decimal.
pub(crate) fn format_percent(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}
