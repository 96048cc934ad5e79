//! Markdown rendering for issues and comments posted back to GitHub.

use super::{CarbonAnalysis, CarbonScore, LineThresholds, round4};

/// Context about a push, used only for display.
#[derive(Debug, Clone, Copy, Default)]
pub struct PushContext<'a> {
    pub repository: Option<&'a str>,
    pub git_ref: Option<&'a str>,
    pub pusher: Option<&'a str>,
    pub commit_count: usize,
}

const FOOTER: &str = "\n---\n_Estimated by CarbonFlow from line-change heuristics._\n";

/// Renders the body of the issue opened for a high-impact push.
pub fn push_issue_body(analysis: &CarbonAnalysis, context: &PushContext<'_>) -> String {
    let mut rows = Vec::new();
    if let Some(repository) = context.repository {
        rows.push(format!("| Repository | `{repository}` |"));
    }
    if let Some(git_ref) = context.git_ref {
        rows.push(format!("| Ref | `{git_ref}` |"));
    }
    if let Some(pusher) = context.pusher {
        rows.push(format!("| Pushed by | @{pusher} |"));
    }
    rows.push(format!("| Commits | {} |", context.commit_count));
    rows.push(format!("| Lines changed | {} |", analysis.total_lines));
    rows.push(format!(
        "| Estimated energy | {} kWh |",
        round4(analysis.energy_consumption)
    ));
    rows.push(format!(
        "| Estimated emissions | {} kg CO2 |",
        round4(analysis.carbon_emission)
    ));
    rows.push(format!(
        "| Carbon score | {} {} |",
        analysis.carbon_score.emoji(),
        analysis.carbon_score.as_str().to_uppercase()
    ));

    format!(
        "## 🌍 Carbon Impact Report\n\n\
         A recent push exceeded the configured energy threshold. Details below.\n\n\
         | Metric | Value |\n|---|---|\n{}\n{}{}",
        rows.join("\n"),
        format_recommendations(&analysis.recommendations),
        FOOTER
    )
}

/// Renders the comment posted on a pull request.
pub fn pull_request_comment(
    additions: u64,
    deletions: u64,
    score: CarbonScore,
    recommendations: &[String],
) -> String {
    let total = additions.saturating_add(deletions);
    let thresholds = LineThresholds::PULL_REQUEST;

    format!(
        "## {} Carbon Footprint: {}\n\n\
         This pull request changes **{total}** lines (+{additions} / -{deletions}).\n\n\
         Scoring: green up to {} lines, yellow up to {} lines, red above.\n{}{}",
        score.emoji(),
        score.as_str().to_uppercase(),
        thresholds.yellow_lines,
        thresholds.red_lines,
        format_recommendations(recommendations),
        FOOTER
    )
}

fn format_recommendations(recommendations: &[String]) -> String {
    if recommendations.is_empty() {
        return String::new();
    }
    let items: Vec<String> = recommendations.iter().map(|r| format!("- {r}")).collect();
    format!("\n### Recommendations\n\n{}\n", items.join("\n"))
}
