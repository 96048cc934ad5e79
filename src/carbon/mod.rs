//! Carbon footprint heuristics.
//!
//! Estimates are linear in the number of changed lines. There are two
//! independent classification schemes:
//!
//! - [`EnergyThresholds`] classifies the estimated energy of a push in kWh.
//!   The breakpoints are configurable.
//! - [`LineThresholds`] classifies the raw change count of a pull request
//!   against fixed breakpoints.
//!
//! The two are kept as distinct types so that one can never be passed where
//! the other is expected.

mod render;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use render::{PushContext, pull_request_comment, push_issue_body};

/// Energy attributed to each added line, in kWh.
pub const KWH_PER_ADDED_LINE: f64 = 0.001;

/// Energy attributed to each deleted line, in kWh.
pub const KWH_PER_DELETED_LINE: f64 = 0.0005;

/// Energy attributed to each minute of CI workflow runtime, in kWh.
pub const KWH_PER_WORKFLOW_MINUTE: f64 = 0.01;

/// Grid carbon intensity used to convert energy to emissions, in kg CO2 per kWh.
pub const KG_CO2_PER_KWH: f64 = 0.4;

/// Heuristic classification of a change's estimated impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarbonScore {
    Green,
    Yellow,
    Red,
}

impl CarbonScore {
    /// Returns the lowercase name used in labels and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            CarbonScore::Green => "green",
            CarbonScore::Yellow => "yellow",
            CarbonScore::Red => "red",
        }
    }

    /// Returns the repository label applied for this score (e.g. `carbon-red`).
    pub fn label(&self) -> String {
        format!("carbon-{}", self.as_str())
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            CarbonScore::Green => "🟢",
            CarbonScore::Yellow => "🟡",
            CarbonScore::Red => "🔴",
        }
    }
}

impl fmt::Display for CarbonScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Energy breakpoints (kWh) for scoring pushes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyThresholds {
    /// Energy above this is at least yellow.
    pub yellow_kwh: f64,
    /// Energy above this is red.
    pub red_kwh: f64,
}

impl EnergyThresholds {
    pub const DEFAULT_YELLOW_KWH: f64 = 0.5;
    pub const DEFAULT_RED_KWH: f64 = 1.0;

    pub fn new(yellow_kwh: f64, red_kwh: f64) -> Self {
        EnergyThresholds {
            yellow_kwh,
            red_kwh,
        }
    }

    /// Classifies an energy estimate.
    ///
    /// red iff `energy > red`, yellow iff `yellow < energy <= red`, green otherwise.
    pub fn classify(&self, energy_kwh: f64) -> CarbonScore {
        if energy_kwh > self.red_kwh {
            CarbonScore::Red
        } else if energy_kwh > self.yellow_kwh {
            CarbonScore::Yellow
        } else {
            CarbonScore::Green
        }
    }
}

impl Default for EnergyThresholds {
    fn default() -> Self {
        EnergyThresholds::new(Self::DEFAULT_YELLOW_KWH, Self::DEFAULT_RED_KWH)
    }
}

/// Fixed line-count breakpoints for scoring pull requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineThresholds {
    pub yellow_lines: u64,
    pub red_lines: u64,
}

impl LineThresholds {
    /// The breakpoints applied to every pull request.
    pub const PULL_REQUEST: LineThresholds = LineThresholds {
        yellow_lines: 100,
        red_lines: 500,
    };

    pub fn classify(&self, total_changes: u64) -> CarbonScore {
        if total_changes > self.red_lines {
            CarbonScore::Red
        } else if total_changes > self.yellow_lines {
            CarbonScore::Yellow
        } else {
            CarbonScore::Green
        }
    }
}

/// Line counts for a single commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStats {
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
}

impl LineStats {
    pub fn new(additions: u64, deletions: u64) -> Self {
        LineStats {
            additions,
            deletions,
        }
    }

    /// Changed lines, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.additions.saturating_add(self.deletions)
    }

    /// Estimated energy for these changes, in kWh.
    pub fn energy_kwh(&self) -> f64 {
        self.additions as f64 * KWH_PER_ADDED_LINE + self.deletions as f64 * KWH_PER_DELETED_LINE
    }
}

/// Estimated impact of a set of changes.
///
/// Energy and emissions are kept at full precision; they are rounded only
/// when serialized or rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonAnalysis {
    pub total_lines: u64,
    #[serde(serialize_with = "serialize_rounded")]
    pub energy_consumption: f64,
    #[serde(serialize_with = "serialize_rounded")]
    pub carbon_emission: f64,
    pub carbon_score: CarbonScore,
    pub recommendations: Vec<String>,
}

/// Analyzes the commits of a push.
///
/// Energy is accumulated per commit and summed without intermediate rounding.
/// Line totals saturate instead of overflowing.
pub fn analyze_push<'a>(
    commits: impl IntoIterator<Item = &'a LineStats>,
    thresholds: &EnergyThresholds,
) -> CarbonAnalysis {
    let (total_lines, energy) = commits
        .into_iter()
        .fold((0u64, 0.0f64), |(lines, energy), stats| {
            (lines.saturating_add(stats.total()), energy + stats.energy_kwh())
        });

    let carbon_score = thresholds.classify(energy);

    CarbonAnalysis {
        total_lines,
        energy_consumption: energy,
        carbon_emission: emissions_kg(energy),
        carbon_score,
        recommendations: recommendations(carbon_score),
    }
}

/// Converts an energy estimate to kg CO2.
pub fn emissions_kg(energy_kwh: f64) -> f64 {
    energy_kwh * KG_CO2_PER_KWH
}

/// Returns the ordered recommendations shown for a score.
pub fn recommendations(score: CarbonScore) -> Vec<String> {
    let items: &[&str] = match score {
        CarbonScore::Green => &[
            "Great job! This change has a low estimated carbon footprint.",
            "Keep commits small and focused to stay in the green.",
        ],
        CarbonScore::Yellow => &[
            "Consider splitting large changes into smaller, focused commits.",
            "Remove dead code and unused dependencies where possible.",
            "Run only the test suites affected by the change.",
        ],
        CarbonScore::Red => &[
            "Break this change into smaller commits or pull requests.",
            "Review new code paths for algorithmic efficiency.",
            "Cache build and test artifacts to avoid redundant CI work.",
            "Schedule heavy CI jobs when the grid is greener.",
        ],
    };
    items.iter().map(|s| s.to_string()).collect()
}

/// Rounds to 4 decimal places for presentation.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

pub(crate) fn serialize_rounded<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(round4(*value))
}
