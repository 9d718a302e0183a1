//! Figures and reports for a finished estimate.

pub mod report;
pub mod svg;

pub use report::{EstimateReport, EventRow, EventsReport, PriorReport, ScenarioReport};
pub use svg::{render_svg, write_svg};

use dp_math::BetaParams;

use crate::inference::TrialOutcome;
use crate::scenario::DiceEvent;

/// Text placed on a posterior figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigureLabels {
    pub title: String,
    pub subtitle: String,
    pub x_label: String,
    pub prior_label: String,
}

impl FigureLabels {
    pub fn for_event(
        event: DiceEvent,
        n_dice: u32,
        prior: &BetaParams,
        outcome: &TrialOutcome,
    ) -> Self {
        Self {
            title: format!("Posterior for '{}' with {} dice", event.label(), n_dice),
            subtitle: observed_line(outcome),
            x_label: "candidate per-trial probability".to_string(),
            prior_label: format!("Prior Beta({:.1},{:.1})", prior.alpha, prior.beta),
        }
    }

    pub fn for_coin(prior: &BetaParams, outcome: &TrialOutcome) -> Self {
        Self {
            title: "Bayesian Update: Posterior Distribution of Coin's Bias".to_string(),
            subtitle: observed_line(outcome),
            x_label: "probability of heads".to_string(),
            prior_label: format!("Prior Beta({},{})", prior.alpha, prior.beta),
        }
    }
}

fn observed_line(outcome: &TrialOutcome) -> String {
    format!(
        "Observed {} successes in {} trials",
        outcome.successes(),
        outcome.n_trials()
    )
}
