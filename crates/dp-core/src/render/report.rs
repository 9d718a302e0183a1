//! Structured report of an estimate plus its markdown and one-line forms.

use std::fmt::Write as _;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use dp_common::SCHEMA_VERSION;
use dp_math::BetaParams;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::ConfigSnapshot;
use crate::inference::{DisplayCurves, Estimate, EventEstimate, PosteriorSummary, TrialOutcome};
use crate::scenario::{adjust_probability, DiceEvent};

/// Which scenario produced the estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioReport {
    Dice {
        event: DiceEvent,
        label: String,
        n_dice: u32,
        true_probability: f64,
    },
    Coin,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PriorReport {
    pub alpha: f64,
    pub beta: f64,
    pub mean: f64,
}

impl From<&BetaParams> for PriorReport {
    fn from(prior: &BetaParams) -> Self {
        Self {
            alpha: prior.alpha,
            beta: prior.beta,
            mean: prior.mean(),
        }
    }
}

/// Report written to stdout for `dice` and `coin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EstimateReport {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub run_id: String,
    pub scenario: ScenarioReport,
    pub prior: PriorReport,
    pub observation: TrialOutcome,
    pub posterior: PosteriorSummary,
    pub grid_points: usize,
    pub config: ConfigSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_path: Option<PathBuf>,
    /// Display-scaled curves, only when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curves: Option<DisplayCurves>,
}

impl EstimateReport {
    pub fn new(
        run_id: &str,
        scenario: ScenarioReport,
        estimate: &Estimate,
        config: ConfigSnapshot,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            run_id: run_id.to_string(),
            scenario,
            prior: PriorReport::from(&estimate.prior),
            observation: estimate.outcome,
            posterior: estimate.summary,
            grid_points: estimate.curves.grid.len(),
            config,
            plot_path: None,
            curves: None,
        }
    }

    pub fn for_event(run_id: &str, result: &EventEstimate, config: ConfigSnapshot) -> Self {
        let scenario = ScenarioReport::Dice {
            event: result.event,
            label: result.event.label().to_string(),
            n_dice: result.n_dice,
            true_probability: result.true_probability,
        };
        Self::new(run_id, scenario, &result.estimate, config)
    }

    pub fn with_plot_path(mut self, path: Option<PathBuf>) -> Self {
        self.plot_path = path;
        self
    }

    pub fn with_curves(mut self, curves: Option<DisplayCurves>) -> Self {
        self.curves = curves;
        self
    }

    fn heading(&self) -> String {
        match &self.scenario {
            ScenarioReport::Dice { label, n_dice, .. } => {
                format!("{} with {} dice", label, n_dice)
            }
            ScenarioReport::Coin => "Coin bias".to_string(),
        }
    }

    /// Markdown rendering.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        let p = &self.posterior;
        let _ = writeln!(out, "# Posterior: {}", self.heading());
        let _ = writeln!(out);
        let _ = writeln!(out, "| field | value |");
        let _ = writeln!(out, "|---|---|");
        if let ScenarioReport::Dice {
            true_probability, ..
        } = &self.scenario
        {
            let _ = writeln!(out, "| true probability | {:.4} |", true_probability);
        }
        let _ = writeln!(
            out,
            "| prior | Beta({:.4}, {:.4}), mean {:.4} |",
            self.prior.alpha, self.prior.beta, self.prior.mean
        );
        let _ = writeln!(
            out,
            "| observed | {} / {} |",
            self.observation.successes(),
            self.observation.n_trials()
        );
        let _ = writeln!(out, "| grid mean | {:.4} |", p.grid_mean);
        let _ = writeln!(out, "| grid mode | {:.4} |", p.grid_mode);
        let _ = writeln!(
            out,
            "| {:.0}% grid interval | [{:.4}, {:.4}] |",
            p.grid_interval.level * 100.0,
            p.grid_interval.lower,
            p.grid_interval.upper
        );
        let _ = writeln!(
            out,
            "| conjugate posterior | Beta({:.4}, {:.4}), mean {:.4} |",
            p.conjugate.alpha, p.conjugate.beta, p.conjugate.mean
        );
        let _ = writeln!(
            out,
            "| {:.0}% conjugate interval | [{:.4}, {:.4}] |",
            p.conjugate.interval.level * 100.0,
            p.conjugate.interval.lower,
            p.conjugate.interval.upper
        );
        if let Some(path) = &self.plot_path {
            let _ = writeln!(out);
            let _ = writeln!(out, "Plot: `{}`", path.display());
        }
        out
    }

    /// One-line summary.
    pub fn to_summary(&self) -> String {
        format!(
            "{}: {}/{} observed, posterior mean {:.4} (conjugate {:.4}), mode {:.4}, {:.0}% [{:.4}, {:.4}]",
            self.heading(),
            self.observation.successes(),
            self.observation.n_trials(),
            self.posterior.grid_mean,
            self.posterior.conjugate.mean,
            self.posterior.grid_mode,
            self.posterior.grid_interval.level * 100.0,
            self.posterior.grid_interval.lower,
            self.posterior.grid_interval.upper
        )
    }
}

/// One row of the `events` listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EventRow {
    pub event: DiceEvent,
    pub label: String,
    pub reference_probability: f64,
    pub biased_probability: f64,
    pub adjusted_probability: f64,
    pub n_trials: u32,
}

/// The event table with probabilities adjusted for a dice count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EventsReport {
    pub schema_version: String,
    pub n_dice: u32,
    pub events: Vec<EventRow>,
}

impl EventsReport {
    pub fn build<R: rand::Rng + ?Sized>(
        n_dice: u32,
        simulation_samples: usize,
        rng: &mut R,
    ) -> Self {
        let events = DiceEvent::ALL
            .into_iter()
            .map(|event| {
                let def = event.definition();
                EventRow {
                    event,
                    label: def.label.to_string(),
                    reference_probability: def.reference_probability,
                    biased_probability: def.biased_probability,
                    adjusted_probability: adjust_probability(
                        event,
                        n_dice,
                        simulation_samples,
                        rng,
                    ),
                    n_trials: def.n_trials,
                }
            })
            .collect();
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            n_dice,
            events,
        }
    }

    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# Dice events ({} dice)", self.n_dice);
        let _ = writeln!(out);
        let _ = writeln!(out, "| key | label | probability | reference (3 dice) | trials |");
        let _ = writeln!(out, "|---|---|---|---|---|");
        for row in &self.events {
            let _ = writeln!(
                out,
                "| {} | {} | {:.4} | {:.4} | {} |",
                row.event.key(),
                row.label,
                row.adjusted_probability,
                row.reference_probability,
                row.n_trials
            );
        }
        out
    }

    pub fn to_summary(&self) -> String {
        self.events
            .iter()
            .map(|row| format!("{}={:.4}", row.event.key(), row.adjusted_probability))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{EstimatorConfig, PosteriorEstimator};
    use crate::sampling::seeded_rng;

    fn snapshot() -> ConfigSnapshot {
        ConfigSnapshot {
            path: None,
            source: "builtin default".to_string(),
            hash: None,
            schema_version: "1.0.0".to_string(),
        }
    }

    fn coin_report() -> EstimateReport {
        let estimator = PosteriorEstimator::new(EstimatorConfig::default()).unwrap();
        let prior = BetaParams::new(10.0, 10.0).unwrap();
        let estimate = estimator
            .estimate(prior, TrialOutcome::new(50, 3).unwrap())
            .unwrap();
        EstimateReport::new("run-000000000000", ScenarioReport::Coin, &estimate, snapshot())
    }

    #[test]
    fn json_omits_curves_unless_requested() {
        let report = coin_report();
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("curves").is_none());
        assert_eq!(value["scenario"]["kind"], "coin");
        assert_eq!(value["observation"]["successes"], 3);
        assert_eq!(value["grid_points"], 500);

        let display = PosteriorEstimator::new(EstimatorConfig::default())
            .unwrap()
            .estimate(BetaParams::uniform(), TrialOutcome::new(4, 2).unwrap())
            .unwrap()
            .curves
            .display();
        let with = report.with_curves(Some(display));
        let value = serde_json::to_value(&with).unwrap();
        assert_eq!(value["curves"]["posterior"].as_array().unwrap().len(), 500);
    }

    #[test]
    fn markdown_and_summary_mention_posterior_mean() {
        let report = coin_report();
        let md = report.to_markdown();
        assert!(md.starts_with("# Posterior: Coin bias"));
        assert!(md.contains("| observed | 3 / 50 |"));
        assert!(md.contains("0.1857"));
        let line = report.to_summary();
        assert!(line.starts_with("Coin bias: 3/50 observed"));
    }

    #[test]
    fn events_report_lists_every_event() {
        let mut rng = seeded_rng(Some(1));
        let report = EventsReport::build(3, 20_000, &mut rng);
        assert_eq!(report.events.len(), 5);
        let all_same = report
            .events
            .iter()
            .find(|row| row.event == DiceEvent::AllSame)
            .unwrap();
        assert!((all_same.adjusted_probability - 1.0 / 36.0).abs() < 1e-12);
        assert!(report.to_markdown().contains("| all-same | All dice same |"));
        assert!(report.to_summary().contains("at-least-one-six=0.4213"));
    }
}
