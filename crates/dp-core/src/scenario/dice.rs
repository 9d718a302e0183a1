//! Dice events and the probability adjustment for a chosen dice count.

use std::fmt;
use std::str::FromStr;

use dp_common::Error;
use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::sampling::{fraction_sum_at_least, DICE_FACES};

/// Dice count the reference probabilities in the event table are quoted for.
pub const REFERENCE_DICE: u32 = 3;

/// Threshold of the "Sum ≥ 15" event.
pub const SUM_THRESHOLD: u32 = 15;

/// The closed set of dice events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DiceEvent {
    AtLeastOneSix,
    AllDifferent,
    #[serde(rename = "sum-at-least-15")]
    SumAtLeastFifteen,
    AllSame,
    ExactlyOneSix,
}

impl DiceEvent {
    /// Every event, in display order.
    pub const ALL: [DiceEvent; 5] = [
        DiceEvent::AtLeastOneSix,
        DiceEvent::AllDifferent,
        DiceEvent::SumAtLeastFifteen,
        DiceEvent::AllSame,
        DiceEvent::ExactlyOneSix,
    ];

    /// Human-readable label used in figures and reports.
    pub fn label(self) -> &'static str {
        self.definition().label
    }

    /// Stable kebab-case key accepted on the command line.
    pub fn key(self) -> &'static str {
        self.definition().key
    }

    pub fn definition(self) -> &'static EventDefinition {
        &EVENT_TABLE[self as usize]
    }
}

impl fmt::Display for DiceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DiceEvent {
    type Err = Error;

    /// Accepts the label or the key, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        let ascii = wanted.replace('≥', ">=");
        DiceEvent::ALL
            .into_iter()
            .find(|event| {
                let def = event.definition();
                wanted == def.key
                    || wanted == def.label.to_lowercase()
                    || ascii == def.label.to_lowercase().replace('≥', ">=")
            })
            .ok_or_else(|| Error::UnknownEvent {
                input: s.to_string(),
            })
    }
}

/// Static description of one dice event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventDefinition {
    pub event: DiceEvent,
    pub label: &'static str,
    pub key: &'static str,
    /// Success probability for [`REFERENCE_DICE`] dice.
    pub reference_probability: f64,
    /// Alternative ground truth for a loaded die. Informational only.
    pub biased_probability: f64,
    /// Number of synthetic trials drawn per estimate.
    pub n_trials: u32,
}

/// Indexed by `DiceEvent as usize`.
pub static EVENT_TABLE: [EventDefinition; 5] = [
    EventDefinition {
        event: DiceEvent::AtLeastOneSix,
        label: "At least one 6",
        key: "at-least-one-six",
        reference_probability: 91.0 / 216.0,
        biased_probability: 0.6,
        n_trials: 10,
    },
    EventDefinition {
        event: DiceEvent::AllDifferent,
        label: "All dice different",
        key: "all-different",
        reference_probability: 5.0 / 9.0,
        biased_probability: 0.4,
        n_trials: 10,
    },
    EventDefinition {
        event: DiceEvent::SumAtLeastFifteen,
        label: "Sum ≥ 15",
        key: "sum-at-least-15",
        reference_probability: 0.25,
        biased_probability: 0.35,
        n_trials: 10,
    },
    EventDefinition {
        event: DiceEvent::AllSame,
        label: "All dice same",
        key: "all-same",
        reference_probability: 6.0 / 216.0,
        biased_probability: 0.05,
        n_trials: 10,
    },
    EventDefinition {
        event: DiceEvent::ExactlyOneSix,
        label: "Exactly one 6",
        key: "exactly-one-six",
        reference_probability: 75.0 / 216.0,
        biased_probability: 0.3,
        n_trials: 10,
    },
];

/// Success probability of `event` when rolling `n_dice` fair dice.
///
/// Closed forms for every event except the dice sum, which is estimated from
/// `simulation_samples` rolls drawn from `rng`. A count of 0 is treated as 1.
pub fn adjust_probability<R: Rng + ?Sized>(
    event: DiceEvent,
    n_dice: u32,
    simulation_samples: usize,
    rng: &mut R,
) -> f64 {
    let n = n_dice.max(1);
    let faces = f64::from(DICE_FACES);
    let miss = (faces - 1.0) / faces;
    match event {
        DiceEvent::AtLeastOneSix => 1.0 - miss.powf(f64::from(n)),
        DiceEvent::AllDifferent => {
            if n > DICE_FACES {
                0.0
            } else {
                (0..n).map(|i| f64::from(DICE_FACES - i) / faces).product()
            }
        }
        DiceEvent::SumAtLeastFifteen => {
            fraction_sum_at_least(rng, n, SUM_THRESHOLD, simulation_samples)
        }
        DiceEvent::AllSame => (1.0 / faces).powf(f64::from(n - 1)),
        DiceEvent::ExactlyOneSix => f64::from(n) / faces * miss.powf(f64::from(n - 1)),
    }
}
