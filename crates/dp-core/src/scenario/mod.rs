//! Scenarios that feed the posterior estimator.
//!
//! A dice scenario derives its success probability from an event and a dice
//! count, then draws synthetic evidence. The coin scenario is a fixed,
//! already-observed outcome with an explicit prior.

pub mod coin;
pub mod dice;

pub use coin::CoinScenario;
pub use dice::{adjust_probability, DiceEvent, EventDefinition, EVENT_TABLE, REFERENCE_DICE};
