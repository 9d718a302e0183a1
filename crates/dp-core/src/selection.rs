//! Turning free-form command-line input into an event and a dice count.

use std::num::IntErrorKind;

use dp_common::Result;

use crate::logging::event_names;
use crate::scenario::DiceEvent;

/// Resolve the event named by a label or key.
pub fn parse_event(text: &str) -> Result<DiceEvent> {
    text.parse()
}

/// How a dice count was arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiceCountSource {
    Entered,
    /// No count given, or only whitespace.
    Absent,
    /// Text given but not an integer.
    Defaulted,
    RaisedToOne,
    Clamped,
}

/// Interpret the dice-count text.
///
/// Blank or non-numeric text falls back to `default`, zero or negative values
/// become 1, and values above `max` are clamped to `max`.
pub fn parse_dice_count(text: Option<&str>, default: u32, max: u32) -> (u32, DiceCountSource) {
    let trimmed = text.map(str::trim).unwrap_or("");
    if trimmed.is_empty() {
        tracing::debug!(
            event = event_names::SELECTION_DICE_DEFAULTED,
            dice = default,
            "no dice count given, using default"
        );
        return (default, DiceCountSource::Absent);
    }

    let (count, source) = match trimmed.parse::<i64>() {
        Ok(value) if value <= 0 => (1, DiceCountSource::RaisedToOne),
        Ok(value) if value > i64::from(max) => (max, DiceCountSource::Clamped),
        Ok(value) => (value as u32, DiceCountSource::Entered),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => (max, DiceCountSource::Clamped),
            IntErrorKind::NegOverflow => (1, DiceCountSource::RaisedToOne),
            _ => (default, DiceCountSource::Defaulted),
        },
    };

    match source {
        DiceCountSource::Defaulted => tracing::debug!(
            event = event_names::SELECTION_DICE_DEFAULTED,
            input = trimmed,
            dice = count,
            "dice count not a number, using default"
        ),
        DiceCountSource::Clamped => tracing::warn!(
            event = event_names::SELECTION_DICE_CLAMPED,
            input = trimmed,
            dice = count,
            "dice count above maximum, clamping"
        ),
        DiceCountSource::Absent | DiceCountSource::RaisedToOne | DiceCountSource::Entered => {}
    }

    (count, source)
}
