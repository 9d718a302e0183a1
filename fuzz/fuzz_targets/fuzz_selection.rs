//! Fuzz target for event and dice-count text.

#![no_main]

use dp_core::selection::{parse_dice_count, parse_event};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: &str| {
    let _ = parse_event(text);
    let (count, _) = parse_dice_count(Some(text), 3, 1000);
    assert!((1..=1000).contains(&count));
});
