//! State Modes
//!
//! Macro files declare selectable modes such as
//! `state.OffenseMode:options('Normal', 'Acc')`. The first option of each
//! mode is its default.

use std::sync::LazyLock;

use regex::Regex;

use super::source::strip_comments;
use crate::model::OrderedMap;

static STATE_OPTIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"state\.(\w+):options\(([^)\n]*)\)").expect("state options pattern is valid")
});

/// Mode name (without its `Mode` suffix) to default option, in source order
pub fn detect_modes(source: &str) -> OrderedMap<String> {
    let clean = strip_comments(source);
    let mut modes = OrderedMap::new();

    for caps in STATE_OPTIONS.captures_iter(&clean) {
        let (Some(name), Some(options)) = (caps.get(1), caps.get(2)) else {
            continue;
        };

        let mode = name.as_str().replacen("Mode", "", 1);
        let first: String = options
            .as_str()
            .split(',')
            .next()
            .unwrap_or_default()
            .chars()
            .filter(|c| !matches!(c, '\'' | '"') && !c.is_whitespace())
            .collect();

        log::debug!("Detected mode '{}' defaulting to '{}'", mode, first);
        modes.insert(mode, first);
    }

    modes
}
