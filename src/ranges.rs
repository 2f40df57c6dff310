//! Range-constraint builder shared by the parameter readers.

use log::warn;

use crate::model::AllowableValues;

/// Builds a range-typed allowable-values value from the raw tokens between
/// the brackets of a `range[...]` / `rangeexclusive[...]` constraint.
///
/// `raw` is the original constraint string; its prefix decides inclusivity.
/// Malformed bounds degrade to a warning and no constraint rather than
/// aborting derivation.
pub fn build_allowable_range_values(tokens: &[&str], raw: &str) -> Option<AllowableValues> {
    if tokens.len() != 2 {
        warn!(
            "Range constraint '{}' does not have exactly two bounds, ignoring",
            raw
        );
        return None;
    }

    let min = tokens[0].trim().parse::<f64>();
    let max = tokens[1].trim().parse::<f64>();
    match (min, max) {
        (Ok(min), Ok(max)) => Some(AllowableValues::Range {
            min,
            max,
            exclusive: raw.to_lowercase().starts_with("rangeexclusive["),
        }),
        _ => {
            warn!("Range constraint '{}' has non-numeric bounds, ignoring", raw);
            None
        }
    }
}
