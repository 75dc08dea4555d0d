// Duration algebra for graph time ranges
//
// Ranges are written as a single integer plus a single unit letter
// ("90s", "5m", "2h"). Re-serializing always picks the largest unit that
// evenly divides the total seconds, so "120s" comes back as "2m" but
// "90s" stays in seconds.

use regex::Regex;
use std::sync::OnceLock;

/// Seconds per unit, ordered for formatting: largest evenly-dividing
/// unit wins. Weeks are accepted on input but never chosen on output,
/// matching the range ladder's own "2w"/"4w" entries being inputs only.
const FORMAT_FACTORS: &[(char, u64)] = &[
    ('y', 60 * 60 * 24 * 365),
    ('d', 60 * 60 * 24),
    ('h', 60 * 60),
    ('m', 60),
    ('s', 1),
];

/// The fixed ladder of canonical ranges used for discrete step
/// navigation, sub-second to multi-year. Immutable, ordered ascending.
pub const RANGE_STEPS: &[&str] = &[
    "1s", "10s", "1m", "5m", "15m", "30m", "1h", "2h", "6h", "12h", "1d", "2d", "1w", "2w", "4w",
    "8w", "1y", "2y",
];

/// Default range when the user has not specified one.
const DEFAULT_RANGE_SECONDS: u64 = 60;

fn seconds_per_unit(unit: char) -> Option<u64> {
    match unit {
        'y' => Some(60 * 60 * 24 * 365),
        'w' => Some(60 * 60 * 24 * 7),
        'd' => Some(60 * 60 * 24),
        'h' => Some(60 * 60),
        'm' => Some(60),
        's' => Some(1),
        _ => None,
    }
}

fn range_regex() -> &'static Regex {
    static RANGE_RE: OnceLock<Regex> = OnceLock::new();
    RANGE_RE.get_or_init(|| Regex::new(r"^([0-9]+)([ywdhms])$").expect("valid range regex"))
}

/// Parse a range string like "5m" into whole seconds.
///
/// Empty input means "no range specified" and yields the one-minute
/// default. Input that does not match the grammar yields `None`.
pub fn parse_duration(text: &str) -> Option<u64> {
    if text.is_empty() {
        return Some(DEFAULT_RANGE_SECONDS);
    }

    let captures = range_regex().captures(text)?;

    // A match always carries exactly the value and unit captures; the
    // legacy behavior of degrading an odd capture count to the default
    // is kept even though this arm cannot fire with this pattern.
    if captures.len() != 3 {
        return Some(DEFAULT_RANGE_SECONDS);
    }

    let value: u64 = captures.get(1)?.as_str().parse().ok()?;
    let unit = captures.get(2)?.as_str().chars().next()?;

    // A value large enough to overflow the seconds total is treated the
    // same as a malformed range.
    value.checked_mul(seconds_per_unit(unit)?)
}

/// Format whole seconds as a range string, choosing the largest unit
/// that divides evenly. Falls back to seconds.
pub fn format_duration(seconds: u64) -> String {
    let mut unit = 's';
    let mut factor = 1;
    for &(u, f) in FORMAT_FACTORS {
        if seconds % f == 0 {
            unit = u;
            factor = f;
            break;
        }
    }
    format!("{}{}", seconds / factor, unit)
}

/// Step to the next longer canonical range.
///
/// Returns the first ladder entry strictly longer than `current`, or
/// `current` unchanged when already at the top. An empty current range
/// starts at "1h".
pub fn next_longer_range(current: &str) -> String {
    if current.is_empty() {
        return "1h".to_string();
    }
    let Some(current_seconds) = parse_duration(current) else {
        return current.to_string();
    };
    for step in RANGE_STEPS {
        if parse_duration(step).is_some_and(|s| s > current_seconds) {
            return (*step).to_string();
        }
    }
    current.to_string()
}

/// Step to the next shorter canonical range; symmetric to
/// [`next_longer_range`].
pub fn next_shorter_range(current: &str) -> String {
    if current.is_empty() {
        return "1h".to_string();
    }
    let Some(current_seconds) = parse_duration(current) else {
        return current.to_string();
    };
    for step in RANGE_STEPS.iter().rev() {
        if parse_duration(step).is_some_and(|s| s < current_seconds) {
            return (*step).to_string();
        }
    }
    current.to_string()
}
