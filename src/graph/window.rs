// Time window navigation
//
// A widget's visible window is (end timestamp, range). Stepping earlier
// or later moves the end timestamp by half the window's own width, so
// repeated presses walk the window in overlapping halves.

use chrono::Utc;

use super::duration::parse_duration;

/// The visible time window of a widget: an end timestamp in epoch
/// milliseconds plus a range string. Only user navigation mutates this;
/// the polling path never touches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    pub end_ms: i64,
    pub range: String,
}

impl TimeWindow {
    /// Window ending now with the given range.
    pub fn ending_now(range: impl Into<String>) -> Self {
        Self {
            end_ms: Utc::now().timestamp_millis(),
            range: range.into(),
        }
    }

    /// Shift this window's end earlier by half its width. A malformed
    /// range leaves the window unchanged.
    pub fn step_earlier(&mut self) {
        if let Some(end) = earlier_end_time(Some(self.end_ms), &self.range) {
            self.end_ms = end;
        }
    }

    /// Shift this window's end later by half its width.
    pub fn step_later(&mut self) {
        if let Some(end) = later_end_time(Some(self.end_ms), &self.range) {
            self.end_ms = end;
        }
    }
}

/// End timestamp for a window moved earlier by half of `range_text`.
///
/// `timestamp_ms` is the reference end time; `None` means now. Returns
/// `None` when the range text does not parse - the caller is expected
/// to have validated the range upstream.
pub fn earlier_end_time(timestamp_ms: Option<i64>, range_text: &str) -> Option<i64> {
    let range_seconds = parse_duration(range_text)?;
    let reference = timestamp_ms.unwrap_or_else(|| Utc::now().timestamp_millis());
    Some(reference - (range_seconds as i64 * 1000 / 2))
}

/// End timestamp for a window moved later by half of `range_text`;
/// symmetric to [`earlier_end_time`].
pub fn later_end_time(timestamp_ms: Option<i64>, range_text: &str) -> Option<i64> {
    let range_seconds = parse_duration(range_text)?;
    let reference = timestamp_ms.unwrap_or_else(|| Utc::now().timestamp_millis());
    Some(reference + (range_seconds as i64 * 1000 / 2))
}
