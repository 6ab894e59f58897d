//! Display helpers for the rendering layer.

/// Format remaining milliseconds as `MM:SS`, rounding up to whole seconds.
///
/// With `hide_seconds` only the minute count is shown, unpadded.
pub fn format_time(ms: u64, hide_seconds: bool) -> String {
    let total_seconds = ms.div_ceil(1000);
    let mins = total_seconds / 60;
    let secs = total_seconds % 60;
    if hide_seconds {
        return mins.to_string();
    }
    format!("{mins:02}:{secs:02}")
}

/// Format cumulative focus minutes as `HH:MM`.
pub fn format_total_time(total_min: u64) -> String {
    let h = total_min / 60;
    let m = total_min % 60;
    format!("{h:02}:{m:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_full_session() {
        assert_eq!(format_time(25 * 60 * 1000, false), "25:00");
    }

    #[test]
    fn rounds_partial_seconds_up() {
        assert_eq!(format_time(1, false), "00:01");
        assert_eq!(format_time(59_001, false), "01:00");
    }

    #[test]
    fn zero_is_zero() {
        assert_eq!(format_time(0, false), "00:00");
    }

    #[test]
    fn hide_seconds_shows_bare_minutes() {
        assert_eq!(format_time(25 * 60 * 1000, true), "25");
        assert_eq!(format_time(90_000, true), "1");
    }

    #[test]
    fn total_time_is_hours_and_minutes() {
        assert_eq!(format_total_time(0), "00:00");
        assert_eq!(format_total_time(90), "01:30");
        assert_eq!(format_total_time(600), "10:00");
    }
}
