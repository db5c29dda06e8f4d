//! Display formatting for countdown values

/// Formats a number of seconds as `MM:SS`, or `HH:MM:SS` once the value
/// exceeds one hour. Negative input renders as `00:00`.
///
/// ```
/// use cooking_timer::format_time;
///
/// assert_eq!(format_time(125), "02:05");
/// assert_eq!(format_time(3665), "01:01:05");
/// ```
pub fn format_time(seconds: i64) -> String {
    if seconds < 0 {
        return "00:00".to_string();
    }

    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(5), "00:05");
        assert_eq!(format_time(125), "02:05");
        assert_eq!(format_time(3599), "59:59");
    }

    #[test]
    fn formats_hours_above_one_hour() {
        assert_eq!(format_time(3600), "01:00:00");
        assert_eq!(format_time(3665), "01:01:05");
        assert_eq!(format_time(86400), "24:00:00");
    }

    #[test]
    fn negative_input_renders_as_zero() {
        assert_eq!(format_time(-1), "00:00");
        assert_eq!(format_time(-3600), "00:00");
    }
}
