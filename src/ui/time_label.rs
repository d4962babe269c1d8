pub const PLACEHOLDER: &str = "0:00 / 0:00";

/// Formats milliseconds as `m:ss`. Minutes are not wrapped into hours.
pub fn format_millis(millis: i64) -> String {
    format_millis_padded(millis, 1)
}

fn format_millis_padded(millis: i64, minute_width: usize) -> String {
    let total_seconds = millis.max(0) / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;

    format!("{:0>width$}:{:02}", minutes, seconds, width = minute_width)
}

fn minute_digits(millis: i64) -> usize {
    let minutes = millis.max(0) / 60_000;
    minutes.to_string().len()
}

/// `position / duration`, with the position's minutes padded to the duration's width so the
/// label keeps a stable size while playing.
pub fn label_text(position: i64, duration: i64) -> String {
    let width = minute_digits(duration);

    format!(
        "{} / {}",
        format_millis_padded(position, width),
        format_millis(duration)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn under_a_minute() {
        assert_eq!(format_millis(0), "0:00");
        assert_eq!(format_millis(5_000), "0:05");
        assert_eq!(format_millis(59_999), "0:59");
    }

    #[test]
    fn over_a_minute() {
        assert_eq!(format_millis(60_000), "1:00");
        assert_eq!(format_millis(65_000), "1:05");
        assert_eq!(format_millis(754_000), "12:34");
    }

    #[test]
    fn past_an_hour_keeps_counting_minutes() {
        assert_eq!(format_millis(3_905_000), "65:05");
    }

    #[test]
    fn negative_is_zero() {
        assert_eq!(format_millis(-1_500), "0:00");
    }

    #[test]
    fn label_matches_placeholder_when_empty() {
        assert_eq!(label_text(0, 0), PLACEHOLDER);
    }

    #[test]
    fn label_pads_position_to_duration() {
        assert_eq!(label_text(5_000, 65_000), "0:05 / 1:05");
        assert_eq!(label_text(5_000, 754_000), "00:05 / 12:34");
        assert_eq!(label_text(700_000, 754_000), "11:40 / 12:34");
    }
}
