use std::time::Duration;

use chrono::{DateTime, Local, Utc};

use liftlog_domain::Name;

#[must_use]
pub fn format_date(date: DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%b %-d, %Y").to_string()
}

/// `"1h 15m"`, `"5m 30s"` or `"45s"` depending on magnitude. Missing or zero
/// durations render as `"--:--"`.
#[must_use]
pub fn format_duration(duration: Option<Duration>) -> String {
    let Some(duration) = duration.filter(|d| !d.is_zero()) else {
        return "--:--".to_string();
    };

    let hours = duration.as_secs() / 3600;
    let minutes = duration.as_secs() / 60 % 60;
    let seconds = duration.as_secs() % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else if seconds > 0 {
        format!("{seconds}s")
    } else {
        "0s".to_string()
    }
}

#[must_use]
pub fn format_weight(weight: f64) -> String {
    if weight <= 0.0 {
        "- kg".to_string()
    } else {
        format!("{weight:.1} kg")
    }
}

/// The session name, falling back to a title derived from the date.
#[must_use]
pub fn workout_title(name: Option<&Name>, start_time: DateTime<Utc>) -> String {
    name.map_or_else(
        || format!("Workout on {}", format_date(start_time)),
        ToString::to_string,
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn local_noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(local_noon(2025, 4, 3)), "Apr 3, 2025");
        assert_eq!(format_date(local_noon(2024, 12, 24)), "Dec 24, 2024");
    }

    #[rstest]
    #[case(None, "--:--")]
    #[case(Some(Duration::ZERO), "--:--")]
    #[case(Some(Duration::from_millis(500)), "0s")]
    #[case(Some(Duration::from_secs(45)), "45s")]
    #[case(Some(Duration::from_secs(5 * 60 + 30)), "5m 30s")]
    #[case(Some(Duration::from_secs(75 * 60)), "1h 15m")]
    #[case(Some(Duration::from_secs(2 * 60 * 60 + 30)), "2h 0m")]
    fn test_format_duration(#[case] duration: Option<Duration>, #[case] expected: &str) {
        assert_eq!(format_duration(duration), expected);
    }

    #[rstest]
    #[case(0.0, "- kg")]
    #[case(-1.0, "- kg")]
    #[case(60.0, "60.0 kg")]
    #[case(1250.5, "1250.5 kg")]
    #[case(1100.25, "1100.2 kg")]
    fn test_format_weight(#[case] weight: f64, #[case] expected: &str) {
        assert_eq!(format_weight(weight), expected);
    }

    #[test]
    fn test_workout_title() {
        let name = Name::new("Push Day").unwrap();
        assert_eq!(
            workout_title(Some(&name), local_noon(2025, 4, 3)),
            "Push Day"
        );
        assert_eq!(
            workout_title(None, local_noon(2025, 4, 3)),
            "Workout on Apr 3, 2025"
        );
    }
}
