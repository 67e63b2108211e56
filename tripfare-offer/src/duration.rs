use regex::Regex;
use std::sync::LazyLock;

static HOURS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([0-9]+)[Hh]").expect("valid hours pattern"));
static MINUTES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([0-9]+)[Mm]").expect("valid minutes pattern"));

/// Total minutes of a duration written either as ISO 8601 (`PT6H30M`) or
/// in the backend's short form (`6h30m`).
///
/// Hours and minutes are looked up independently, so `45m`, `PT5H` and
/// `PT1H30M` all parse. Anything without a recognisable component is 0.
pub fn parse_duration(duration: Option<&str>) -> u64 {
    let Some(duration) = duration.filter(|d| !d.is_empty()) else {
        return 0;
    };

    let hours = leading_component(&HOURS, duration);
    let minutes = leading_component(&MINUTES, duration);

    hours.saturating_mul(60).saturating_add(minutes)
}

fn leading_component(pattern: &Regex, text: &str) -> u64 {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        // Digit runs too long for u64 saturate rather than vanish.
        .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_durations() {
        assert_eq!(parse_duration(Some("PT6H30M")), 390);
        assert_eq!(parse_duration(Some("PT5H")), 300);
        assert_eq!(parse_duration(Some("PT1H30M")), 90);
        assert_eq!(parse_duration(Some("PT45M")), 45);
    }

    #[test]
    fn test_short_form_durations() {
        assert_eq!(parse_duration(Some("6h30m")), 390);
        assert_eq!(parse_duration(Some("2h0m")), 120);
        assert_eq!(parse_duration(Some("45m")), 45);
        assert_eq!(parse_duration(Some("3h")), 180);
        assert_eq!(parse_duration(Some("2h 15m")), 135);
    }

    #[test]
    fn test_empty_or_unparsable() {
        assert_eq!(parse_duration(None), 0);
        assert_eq!(parse_duration(Some("")), 0);
        assert_eq!(parse_duration(Some("PT")), 0);
        assert_eq!(parse_duration(Some("soon")), 0);
    }

    #[test]
    fn test_huge_values_saturate() {
        assert_eq!(parse_duration(Some("99999999999999999999999H")), u64::MAX);
    }
}
