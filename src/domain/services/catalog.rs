use std::sync::LazyLock;

use regex::Regex;

static DAYS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)d").unwrap());
static HOURS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)h").unwrap());
static MINUTES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)m").unwrap());

/// Parses the scheduler's compound duration strings ("1d0h0m", "0d2h30m")
/// into total minutes. Missing components and absent values count as zero.
pub fn parse_notice_minutes(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else { return 0 };

    let component = |re: &Regex| {
        re.captures(raw)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<i64>().ok())
            .unwrap_or(0)
    };

    component(&DAYS_RE) * 24 * 60 + component(&HOURS_RE) * 60 + component(&MINUTES_RE)
}

/// Derives a URL slug from a resource display name: lowercase, with every
/// non-alphanumeric character replaced by a hyphen. Pure and deterministic,
/// but NOT unique: resources whose names normalize identically collide.
pub fn room_slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_one_day() {
        assert_eq!(parse_notice_minutes(Some("1d0h0m")), 1440);
    }

    #[test]
    fn notice_hours_and_minutes() {
        assert_eq!(parse_notice_minutes(Some("0d2h30m")), 150);
    }

    #[test]
    fn notice_absent_is_zero() {
        assert_eq!(parse_notice_minutes(None), 0);
        assert_eq!(parse_notice_minutes(Some("")), 0);
    }

    #[test]
    fn notice_partial_components() {
        assert_eq!(parse_notice_minutes(Some("2h")), 120);
        assert_eq!(parse_notice_minutes(Some("45m")), 45);
        assert_eq!(parse_notice_minutes(Some("3d")), 4320);
    }

    #[test]
    fn notice_parsing_is_deterministic() {
        let first = parse_notice_minutes(Some("1d0h0m"));
        let second = parse_notice_minutes(Some("1d0h0m"));
        assert_eq!(first, second);
        assert_eq!(first, 1440);
    }

    #[test]
    fn slug_lowercases_and_hyphenates() {
        assert_eq!(room_slug("Washington"), "washington");
        assert_eq!(room_slug("The Hamilton Room"), "the-hamilton-room");
        assert_eq!(room_slug("Suite #2 (VIP)"), "suite--2--vip-");
    }

    #[test]
    fn slug_collisions_are_possible() {
        // Known limitation: normalization is not injective.
        assert_eq!(room_slug("Franklin!"), room_slug("Franklin?"));
    }
}
