//! Degrees/decimal-minutes coordinate strings.
//!
//! Field crews record fixture positions as strings like `N 10°44.710'` or
//! `W074°45.460'`. Parsing is deliberately permissive: anything that does not
//! match yields `None` so the caller can try the next encoding, and minute
//! values of 60 or more pass through as given rather than being rejected or
//! normalized.

use std::sync::OnceLock;

use regex::Regex;

fn degree_minutes_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)°(\d+(?:\.\d+)?)'?$").expect("valid regex"))
}

fn north_south_group_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[NnSs]\s*\d+\s*°\s*\d+(?:\.\d+)?\s*'?").expect("valid regex")
    })
}

fn east_west_group_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[EeWw]\s*\d+\s*°\s*\d+(?:\.\d+)?\s*'?").expect("valid regex")
    })
}

/// Parse a degrees/decimal-minutes string into signed decimal degrees.
///
/// A leading hemisphere letter is detected case-insensitively; South and West
/// negate the result, a missing letter means positive. Every character other
/// than digits, the degree mark, the decimal point and the minute mark is
/// stripped before matching `<degrees>°<minutes>'`.
///
/// Returns `None` — never an error — when the pattern does not match or the
/// numbers fail to parse.
#[must_use]
pub fn parse_dms(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let (sign, rest) = match trimmed.chars().next()? {
        'S' | 's' | 'W' | 'w' => (-1.0, &trimmed[1..]),
        'N' | 'n' | 'E' | 'e' => (1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };

    let cleaned: String = rest
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '°' | '.' | '\''))
        .collect();

    let caps = degree_minutes_re().captures(&cleaned)?;
    let degrees: f64 = caps[1].parse().ok()?;
    let minutes: f64 = caps[2].parse().ok()?;

    Some(sign * (degrees + minutes / 60.0))
}

/// Search free-form text for a latitude/longitude pair written as two
/// hemisphere-tagged degree groups.
///
/// The first North/South-tagged group becomes the latitude and the first
/// East/West-tagged group the longitude, wherever they sit in the string.
/// Used for combined coordinate cells that carry no comma separator.
#[must_use]
pub fn find_dms_pair(text: &str) -> Option<(f64, f64)> {
    let lat = north_south_group_re()
        .find(text)
        .and_then(|m| parse_dms(m.as_str()))?;
    let lon = east_west_group_re()
        .find(text)
        .and_then(|m| parse_dms(m.as_str()))?;
    Some((lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn parses_north_with_space() {
        let value = parse_dms("N 10°44.710'").expect("parses");
        assert!((value - (10.0 + 44.710 / 60.0)).abs() < TOL, "got {value}");
    }

    #[test]
    fn parses_west_without_space() {
        let value = parse_dms("W074°45.460'").expect("parses");
        assert!((value + (74.0 + 45.460 / 60.0)).abs() < TOL, "got {value}");
    }

    #[test]
    fn missing_hemisphere_is_positive() {
        let value = parse_dms("10°44.710").expect("parses");
        assert!(value > 0.0);
        assert!((value - (10.0 + 44.710 / 60.0)).abs() < TOL);
    }

    #[test]
    fn south_is_negative() {
        let value = parse_dms("s 4°30.0'").expect("parses");
        assert!((value + 4.5).abs() < TOL, "got {value}");
    }

    #[test]
    fn garbage_yields_none() {
        assert_eq!(parse_dms("abc"), None);
        assert_eq!(parse_dms(""), None);
        assert_eq!(parse_dms("°'"), None);
        assert_eq!(parse_dms("10.745"), None);
    }

    #[test]
    fn minutes_beyond_sixty_pass_through() {
        // Permissive by design: 75 minutes is not rejected or normalized.
        let value = parse_dms("10°75.0'").expect("parses");
        assert!((value - 11.25).abs() < TOL, "got {value}");
    }

    #[test]
    fn finds_tagged_pair_in_free_text() {
        let (lat, lon) =
            find_dms_pair("Lat N 10°44.710' Long W 074°45.460'").expect("pair found");
        assert!((lat - (10.0 + 44.710 / 60.0)).abs() < TOL);
        assert!((lon + (74.0 + 45.460 / 60.0)).abs() < TOL);
    }

    #[test]
    fn pair_search_needs_both_hemispheres() {
        assert_eq!(find_dms_pair("N 10°44.710' only"), None);
        assert_eq!(find_dms_pair("W 074°45.460' only"), None);
        assert_eq!(find_dms_pair("nothing here"), None);
    }
}
