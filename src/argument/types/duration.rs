use crate::{ArgContext, ArgType, TypeError, Value};
use once_cell::sync::Lazy;
use std::time::Duration as StdDuration;

/// Error thrown when the input is not a duration like `1h 30m`
#[derive(Debug, Clone)]
pub struct InvalidDuration {
    /// What exactly is wrong
    pub reason: &'static str,
}
impl std::fmt::Display for InvalidDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Expected a duration like `1h 30m` ({})", self.reason)
    }
}
impl std::error::Error for InvalidDuration {}

/// Units in descending order, with their length in milliseconds
const UNITS: &[(&str, u64)] = &[
    ("w", 7 * 24 * 60 * 60 * 1000),
    ("d", 24 * 60 * 60 * 1000),
    ("h", 60 * 60 * 1000),
    ("m", 60 * 1000),
    ("s", 1000),
    ("ms", 1),
];

/// A single `<number><unit>` part at the start of the remaining input
static PART: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"(?i)^([0-9]+)\s*(ms|w|d|h|m|s)\s*").expect("hardcoded regex is valid")
});

/// Parses strings like `1h30m`, `2d 12h` or `500ms`. Each unit may be used at most once.
pub fn parse_duration(input: &str) -> Result<StdDuration, InvalidDuration> {
    let mut rest = input.trim();
    if rest.is_empty() {
        return Err(InvalidDuration { reason: "empty" });
    }

    let mut seen_units = Vec::new();
    let mut total_millis = 0_u64;
    while !rest.is_empty() {
        let captures = PART.captures(rest).ok_or(InvalidDuration {
            reason: "every number needs a unit out of w, d, h, m, s, ms",
        })?;
        let unit = captures[2].to_ascii_lowercase();
        if seen_units.contains(&unit) {
            return Err(InvalidDuration {
                reason: "a unit was used twice",
            });
        }

        let too_long = InvalidDuration { reason: "too long" };
        let amount = captures[1].parse::<u64>().map_err(|_| too_long.clone())?;
        let unit_millis = UNITS
            .iter()
            .find(|(name, _)| *name == unit)
            .map_or(1, |&(_, millis)| millis);
        total_millis = amount
            .checked_mul(unit_millis)
            .and_then(|millis| total_millis.checked_add(millis))
            .ok_or(too_long)?;

        rest = &rest[captures[0].len()..];
        seen_units.push(unit);
    }

    Ok(StdDuration::from_millis(total_millis))
}

/// Formats a duration in the format accepted by [`parse_duration`], e.g. `1h 30m`
pub fn format_duration(duration: StdDuration) -> String {
    let mut millis = duration.as_millis().min(u64::MAX as u128) as u64;
    if millis == 0 {
        return "0s".into();
    }

    let mut parts = Vec::new();
    for &(unit, unit_millis) in UNITS {
        if millis >= unit_millis {
            parts.push(format!("{}{}", millis / unit_millis, unit));
            millis %= unit_millis;
        }
    }
    parts.join(" ")
}

/// A time span like `1h 30m`, produces [`Value::Duration`]
#[derive(Debug, Clone, Default)]
pub struct Duration {
    /// Shortest accepted duration, inclusive
    pub min: Option<StdDuration>,
    /// Longest accepted duration, inclusive
    pub max: Option<StdDuration>,
}

#[async_trait::async_trait]
impl ArgType for Duration {
    fn name(&self) -> &str {
        "Duration"
    }

    async fn parse(&self, ctx: &ArgContext<'_>) -> Result<Value, TypeError> {
        let duration = parse_duration(ctx.raw)?;
        let too_short = self.min.map_or(false, |min| duration < min);
        let too_long = self.max.map_or(false, |max| duration > max);
        if too_short || too_long {
            return Err(super::OutOfRange::new(
                self.min.map(format_duration),
                self.max.map(format_duration),
            )
            .into());
        }
        Ok(Value::Duration(duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        for &(input, millis) in &[
            ("500ms", 500),
            ("1s", 1000),
            ("1h30m", 90 * 60 * 1000),
            ("1h 30m", 90 * 60 * 1000),
            ("2D 12H", 60 * 60 * 60 * 1000),
            ("1m 1ms", 60 * 1000 + 1),
            ("1w", 7 * 24 * 60 * 60 * 1000),
            ("0s", 0),
        ] {
            assert_eq!(
                parse_duration(input).unwrap(),
                StdDuration::from_millis(millis),
                "{:?}",
                input
            );
        }

        for input in &["", "5", "1x", "1h 1h", "h", "1h30", "99999999999999999999w"] {
            assert!(parse_duration(input).is_err(), "{:?}", input);
        }

        // Only ASCII digits count as numbers
        assert_eq!(
            parse_duration("\u{661}h").unwrap_err().reason,
            "every number needs a unit out of w, d, h, m, s, ms"
        );
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(StdDuration::from_secs(5400)), "1h 30m");
        assert_eq!(format_duration(StdDuration::from_millis(1001)), "1s 1ms");
        assert_eq!(format_duration(StdDuration::ZERO), "0s");

        let duration = StdDuration::from_secs(9 * 24 * 60 * 60 + 5);
        assert_eq!(parse_duration(&format_duration(duration)).unwrap(), duration);
    }

    #[tokio::test]
    async fn test_bounds() {
        let kind = Duration {
            min: Some(StdDuration::from_secs(60)),
            max: None,
        };
        let error = kind
            .parse(&ArgContext::detached("30s", "delay", false))
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "must be at least 1m");
    }
}
