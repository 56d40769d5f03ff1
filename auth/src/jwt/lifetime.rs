use chrono::Duration;

/// Token lifetime parsed from an expression such as `24h`, `7d` or `30m`.
///
/// The grammar is `<digits><unit>` with unit `h` (hours), `d` (days) or `m` (minutes).
/// Anything else, including values too large for a `Duration`, falls back to 24 hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetime(Duration);

impl TokenLifetime {
    const DEFAULT_HOURS: i64 = 24;

    /// Parse a lifetime expression, defaulting to 24 hours when it does not match.
    pub fn parse(expression: &str) -> Self {
        Self::try_parse(expression).unwrap_or_default()
    }

    fn try_parse(expression: &str) -> Option<Self> {
        let unit = expression.chars().last()?;
        let digits = expression.strip_suffix(unit)?;

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let value: i64 = digits.parse().ok()?;
        let duration = match unit {
            'h' => Duration::try_hours(value),
            'd' => Duration::try_days(value),
            'm' => Duration::try_minutes(value),
            _ => None,
        }?;

        Some(Self(duration))
    }

    /// The parsed duration.
    pub fn duration(&self) -> Duration {
        self.0
    }
}

impl Default for TokenLifetime {
    fn default() -> Self {
        Self(Duration::hours(Self::DEFAULT_HOURS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        assert_eq!(TokenLifetime::parse("24h").duration(), Duration::hours(24));
        assert_eq!(TokenLifetime::parse("7d").duration(), Duration::days(7));
        assert_eq!(TokenLifetime::parse("30m").duration(), Duration::minutes(30));
        assert_eq!(TokenLifetime::parse("007d").duration(), Duration::days(7));
    }

    #[test]
    fn test_unmatched_expression_defaults_to_24_hours() {
        for expression in ["not-a-duration", "", "h", "7", "7w", "-5h", " 7d", "7d ", "1.5h", "٣d"] {
            assert_eq!(
                TokenLifetime::parse(expression).duration(),
                Duration::hours(24),
                "expression {:?}",
                expression
            );
        }
    }

    #[test]
    fn test_overflowing_value_defaults_to_24_hours() {
        assert_eq!(
            TokenLifetime::parse("99999999999999999999d").duration(),
            Duration::hours(24)
        );
        assert_eq!(
            TokenLifetime::parse("9223372036854775807d").duration(),
            Duration::hours(24)
        );
    }
}
