use crate::{ArgContext, ArgType, TypeError, Value};

/// Error thrown when the input is not a number
#[derive(Debug, Clone)]
pub struct InvalidNumber {
    /// Whether a whole number was expected
    pub integer: bool,
}
impl std::fmt::Display for InvalidNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.integer {
            f.write_str("Expected a whole number")
        } else {
            f.write_str("Expected a number")
        }
    }
}
impl std::error::Error for InvalidNumber {}

/// A whole number, e.g. `-12` or `+3`
#[derive(Debug, Clone, Default)]
pub struct Integer {
    /// Smallest accepted value, inclusive
    pub min: Option<i64>,
    /// Largest accepted value, inclusive
    pub max: Option<i64>,
}

impl Integer {
    /// An integer within the given inclusive bounds
    pub fn range(min: i64, max: i64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }
}

#[async_trait::async_trait]
impl ArgType for Integer {
    fn name(&self) -> &str {
        "Integer"
    }

    async fn parse(&self, ctx: &ArgContext<'_>) -> Result<Value, TypeError> {
        let value = ctx
            .raw
            .parse::<i64>()
            .map_err(|_| InvalidNumber { integer: true })?;
        super::check_range(value, self.min, self.max)?;
        Ok(Value::Integer(value))
    }
}

/// A finite floating point number, e.g. `3.5` or `-1e3`
#[derive(Debug, Clone, Default)]
pub struct Decimal {
    /// Smallest accepted value, inclusive
    pub min: Option<f64>,
    /// Largest accepted value, inclusive
    pub max: Option<f64>,
}

impl Decimal {
    /// A decimal within the given inclusive bounds
    pub fn range(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }
}

#[async_trait::async_trait]
impl ArgType for Decimal {
    fn name(&self) -> &str {
        "Decimal"
    }

    async fn parse(&self, ctx: &ArgContext<'_>) -> Result<Value, TypeError> {
        let value = ctx
            .raw
            .parse::<f64>()
            .ok()
            .filter(|x| x.is_finite())
            .ok_or(InvalidNumber { integer: false })?;
        super::check_range(value, self.min, self.max)?;
        Ok(Value::Decimal(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn parse(kind: &dyn ArgType, raw: &str) -> Result<Value, TypeError> {
        kind.parse(&ArgContext::detached(raw, "n", false)).await
    }

    #[tokio::test]
    async fn test_integer() {
        let integer = Integer::default();
        for &(input, expected) in &[("5", 5), ("-12", -12), ("+3", 3), ("0", 0)] {
            assert_eq!(parse(&integer, input).await.unwrap(), Value::Integer(expected));
        }
        for input in &["", "1.5", "five", "99999999999999999999", " 1"] {
            assert!(parse(&integer, input).await.is_err(), "{:?}", input);
        }

        let bounded = Integer::range(1, 10);
        assert!(parse(&bounded, "10").await.is_ok());
        let error = parse(&bounded, "11").await.unwrap_err();
        assert_eq!(error.to_string(), "must be between 1 and 10");
    }

    #[tokio::test]
    async fn test_decimal() {
        let decimal = Decimal::default();
        assert_eq!(parse(&decimal, "3.5").await.unwrap(), Value::Decimal(3.5));
        assert_eq!(parse(&decimal, "-1e3").await.unwrap(), Value::Decimal(-1000.0));
        for input in &["inf", "NaN", "-infinity", "1,5"] {
            assert!(parse(&decimal, input).await.is_err(), "{:?}", input);
        }

        let bounded = Decimal {
            min: Some(0.0),
            max: None,
        };
        let error = parse(&bounded, "-0.5").await.unwrap_err();
        assert_eq!(error.to_string(), "must be at least 0");
    }
}
