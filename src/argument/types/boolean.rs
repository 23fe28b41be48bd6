use crate::{ArgContext, ArgType, TypeError, Value};

/// Error thrown when the user enters a string that is not recognized as a boolean
#[derive(Default, Debug)]
pub struct InvalidBool {
    #[doc(hidden)]
    pub __non_exhaustive: (),
}
impl std::fmt::Display for InvalidBool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Expected a string like `yes` or `no` for the boolean parameter")
    }
}
impl std::error::Error for InvalidBool {}

/// Parses the strings users commonly type for yes and no
fn parse_bool(raw: &str) -> Result<bool, InvalidBool> {
    match raw.to_ascii_lowercase().trim() {
        "yes" | "y" | "true" | "t" | "1" | "enable" | "on" => Ok(true),
        "no" | "n" | "false" | "f" | "0" | "disable" | "off" => Ok(false),
        _ => Err(InvalidBool::default()),
    }
}

/// `yes`/`no`, `on`/`off`, `true`/`false` and similar
#[derive(Debug, Clone, Copy, Default)]
pub struct Boolean;

#[async_trait::async_trait]
impl ArgType for Boolean {
    fn name(&self) -> &str {
        "Boolean"
    }

    async fn parse(&self, ctx: &ArgContext<'_>) -> Result<Value, TypeError> {
        Ok(Value::Boolean(parse_bool(ctx.raw)?))
    }
}

/// A flag that is either given (`true`) or not (`false`), and never takes a value.
///
/// Used as positional argument, it behaves like [`Boolean`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Switch;

#[async_trait::async_trait]
impl ArgType for Switch {
    fn name(&self) -> &str {
        "Switch"
    }

    async fn parse(&self, ctx: &ArgContext<'_>) -> Result<Value, TypeError> {
        Ok(Value::Boolean(parse_bool(ctx.raw)?))
    }

    fn default_value(&self) -> Option<Value> {
        Some(Value::Boolean(false))
    }

    fn is_switch(&self) -> bool {
        true
    }
}

#[cfg(test)]
#[test]
fn test_parse_bool() {
    for input in &["yes", "Y", "TRUE", "t", "1", "enable", "On"] {
        assert!(parse_bool(input).unwrap(), "{:?}", input);
    }
    for input in &["no", "N", "false", "F", "0", "disable", "off"] {
        assert!(!parse_bool(input).unwrap(), "{:?}", input);
    }
    assert!(parse_bool("maybe").is_err());
    assert!(parse_bool("").is_err());
}
