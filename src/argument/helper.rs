//! Shared second stage of both syntaxes: turns lexed strings into typed [`crate::Args`]

use crate::serenity_prelude as serenity;
use crate::{ArgConfig, ArgContext, ArgType, ArgumentError, Args, Value};
use std::collections::HashMap;

/// The Discord invocation an input belongs to, if any
type Invocation<'a> = Option<(&'a serenity::Context, &'a serenity::Message)>;

/// A flag as written by the user, before type parsing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawFlag {
    /// Name or alias, without the leading `-`
    pub name: String,
    /// The value, if one was given
    pub value: Option<String>,
}

/// Output of a lexer: flags and positional arguments as plain strings
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawInput {
    /// Flags in input order
    pub flags: Vec<RawFlag>,
    /// Positional arguments in input order
    pub args: Vec<String>,
}

/// Builds the [`ArgContext`] for a single input
fn arg_context<'a>(
    raw: &'a str,
    name: &'a str,
    is_flag: bool,
    invocation: Invocation<'a>,
) -> ArgContext<'a> {
    ArgContext {
        raw,
        name,
        is_flag,
        serenity_context: invocation.map(|(ctx, _)| ctx),
        msg: invocation.map(|(_, msg)| msg),
    }
}

/// Type-parses the lexed input according to the config.
///
/// Flags are parsed before positional arguments; the first error encountered is returned.
pub async fn resolve(
    config: &ArgConfig,
    raw: RawInput,
    invocation: Invocation<'_>,
) -> Result<Args, ArgumentError> {
    let flags = resolve_flags(config, raw.flags, invocation).await?;
    let positional = resolve_positional(config, raw.args, invocation).await?;

    Ok(Args { positional, flags })
}

/// Parses flag values, enforces multiplicities and fills in defaults of omitted flags
async fn resolve_flags(
    config: &ArgConfig,
    raw_flags: Vec<RawFlag>,
    invocation: Invocation<'_>,
) -> Result<HashMap<String, Value>, ArgumentError> {
    let mut flags = HashMap::new();

    for raw_flag in raw_flags {
        let flag = match config.find_flag(&raw_flag.name) {
            Some(flag) => flag,
            None => {
                return Err(ArgumentError::UnknownFlag {
                    name: raw_flag.name,
                })
            }
        };
        if !flag.multi && flags.contains_key(&flag.name) {
            return Err(ArgumentError::DuplicateFlag {
                name: flag.name.clone(),
            });
        }

        let value = match (flag.kind.is_switch(), raw_flag.value) {
            (true, None) => Value::Boolean(true),
            (true, Some(input)) => {
                return Err(ArgumentError::UnexpectedFlagValue {
                    name: flag.name.clone(),
                    input,
                })
            }
            (false, None) => {
                return Err(ArgumentError::MissingFlagValue {
                    name: flag.name.clone(),
                })
            }
            (false, Some(input)) => {
                let result = flag
                    .kind
                    .parse(&arg_context(&input, &flag.name, true, invocation))
                    .await;
                result.map_err(|error| ArgumentError::InvalidFlag {
                    name: flag.name.clone(),
                    input,
                    error,
                })?
            }
        };

        if flag.multi {
            let entry = flags
                .entry(flag.name.clone())
                .or_insert_with(|| Value::List(Vec::new()));
            if let Value::List(values) = entry {
                values.push(value);
            }
        } else {
            flags.insert(flag.name.clone(), value);
        }
    }

    for flag in &config.flags {
        if flags.contains_key(&flag.name) {
            continue;
        }
        let default = flag
            .default
            .clone()
            .or_else(|| flag.kind.default_value())
            .map(|default| match default {
                Value::List(values) => Value::List(values),
                other if flag.multi => Value::List(vec![other]),
                other => other,
            })
            .or_else(|| flag.multi.then(|| Value::List(Vec::new())))
            .or_else(|| flag.kind.is_switch().then(|| Value::Boolean(false)));
        if let Some(default) = default {
            flags.insert(flag.name.clone(), default);
        }
    }

    Ok(flags)
}

/// Parses a single positional input
async fn parse_positional(
    kind: &dyn ArgType,
    name: &str,
    input: String,
    invocation: Invocation<'_>,
) -> Result<Value, ArgumentError> {
    let result = kind
        .parse(&arg_context(&input, name, false, invocation))
        .await;
    result.map_err(|error| ArgumentError::InvalidArgument {
        name: name.to_owned(),
        input,
        error,
    })
}

/// Assigns raw positional inputs to the declared arguments and parses them
async fn resolve_positional(
    config: &ArgConfig,
    inputs: Vec<String>,
    invocation: Invocation<'_>,
) -> Result<Vec<(String, Option<Value>)>, ArgumentError> {
    let declared = config
        .required
        .iter()
        .map(|arg| (&arg.name, &*arg.kind, None))
        .chain(
            config
                .optional
                .iter()
                .map(|arg| (&arg.name, &*arg.kind, arg.default.as_ref())),
        )
        .collect::<Vec<_>>();

    if let Some(missing) = config.required.get(inputs.len()) {
        return Err(ArgumentError::TooFewArguments {
            missing: missing.name.clone(),
        });
    }
    let variadic = config.variadic && !declared.is_empty();
    if !variadic && inputs.len() > declared.len() {
        return Err(ArgumentError::TooManyArguments {
            max: declared.len(),
            given: inputs.len(),
        });
    }

    let mut positional = Vec::with_capacity(declared.len());
    let mut inputs = inputs.into_iter();
    for (i, &(name, kind, default)) in declared.iter().enumerate() {
        let is_variadic = variadic && i == declared.len() - 1;

        let value = if is_variadic {
            let mut values = Vec::new();
            for input in inputs.by_ref() {
                values.push(parse_positional(kind, name, input, invocation).await?);
            }
            if values.is_empty() {
                None
            } else {
                Some(Value::List(values))
            }
        } else {
            match inputs.next() {
                Some(input) => Some(parse_positional(kind, name, input, invocation).await?),
                None => None,
            }
        };

        let value = value.or_else(|| {
            let default = default.cloned().or_else(|| kind.default_value())?;
            Some(match default {
                Value::List(values) => Value::List(values),
                other if is_variadic => Value::List(vec![other]),
                other => other,
            })
        });
        positional.push((name.clone(), value));
    }

    Ok(positional)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{types, Flag, OptionalArg, RequiredArg, Syntax};

    fn raw(flags: &[(&str, Option<&str>)], args: &[&str]) -> RawInput {
        RawInput {
            flags: flags
                .iter()
                .map(|&(name, value)| RawFlag {
                    name: name.into(),
                    value: value.map(Into::into),
                })
                .collect(),
            args: args.iter().map(|&arg| arg.into()).collect(),
        }
    }

    fn config() -> ArgConfig {
        ArgConfig::new(Syntax::Comma)
            .required(RequiredArg::new("target", types::Text::default()))
            .optional(OptionalArg::new("amount", types::Integer::default()).default(1_i64))
            .optional(OptionalArg::new("reason", types::Text::default()))
            .flag(Flag::new("silent", types::Switch).alias("s"))
            .flag(Flag::new("tag", types::Text::default()).multi())
            .flag(Flag::new("limit", types::Integer::default()))
    }

    #[tokio::test]
    async fn test_positional() {
        let args = resolve(&config(), raw(&[], &["bob"]), None).await.unwrap();
        assert_eq!(args.len(), 3);
        assert_eq!(args.get::<String>(0).as_deref(), Some("bob"));
        assert_eq!(args.get_by_name::<i64>("amount"), Some(1));
        assert_eq!(args.value_by_name("reason"), None);

        let args = resolve(&config(), raw(&[], &["bob", "5", "spam"]), None)
            .await
            .unwrap();
        assert_eq!(args.get::<i64>(1), Some(5));
        assert_eq!(args.get::<String>(2).as_deref(), Some("spam"));
    }

    #[tokio::test]
    async fn test_positional_count() {
        match resolve(&config(), raw(&[], &[]), None).await {
            Err(ArgumentError::TooFewArguments { missing }) => assert_eq!(missing, "target"),
            other => panic!("{:?}", other),
        }
        match resolve(&config(), raw(&[], &["a", "1", "b", "c"]), None).await {
            Err(ArgumentError::TooManyArguments { max, given }) => {
                assert_eq!((max, given), (3, 4))
            }
            other => panic!("{:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_argument() {
        match resolve(&config(), raw(&[], &["bob", "many"]), None).await {
            Err(ArgumentError::InvalidArgument { name, input, .. }) => {
                assert_eq!((name.as_str(), input.as_str()), ("amount", "many"))
            }
            other => panic!("{:?}", other),
        }
    }

    #[tokio::test]
    async fn test_variadic() {
        let config = ArgConfig::new(Syntax::Shellword)
            .required(RequiredArg::new("first", types::Integer::default()))
            .required(RequiredArg::new("rest", types::Integer::default()))
            .variadic();

        let args = resolve(&config, raw(&[], &["1", "2", "3", "4"]), None)
            .await
            .unwrap();
        assert_eq!(args.get::<i64>(0), Some(1));
        assert_eq!(args.get::<Vec<i64>>(1), Some(vec![2, 3, 4]));

        let args = resolve(&config, raw(&[], &["1", "2"]), None).await.unwrap();
        assert_eq!(args.get::<Vec<i64>>(1), Some(vec![2]));

        match resolve(&config, raw(&[], &["1"]), None).await {
            Err(ArgumentError::TooFewArguments { missing }) => assert_eq!(missing, "rest"),
            other => panic!("{:?}", other),
        }
        assert!(resolve(&config, raw(&[], &["1", "2", "x"]), None)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_optional_variadic_default() {
        let config = ArgConfig::default()
            .optional(OptionalArg::new("words", types::Text::default()).default("none"))
            .variadic();

        let args = resolve(&config, raw(&[], &[]), None).await.unwrap();
        assert_eq!(args.get::<Vec<String>>(0), Some(vec!["none".to_owned()]));
    }

    #[tokio::test]
    async fn test_flags() {
        let args = resolve(
            &config(),
            raw(
                &[("s", None), ("tag", Some("a")), ("tag", Some("b"))],
                &["bob"],
            ),
            None,
        )
        .await
        .unwrap();
        assert_eq!(args.flag::<bool>("silent"), Some(true));
        assert_eq!(
            args.flag::<Vec<String>>("tag"),
            Some(vec!["a".to_owned(), "b".to_owned()])
        );
        assert_eq!(args.flag_value("limit"), None);

        // Defaults of omitted flags
        let args = resolve(&config(), raw(&[], &["bob"]), None).await.unwrap();
        assert_eq!(args.flag::<bool>("silent"), Some(false));
        assert_eq!(args.flag::<Vec<String>>("tag"), Some(vec![]));

        // A scalar default of a multi flag still yields a list
        let config = ArgConfig::default()
            .flag(Flag::new("tag", types::Text::default()).multi().default("misc"));
        let args = resolve(&config, raw(&[], &[]), None).await.unwrap();
        assert_eq!(args.flag::<Vec<String>>("tag"), Some(vec!["misc".to_owned()]));
    }

    #[tokio::test]
    async fn test_flag_errors() {
        let cases: &[(&[(&str, Option<&str>)], &str)] = &[
            (&[("silent", None), ("s", None)], "DuplicateFlag"),
            (&[("limit", Some("1")), ("limit", Some("2"))], "DuplicateFlag"),
            (&[("silent", Some("yes"))], "UnexpectedFlagValue"),
            (&[("limit", None)], "MissingFlagValue"),
            (&[("limit", Some("x"))], "InvalidFlag"),
            (&[("unknown", None)], "UnknownFlag"),
        ];
        for &(flags, expected) in cases {
            let error = resolve(&config(), raw(flags, &["bob"]), None)
                .await
                .unwrap_err();
            let variant = format!("{:?}", error);
            assert!(variant.starts_with(expected), "{:?}: {}", flags, variant);
        }
    }

    #[tokio::test]
    async fn test_flags_before_positionals() {
        // Both are invalid, the flag error wins
        let error = resolve(&config(), raw(&[("limit", Some("x"))], &[]), None)
            .await
            .unwrap_err();
        assert!(matches!(error, ArgumentError::InvalidFlag { .. }));
    }
}
