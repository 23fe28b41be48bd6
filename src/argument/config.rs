//! The declarative [`ArgConfig`] and the [`ArgType`] trait its entries are typed with

use crate::serenity_prelude as serenity;

/// Everything an argument type sees when parsing a single piece of user input
#[derive(Clone, Copy)]
pub struct ArgContext<'a> {
    /// The raw input, already unescaped by the lexer
    pub raw: &'a str,
    /// Name of the argument or canonical name of the flag being parsed
    pub name: &'a str,
    /// Whether a flag value is being parsed (as opposed to a positional argument)
    pub is_flag: bool,
    /// Serenity context of the invocation. `None` when parsing outside of Discord, e.g. in tests
    pub serenity_context: Option<&'a serenity::Context>,
    /// Message that triggered the invocation. `None` when parsing outside of Discord
    pub msg: Option<&'a serenity::Message>,
}

impl<'a> ArgContext<'a> {
    /// Creates a context with no Discord invocation attached
    pub fn detached(raw: &'a str, name: &'a str, is_flag: bool) -> Self {
        Self {
            raw,
            name,
            is_flag,
            serenity_context: None,
            msg: None,
        }
    }
}

/// A type that command arguments and flags can be parsed as.
///
/// IO may be done as part of parsing; the Discord invocation is available through [`ArgContext`].
///
/// ```rust
/// struct Even;
///
/// #[argot::async_trait]
/// impl argot::ArgType for Even {
///     fn name(&self) -> &str {
///         "Even number"
///     }
///
///     async fn parse(&self, ctx: &argot::ArgContext<'_>) -> Result<argot::Value, argot::TypeError> {
///         let number = ctx.raw.parse::<i64>()?;
///         if number % 2 != 0 {
///             return Err(format!("{} is odd", number).into());
///         }
///         Ok(argot::Value::Integer(number))
///     }
/// }
/// ```
#[async_trait::async_trait]
pub trait ArgType: Send + Sync {
    /// Human readable type name, shown in usage texts
    fn name(&self) -> &str;

    /// Parses the raw input of [`ArgContext::raw`]
    async fn parse(&self, ctx: &ArgContext<'_>) -> Result<crate::Value, crate::TypeError>;

    /// Value to use if an optional argument or flag of this type is omitted and the
    /// [`OptionalArg`] or [`Flag`] doesn't define its own default
    fn default_value(&self) -> Option<crate::Value> {
        None
    }

    /// Whether flags of this type are given without a value, e.g. `-verbose`
    fn is_switch(&self) -> bool {
        false
    }
}

/// How raw input is split into flags and arguments
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Syntax {
    /// `-flag value, first argument, second argument`. See [`crate::comma`]
    Comma,
    /// `-flag value "first argument" second`. See [`crate::shellword`]
    Shellword,
}

impl Default for Syntax {
    fn default() -> Self {
        Self::Shellword
    }
}

/// A positional argument that must always be given
#[derive(derivative::Derivative)]
#[derivative(Debug)]
pub struct RequiredArg {
    /// Name, shown in usage texts and errors
    pub name: String,
    /// Short description for help texts
    pub description: Option<String>,
    /// The type the raw input is parsed as
    #[derivative(Debug(format_with = "fmt_arg_type"))]
    pub kind: Box<dyn ArgType>,
}

impl RequiredArg {
    /// Creates a required argument without description
    pub fn new(name: impl Into<String>, kind: impl ArgType + 'static) -> Self {
        Self {
            name: name.into(),
            description: None,
            kind: Box::new(kind),
        }
    }

    /// Sets the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A positional argument which may be omitted
#[derive(derivative::Derivative)]
#[derivative(Debug)]
pub struct OptionalArg {
    /// Name, shown in usage texts and errors
    pub name: String,
    /// Short description for help texts
    pub description: Option<String>,
    /// The type the raw input is parsed as
    #[derivative(Debug(format_with = "fmt_arg_type"))]
    pub kind: Box<dyn ArgType>,
    /// Value used when the argument is omitted. Falls back to [`ArgType::default_value`]
    pub default: Option<crate::Value>,
}

impl OptionalArg {
    /// Creates an optional argument without description or default
    pub fn new(name: impl Into<String>, kind: impl ArgType + 'static) -> Self {
        Self {
            name: name.into(),
            description: None,
            kind: Box::new(kind),
            default: None,
        }
    }

    /// Sets the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the value used when the argument is omitted
    pub fn default(mut self, default: impl Into<crate::Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// A named flag, written as `-name` in front of its value
#[derive(derivative::Derivative)]
#[derivative(Debug)]
pub struct Flag {
    /// Canonical name, without the leading `-`
    pub name: String,
    /// Alternative names, without the leading `-`
    pub aliases: Vec<String>,
    /// Short description for help texts
    pub description: Option<String>,
    /// The type the flag value is parsed as
    #[derivative(Debug(format_with = "fmt_arg_type"))]
    pub kind: Box<dyn ArgType>,
    /// Value used when the flag is omitted. Falls back to [`ArgType::default_value`]
    pub default: Option<crate::Value>,
    /// Whether the flag may be given multiple times. The values are collected into a
    /// [`crate::Value::List`]
    pub multi: bool,
}

impl Flag {
    /// Creates a single-use flag without aliases, description or default
    pub fn new(name: impl Into<String>, kind: impl ArgType + 'static) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            description: None,
            kind: Box::new(kind),
            default: None,
            multi: false,
        }
    }

    /// Adds an alternative name
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Sets the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the value used when the flag is omitted
    pub fn default(mut self, default: impl Into<crate::Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Allows the flag to be given multiple times
    pub fn multi(mut self) -> Self {
        self.multi = true;
        self
    }

    /// Whether the given name is this flag's name or one of its aliases
    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|alias| alias == name)
    }
}

/// Prints the type name of a boxed [`ArgType`] in Debug output
fn fmt_arg_type(
    kind: &Box<dyn ArgType>,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    f.write_str(kind.name())
}

/// Declarative description of a command's positional arguments and flags
///
/// ```rust
/// use argot::{types, ArgConfig, Flag, OptionalArg, RequiredArg, Syntax};
///
/// let config = ArgConfig {
///     syntax: Syntax::Comma,
///     required: vec![RequiredArg::new("title", types::Text::default())],
///     optional: vec![OptionalArg::new("tags", types::Text::default())],
///     variadic: true,
///     flags: vec![Flag::new("pin", types::Switch)],
/// };
/// assert_eq!(config.usage(), "<title>, [tags...]");
/// ```
#[derive(Debug, Default)]
pub struct ArgConfig {
    /// Which lexer splits the raw input
    pub syntax: Syntax,
    /// Positional arguments that must be given, in order
    pub required: Vec<RequiredArg>,
    /// Positional arguments after the required ones, which may be omitted from the end
    pub optional: Vec<OptionalArg>,
    /// If true, the last declared positional argument takes all remaining inputs
    pub variadic: bool,
    /// Named flags
    pub flags: Vec<Flag>,
}

impl ArgConfig {
    /// Creates an empty configuration, i.e. a command that takes no input at all
    pub fn new(syntax: Syntax) -> Self {
        Self {
            syntax,
            ..Default::default()
        }
    }

    /// Appends a required argument
    pub fn required(mut self, arg: RequiredArg) -> Self {
        self.required.push(arg);
        self
    }

    /// Appends an optional argument
    pub fn optional(mut self, arg: OptionalArg) -> Self {
        self.optional.push(arg);
        self
    }

    /// Makes the last positional argument variadic
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    /// Adds a flag
    pub fn flag(mut self, flag: Flag) -> Self {
        self.flags.push(flag);
        self
    }

    /// Finds a flag by its name or one of its aliases
    pub fn find_flag(&self, name: &str) -> Option<&Flag> {
        self.flags.iter().find(|flag| flag.matches(name))
    }

    /// Total number of declared positional arguments
    pub fn positional_count(&self) -> usize {
        self.required.len() + self.optional.len()
    }

    /// Whether the config accepts no input at all
    pub fn is_empty(&self) -> bool {
        self.positional_count() == 0 && self.flags.is_empty()
    }

    /// Splits the raw input according to [`Self::syntax`] and parses every piece with its type.
    ///
    /// Pass the Discord invocation if there is one, so that argument types can access it.
    pub async fn parse(
        &self,
        input: &str,
        invocation: Option<(&serenity::Context, &serenity::Message)>,
    ) -> Result<crate::Args, crate::ArgumentError> {
        let raw = match self.syntax {
            Syntax::Comma => crate::comma::lex(input)?,
            Syntax::Shellword => crate::shellword::lex(input, self)?,
        };
        crate::helper::resolve(self, raw, invocation).await
    }

    /// One-line usage of the positional arguments, e.g. `<user> [reason...]`
    pub fn usage(&self) -> String {
        let separator = match self.syntax {
            Syntax::Comma => ", ",
            Syntax::Shellword => " ",
        };
        let last = self.positional_count().checked_sub(1);

        let required = self.required.iter().map(|arg| (&arg.name, true));
        let optional = self.optional.iter().map(|arg| (&arg.name, false));
        required
            .chain(optional)
            .enumerate()
            .map(|(i, (name, is_required))| {
                let dots = if self.variadic && Some(i) == last {
                    "..."
                } else {
                    ""
                };
                if is_required {
                    format!("<{}{}>", name, dots)
                } else {
                    format!("[{}{}]", name, dots)
                }
            })
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// One line per flag, e.g. `-count, -c <Integer> (repeatable): how often`
    pub fn flag_usage(&self) -> Vec<String> {
        self.flags
            .iter()
            .map(|flag| {
                let mut line = format!("-{}", flag.name);
                for alias in &flag.aliases {
                    line += ", -";
                    line += alias;
                }
                if !flag.kind.is_switch() {
                    line += &format!(" <{}>", flag.kind.name());
                }
                if flag.multi {
                    line += " (repeatable)";
                }
                if let Some(description) = &flag.description {
                    line += ": ";
                    line += description;
                }
                line
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types;

    #[test]
    fn test_usage() {
        let config = ArgConfig::new(Syntax::Shellword)
            .required(RequiredArg::new("a", types::Integer::default()))
            .required(RequiredArg::new("b", types::Integer::default()))
            .optional(OptionalArg::new("c", types::Text::default()));
        assert_eq!(config.usage(), "<a> <b> [c]");

        let config = config.variadic();
        assert_eq!(config.usage(), "<a> <b> [c...]");

        let config = ArgConfig::new(Syntax::Comma)
            .required(RequiredArg::new("words", types::Text::default()))
            .variadic();
        assert_eq!(config.usage(), "<words...>");

        assert_eq!(ArgConfig::default().usage(), "");
    }

    #[test]
    fn test_flag_usage() {
        let config = ArgConfig::default()
            .flag(Flag::new("verbose", types::Switch).alias("v"))
            .flag(
                Flag::new("tag", types::Text::default())
                    .multi()
                    .description("Tags to add"),
            );
        assert_eq!(
            config.flag_usage(),
            ["-verbose, -v", "-tag <Text> (repeatable): Tags to add"]
        );
        assert!(config.find_flag("v").is_some());
        assert!(config.find_flag("V").is_none());
        assert_eq!(config.find_flag("tag").map(|f| f.multi), Some(true));
    }

    #[tokio::test]
    async fn test_parse_without_invocation() {
        let config = ArgConfig::new(Syntax::Comma)
            .required(RequiredArg::new("name", types::Text::default()))
            .flag(Flag::new("count", types::Integer::default()));
        let args = config.parse("-count 2, some name", None).await.unwrap();
        assert_eq!(args.get::<String>(0).as_deref(), Some("some name"));
        assert_eq!(args.flag::<i64>("count"), Some(2));

        let config = ArgConfig {
            syntax: Syntax::Shellword,
            ..config
        };
        let args = config.parse("\"some name\" -count 2", None).await.unwrap();
        assert_eq!(args.get::<String>(0).as_deref(), Some("some name"));
        assert_eq!(args.flag::<i64>("count"), Some(2));
    }
}
