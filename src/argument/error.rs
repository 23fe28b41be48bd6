//! Errors produced while turning a raw argument string into [`crate::Args`]

/// Boxed error returned by [`crate::ArgType::parse`]
pub type TypeError = Box<dyn std::error::Error + Send + Sync>;

/// Any way in which a raw argument string can fail to match a command's [`crate::ArgConfig`]
#[derive(Debug)]
pub enum ArgumentError {
    /// Shellword syntax: a quote was opened but never closed
    #[non_exhaustive]
    UnclosedQuote {
        /// The quote character, `"` or `'`
        quote: char,
    },
    /// Comma syntax: two commas with nothing in between, or a trailing comma
    #[non_exhaustive]
    EmptyArgument {
        /// 1-based position of the empty segment
        position: usize,
    },
    /// Fewer positional arguments were given than the command requires
    #[non_exhaustive]
    TooFewArguments {
        /// Name of the first required argument that is missing
        missing: String,
    },
    /// More positional arguments were given than the command accepts
    #[non_exhaustive]
    TooManyArguments {
        /// Number of positional arguments the command accepts
        max: usize,
        /// Number of positional arguments that were given
        given: usize,
    },
    /// A flag name matches neither a flag nor an alias of the command
    #[non_exhaustive]
    UnknownFlag {
        /// The flag name as written by the user, without the leading `-`
        name: String,
    },
    /// A flag that may only be given once was given multiple times
    #[non_exhaustive]
    DuplicateFlag {
        /// Canonical name of the flag
        name: String,
    },
    /// A flag that takes a value was given without one
    #[non_exhaustive]
    MissingFlagValue {
        /// Canonical name of the flag
        name: String,
    },
    /// A switch flag was given a value
    #[non_exhaustive]
    UnexpectedFlagValue {
        /// Canonical name of the flag
        name: String,
        /// The value that was given
        input: String,
    },
    /// A positional argument failed to parse as its type
    #[non_exhaustive]
    InvalidArgument {
        /// Name of the argument
        name: String,
        /// The raw input of the argument
        input: String,
        /// Error returned by the argument type
        error: TypeError,
    },
    /// A flag value failed to parse as the flag's type
    #[non_exhaustive]
    InvalidFlag {
        /// Canonical name of the flag
        name: String,
        /// The raw flag value
        input: String,
        /// Error returned by the argument type
        error: TypeError,
    },
}

impl ArgumentError {
    /// If the error is about one specific piece of user input, returns that input
    pub fn input(&self) -> Option<&str> {
        match self {
            Self::UnexpectedFlagValue { input, .. }
            | Self::InvalidArgument { input, .. }
            | Self::InvalidFlag { input, .. } => Some(input),
            _ => None,
        }
    }
}

impl std::fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnclosedQuote { quote } => write!(f, "A {} quote was never closed", quote),
            Self::EmptyArgument { position } => {
                write!(f, "Argument {} is empty (check for doubled commas)", position)
            }
            Self::TooFewArguments { missing } => {
                write!(f, "Too few arguments were passed: `{}` is missing", missing)
            }
            Self::TooManyArguments { max, given } => write!(
                f,
                "Too many arguments were passed: expected at most {}, got {}",
                max, given
            ),
            Self::UnknownFlag { name } => write!(f, "There is no flag named `-{}`", name),
            Self::DuplicateFlag { name } => {
                write!(f, "The flag `-{}` may only be used once", name)
            }
            Self::MissingFlagValue { name } => write!(f, "The flag `-{}` needs a value", name),
            Self::UnexpectedFlagValue { name, .. } => {
                write!(f, "The flag `-{}` doesn't take a value", name)
            }
            Self::InvalidArgument { name, error, .. } => {
                write!(f, "Invalid value for `{}`: {}", name, error)
            }
            Self::InvalidFlag { name, error, .. } => {
                write!(f, "Invalid value for `-{}`: {}", name, error)
            }
        }
    }
}

impl std::error::Error for ArgumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidArgument { error, .. } | Self::InvalidFlag { error, .. } => {
                Some(&**error)
            }
            _ => None,
        }
    }
}
