//! The Command struct, which stores all information about a single framework command

use crate::BoxFuture;

/// A prefix command with its arguments, metadata and subcommands.
///
/// Commands are plain structs; create one with [`Command::new`] and fill in the rest with struct
/// update syntax:
///
/// ```rust
/// # type Error = Box<dyn std::error::Error + Send + Sync>;
/// use argot::{types, ArgConfig, Command, RequiredArg, Syntax};
///
/// let echo = Command::<(), Error> {
///     description: Some("Repeats what you say".into()),
///     args: ArgConfig::new(Syntax::Shellword)
///         .required(RequiredArg::new("text", types::Text::default()))
///         .variadic(),
///     ..Command::new("echo", |ctx, args| {
///         Box::pin(async move {
///             let words = args.get::<Vec<String>>(0).unwrap_or_default();
///             ctx.say(words.join(" ")).await?;
///             Ok(())
///         })
///     })
/// };
/// assert_eq!(echo.args.usage(), "<text...>");
/// ```
#[derive(derivative::Derivative)]
#[derivative(Default(bound = ""), Debug(bound = ""))]
pub struct Command<U, E> {
    /// Callback to execute when this command is invoked.
    ///
    /// May be `None` for commands that only group subcommands. Invoking such a command without a
    /// subcommand fails with [`crate::FrameworkError::SubcommandRequired`].
    #[derivative(Debug = "ignore")]
    pub action:
        Option<for<'a> fn(crate::Context<'a, U, E>, crate::Args) -> BoxFuture<'a, Result<(), E>>>,
    /// Main name of the command. Aliases can be set in [`Self::aliases`].
    pub name: String,
    /// Alternative triggers for the command
    pub aliases: Vec<String>,
    /// Full name including parent command names.
    ///
    /// Initially set to just [`Self::name`] and properly populated when the framework is created.
    pub qualified_name: String,
    /// Short description of the command. Displayed inline in help menus and similar.
    pub description: Option<String>,
    /// Multiline description with detailed usage instructions. Displayed in the command specific
    /// help: `~help command_name`
    pub help_text: Option<String>,
    /// Identifier for the category that this command will be displayed in for help commands.
    pub category: Option<String>,
    /// Whether to hide this command in help menus.
    pub hidden: bool,
    /// Positional arguments and flags, and the syntax they are written in
    pub args: crate::ArgConfig,
    /// Example invocations without prefix, shown in the command specific help
    pub examples: Vec<String>,
    /// Subcommands of this command, if any
    pub subcommands: Vec<Command<U, E>>,
    /// Require a subcommand to be invoked
    pub subcommand_required: bool,
    /// If any of these functions returns false, this command will not be executed.
    #[derivative(Debug = "ignore")]
    pub checks: Vec<fn(crate::Context<'_, U, E>) -> BoxFuture<'_, Result<bool, E>>>,
    /// If true, only people in guilds may use this command
    pub guild_only: bool,
    /// If true, the command may only run in DMs
    pub dm_only: bool,
    /// If true, only users from the [owners list](crate::FrameworkOptions::owners) may use this
    /// command.
    pub owners_only: bool,
    /// Command-specific override for [`crate::FrameworkOptions::on_error`]
    #[derivative(Debug = "ignore")]
    pub on_error: Option<fn(crate::FrameworkError<'_, U, E>) -> BoxFuture<'_, ()>>,
}

impl<U, E> Command<U, E> {
    /// Creates a command that takes no input, with the given name and action
    pub fn new(
        name: impl Into<String>,
        action: for<'a> fn(crate::Context<'a, U, E>, crate::Args) -> BoxFuture<'a, Result<(), E>>,
    ) -> Self {
        let name = name.into();
        Self {
            action: Some(action),
            qualified_name: name.clone(),
            name,
            ..Default::default()
        }
    }

    /// Creates a command without action that only groups the given subcommands
    pub fn group(name: impl Into<String>, subcommands: Vec<Command<U, E>>) -> Self {
        let name = name.into();
        Self {
            qualified_name: name.clone(),
            name,
            subcommands,
            subcommand_required: true,
            ..Default::default()
        }
    }

    /// Whether the given name is this command's name or one of its aliases
    pub fn is_called(&self, name: &str, case_insensitive: bool) -> bool {
        let equal = |other: &str| {
            if case_insensitive {
                other.eq_ignore_ascii_case(name)
            } else {
                other == name
            }
        };
        equal(&self.name) || self.aliases.iter().any(|alias| equal(alias))
    }
}

impl<U, E> PartialEq for Command<U, E> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}
impl<U, E> Eq for Command<U, E> {}
