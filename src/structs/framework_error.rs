//! Simple module for the `FrameworkError` struct and its impls

use crate::serenity_prelude as serenity;

/// Any error that can occur while the bot runs. Either thrown by user code (those variants will
/// have an `error` field with your error type `E` in it), or originating from within the framework.
///
/// These errors are handled with the [`crate::FrameworkOptions::on_error`] callback
#[derive(derivative::Derivative)]
#[derivative(Debug)]
pub enum FrameworkError<'a, U, E> {
    /// User code threw an error in user data setup
    #[non_exhaustive]
    Setup {
        /// Error which was thrown in the setup code
        error: E,
        /// The Framework passed to the event
        #[derivative(Debug = "ignore")]
        framework: &'a crate::Framework<U, E>,
        /// Discord Ready event data present during setup
        data_about_bot: &'a serenity::Ready,
        /// The serenity Context passed to the event
        #[derivative(Debug = "ignore")]
        ctx: &'a serenity::Context,
    },
    /// Error occurred during command execution
    #[non_exhaustive]
    Command {
        /// Error which was thrown in the command code
        error: E,
        /// General context
        ctx: crate::Context<'a, U, E>,
    },
    /// The command input didn't match the command's [`crate::ArgConfig`]
    #[non_exhaustive]
    ArgumentParse {
        /// What exactly went wrong. See [`crate::ArgumentError::input`] for the offending input
        error: crate::ArgumentError,
        /// General context
        ctx: crate::Context<'a, U, E>,
    },
    /// Panic occurred at any phase of command execution after constructing the `crate::Context`.
    ///
    /// This feature is intended as a last-resort safeguard to gracefully print an error message to
    /// the user on a panic. Panics should only be thrown for bugs in the code, don't use this for
    /// normal errors!
    #[non_exhaustive]
    CommandPanic {
        /// Panic payload which was thrown in the command code
        ///
        /// If a panic was thrown via [`std::panic::panic_any()`] and the payload was neither &str,
        /// nor String, the payload is `None`.
        payload: Option<String>,
        /// Command context
        ctx: crate::Context<'a, U, E>,
    },
    /// Command was invoked without specifying a subcommand, but the command has
    /// `subcommand_required` set or no action of its own
    #[non_exhaustive]
    SubcommandRequired {
        /// General context
        ctx: crate::Context<'a, U, E>,
    },
    /// Provided pre-command check either errored, or returned false, so command execution aborted
    #[non_exhaustive]
    CommandCheckFailed {
        /// If execution wasn't aborted because of an error but because it successfully returned
        /// false, this field is None
        error: Option<E>,
        /// General context
        ctx: crate::Context<'a, U, E>,
    },
    /// A non-owner tried to invoke an owners-only command
    #[non_exhaustive]
    NotAnOwner {
        /// General context
        ctx: crate::Context<'a, U, E>,
    },
    /// Command was invoked but the channel was a DM channel
    #[non_exhaustive]
    GuildOnly {
        /// General context
        ctx: crate::Context<'a, U, E>,
    },
    /// Command was invoked but the channel was a non-DM channel
    #[non_exhaustive]
    DmOnly {
        /// General context
        ctx: crate::Context<'a, U, E>,
    },
    /// A message had the correct prefix but the following string was not a recognized command
    #[non_exhaustive]
    UnknownCommand {
        /// Serenity's Context
        #[derivative(Debug = "ignore")]
        ctx: &'a serenity::Context,
        /// The message in question
        msg: &'a serenity::Message,
        /// The prefix that was recognized
        prefix: &'a str,
        /// The rest of the message (after the prefix) which was not recognized as a command
        ///
        /// This is a single field instead of two fields (command name and args) due to subcommands
        msg_content: &'a str,
        /// Framework context
        #[derivative(Debug = "ignore")]
        framework: crate::FrameworkContext<'a, U, E>,
    },
    // #[non_exhaustive] forbids struct update syntax for ?? reason
    #[doc(hidden)]
    __NonExhaustive(std::convert::Infallible),
}

impl<'a, U, E> FrameworkError<'a, U, E> {
    /// Returns the [`serenity::Context`] of this error
    pub fn serenity_context(&self) -> &'a serenity::Context {
        match *self {
            Self::Setup { ctx, .. } => ctx,
            Self::UnknownCommand { ctx, .. } => ctx,
            Self::Command { ctx, .. }
            | Self::ArgumentParse { ctx, .. }
            | Self::CommandPanic { ctx, .. }
            | Self::SubcommandRequired { ctx }
            | Self::CommandCheckFailed { ctx, .. }
            | Self::NotAnOwner { ctx }
            | Self::GuildOnly { ctx }
            | Self::DmOnly { ctx } => ctx.serenity_context(),
            Self::__NonExhaustive(unreachable) => match unreachable {},
        }
    }

    /// Returns the [`crate::Context`] of this error, if it has one
    pub fn ctx(&self) -> Option<crate::Context<'a, U, E>> {
        Some(match *self {
            Self::Command { ctx, .. } => ctx,
            Self::ArgumentParse { ctx, .. } => ctx,
            Self::CommandPanic { ctx, .. } => ctx,
            Self::SubcommandRequired { ctx } => ctx,
            Self::CommandCheckFailed { ctx, .. } => ctx,
            Self::NotAnOwner { ctx } => ctx,
            Self::GuildOnly { ctx } => ctx,
            Self::DmOnly { ctx } => ctx,
            Self::Setup { .. } | Self::UnknownCommand { .. } => return None,
            Self::__NonExhaustive(unreachable) => match unreachable {},
        })
    }

    /// Calls the appropriate `on_error` function (command-specific or global) with this error
    pub async fn handle(self, framework_options: &crate::FrameworkOptions<U, E>) {
        let on_error = self
            .ctx()
            .and_then(|c| c.command().on_error)
            .unwrap_or(framework_options.on_error);
        on_error(self).await;
    }
}

/// Simple macro to deduplicate code. Can't be a function due to lifetime issues with `format_args`
macro_rules! full_command_name {
    ($ctx:expr) => {
        format_args!("{}{}", $ctx.prefix(), $ctx.command().qualified_name)
    };
}

impl<U, E: std::fmt::Display> std::fmt::Display for FrameworkError<'_, U, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Setup { .. } => write!(f, "argot setup error"),
            Self::Command { error: _, ctx } => {
                write!(f, "error in command `{}`", full_command_name!(ctx))
            }
            Self::ArgumentParse { error, ctx } => write!(
                f,
                "failed to parse arguments of command `{}` on input {:?}",
                full_command_name!(ctx),
                error.input()
            ),
            Self::CommandPanic { ctx, payload: _ } => {
                write!(f, "panic in command `{}`", full_command_name!(ctx))
            }
            Self::SubcommandRequired { ctx } => write!(
                f,
                "expected subcommand for command `{}`",
                full_command_name!(ctx)
            ),
            Self::CommandCheckFailed { error: _, ctx } => write!(
                f,
                "pre-command check for command `{}` either denied access or errored",
                full_command_name!(ctx)
            ),
            Self::NotAnOwner { ctx } => write!(
                f,
                "owner-only command `{}` cannot be run by non-owners",
                full_command_name!(ctx)
            ),
            Self::GuildOnly { ctx } => write!(
                f,
                "guild-only command `{}` cannot run in DMs",
                full_command_name!(ctx)
            ),
            Self::DmOnly { ctx } => write!(
                f,
                "DM-only command `{}` cannot run in guilds",
                full_command_name!(ctx)
            ),
            Self::UnknownCommand { msg_content, .. } => {
                write!(f, "unknown command `{}`", msg_content)
            }
            Self::__NonExhaustive(unreachable) => match *unreachable {},
        }
    }
}

impl<'a, U: std::fmt::Debug, E: std::error::Error + 'static> std::error::Error
    for FrameworkError<'a, U, E>
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Setup { error, .. } => Some(error),
            Self::Command { error, .. } => Some(error),
            Self::ArgumentParse { error, .. } => Some(error),
            Self::CommandPanic { .. } => None,
            Self::SubcommandRequired { .. } => None,
            Self::CommandCheckFailed { error, .. } => error.as_ref().map(|x| x as _),
            Self::NotAnOwner { .. } => None,
            Self::GuildOnly { .. } => None,
            Self::DmOnly { .. } => None,
            Self::UnknownCommand { .. } => None,
            Self::__NonExhaustive(unreachable) => match *unreachable {},
        }
    }
}
