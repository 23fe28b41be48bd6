//! Building blocks for common commands like help commands or error handlers
//!
//! This file provides sample commands and utility functions like help menus or error handlers to
//! use as a starting point for the framework.

mod help;
pub use help::*;

use crate::serenity_prelude as serenity;

/// An error handler that logs errors via the [`log`] crate or reports them in a Discord message.
/// Set up a logger (e.g. `env_logger::init()`) to see the logged errors from this method.
///
/// If the user invoked the command wrong ([`crate::FrameworkError::ArgumentParse`]), the command
/// usage is displayed and the user is directed to the help menu.
///
/// Can return an error if sending the Discord error message failed. You can decide for yourself
/// how to handle this, for example:
/// ```rust,no_run
/// # async { let error: argot::FrameworkError<'_, (), &str> = todo!();
/// if let Err(e) = argot::builtins::on_error(error).await {
///     log::error!("Fatal error while sending error message: {}", e);
/// }
/// # };
/// ```
pub async fn on_error<U, E: std::fmt::Display + std::fmt::Debug>(
    error: crate::FrameworkError<'_, U, E>,
) -> Result<(), serenity::Error> {
    match error {
        crate::FrameworkError::Setup { error, .. } => {
            log::error!("Error in user data setup: {}", error);
        }
        crate::FrameworkError::Command { ctx, error } => {
            let error = error.to_string();
            log::error!(
                "An error occured in command `{}`: {}",
                ctx.command().qualified_name,
                error
            );
            ctx.say(error).await?;
        }
        crate::FrameworkError::ArgumentParse { ctx, error } => {
            let command = ctx.command();
            let usage = command.args.usage();
            let mut response = format!(
                "**{}**\nUsage: `{}{}",
                error,
                ctx.prefix(),
                command.qualified_name
            );
            if !usage.is_empty() {
                response += " ";
                response += &usage;
            }
            response += "`";
            if !command.args.flags.is_empty() {
                response += "\nFlags: ";
                response += &command.args.flag_usage().join("; ");
            }
            ctx.reply(response).await?;
        }
        crate::FrameworkError::CommandPanic { ctx, payload } => {
            log::error!(
                "Command `{}` panicked: {}",
                ctx.command().qualified_name,
                payload.as_deref().unwrap_or("<unknown payload>")
            );
            // Not showing the payload to the user because it may contain sensitive info
            ctx.say("An unexpected internal error has occurred.").await?;
        }
        crate::FrameworkError::SubcommandRequired { ctx } => {
            let subcommands = ctx
                .command()
                .subcommands
                .iter()
                .filter(|s| !s.hidden)
                .map(|s| &*s.name)
                .collect::<Vec<_>>();
            let response = format!(
                "You must specify one of the following subcommands: {}",
                subcommands.join(", ")
            );
            ctx.say(response).await?;
        }
        crate::FrameworkError::CommandCheckFailed { ctx, error } => {
            log::error!(
                "A command check failed in command {} for user {}: {:?}",
                ctx.command().qualified_name,
                ctx.author().name,
                error,
            );
            ctx.say("You are not allowed to use this command.").await?;
        }
        crate::FrameworkError::NotAnOwner { ctx } => {
            ctx.say("Only bot owners can call this command").await?;
        }
        crate::FrameworkError::GuildOnly { ctx } => {
            ctx.say("You cannot run this command in DMs.").await?;
        }
        crate::FrameworkError::DmOnly { ctx } => {
            ctx.say("You cannot run this command outside DMs.").await?;
        }
        crate::FrameworkError::UnknownCommand {
            msg_content,
            prefix,
            ..
        } => {
            log::debug!(
                "Recognized prefix `{}`, but didn't recognize command name in `{}`",
                prefix,
                msg_content,
            );
        }
        crate::FrameworkError::__NonExhaustive(unreachable) => match unreachable {},
    }

    Ok(())
}
