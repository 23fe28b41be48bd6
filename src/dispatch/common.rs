//! Checks that run before a command is executed

/// See [`check_permissions`]. Runs the check only for a single command. The caller should call
/// this multiple time for each parent command to achieve the check inheritance logic.
async fn check_permissions_single<'a, U, E>(
    ctx: crate::Context<'a, U, E>,
    cmd: &'a crate::Command<U, E>,
) -> Result<(), crate::FrameworkError<'a, U, E>> {
    if cmd.owners_only && !ctx.framework().options().owners.contains(&ctx.author().id) {
        return Err(crate::FrameworkError::NotAnOwner { ctx });
    }

    if cmd.guild_only && ctx.guild_id().is_none() {
        return Err(crate::FrameworkError::GuildOnly { ctx });
    }

    if cmd.dm_only && ctx.guild_id().is_some() {
        return Err(crate::FrameworkError::DmOnly { ctx });
    }

    for check in &cmd.checks {
        match check(ctx).await {
            Ok(true) => {}
            Ok(false) => {
                return Err(crate::FrameworkError::CommandCheckFailed { ctx, error: None })
            }
            Err(error) => {
                return Err(crate::FrameworkError::CommandCheckFailed {
                    error: Some(error),
                    ctx,
                })
            }
        }
    }

    Ok(())
}

/// Checks if the invoker is allowed to execute this command.
///
/// Runs [`crate::FrameworkOptions::command_check`] first, then the restrictions and checks of all
/// parent commands, outermost first, and of the command itself.
#[allow(clippy::needless_lifetimes)] // false positive (clippy issue 7271)
pub async fn check_permissions<'a, U, E>(
    ctx: crate::Context<'a, U, E>,
) -> Result<(), crate::FrameworkError<'a, U, E>> {
    if let Some(command_check) = ctx.framework().options().command_check {
        match command_check(ctx).await {
            Ok(true) => {}
            Ok(false) => {
                return Err(crate::FrameworkError::CommandCheckFailed { ctx, error: None });
            }
            Err(error) => {
                return Err(crate::FrameworkError::CommandCheckFailed {
                    error: Some(error),
                    ctx,
                });
            }
        }
    }

    for &parent_command in ctx.parent_commands() {
        check_permissions_single(ctx, parent_command).await?;
    }
    check_permissions_single(ctx, ctx.command()).await
}
