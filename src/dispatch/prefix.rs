//! Dispatches incoming messages onto framework commands

use crate::serenity_prelude as serenity;

/// Checks if this message is a bot invocation by attempting to strip the prefix
///
/// Returns tuple of stripped prefix and rest of the message, if any prefix matches. Prefixes are
/// tried in this order: [`crate::PrefixFrameworkOptions::prefix`], then the
/// [additional prefixes](crate::PrefixFrameworkOptions::additional_prefixes), then a mention of
/// the bot.
///
/// ```rust
/// # use argot::serenity_prelude as serenity;
/// let options = argot::PrefixFrameworkOptions {
///     prefix: Some("~".into()),
///     additional_prefixes: vec![argot::Prefix::Regex(regex::Regex::new(r"(?i)hey bot,?\s*").unwrap())],
///     ..Default::default()
/// };
/// let bot_id = serenity::UserId(123);
///
/// assert_eq!(argot::strip_prefix(&options, bot_id, "~ping"), Some(("~", "ping")));
/// assert_eq!(argot::strip_prefix(&options, bot_id, "Hey bot, ping"), Some(("Hey bot, ", "ping")));
/// assert_eq!(argot::strip_prefix(&options, bot_id, "<@!123> ping"), Some(("<@!123>", " ping")));
/// assert_eq!(argot::strip_prefix(&options, bot_id, "ping"), None);
/// ```
pub fn strip_prefix<'a>(
    options: &'a crate::PrefixFrameworkOptions,
    bot_id: serenity::UserId,
    content: &'a str,
) -> Option<(&'a str, &'a str)> {
    if let Some(prefix) = &options.prefix {
        if let Some(content) = content.strip_prefix(prefix.as_str()) {
            return Some((prefix, content));
        }
    }

    if let Some((prefix, content)) =
        options
            .additional_prefixes
            .iter()
            .find_map(|prefix| match prefix {
                &crate::Prefix::Literal(prefix) => Some((prefix, content.strip_prefix(prefix)?)),
                crate::Prefix::Regex(prefix) => {
                    let regex_match = prefix.find(content)?;
                    if regex_match.start() == 0 {
                        Some(content.split_at(regex_match.end()))
                    } else {
                        None
                    }
                }
            })
    {
        return Some((prefix, content));
    }

    if options.mention_as_prefix {
        // Mentions are either <@USER_ID> or <@!USER_ID>
        if let Some(stripped_content) = (|| {
            content
                .strip_prefix("<@")?
                .trim_start_matches('!')
                .strip_prefix(&bot_id.0.to_string())?
                .strip_prefix('>')
        })() {
            let mention_prefix = &content[..(content.len() - stripped_content.len())];
            return Some((mention_prefix, stripped_content));
        }
    }

    None
}

/// Find a command or subcommand within `&[Command]`, given a command invocation without a prefix.
/// Returns the verbatim command name string as well as the command arguments (i.e. the remaining
/// string).
///
/// The API must be like this (as opposed to just taking the command name upfront) because of
/// subcommands.
///
/// ```rust
/// use argot::Command;
///
/// fn noop(_: argot::Context<'_, (), ()>, _: argot::Args) -> argot::BoxFuture<'_, Result<(), ()>> {
///     Box::pin(async { Ok(()) })
/// }
/// let commands = vec![
///     Command::<(), ()>::new("command1", noop),
///     Command::group("command2", vec![Command::new("command3", noop)]),
/// ];
///
/// let mut parent_commands = Vec::new();
/// assert_eq!(
///     argot::find_command(&commands, "command1 my arguments", false, &mut parent_commands),
///     Some((&commands[0], "command1", "my arguments")),
/// );
/// assert!(parent_commands.is_empty());
///
/// parent_commands.clear();
/// assert_eq!(
///     argot::find_command(&commands, "command2 command3 my arguments", false, &mut parent_commands),
///     Some((&commands[1].subcommands[0], "command3", "my arguments")),
/// );
/// assert_eq!(&parent_commands, &[&commands[1]]);
///
/// parent_commands.clear();
/// assert_eq!(
///     argot::find_command(&commands, "CoMmAnD2 cOmMaNd99 my arguments", true, &mut parent_commands),
///     Some((&commands[1], "CoMmAnD2", "cOmMaNd99 my arguments")),
/// );
/// assert!(parent_commands.is_empty());
/// ```
pub fn find_command<'a, U, E>(
    commands: &'a [crate::Command<U, E>],
    remaining_message: &'a str,
    case_insensitive: bool,
    parent_commands: &mut Vec<&'a crate::Command<U, E>>,
) -> Option<(&'a crate::Command<U, E>, &'a str, &'a str)> {
    let (command_name, remaining_message) = remaining_message
        .split_once(char::is_whitespace)
        .map(|(name, rest)| (name, rest.trim_start()))
        .unwrap_or((remaining_message, ""));

    let command = commands
        .iter()
        .find(|command| command.is_called(command_name, case_insensitive))?;

    parent_commands.push(command);
    Some(
        find_command(
            &command.subcommands,
            remaining_message,
            case_insensitive,
            parent_commands,
        )
        .unwrap_or_else(|| {
            parent_commands.pop();
            (command, command_name, remaining_message)
        }),
    )
}

/// Manually dispatches a message with the prefix framework.
///
/// If a [`crate::Context::await_reply`] call waits for this message, the message is handed over
/// to it and not treated as a command invocation.
pub async fn dispatch_message<'a, U: Send + Sync, E>(
    framework: crate::FrameworkContext<'a, U, E>,
    ctx: &'a serenity::Context,
    msg: &'a serenity::Message,
    parent_commands: &'a mut Vec<&'a crate::Command<U, E>>,
) -> Result<(), crate::FrameworkError<'a, U, E>> {
    if framework
        .reply_waiters
        .is_waiting(msg.channel_id, msg.author.id)
        && framework
            .reply_waiters
            .offer(msg.channel_id, msg.author.id, msg.clone())
            .is_ok()
    {
        log::debug!("message {} consumed as a reply", msg.id);
        return Ok(());
    }

    if let Some(ctx) = parse_invocation(framework, ctx, msg, parent_commands).await? {
        run_invocation(ctx).await?;
    }
    Ok(())
}

/// Given a Message and some context data, parses prefix, command etc. out of the message and
/// returns the resulting [`crate::Context`]. To run the command, see [`run_invocation`].
async fn parse_invocation<'a, U: Send + Sync, E>(
    framework: crate::FrameworkContext<'a, U, E>,
    ctx: &'a serenity::Context,
    msg: &'a serenity::Message,
    parent_commands: &'a mut Vec<&'a crate::Command<U, E>>,
) -> Result<Option<crate::Context<'a, U, E>>, crate::FrameworkError<'a, U, E>> {
    let options = &framework.options.prefix_options;
    if msg.author.id == framework.bot_id {
        // Check if we're allowed to execute our own messages
        if !options.execute_self_messages {
            return Ok(None);
        }
    } else if msg.author.bot && options.ignore_bots {
        log::debug!("ignoring message {} by bot {}", msg.id, msg.author.id);
        return Ok(None);
    }

    // Strip prefix, trim whitespace between prefix and rest, split rest into command name and args
    let (prefix, msg_content) = match strip_prefix(options, framework.bot_id, &msg.content) {
        Some(x) => x,
        None => return Ok(None),
    };
    let msg_content = msg_content.trim_start();

    let (command, invoked_command_name, args) = find_command(
        &framework.options.commands,
        msg_content,
        options.case_insensitive_commands,
        parent_commands,
    )
    .ok_or(crate::FrameworkError::UnknownCommand {
        ctx,
        msg,
        prefix,
        msg_content,
        framework,
    })?;

    Ok(Some(crate::Context {
        serenity_context: ctx,
        msg,
        prefix,
        invoked_command_name,
        args,
        command,
        parent_commands,
        framework,
        data: framework.user_data,
    }))
}

/// Given an existing parsed command invocation from [`parse_invocation`], run it, including all the
/// before and after code like checks and argument parsing
async fn run_invocation<U, E>(
    ctx: crate::Context<'_, U, E>,
) -> Result<(), crate::FrameworkError<'_, U, E>> {
    super::common::check_permissions(ctx).await?;

    let action = match ctx.command.action {
        Some(action) if !ctx.command.subcommand_required => action,
        _ => return Err(crate::FrameworkError::SubcommandRequired { ctx }),
    };

    let args = ctx
        .command
        .args
        .parse(ctx.args, Some((ctx.serenity_context, ctx.msg)))
        .await
        .map_err(|error| crate::FrameworkError::ArgumentParse { error, ctx })?;

    (ctx.framework.options.pre_command)(ctx).await;

    let result = execute(action, ctx, args).await;

    (ctx.framework.options.post_command)(ctx).await;

    result
}

/// Runs the command action, turning errors and, with the `handle_panics` feature, panics into
/// [`crate::FrameworkError`]s
async fn execute<'a, U, E>(
    action: for<'b> fn(crate::Context<'b, U, E>, crate::Args) -> crate::BoxFuture<'b, Result<(), E>>,
    ctx: crate::Context<'a, U, E>,
    args: crate::Args,
) -> Result<(), crate::FrameworkError<'a, U, E>> {
    #[cfg(feature = "handle_panics")]
    let result = match futures_util::FutureExt::catch_unwind(std::panic::AssertUnwindSafe(
        async move { action(ctx, args).await },
    ))
    .await
    {
        Ok(result) => result,
        Err(payload) => {
            let payload = payload
                .downcast_ref::<&str>()
                .map(|payload| (*payload).to_owned())
                .or_else(|| payload.downcast_ref::<String>().cloned());
            return Err(crate::FrameworkError::CommandPanic { payload, ctx });
        }
    };
    #[cfg(not(feature = "handle_panics"))]
    let result = action(ctx, args).await;

    result.map_err(|error| crate::FrameworkError::Command { error, ctx })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> crate::PrefixFrameworkOptions {
        crate::PrefixFrameworkOptions {
            prefix: Some("!".into()),
            additional_prefixes: vec![
                crate::Prefix::Literal("bot "),
                crate::Prefix::Regex(regex::Regex::new(r"(?i)\?+").unwrap()),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_strip_prefix() {
        let options = options();
        let bot_id = serenity::UserId(42);
        for &(content, expected) in &[
            ("!ping", Some(("!", "ping"))),
            ("! ping", Some(("!", " ping"))),
            ("bot ping", Some(("bot ", "ping"))),
            ("???ping", Some(("???", "ping"))),
            ("<@42> ping", Some(("<@42>", " ping"))),
            ("<@!42>ping", Some(("<@!42>", "ping"))),
            ("<@43> ping", None),
            ("ping !", None),
            ("a?ping", None),
            ("", None),
        ] {
            assert_eq!(strip_prefix(&options, bot_id, content), expected, "{:?}", content);
        }

        let options = crate::PrefixFrameworkOptions {
            mention_as_prefix: false,
            ..options
        };
        assert_eq!(strip_prefix(&options, bot_id, "<@42> ping"), None);
    }

    fn noop(_: crate::Context<'_, (), ()>, _: crate::Args) -> crate::BoxFuture<'_, Result<(), ()>> {
        Box::pin(async { Ok(()) })
    }

    #[test]
    fn test_find_command_aliases() {
        let commands = vec![crate::Command::<(), ()> {
            aliases: vec!["p".into()],
            ..crate::Command::new("ping", noop)
        }];

        let mut parents = Vec::new();
        assert_eq!(
            find_command(&commands, "p  a b", false, &mut parents),
            Some((&commands[0], "p", "a b"))
        );
        assert_eq!(
            find_command(&commands, "PING", true, &mut parents),
            Some((&commands[0], "PING", ""))
        );
        assert_eq!(find_command(&commands, "PING", false, &mut parents), None);
        assert_eq!(find_command(&commands, "", true, &mut parents), None);
        assert!(parents.is_empty());
    }

    /// A serenity context that is never connected to Discord
    fn detached_context() -> serenity::Context {
        let (tx, _rx) = futures::channel::mpsc::unbounded();
        serenity::Context {
            data: std::sync::Arc::new(tokio::sync::RwLock::new(serenity::TypeMap::new())),
            shard: serenity::ShardMessenger::new(tx),
            shard_id: 0,
            http: std::sync::Arc::new(serenity::Http::new("example")),
            #[cfg(feature = "cache")]
            cache: Default::default(),
        }
    }

    fn noop_string(
        _: crate::Context<'_, (), String>,
        _: crate::Args,
    ) -> crate::BoxFuture<'_, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    #[tokio::test]
    async fn test_checks_run_before_subcommand_required() {
        let options = crate::FrameworkOptions::<(), String> {
            commands: vec![crate::Command {
                guild_only: true,
                ..crate::Command::group("tag", vec![crate::Command::new("show", noop_string)])
            }],
            prefix_options: crate::PrefixFrameworkOptions {
                prefix: Some("!".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let reply_waiters = crate::ReplyWaiters::new();
        let framework = crate::FrameworkContext {
            bot_id: serenity::UserId(42),
            options: &options,
            user_data: &(),
            reply_waiters: &reply_waiters,
        };
        let ctx = detached_context();

        // In DMs the restriction wins over the subcommand listing
        let mut msg = serenity::CustomMessage::new();
        msg.content("!tag");
        let msg = msg.build();
        let mut parent_commands = Vec::new();
        let result = dispatch_message(framework, &ctx, &msg, &mut parent_commands).await;
        assert!(matches!(result, Err(crate::FrameworkError::GuildOnly { .. })));

        let mut msg = serenity::CustomMessage::new();
        msg.content("!tag").guild_id(serenity::GuildId(1));
        let msg = msg.build();
        let mut parent_commands = Vec::new();
        let result = dispatch_message(framework, &ctx, &msg, &mut parent_commands).await;
        assert!(matches!(
            result,
            Err(crate::FrameworkError::SubcommandRequired { .. })
        ));
    }
}
