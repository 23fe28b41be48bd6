//! A small bot showing both argument syntaxes, flags, subcommands and reply waits.
//!
//! Run with `DISCORD_TOKEN=... RUST_LOG=argot=debug cargo run --example basic_bot`

use argot::serenity_prelude as serenity;
use argot::{types, ArgConfig, Args, Command, Flag, OptionalArg, RequiredArg, Syntax};
use std::collections::HashMap;

// Types used by all command functions
type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = argot::Context<'a, Data, Error>;
type CommandResult<'a> = argot::BoxFuture<'a, Result<(), Error>>;

// Custom user data passed to all command functions
pub struct Data {
    tags: parking_lot::Mutex<HashMap<String, String>>,
}

/// `~help [command...]`
fn help(ctx: Context<'_>, args: Args) -> CommandResult<'_> {
    Box::pin(async move {
        let command = args.get::<Vec<String>>(0).map(|words| words.join(" "));
        let config = argot::builtins::HelpConfiguration {
            extra_text_at_bottom: "Type ~help command for more info on a command.",
            show_subcommands: true,
            ..Default::default()
        };
        argot::builtins::help(ctx, command.as_deref(), config).await?;
        Ok(())
    })
}

/// `~ping`
fn ping(ctx: Context<'_>, _: Args) -> CommandResult<'_> {
    Box::pin(async move {
        ctx.say("Pong!").await?;
        Ok(())
    })
}

/// `~roll [sides] -count 3`
fn roll(ctx: Context<'_>, args: Args) -> CommandResult<'_> {
    Box::pin(async move {
        let sides = args.get::<i64>(0).unwrap_or(6);
        let count = args.flag::<i64>("count").unwrap_or(1);

        // Pseudo random numbers seeded with the message ID
        let mut seed = ctx.msg.id.0;
        let rolls = (0..count)
            .map(|_| {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                ((seed >> 33) % sides as u64 + 1).to_string()
            })
            .collect::<Vec<_>>();
        ctx.say(format!("🎲 {}", rolls.join(", "))).await?;
        Ok(())
    })
}

/// `~remind <when> <text...> [-silent]`
fn remind(ctx: Context<'_>, args: Args) -> CommandResult<'_> {
    Box::pin(async move {
        let when = args.get::<std::time::Duration>(0).unwrap_or_default();
        let text = args.get::<Vec<String>>(1).unwrap_or_default().join(" ");
        let silent = args.flag::<bool>("silent").unwrap_or(false);

        if !silent {
            ctx.reply(format!(
                "Okay, reminding you in {}",
                types::format_duration(when)
            ))
            .await?;
        }
        tokio::time::sleep(when).await;
        ctx.reply(format!("Reminder: {}", text)).await?;
        Ok(())
    })
}

/// `~tag add <name>, <content...>`
fn tag_add(ctx: Context<'_>, args: Args) -> CommandResult<'_> {
    Box::pin(async move {
        let name = args.get::<String>(0).unwrap_or_default();
        let content = args.get::<Vec<String>>(1).unwrap_or_default().join(", ");

        let replaced = ctx.data().tags.lock().insert(name.clone(), content).is_some();
        let response = if replaced {
            format!("Updated tag `{}`", name)
        } else {
            format!("Created tag `{}`", name)
        };
        ctx.say(response).await?;
        Ok(())
    })
}

/// `~tag show <name>`
fn tag_show(ctx: Context<'_>, args: Args) -> CommandResult<'_> {
    Box::pin(async move {
        let name = args.get::<String>(0).unwrap_or_default();
        let content = ctx.data().tags.lock().get(&name).cloned();
        match content {
            Some(content) => ctx.say(content).await?,
            None => ctx.say(format!("No tag named `{}`", name)).await?,
        };
        Ok(())
    })
}

/// `~quiz`, waits for the invoking user's answer
fn quiz(ctx: Context<'_>, _: Args) -> CommandResult<'_> {
    Box::pin(async move {
        ctx.say("What is the answer to life, the universe and everything? (say `cancel` to give up)")
            .await?;
        let response = match ctx.await_reply().await {
            Ok(msg) if msg.content.trim() == "42" => "Correct!".to_owned(),
            Ok(msg) => format!("`{}` is not quite right. It's 42.", msg.content),
            Err(argot::AwaitReplyError::Timeout) => "Too slow! It's 42.".to_owned(),
            Err(argot::AwaitReplyError::Canceled) => "Quiz canceled.".to_owned(),
            Err(e) => return Err(e.into()),
        };
        ctx.say(response).await?;
        Ok(())
    })
}

fn commands() -> Vec<Command<Data, Error>> {
    vec![
        Command {
            description: Some("Show this menu".into()),
            args: ArgConfig::new(Syntax::Shellword)
                .optional(OptionalArg::new("command", types::Text::default()))
                .variadic(),
            ..Command::new("help", help)
        },
        Command {
            description: Some("Checks if the bot is alive".into()),
            category: Some("Fun".into()),
            ..Command::new("ping", ping)
        },
        Command {
            description: Some("Rolls some dice".into()),
            category: Some("Fun".into()),
            aliases: vec!["dice".into()],
            args: ArgConfig::new(Syntax::Shellword)
                .optional(OptionalArg::new("sides", types::Integer::range(2, 100)).default(6_i64))
                .flag(
                    Flag::new("count", types::Integer::range(1, 20))
                        .alias("c")
                        .description("How many dice to roll"),
                ),
            examples: vec!["roll 20 -count 2".into()],
            ..Command::new("roll", roll)
        },
        Command {
            description: Some("Reminds you of something".into()),
            category: Some("Utility".into()),
            args: ArgConfig::new(Syntax::Shellword)
                .required(
                    RequiredArg::new("when", types::Duration::default())
                        .description("For example 1h30m"),
                )
                .required(RequiredArg::new("text", types::Text::default()))
                .variadic()
                .flag(
                    Flag::new("silent", types::Switch)
                        .alias("s")
                        .description("Don't confirm the reminder"),
                ),
            examples: vec!["remind 10m \"check the oven\"".into()],
            ..Command::new("remind", remind)
        },
        Command {
            description: Some("Stores and shows text snippets".into()),
            category: Some("Utility".into()),
            ..Command::group(
                "tag",
                vec![
                    Command {
                        description: Some("Creates or updates a tag".into()),
                        args: ArgConfig::new(Syntax::Comma)
                            .required(RequiredArg::new("name", types::Text::length(1, 32)))
                            .required(RequiredArg::new("content", types::Text::default()))
                            .variadic(),
                        examples: vec!["tag add rules, be nice, no spam".into()],
                        ..Command::new("add", tag_add)
                    },
                    Command {
                        description: Some("Shows a tag".into()),
                        args: ArgConfig::new(Syntax::Shellword)
                            .required(RequiredArg::new("name", types::Text::default())),
                        ..Command::new("show", tag_show)
                    },
                ],
            )
        },
        Command {
            description: Some("Asks you a question".into()),
            category: Some("Fun".into()),
            guild_only: true,
            ..Command::new("quiz", quiz)
        },
    ]
}

async fn on_error(error: argot::FrameworkError<'_, Data, Error>) {
    // Only customize command errors and forward the rest to the default handler
    match error {
        argot::FrameworkError::Setup { error, .. } => panic!("Failed to start bot: {:?}", error),
        argot::FrameworkError::Command { error, ctx, .. } => {
            log::error!("Error in command `{}`: {:?}", ctx.command().qualified_name, error);
            if let Err(e) = ctx.say("Something went wrong, sorry!").await {
                log::error!("Error while reporting error: {}", e);
            }
        }
        error => {
            if let Err(e) = argot::builtins::on_error(error).await {
                log::error!("Error while handling error: {}", e)
            }
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    // FrameworkOptions contains all of argot's configuration options in one struct
    // Every option can be omitted to use its default value
    let options = argot::FrameworkOptions {
        commands: commands(),
        prefix_options: argot::PrefixFrameworkOptions {
            prefix: Some("~".into()),
            additional_prefixes: vec![
                argot::Prefix::Literal("hey bot,"),
                argot::Prefix::Literal("hey bot"),
            ],
            ..Default::default()
        },
        on_error: |error| Box::pin(on_error(error)),
        // This code is run before every command
        pre_command: |ctx| {
            Box::pin(async move {
                log::info!("Executing command {}...", ctx.command().qualified_name);
            })
        },
        // This code is run after every command, no matter if it succeeded
        post_command: |ctx| {
            Box::pin(async move {
                log::info!("Executed command {}!", ctx.command().qualified_name);
            })
        },
        ..Default::default()
    };

    let framework = argot::Framework::new(options, |_ctx, ready, _framework| {
        Box::pin(async move {
            log::info!("Logged in as {}", ready.user.name);
            Ok(Data {
                tags: parking_lot::Mutex::new(HashMap::new()),
            })
        })
    });

    let token = std::env::var("DISCORD_TOKEN")
        .expect("Missing `DISCORD_TOKEN` env var");
    let intents =
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT;

    framework
        .start(serenity::ClientBuilder::new(token, intents))
        .await
        .unwrap();
}
