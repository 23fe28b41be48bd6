#![cfg_attr(doc_nightly, feature(doc_cfg, doc_auto_cfg))]
#![doc(test(attr(deny(deprecated))))]
#![warn(rust_2018_idioms)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![allow(clippy::type_complexity)]
// native #[non_exhaustive] is awful because you can't do struct update syntax with it (??)
#![allow(clippy::manual_non_exhaustive)]

/*!
Argot is a prefix command framework for serenity with declarative argument parsing:
- two argument syntaxes: comma separated (`~tag add name, some content`) and shell-like words
  with quotes (`~tag add name "some content"`)
- named flags like `-silent` or `-count 3`, with aliases, defaults and repeatable flags
- typed arguments (numbers with ranges, durations, choices, links, code blocks, ...) and custom
  types via [`ArgType`]
- waiting for a user's reply to a question of the bot: [`Context::await_reply`]

# Quickstart
```rust,no_run
use argot::serenity_prelude as serenity;
use argot::{types, ArgConfig, Command, OptionalArg, Syntax};

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = argot::Context<'a, (), Error>;

/// Displays your account age
fn age(ctx: Context<'_>, args: argot::Args) -> argot::BoxFuture<'_, Result<(), Error>> {
    Box::pin(async move {
        let name = args.get::<String>(0).unwrap_or_else(|| ctx.author().name.clone());
        let created_at = ctx.author().created_at();
        ctx.say(format!("{}'s account was created at {}", name, created_at))
            .await?;
        Ok(())
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let age = Command {
        description: Some("Displays your account age".into()),
        args: ArgConfig::new(Syntax::Shellword)
            .optional(OptionalArg::new("name", types::Text::default())),
        ..Command::new("age", age)
    };

    let framework = argot::Framework::new(
        argot::FrameworkOptions {
            commands: vec![age],
            prefix_options: argot::PrefixFrameworkOptions {
                prefix: Some("~".into()),
                ..Default::default()
            },
            ..Default::default()
        },
        |_ctx, _ready, _framework| Box::pin(async move { Ok(()) }),
    );

    let intents =
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT;
    let token = std::env::var("DISCORD_TOKEN")?;
    framework
        .start(serenity::ClientBuilder::new(token, intents))
        .await?;
    Ok(())
}
```

# Argument syntaxes

[`Syntax::Comma`] splits the input on commas. A comma or backslash inside an argument is escaped
with a backslash. Flags may only appear in the leading segments, before the first positional
argument: `~remind -silent, 1h, stretch your legs`.

[`Syntax::Shellword`] splits the input on whitespace, honoring single and double quotes and
backslash escapes. Flags may appear anywhere until a lone `--`, after which every word is
positional: `~remind 1h "stretch your legs" -silent`.

Both lexers produce a [`RawInput`] which is resolved against the command's [`ArgConfig`]. See
the [`comma`] and [`shellword`] modules for the details.

# Gateway intents

Prefix commands need the privileged [MESSAGE_CONTENT](serenity::GatewayIntents::MESSAGE_CONTENT)
intent, which must also be enabled in your bot dashboard. Without it, message contents are empty
and no command is ever recognized.

# Error handling

Every error, whether thrown by your commands or by the framework (unknown flags, failed checks,
panics, ...), is passed to [`FrameworkOptions::on_error`] as a [`FrameworkError`]. The default
[`builtins::on_error`] replies with a short explanation; set a custom handler or a per-command
[`Command::on_error`] to change that.
*/

mod argument;
pub use argument::*;
use argument::helper;

mod dispatch;
pub use dispatch::*;

mod framework;
pub use framework::*;

mod reply;
pub use reply::*;

mod structs;
pub use structs::*;

pub mod builtins;

#[doc(no_inline)]
pub use async_trait::async_trait;
pub use futures_util;

/// This module re-exports a bunch of items from all over serenity. Useful if you can't
/// remember the full paths of serenity items.
///
/// One way to use this prelude module in your project is
/// ```rust
/// use argot::serenity_prelude as serenity;
/// ```
pub mod serenity_prelude {
    #[doc(no_inline)]
    pub use serenity::{
        async_trait,
        builder::*,
        client::{
            bridge::gateway::{event::*, *},
            *,
        },
        collector::*,
        http::*,
        model::{event::*, prelude::*},
        prelude::*,
        utils::*,
        *,
    };
}
use serenity_prelude as serenity; // private alias for crate docs intradoc-links

use std::future::Future;
use std::pin::Pin;

/// Shorthand for a wrapped async future with a lifetime, used by many parts of this framework.
///
/// An owned future has the `'static` lifetime.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
