//! The central Framework struct that ties everything together.

use crate::{serenity_prelude as serenity, BoxFuture};
use std::sync::Arc;

/// Callback that creates the user data once the bot is logged in
type UserDataSetup<U, E> = Box<
    dyn Send
        + Sync
        + for<'a> FnOnce(
            &'a serenity::Context,
            &'a serenity::Ready,
            &'a Framework<U, E>,
        ) -> BoxFuture<'a, Result<U, E>>,
>;

/// The main framework struct which stores all data and handles message dispatch.
///
/// On top of [`crate::dispatch_event`], it
/// - fills in correct values for [`crate::Command::qualified_name`]: [`set_qualified_names`]
/// - sets up user data on the first Ready event
/// - keeps track of the bot ID and of pending [`crate::Context::await_reply`] calls
pub struct Framework<U, E> {
    /// Stores user data. Is initialized on first Ready event
    user_data: once_cell::sync::OnceCell<U>,
    /// Stores the user data setup function until it's run on the first Ready event
    user_data_setup: parking_lot::Mutex<Option<UserDataSetup<U, E>>>,
    /// Stores bot ID. Is initialized on first Ready event
    bot_id: once_cell::sync::OnceCell<serenity::UserId>,
    /// Stores the framework options
    options: crate::FrameworkOptions<U, E>,
    /// Waits registered by [`crate::Context::await_reply`]
    reply_waiters: crate::ReplyWaiters<serenity::Message>,
}

impl<U, E> Framework<U, E> {
    /// Setup a new [`Framework`] with the given options and a callback to provide user data.
    ///
    /// The user data callback is invoked as soon as the bot is logged in. That way, bot data like
    /// user ID or connected guilds can be made available to the user data setup function.
    pub fn new<F>(mut options: crate::FrameworkOptions<U, E>, user_data_setup: F) -> Self
    where
        F: Send
            + Sync
            + 'static
            + for<'a> FnOnce(
                &'a serenity::Context,
                &'a serenity::Ready,
                &'a Self,
            ) -> BoxFuture<'a, Result<U, E>>,
    {
        set_qualified_names(&mut options.commands);

        Self {
            user_data: once_cell::sync::OnceCell::new(),
            user_data_setup: parking_lot::Mutex::new(Some(Box::new(user_data_setup))),
            bot_id: once_cell::sync::OnceCell::new(),
            options,
            reply_waiters: crate::ReplyWaiters::new(),
        }
    }

    /// Registers the framework as event handler of the given client and runs the client until
    /// it stops.
    ///
    /// Remember to enable the `MESSAGE_CONTENT` gateway intent on the builder, or commands will
    /// not be received.
    pub async fn start(self, builder: serenity::ClientBuilder) -> Result<(), serenity::Error>
    where
        U: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        let mut client = builder.event_handler(Handler(Arc::new(self))).await?;
        client.start().await
    }

    /// Return the stored framework options, including commands.
    pub fn options(&self) -> &crate::FrameworkOptions<U, E> {
        &self.options
    }

    /// Returns the bot's user ID, once the first Ready event was received
    pub fn bot_id(&self) -> Option<serenity::UserId> {
        self.bot_id.get().copied()
    }

    /// Returns the user data, once it's set up
    pub fn user_data(&self) -> Option<&U> {
        self.user_data.get()
    }

    /// Returns the registry of pending [`crate::Context::await_reply`] calls
    pub fn reply_waiters(&self) -> &crate::ReplyWaiters<serenity::Message> {
        &self.reply_waiters
    }

    /// Sets up the bot ID and user data. Later Ready events, e.g. after reconnects, are ignored
    async fn ready(&self, ctx: &serenity::Context, data_about_bot: &serenity::Ready) {
        let _: Result<_, _> = self.bot_id.set(data_about_bot.user.id);

        let user_data_setup = self.user_data_setup.lock().take();
        let user_data_setup = match user_data_setup {
            Some(x) => x,
            None => {
                log::debug!("skipping user data setup on repeated Ready event");
                return;
            }
        };

        match user_data_setup(ctx, data_about_bot, self).await {
            Ok(user_data) => {
                let _: Result<_, _> = self.user_data.set(user_data);
            }
            Err(error) => {
                let error = crate::FrameworkError::Setup {
                    error,
                    framework: self,
                    data_about_bot,
                    ctx,
                };
                (self.options.on_error)(error).await;
            }
        }
    }

    /// Dispatches a message, if the framework is ready to do so
    async fn message(&self, ctx: &serenity::Context, msg: &serenity::Message)
    where
        U: Send + Sync,
    {
        let (bot_id, user_data) = match (self.bot_id.get(), self.user_data.get()) {
            (Some(&bot_id), Some(user_data)) => (bot_id, user_data),
            _ => {
                log::warn!("dropping message {} received before user data setup", msg.id);
                return;
            }
        };

        let framework = crate::FrameworkContext {
            bot_id,
            options: &self.options,
            user_data,
            reply_waiters: &self.reply_waiters,
        };
        crate::dispatch_event(framework, ctx, msg).await;
    }
}

impl<U, E> std::fmt::Debug for Framework<U, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Framework")
            .field("bot_id", &self.bot_id.get())
            .field("commands", &self.options.commands)
            .field("reply_waiters", &self.reply_waiters)
            .finish_non_exhaustive()
    }
}

/// Forwards serenity events to the framework
struct Handler<U, E>(Arc<Framework<U, E>>);

#[serenity::async_trait]
impl<U, E> serenity::EventHandler for Handler<U, E>
where
    U: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    async fn ready(&self, ctx: serenity::Context, data_about_bot: serenity::Ready) {
        self.0.ready(&ctx, &data_about_bot).await;
    }

    async fn message(&self, ctx: serenity::Context, new_message: serenity::Message) {
        self.0.message(&ctx, &new_message).await;
    }
}

/// Traverses commands recursively and sets [`crate::Command::qualified_name`] to its actual value
///
/// ```rust
/// # fn noop(_: argot::Context<'_, (), ()>, _: argot::Args) -> argot::BoxFuture<'_, Result<(), ()>> {
/// #     Box::pin(async { Ok(()) })
/// # }
/// let mut commands = vec![argot::Command::<(), ()>::group(
///     "config",
///     vec![argot::Command::group("prefix", vec![argot::Command::new("set", noop)])],
/// )];
/// argot::set_qualified_names(&mut commands);
/// assert_eq!(commands[0].subcommands[0].subcommands[0].qualified_name, "config prefix set");
/// ```
pub fn set_qualified_names<U, E>(commands: &mut [crate::Command<U, E>]) {
    /// Fills in `qualified_name` fields by appending command name to the parent command name
    fn set_subcommand_qualified_names<U, E>(parents: &str, commands: &mut [crate::Command<U, E>]) {
        for cmd in commands {
            cmd.qualified_name = format!("{} {}", parents, cmd.name);
            set_subcommand_qualified_names(&cmd.qualified_name, &mut cmd.subcommands);
        }
    }
    for command in commands {
        command.qualified_name = command.name.clone();
        set_subcommand_qualified_names(&command.name, &mut command.subcommands);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: crate::Context<'_, (), ()>, _: crate::Args) -> BoxFuture<'_, Result<(), ()>> {
        Box::pin(async { Ok(()) })
    }

    #[test]
    fn test_set_qualified_names() {
        let mut commands = vec![
            crate::Command::<(), ()>::new("ping", noop),
            crate::Command::group(
                "tag",
                vec![
                    crate::Command::new("add", noop),
                    crate::Command::group("alias", vec![crate::Command::new("remove", noop)]),
                ],
            ),
        ];
        // Stale values are overwritten
        commands[1].subcommands[0].qualified_name = "add".into();

        set_qualified_names(&mut commands);
        assert_eq!(commands[0].qualified_name, "ping");
        assert_eq!(commands[1].qualified_name, "tag");
        assert_eq!(commands[1].subcommands[0].qualified_name, "tag add");
        assert_eq!(commands[1].subcommands[1].qualified_name, "tag alias");
        assert_eq!(
            commands[1].subcommands[1].subcommands[0].qualified_name,
            "tag alias remove"
        );
    }

    #[test]
    fn test_new_sets_qualified_names() {
        fn show(
            _: crate::Context<'_, (), String>,
            _: crate::Args,
        ) -> BoxFuture<'_, Result<(), String>> {
            Box::pin(async { Ok(()) })
        }

        let options = crate::FrameworkOptions::<(), String> {
            commands: vec![crate::Command::group(
                "config",
                vec![crate::Command::new("show", show)],
            )],
            ..Default::default()
        };
        let framework = Framework::new(options, |_, _, _| Box::pin(async { Ok(()) }));

        assert_eq!(
            framework.options().commands[0].subcommands[0].qualified_name,
            "config show"
        );
        assert_eq!(framework.bot_id(), None);
        assert!(framework.user_data().is_none());
        assert!(framework.reply_waiters().is_empty());
    }
}
