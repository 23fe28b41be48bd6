//! Just contains Context

use crate::serenity_prelude as serenity;

/// Context passed to command invocations.
///
/// Contains the trigger message, the Discord connection management stuff, and the user data.
#[derive(derivative::Derivative)]
#[derivative(Debug(bound = ""))]
pub struct Context<'a, U, E> {
    /// Serenity's context, like HTTP or cache
    #[derivative(Debug = "ignore")]
    pub serenity_context: &'a serenity::Context,
    /// The invoking user message
    pub msg: &'a serenity::Message,
    /// Prefix used by the user to invoke this command
    pub prefix: &'a str,
    /// Command name used by the user to invoke this command
    pub invoked_command_name: &'a str,
    /// Entire argument string, before parsing
    pub args: &'a str,
    /// The command object which is the current command
    pub command: &'a crate::Command<U, E>,
    /// Parent commands of a subcommand, outermost first
    pub parent_commands: &'a [&'a crate::Command<U, E>],
    /// Read-only reference to the framework
    ///
    /// Useful if you need the list of commands, for example for a custom help command
    #[derivative(Debug = "ignore")]
    pub framework: crate::FrameworkContext<'a, U, E>,
    /// Your custom user data
    #[derivative(Debug = "ignore")]
    pub data: &'a U,
}
// manual Copy+Clone implementations because Rust is getting confused about the type parameter
impl<U, E> Clone for Context<'_, U, E> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<U, E> Copy for Context<'_, U, E> {}

impl<'a, U, E> Context<'a, U, E> {
    /// Shorthand of [`serenity::ChannelId::say`]
    pub async fn say(
        self,
        text: impl std::fmt::Display,
    ) -> Result<serenity::Message, serenity::Error> {
        self.msg
            .channel_id
            .say(&self.serenity_context.http, text)
            .await
    }

    /// Like [`Self::say`], but the message is sent as an inline reply to the invocation message
    pub async fn reply(
        self,
        text: impl std::fmt::Display,
    ) -> Result<serenity::Message, serenity::Error> {
        self.msg.reply(self.serenity_context, text).await
    }

    /// Waits for the next message of the invoking user in the invocation channel, for at most
    /// [`crate::ReplyOptions::timeout`].
    ///
    /// The awaited message is not dispatched as a command. See [`Self::await_reply_timeout`].
    pub async fn await_reply(self) -> Result<serenity::Message, crate::AwaitReplyError> {
        self.await_reply_timeout(self.framework.options.reply_options.timeout)
            .await
    }

    /// Waits for the next message of the invoking user in the invocation channel.
    ///
    /// Fails with [`crate::AwaitReplyError::Canceled`] if the user replies with one of the
    /// [`crate::ReplyOptions::cancel_keywords`].
    pub async fn await_reply_timeout(
        self,
        timeout: std::time::Duration,
    ) -> Result<serenity::Message, crate::AwaitReplyError> {
        crate::wait_for_reply(
            self.framework.reply_waiters,
            &self.framework.options.reply_options,
            self.msg.channel_id,
            self.msg.author.id,
            timeout,
        )
        .await
    }

    /// Return the stored [`serenity::Context`] within the underlying context type.
    pub fn serenity_context(self) -> &'a serenity::Context {
        self.serenity_context
    }

    /// Returns a view into data stored by the framework, like configuration
    pub fn framework(self) -> crate::FrameworkContext<'a, U, E> {
        self.framework
    }

    /// Return a reference to your custom user data
    pub fn data(self) -> &'a U {
        self.data
    }

    /// Return the channel ID of this context
    pub fn channel_id(self) -> serenity::ChannelId {
        self.msg.channel_id
    }

    /// Returns the guild ID of this context, if we are inside a guild
    pub fn guild_id(self) -> Option<serenity::GuildId> {
        self.msg.guild_id
    }

    /// Return the guild of this context, if we are inside a guild.
    ///
    /// Warning: clones the entire Guild instance out of the cache
    #[cfg(feature = "cache")]
    pub fn guild(self) -> Option<serenity::Guild> {
        self.msg.guild(&self.serenity_context.cache)
    }

    /// Get the author of the command message
    pub fn author(self) -> &'a serenity::User {
        &self.msg.author
    }

    /// Returns the command that was invoked
    pub fn command(self) -> &'a crate::Command<U, E> {
        self.command
    }

    /// Returns the parent commands of this command, if it's a subcommand
    pub fn parent_commands(self) -> &'a [&'a crate::Command<U, E>] {
        self.parent_commands
    }

    /// Returns the prefix this command was invoked with
    pub fn prefix(self) -> &'a str {
        self.prefix
    }

    /// Returns the command name that this command was invoked with
    pub fn invoked_command_name(self) -> &'a str {
        self.invoked_command_name
    }
}
