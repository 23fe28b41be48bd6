//! Framework configuration structs

use crate::{serenity_prelude as serenity, BoxFuture};

/// Framework configuration
#[derive(derivative::Derivative)]
#[derivative(Debug(bound = ""))]
pub struct FrameworkOptions<U, E> {
    /// List of commands in the framework
    pub commands: Vec<crate::Command<U, E>>,
    /// Provide a callback to be invoked when any user code yields an error.
    #[derivative(Debug = "ignore")]
    pub on_error: fn(crate::FrameworkError<'_, U, E>) -> BoxFuture<'_, ()>,
    /// Called before every command
    #[derivative(Debug = "ignore")]
    pub pre_command: fn(crate::Context<'_, U, E>) -> BoxFuture<'_, ()>,
    /// Called after every command, no matter if it succeeded or failed
    #[derivative(Debug = "ignore")]
    pub post_command: fn(crate::Context<'_, U, E>) -> BoxFuture<'_, ()>,
    /// Provide a callback to be invoked before every command. The command will only be executed
    /// if the callback returns true.
    ///
    /// If individual commands add their own check, both callbacks are run and must return true.
    #[derivative(Debug = "ignore")]
    pub command_check: Option<fn(crate::Context<'_, U, E>) -> BoxFuture<'_, Result<bool, E>>>,
    /// User IDs which are allowed to use owners_only commands
    pub owners: std::collections::HashSet<serenity::UserId>,
    /// Prefix command specific options.
    pub prefix_options: PrefixFrameworkOptions,
    /// Options for [`crate::Context::await_reply`]
    pub reply_options: ReplyOptions,
    // #[non_exhaustive] forbids struct update syntax for ?? reason
    #[doc(hidden)]
    #[derivative(Debug = "ignore")]
    pub __non_exhaustive: (),
}

impl<U, E> Default for FrameworkOptions<U, E>
where
    U: Send + Sync,
    E: std::fmt::Display + std::fmt::Debug + Send,
{
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            on_error: |error| {
                Box::pin(async move {
                    if let Err(e) = crate::builtins::on_error(error).await {
                        log::error!("Error while handling error: {}", e);
                    }
                })
            },
            pre_command: |_| Box::pin(async {}),
            post_command: |_| Box::pin(async {}),
            command_check: None,
            owners: Default::default(),
            prefix_options: Default::default(),
            reply_options: Default::default(),
            __non_exhaustive: (),
        }
    }
}

/// Possible ways to define a command prefix
#[derive(Clone, Debug)]
pub enum Prefix {
    /// A case-sensitive string literal prefix (passed to [`str::strip_prefix`])
    Literal(&'static str),
    /// Regular expression which matches the prefix. Only matches at the very start of the message
    /// count
    Regex(regex::Regex),
}

/// Prefix-specific framework configuration
#[derive(Clone, Debug)]
pub struct PrefixFrameworkOptions {
    /// The main bot prefix. Can be set to None if the bot only reacts to
    /// [additional prefixes](Self::additional_prefixes) or [mentions](Self::mention_as_prefix).
    pub prefix: Option<String>,
    /// List of additional bot prefixes
    pub additional_prefixes: Vec<Prefix>,
    /// Treat a bot mention (a ping) like a prefix
    pub mention_as_prefix: bool,
    /// Whether commands in messages emitted by this bot itself should be executed as well.
    pub execute_self_messages: bool,
    /// Whether to ignore messages from bots for command invoking. Default `true`
    pub ignore_bots: bool,
    /// Whether command names should be compared case-insensitively.
    pub case_insensitive_commands: bool,
    // #[non_exhaustive] forbids struct update syntax for ?? reason
    #[doc(hidden)]
    pub __non_exhaustive: (),
}

impl Default for PrefixFrameworkOptions {
    fn default() -> Self {
        Self {
            prefix: None,
            additional_prefixes: Vec::new(),
            mention_as_prefix: true,
            execute_self_messages: false,
            ignore_bots: true,
            case_insensitive_commands: true,
            __non_exhaustive: (),
        }
    }
}

/// Configuration of [`crate::Context::await_reply`]
#[derive(Clone, Debug)]
pub struct ReplyOptions {
    /// How long to wait for a reply by default
    pub timeout: std::time::Duration,
    /// Replies that abort the wait with [`crate::AwaitReplyError::Canceled`]. Compared
    /// case-insensitively, ignoring surrounding whitespace
    pub cancel_keywords: Vec<String>,
    #[doc(hidden)]
    pub __non_exhaustive: (),
}

impl Default for ReplyOptions {
    fn default() -> Self {
        Self {
            timeout: std::time::Duration::from_secs(60),
            cancel_keywords: vec!["cancel".into(), "abort".into()],
            __non_exhaustive: (),
        }
    }
}

impl ReplyOptions {
    /// Whether the given message content cancels a wait
    pub fn is_cancel(&self, content: &str) -> bool {
        let content = content.trim();
        self.cancel_keywords
            .iter()
            .any(|keyword| keyword.trim().eq_ignore_ascii_case(content))
    }
}

#[cfg(test)]
#[test]
fn test_is_cancel() {
    let options = ReplyOptions::default();
    assert!(options.is_cancel("cancel"));
    assert!(options.is_cancel("  ABORT \n"));
    assert!(!options.is_cancel("cancel that"));
    assert!(!options.is_cancel(""));

    let options = ReplyOptions {
        cancel_keywords: Vec::new(),
        ..Default::default()
    };
    assert!(!options.is_cancel("cancel"));
}
