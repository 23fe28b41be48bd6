//! Contains all code to dispatch incoming messages onto framework commands

mod common;
mod prefix;

pub use prefix::{dispatch_message, find_command, strip_prefix};

use crate::serenity_prelude as serenity;

/// A view into data stored by [`crate::Framework`]
pub struct FrameworkContext<'a, U, E> {
    /// User ID of this bot
    pub bot_id: serenity::UserId,
    /// Framework configuration
    pub options: &'a crate::FrameworkOptions<U, E>,
    /// Your provided user data
    pub user_data: &'a U,
    /// Pending [`crate::Context::await_reply`] calls
    pub reply_waiters: &'a crate::ReplyWaiters<serenity::Message>,
    // deliberately not non exhaustive because you need to create FrameworkContext from scratch
    // to run your own event loop
}
impl<U, E> Copy for FrameworkContext<'_, U, E> {}
impl<U, E> Clone for FrameworkContext<'_, U, E> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, U, E> FrameworkContext<'a, U, E> {
    /// Returns the stored framework options, including commands.
    pub fn options(&self) -> &'a crate::FrameworkOptions<U, E> {
        self.options
    }

    /// Retrieves user data
    pub fn user_data(&self) -> &'a U {
        self.user_data
    }
}

/// Central message handling function of this library. Dispatches the message and routes any
/// resulting error to the right `on_error` handler.
pub async fn dispatch_event<U: Send + Sync, E>(
    framework: FrameworkContext<'_, U, E>,
    ctx: &serenity::Context,
    msg: &serenity::Message,
) {
    let mut parent_commands = Vec::new();
    if let Err(error) = dispatch_message(framework, ctx, msg, &mut parent_commands).await {
        error.handle(framework.options).await;
    }
}
