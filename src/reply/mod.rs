//! Waiting for a user's next message, e.g. to answer a question the bot asked.
//!
//! Every wait is registered in [`ReplyWaiters`] under the channel and user it waits for. The
//! framework offers each incoming message to the registry before treating it as a command.

use crate::serenity_prelude as serenity;

/// Error returned by [`crate::Context::await_reply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwaitReplyError {
    /// The user didn't reply in time
    Timeout,
    /// The user replied with one of the [`crate::ReplyOptions::cancel_keywords`]
    Canceled,
    /// The registry was cleared or dropped while waiting, e.g. because the bot shut down
    Closed,
}

impl std::fmt::Display for AwaitReplyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => f.write_str("No reply was given in time"),
            Self::Canceled => f.write_str("The operation was canceled"),
            Self::Closed => f.write_str("Stopped waiting for a reply"),
        }
    }
}

impl std::error::Error for AwaitReplyError {}

/// A single registered wait
struct Waiter<T> {
    id: u64,
    channel_id: serenity::ChannelId,
    author_id: serenity::UserId,
    sender: tokio::sync::oneshot::Sender<T>,
}

struct Waiters<T> {
    next_id: u64,
    /// Oldest first
    list: Vec<Waiter<T>>,
}

/// Registry of pending waits for a reply, keyed by channel and author.
///
/// `T` is the payload handed to a waiter; the framework uses [`serenity::Message`].
pub struct ReplyWaiters<T> {
    inner: parking_lot::Mutex<Waiters<T>>,
}

impl<T> Default for ReplyWaiters<T> {
    fn default() -> Self {
        Self {
            inner: parking_lot::Mutex::new(Waiters {
                next_id: 0,
                list: Vec::new(),
            }),
        }
    }
}

impl<T> std::fmt::Debug for ReplyWaiters<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplyWaiters")
            .field("len", &self.len())
            .finish()
    }
}

impl<T> ReplyWaiters<T> {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts waiting for the next payload from the given author in the given channel.
    ///
    /// The wait ends when the returned handle is dropped.
    pub fn register(
        &self,
        channel_id: serenity::ChannelId,
        author_id: serenity::UserId,
    ) -> PendingReply<'_, T> {
        let (sender, receiver) = tokio::sync::oneshot::channel();
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.list.push(Waiter {
            id,
            channel_id,
            author_id,
            sender,
        });

        PendingReply {
            waiters: self,
            id,
            receiver,
        }
    }

    /// Hands the payload to the oldest live waiter for this channel and author.
    ///
    /// Gives the payload back if nobody waits for it.
    pub fn offer(
        &self,
        channel_id: serenity::ChannelId,
        author_id: serenity::UserId,
        mut payload: T,
    ) -> Result<(), T> {
        let mut inner = self.inner.lock();
        while let Some(i) = inner
            .list
            .iter()
            .position(|w| w.channel_id == channel_id && w.author_id == author_id)
        {
            let waiter = inner.list.remove(i);
            match waiter.sender.send(payload) {
                Ok(()) => return Ok(()),
                // Receiver is gone but its handle didn't unregister yet
                Err(returned) => payload = returned,
            }
        }
        Err(payload)
    }

    /// Whether [`Self::offer`] would currently find a waiter for this channel and author
    pub fn is_waiting(
        &self,
        channel_id: serenity::ChannelId,
        author_id: serenity::UserId,
    ) -> bool {
        self.inner.lock().list.iter().any(|w| {
            w.channel_id == channel_id && w.author_id == author_id && !w.sender.is_closed()
        })
    }

    /// Number of live waits
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .list
            .iter()
            .filter(|w| !w.sender.is_closed())
            .count()
    }

    /// Whether nobody waits
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ends all waits with [`AwaitReplyError::Closed`]
    pub fn clear(&self) {
        self.inner.lock().list.clear();
    }

    /// Removes the waiter with the given ID, if still registered
    fn unregister(&self, id: u64) {
        self.inner.lock().list.retain(|w| w.id != id);
    }
}

/// Handle to a wait registered with [`ReplyWaiters::register`]. Dropping it unregisters the wait.
pub struct PendingReply<'a, T> {
    waiters: &'a ReplyWaiters<T>,
    id: u64,
    receiver: tokio::sync::oneshot::Receiver<T>,
}

impl<T> PendingReply<'_, T> {
    /// Waits for the payload. Returns `None` if the registry stopped the wait.
    pub async fn recv(&mut self) -> Option<T> {
        (&mut self.receiver).await.ok()
    }

    /// Like [`Self::recv`], but gives up after the timeout
    pub async fn recv_timeout(
        &mut self,
        timeout: std::time::Duration,
    ) -> Result<T, AwaitReplyError> {
        match tokio::time::timeout(timeout, self.recv()).await {
            Ok(Some(payload)) => Ok(payload),
            Ok(None) => Err(AwaitReplyError::Closed),
            Err(_) => Err(AwaitReplyError::Timeout),
        }
    }
}

impl<T> Drop for PendingReply<'_, T> {
    fn drop(&mut self) {
        self.waiters.unregister(self.id);
    }
}

/// Waits for the next message of the given user in the given channel.
///
/// Used by [`crate::Context::await_reply`]; call it directly for waits outside a command.
pub async fn wait_for_reply(
    waiters: &ReplyWaiters<serenity::Message>,
    options: &crate::ReplyOptions,
    channel_id: serenity::ChannelId,
    author_id: serenity::UserId,
    timeout: std::time::Duration,
) -> Result<serenity::Message, AwaitReplyError> {
    let msg = waiters
        .register(channel_id, author_id)
        .recv_timeout(timeout)
        .await?;
    if options.is_cancel(&msg.content) {
        log::debug!("reply wait in channel {} canceled", channel_id);
        return Err(AwaitReplyError::Canceled);
    }
    Ok(msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const CHANNEL: serenity::ChannelId = serenity::ChannelId(1);
    const ALICE: serenity::UserId = serenity::UserId(10);
    const BOB: serenity::UserId = serenity::UserId(20);

    #[test]
    fn test_offer_without_waiters() {
        let waiters = ReplyWaiters::<&str>::new();
        assert_eq!(waiters.offer(CHANNEL, ALICE, "hi"), Err("hi"));
        assert!(waiters.is_empty());
    }

    #[tokio::test]
    async fn test_offer_matches_channel_and_author() {
        let waiters = ReplyWaiters::new();
        let mut pending = waiters.register(CHANNEL, ALICE);
        assert_eq!(waiters.len(), 1);
        assert!(waiters.is_waiting(CHANNEL, ALICE));
        assert!(!waiters.is_waiting(CHANNEL, BOB));

        assert_eq!(waiters.offer(CHANNEL, BOB, "bob"), Err("bob"));
        assert_eq!(
            waiters.offer(serenity::ChannelId(2), ALICE, "elsewhere"),
            Err("elsewhere")
        );
        assert_eq!(waiters.offer(CHANNEL, ALICE, "yes"), Ok(()));
        assert_eq!(pending.recv().await, Some("yes"));

        // A waiter receives a single payload
        assert!(waiters.is_empty());
        assert_eq!(waiters.offer(CHANNEL, ALICE, "again"), Err("again"));
    }

    #[tokio::test]
    async fn test_oldest_waiter_first() {
        let waiters = ReplyWaiters::new();
        let mut first = waiters.register(CHANNEL, ALICE);
        let mut second = waiters.register(CHANNEL, ALICE);

        assert_eq!(waiters.offer(CHANNEL, ALICE, 1), Ok(()));
        assert_eq!(waiters.offer(CHANNEL, ALICE, 2), Ok(()));
        assert_eq!(first.recv().await, Some(1));
        assert_eq!(second.recv().await, Some(2));
    }

    #[test]
    fn test_drop_unregisters() {
        let waiters = ReplyWaiters::new();
        let first = waiters.register(CHANNEL, ALICE);
        let second = waiters.register(CHANNEL, BOB);
        assert_eq!(waiters.len(), 2);

        drop(first);
        assert_eq!(waiters.len(), 1);
        assert_eq!(waiters.offer(CHANNEL, ALICE, ()), Err(()));

        drop(second);
        assert!(waiters.is_empty());
    }

    #[tokio::test]
    async fn test_timeout_and_clear() {
        let waiters = ReplyWaiters::<()>::new();

        let mut pending = waiters.register(CHANNEL, ALICE);
        let result = pending.recv_timeout(Duration::from_millis(10)).await;
        assert_eq!(result, Err(AwaitReplyError::Timeout));
        drop(pending);
        assert!(waiters.is_empty());

        let mut pending = waiters.register(CHANNEL, ALICE);
        waiters.clear();
        let result = pending.recv_timeout(Duration::from_secs(5)).await;
        assert_eq!(result, Err(AwaitReplyError::Closed));
    }

    #[tokio::test]
    async fn test_concurrent_wait() {
        let waiters = std::sync::Arc::new(ReplyWaiters::new());

        let task = tokio::spawn({
            let waiters = waiters.clone();
            async move {
                let mut pending = waiters.register(CHANNEL, ALICE);
                let result = pending.recv_timeout(Duration::from_secs(5)).await;
                result
            }
        });

        // Retry until the task has registered its wait
        let mut payload = String::from("reply");
        loop {
            match waiters.offer(CHANNEL, ALICE, payload) {
                Ok(()) => break,
                Err(returned) => payload = returned,
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(task.await.unwrap(), Ok(String::from("reply")));
    }
}
