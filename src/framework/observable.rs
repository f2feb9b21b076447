//! Observable state container.
//!
//! Every actor publishes its snapshot through a `tokio::sync::watch` channel.
//! A [`Subscription`] turns that channel into a restartable stream of
//! snapshots: the first [`Subscription::next`] yields the current value, later
//! calls wait for the next committed one.

use tokio::sync::watch;

/// Handle returned by `subscribe()`. Dropping it (or calling
/// [`Subscription::unsubscribe`]) ends the subscription.
#[derive(Debug)]
pub struct Subscription<S> {
    receiver: watch::Receiver<S>,
    primed: bool,
}

impl<S: Clone> Subscription<S> {
    pub(crate) fn new(receiver: watch::Receiver<S>) -> Self {
        Self {
            receiver,
            primed: false,
        }
    }

    /// Value last published, without waiting.
    pub fn current(&self) -> S {
        self.receiver.borrow().clone()
    }

    /// Next snapshot, or `None` once the publishing actor has stopped.
    ///
    /// Snapshots committed faster than the subscriber reads them coalesce into
    /// the latest one.
    pub async fn next(&mut self) -> Option<S> {
        if !self.primed {
            self.primed = true;
            return Some(self.receiver.borrow_and_update().clone());
        }
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    pub fn unsubscribe(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn late_subscriber_sees_current_value_first() {
        let (sender, receiver) = watch::channel(1);
        sender.send_replace(2);

        let mut subscription = Subscription::new(receiver);
        assert_eq!(subscription.next().await, Some(2));

        sender.send_replace(3);
        assert_eq!(subscription.next().await, Some(3));

        drop(sender);
        assert_eq!(subscription.next().await, None);
    }

    #[tokio::test]
    async fn subscriptions_are_independent() {
        let (sender, receiver) = watch::channel("a");
        let mut first = Subscription::new(receiver.clone());
        assert_eq!(first.next().await, Some("a"));

        sender.send_replace("b");
        let mut second = Subscription::new(receiver);
        assert_eq!(second.next().await, Some("b"));
        assert_eq!(first.next().await, Some("b"));
        assert_eq!(first.current(), "b");
        first.unsubscribe();
    }
}
