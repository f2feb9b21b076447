//! # Core Actor Framework
//!
//! This module defines the generic building blocks for the actor system.
//!
//! ## Key Types
//!
//! - [`ActorEntity`]: The trait that every stateful component implements.
//! - [`ResourceActor`]: The generic actor that owns one entity and runs its mailbox loop.
//! - [`ResourceClient`]: The generic client for communicating with actors.
//! - [`Mailbox`]: A weak handle background tasks use to report back to their actor.
//! - [`FrameworkError`]: Common errors (e.g., ActorClosed, ActorDropped).

use std::fmt::Debug;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use super::observable::Subscription;

// =============================================================================
// 1. THE ABSTRACTION (Trait with Hooks, Actions and Snapshots)
// =============================================================================

/// Trait that any stateful component must implement to be driven by [`ResourceActor`].
///
/// # Architecture Note
/// The actor owns exactly one entity. All mutation goes through `handle_action`,
/// which the actor calls for one request at a time, so the entity never needs a lock.
///
/// After `on_start` and after every handled request the actor compares
/// [`ActorEntity::snapshot`] with the last published value and publishes it to
/// subscribers when it changed.
///
/// # Async & Context
/// This trait is `#[async_trait]` so hooks can await other actors or I/O.
/// The `Context` holds dependencies injected at `run()` time ("late binding").
/// The [`Mailbox`] lets a hook hand work to a background task that reports its
/// result back as a new action.
#[async_trait]
pub trait ActorEntity: Send + Sized + 'static {
    /// Enum representing the operations this entity accepts.
    type Action: Send + Debug;

    /// The result type returned by actions.
    type ActionResult: Send + Debug;

    /// Read-only view published to observers after each committed mutation.
    type Snapshot: Clone + PartialEq + Debug + Send + Sync + 'static;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity. Transport failures of the framework
    /// itself convert into it, so clients return a single error type.
    type Error: std::error::Error + From<FrameworkError> + Send + Sync + 'static;

    /// Current observable state.
    fn snapshot(&self) -> Self::Snapshot;

    /// Called once before the first request is processed.
    async fn on_start(
        &mut self,
        _ctx: &Self::Context,
        _mailbox: &Mailbox<Self>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle one action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
        mailbox: &Mailbox<Self>,
    ) -> Result<Self::ActionResult, Self::Error>;

    /// Called after the mailbox loop exits.
    async fn on_stop(&mut self, _ctx: &Self::Context) {}
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the actor framework itself.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
}

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<<T as ActorEntity>::ActionResult, <T as ActorEntity>::Error>>;

/// Internal message type sent to the actor.
///
/// - **Action**: request/response. The caller awaits the entity's answer.
/// - **Notify**: fire-and-forget. Used by background tasks to marshal results
///   back into the actor; the result is only logged.
/// - **Stop**: ends the loop even while clients are still alive.
pub enum ResourceRequest<T: ActorEntity> {
    Action {
        action: T::Action,
        respond_to: Response<T>,
    },
    Notify {
        action: T::Action,
    },
    Stop,
}

impl<T: ActorEntity> Debug for ResourceRequest<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceRequest::Action { action, .. } => {
                f.debug_struct("Action").field("action", action).finish()
            }
            ResourceRequest::Notify { action } => {
                f.debug_struct("Notify").field("action", action).finish()
            }
            ResourceRequest::Stop => f.write_str("Stop"),
        }
    }
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// The generic actor that owns a single entity.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the entity, the
/// receiver end of the mailbox, and the sender half of the snapshot channel.
///
/// **Concurrency Model**:
/// Requests are processed *sequentially* in a loop, so the entity is only ever
/// touched by one writer. Readers never lock it either: they read the last
/// published snapshot.
pub struct ResourceActor<T: ActorEntity> {
    entity: T,
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    state: watch::Sender<T::Snapshot>,
    mailbox: Mailbox<T>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` around `entity` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the mailbox. If it is full, calls to the
    /// client wait until there is space.
    pub fn new(entity: T, buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (state, observed) = watch::channel(entity.snapshot());
        let actor = Self {
            entity,
            receiver,
            state,
            mailbox: Mailbox::new(sender.downgrade()),
        };
        let client = ResourceClient::new(sender, observed);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel closes
    /// or a `Stop` request arrives.
    ///
    /// # Context Injection
    /// The `context` argument is passed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "FavoritesStore" instead of the full path)
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        if let Err(e) = self.entity.on_start(&context, &self.mailbox).await {
            warn!(entity_type, error = %e, "on_start failed");
        }
        self.publish();

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Action { action, respond_to } => {
                    debug!(entity_type, ?action, "Action");
                    let result = self
                        .entity
                        .handle_action(action, &context, &self.mailbox)
                        .await;
                    match &result {
                        Ok(_) => debug!(entity_type, "Action ok"),
                        Err(e) => warn!(entity_type, error = %e, "Action failed"),
                    }
                    // Publish before answering so the caller observes its own write.
                    self.publish();
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Notify { action } => {
                    debug!(entity_type, ?action, "Notify");
                    if let Err(e) = self
                        .entity
                        .handle_action(action, &context, &self.mailbox)
                        .await
                    {
                        warn!(entity_type, error = %e, "Notify failed");
                    }
                    self.publish();
                }
                ResourceRequest::Stop => {
                    info!(entity_type, "Stop requested");
                    break;
                }
            }
        }

        self.entity.on_stop(&context).await;
        info!(entity_type, "Shutdown");
    }

    fn publish(&self) {
        let snapshot = self.entity.snapshot();
        self.state.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe client for interacting with a `ResourceActor`.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
    state: watch::Receiver<T::Snapshot>,
}

impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            state: self.state.clone(),
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(
        sender: mpsc::Sender<ResourceRequest<T>>,
        state: watch::Receiver<T::Snapshot>,
    ) -> Self {
        Self { sender, state }
    }

    pub async fn perform_action(&self, action: T::Action) -> Result<T::ActionResult, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Action { action, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn notify(&self, action: T::Action) -> Result<(), FrameworkError> {
        self.sender
            .send(ResourceRequest::Notify { action })
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }

    /// Asks the actor to leave its loop after the requests already queued.
    pub async fn stop(&self) -> Result<(), FrameworkError> {
        self.sender
            .send(ResourceRequest::Stop)
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }

    /// Last published snapshot. Never blocks on the actor.
    pub fn snapshot(&self) -> T::Snapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> Subscription<T::Snapshot> {
        Subscription::new(self.state.clone())
    }

    pub fn mailbox(&self) -> Mailbox<T> {
        Mailbox::new(self.sender.downgrade())
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

// =============================================================================
// 5. THE MAILBOX (weak self-reference for background work)
// =============================================================================

/// Weak handle to an actor's mailbox.
///
/// Holding a `Mailbox` does not keep the actor alive. Once every
/// [`ResourceClient`] is gone or the actor stopped, sends are dropped and
/// report `false`.
pub struct Mailbox<T: ActorEntity> {
    sender: mpsc::WeakSender<ResourceRequest<T>>,
}

impl<T: ActorEntity> Clone for Mailbox<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ActorEntity> Mailbox<T> {
    fn new(sender: mpsc::WeakSender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    /// Queues `action` as a notification. Returns `false` if the actor is gone.
    pub async fn notify(&self, action: T::Action) -> bool {
        match self.sender.upgrade() {
            Some(sender) => sender.send(ResourceRequest::Notify { action }).await.is_ok(),
            None => false,
        }
    }

    pub async fn stop(&self) -> bool {
        match self.sender.upgrade() {
            Some(sender) => sender.send(ResourceRequest::Stop).await.is_ok(),
            None => false,
        }
    }
}

// =============================================================================
// 6. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // --- Entity Definition ---

    #[derive(Debug)]
    struct Counter {
        value: u32,
    }

    #[derive(Debug)]
    enum CounterAction {
        Add(u32),
        Read,
        Fail,
        Echo(u32),
    }

    #[derive(Debug, thiserror::Error)]
    enum CounterError {
        #[error("refused")]
        Refused,
        #[error(transparent)]
        Framework(#[from] FrameworkError),
    }

    #[async_trait]
    impl ActorEntity for Counter {
        type Action = CounterAction;
        type ActionResult = u32;
        type Snapshot = u32;
        type Context = ();
        type Error = CounterError;

        fn snapshot(&self) -> u32 {
            self.value
        }

        async fn handle_action(
            &mut self,
            action: CounterAction,
            _ctx: &(),
            mailbox: &Mailbox<Self>,
        ) -> Result<u32, CounterError> {
            match action {
                CounterAction::Add(n) => {
                    self.value += n;
                    Ok(self.value)
                }
                CounterAction::Read => Ok(self.value),
                CounterAction::Fail => Err(CounterError::Refused),
                CounterAction::Echo(n) => {
                    // Report back through the mailbox like a background task would.
                    let mailbox = mailbox.clone();
                    tokio::spawn(async move {
                        mailbox.notify(CounterAction::Add(n)).await;
                    });
                    Ok(self.value)
                }
            }
        }
    }

    fn counter() -> Counter {
        Counter { value: 0 }
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_actions_publish_snapshots() {
        let (actor, client) = ResourceActor::new(counter(), 10);
        tokio::spawn(actor.run(()));

        let mut subscription = client.subscribe();
        assert_eq!(subscription.next().await, Some(0));

        assert_eq!(client.perform_action(CounterAction::Add(2)).await.unwrap(), 2);
        assert_eq!(client.snapshot(), 2);
        assert_eq!(subscription.next().await, Some(2));

        // Read does not change the snapshot, so nothing new is published.
        assert_eq!(client.perform_action(CounterAction::Read).await.unwrap(), 2);
        client.perform_action(CounterAction::Add(1)).await.unwrap();
        assert_eq!(subscription.next().await, Some(3));
    }

    #[tokio::test]
    async fn test_entity_errors_reach_the_caller() {
        let (actor, client) = ResourceActor::new(counter(), 10);
        tokio::spawn(actor.run(()));

        let result = client.perform_action(CounterAction::Fail).await;
        assert!(matches!(result, Err(CounterError::Refused)));
        assert_eq!(client.perform_action(CounterAction::Read).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_mailbox_marshals_background_results() {
        let (actor, client) = ResourceActor::new(counter(), 10);
        tokio::spawn(actor.run(()));

        let mut subscription = client.subscribe();
        subscription.next().await;
        client.perform_action(CounterAction::Echo(5)).await.unwrap();
        assert_eq!(subscription.next().await, Some(5));
    }

    #[tokio::test]
    async fn test_stop_ends_loop_and_closes_client() {
        let (actor, client) = ResourceActor::new(counter(), 10);
        let handle = tokio::spawn(actor.run(()));

        let mailbox = client.mailbox();
        client.stop().await.unwrap();
        handle.await.unwrap();

        let result = client.perform_action(CounterAction::Read).await;
        assert!(matches!(
            result,
            Err(CounterError::Framework(FrameworkError::ActorClosed))
        ));
        drop(client);
        assert!(!mailbox.notify(CounterAction::Add(1)).await);
    }

    #[tokio::test]
    async fn test_subscription_ends_when_actor_stops() {
        let (actor, client) = ResourceActor::new(counter(), 10);
        let handle = tokio::spawn(actor.run(()));

        let mut subscription = client.subscribe();
        assert_eq!(subscription.next().await, Some(0));
        client.stop().await.unwrap();
        handle.await.unwrap();
        assert_eq!(subscription.next().await, None);
    }
}
