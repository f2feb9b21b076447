use crate::framework::{ActorEntity, Mailbox, ResourceClient, Subscription};

/// Trait for resource-specific clients to inherit the observation API.
///
/// Every wrapper exposes the same read side: the last published snapshot and
/// a subscription to future ones. Mutations stay on the wrapper, where they
/// have domain names.
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Last published snapshot.
    fn snapshot(&self) -> T::Snapshot {
        self.inner().snapshot()
    }

    /// Current snapshot first, then every committed change.
    fn subscribe(&self) -> Subscription<T::Snapshot> {
        self.inner().subscribe()
    }

    /// Weak handle that does not keep the actor alive.
    fn mailbox(&self) -> Mailbox<T> {
        self.inner().mailbox()
    }
}
