//! # Mock Framework
//!
//! Utilities for testing code that talks to an actor, without spawning the actor.
//!
//! Use [`MockClient`] to queue the answers the "actor" gives, or
//! [`create_mock_client`] to get a client and the raw request receiver.
//! Then use helpers like [`expect_action`] to assert behavior.

use crate::framework::{ActorEntity, ResourceClient, ResourceRequest, Response};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, watch};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

type Expectations<T> =
    Arc<Mutex<VecDeque<Result<<T as ActorEntity>::ActionResult, <T as ActorEntity>::Error>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<FavoritesStore>::new(FavoritesSet::default());
/// mock.expect_action().return_ok(FavoritesActionResult::IsFavorite(membership));
///
/// let client = FavoritesClient::new(mock.client());
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    state: watch::Sender<T::Snapshot>,
    expectations: Expectations<T>,
    received: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations, publishing `initial`.
    pub fn new(initial: T::Snapshot) -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let (state, observed) = watch::channel(initial);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let received = Arc::new(Mutex::new(Vec::new()));
        let expectations_clone = expectations.clone();
        let received_clone = received.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                match request {
                    ResourceRequest::Action { action, respond_to } => {
                        let rendered = format!("{action:?}");
                        received_clone.lock().unwrap().push(rendered.clone());
                        let expectation = expectations_clone.lock().unwrap().pop_front();
                        match expectation {
                            Some(response) => {
                                let _ = respond_to.send(response);
                            }
                            None => panic!("Unexpected action: {rendered}"),
                        }
                    }
                    ResourceRequest::Notify { action } => {
                        received_clone.lock().unwrap().push(format!("{action:?}"));
                    }
                    ResourceRequest::Stop => break,
                }
            }
        });

        Self {
            client: ResourceClient::new(sender, observed),
            state,
            expectations,
            received,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects an `action` request.
    pub fn expect_action(&mut self) -> ActionExpectationBuilder<T> {
        ActionExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Publishes a snapshot as if the actor had committed a mutation.
    pub fn publish(&self, snapshot: T::Snapshot) {
        self.state.send_replace(snapshot);
    }

    /// `Debug` renderings of every action and notification received so far.
    pub fn received_actions(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder for `action` expectations.
pub struct ActionExpectationBuilder<T: ActorEntity> {
    expectations: Expectations<T>,
}

impl<T: ActorEntity> ActionExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, result: T::ActionResult) {
        self.expectations.lock().unwrap().push_back(Ok(result));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: T::Error) {
        self.expectations.lock().unwrap().push_back(Err(error));
    }
}

// =============================================================================
// LOW-LEVEL HELPERS
// =============================================================================

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// The client sends messages to a channel we control (`receiver`). The test
/// inspects each request and answers it through its `respond_to` sender, which
/// lets it simulate success, failure and delays deterministically. The returned
/// `watch::Sender` drives what `snapshot()` and `subscribe()` observe.
///
/// **Note**: Consider using [`MockClient`] for a more fluent API.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
    initial: T::Snapshot,
) -> (
    ResourceClient<T>,
    mpsc::Receiver<ResourceRequest<T>>,
    watch::Sender<T::Snapshot>,
) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (state, observed) = watch::channel(initial);
    (ResourceClient::new(sender, observed), receiver, state)
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Action, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { action, respond_to }) => Some((action, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Notify request
pub async fn expect_notify<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<T::Action> {
    match receiver.recv().await {
        Some(ResourceRequest::Notify { action }) => Some(action),
        _ => None,
    }
}
