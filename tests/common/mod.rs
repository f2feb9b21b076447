//! Helpers shared by the integration tests.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use restaurant_details::framework::Subscription;
use restaurant_details::model::{PlaceId, Restaurant};
use restaurant_details::places::{PlacesClient, TransportError};
use serde_json::{json, Value};
use tokio::sync::Notify;

pub const WAIT: Duration = Duration::from_secs(2);

/// Places service whose answers are scripted per place id.
///
/// Each call pops the next scripted answer; the last one repeats. A gated
/// place holds every call until [`ScriptedPlaces::release`].
#[derive(Default)]
pub struct ScriptedPlaces {
    answers: Mutex<HashMap<PlaceId, VecDeque<Result<Value, TransportError>>>>,
    gates: Mutex<HashMap<PlaceId, Arc<Notify>>>,
    calls: Mutex<HashMap<PlaceId, usize>>,
}

impl ScriptedPlaces {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn script(&self, id: &str, answers: Vec<Result<Value, TransportError>>) {
        self.answers
            .lock()
            .unwrap()
            .insert(PlaceId::from(id), answers.into());
    }

    pub fn gate(&self, id: &str) {
        self.gates
            .lock()
            .unwrap()
            .insert(PlaceId::from(id), Arc::new(Notify::new()));
    }

    /// Lets one held (or the next) call for `id` through.
    pub fn release(&self, id: &str) {
        if let Some(gate) = self.gates.lock().unwrap().get(&PlaceId::from(id)) {
            gate.notify_one();
        }
    }

    pub fn calls(&self, id: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(&PlaceId::from(id))
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl PlacesClient for ScriptedPlaces {
    async fn get_details(&self, place_id: &PlaceId) -> Result<Value, TransportError> {
        *self.calls.lock().unwrap().entry(place_id.clone()).or_default() += 1;

        let gate = self.gates.lock().unwrap().get(place_id).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let mut answers = self.answers.lock().unwrap();
        match answers.get_mut(place_id) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap(),
            None => Ok(json!({ "status": "NOT_FOUND" })),
        }
    }
}

pub fn restaurant(id: &str) -> Restaurant {
    Restaurant::new(id, format!("Restaurant {id}"), "1 Main St", 4.0, "")
}

/// An OK payload with `(author, rating)` reviews.
pub fn details_payload(id: &str, reviews: &[(&str, f64)]) -> Value {
    let reviews: Vec<Value> = reviews
        .iter()
        .map(|(author, rating)| json!({ "author_name": author, "rating": rating, "text": "" }))
        .collect();
    json!({
        "status": "OK",
        "result": { "url": format!("https://maps.example/{id}"), "reviews": reviews }
    })
}

pub fn unreachable() -> Result<Value, TransportError> {
    Err(TransportError::Connection("connection refused".to_string()))
}

/// Reads `subscription` until a snapshot satisfies `accept`. Panics after [`WAIT`].
pub async fn wait_for<S, F>(subscription: &mut Subscription<S>, mut accept: F) -> S
where
    S: Clone,
    F: FnMut(&S) -> bool,
{
    within(async {
        loop {
            match subscription.next().await {
                Some(snapshot) if accept(&snapshot) => return snapshot,
                Some(_) => continue,
                None => panic!("publisher stopped before the expected snapshot"),
            }
        }
    })
    .await
}

pub async fn within<F: Future>(future: F) -> F::Output {
    tokio::time::timeout(WAIT, future)
        .await
        .expect("timed out waiting")
}
