//! # Restaurant Details
//!
//! > **The state manager behind a restaurant detail sheet.**
//!
//! For a selected restaurant this crate fetches place details and reviews from
//! a places service, merges them with reviews the user wrote in the app, keeps
//! track of whether the restaurant is a favorite, and publishes all of it as
//! one observable [`RestaurantDetailsState`](model::RestaurantDetailsState).
//!
//! ## 🏗️ Design Philosophy
//!
//! Every stateful component is an actor: it owns its state, runs in its own
//! Tokio task and handles one request at a time. That gives us:
//! - **Single writer**: favorites toggled from a list screen and a detail
//!   sheet at the same time are applied one after the other.
//! - **Consistent reads**: observers read published snapshots, never a
//!   half-applied update.
//! - **Last select wins**: a fetch that finishes after the user moved on to
//!   another restaurant is discarded.
//!
//! ## 🚀 Core Concepts
//!
//! ### Snapshots
//! After every handled request an actor publishes its snapshot if it changed.
//! [`Subscription::next`](framework::Subscription::next) yields the current
//! snapshot first, so late subscribers start from the present.
//!
//! ### Background work
//! A fetch runs in its own task and reports back through the actor's
//! [`Mailbox`](framework::Mailbox). The mailbox is a weak handle: a result for
//! an actor that is gone is simply dropped.
//!
//! ### Failures are state
//! A failed fetch is [`RemoteStatus::Failed`](model::RemoteStatus::Failed),
//! not an error. Local reviews survive it and can still be added.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! Generic [`ResourceActor`](framework::ResourceActor), its client, and the
//! [`mock`](framework::mock) helpers for testing code that talks to an actor.
//!
//! ### 2. The Orchestrator ([`lifecycle`])
//! - **Key items**: [`DiscoverySystem`](lifecycle::DiscoverySystem),
//!   [`shutdown`](lifecycle::DiscoverySystem::shutdown).
//!
//! ### 3. The Interface ([`clients`])
//! - **Key items**: [`DetailsClient`](clients::DetailsClient),
//!   [`FavoritesClient`](clients::FavoritesClient).
//!
//! ### 4. The Actors ([`details_actor`], [`favorites_actor`])
//! Concrete implementations of the `ActorEntity` trait.
//!
//! ### 5. Collaborators ([`places`], [`persistence`], [`merger`])
//! The places service client and payload decoding, favorites storage, and the
//! pure review merge.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! RUST_LOG=info cargo run
//!
//! # Persist favorites between runs
//! FOODY_FAVORITES_PATH=/tmp/favorites.json RUST_LOG=info cargo run
//! ```

pub mod clients;
pub mod config;
pub mod details_actor;
pub mod favorites_actor;
pub mod framework;
pub mod lifecycle;
pub mod merger;
pub mod model;
pub mod persistence;
pub mod places;
