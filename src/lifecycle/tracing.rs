//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a `tracing-subscriber` formatter filtered by
//! `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle** (`info`): start, stop request and shutdown, tagged with
//!   `entity_type` (`FavoritesStore`, `RestaurantDetailsController`).
//! - **Requests** (`debug`): every action with its payload, and a span per
//!   client call carrying the `place_id`.
//! - **Fetches**: selection and completion at `info`, generations and
//!   discarded stale results at `debug`, failures at `warn`.
//! - **Persistence**: favorites that could not be loaded or saved, at `warn`.
//!
//! ## Usage
//!
//! ```bash
//! # Lifecycle, selections and failures
//! RUST_LOG=info cargo run
//!
//! # Every action and fetch generation
//! RUST_LOG=debug cargo run
//!
//! # Only the controller internals
//! RUST_LOG=restaurant_details::details_actor=debug cargo run
//! ```
//!
//! A selection that loses the race against a newer one looks like this at
//! `debug`:
//!
//! ```text
//! INFO select: Restaurant selected place_id=abc name=Chez Jo is_favorite=false
//! DEBUG select: Starting fetch place_id=abc generation=1
//! INFO select: Restaurant selected place_id=def name=Le Bistro is_favorite=true
//! DEBUG select: Cancelling in-flight fetch generation=1
//! DEBUG select: Starting fetch place_id=def generation=2
//! INFO Details ready place_id=def generation=2 reviews=3
//! ```

/// Installs the global subscriber. Call once, at the start of `main`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type already says which actor logged
        .compact()
        .init();
}
