//! Access to the external places service.
//!
//! [`PlacesClient`] is the network seam; [`PlaceDetailsFetcher`] turns its raw
//! payloads into [`RemoteDetails`](crate::model::RemoteDetails) or a
//! [`FetchError`].

pub mod client;
pub mod error;
pub mod fetcher;
pub mod payload;

pub use client::*;
pub use error::*;
pub use fetcher::*;
