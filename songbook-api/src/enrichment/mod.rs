//! External song metadata source
//!
//! Looks up release date, lyrics and link for a (group, song) pair with a
//! bounded retry loop on server-side failures. Never writes to storage.

mod client;
mod error;
mod retry_policy;

pub use client::EnrichmentClient;
pub use error::EnrichmentError;
pub use retry_policy::{Backoff, RetryPolicy};
