//! # spl-graph
//!
//! Knowledge-graph access for sponsorlink.
//!
//! [`WikidataClient`] implements [`spl_core::GraphService`] over the
//! Wikidata action API: `wbsearchentities` for label/alias search and
//! `wbgetentities` for property fetches, with retry/backoff handled by an
//! injected [`RetryPolicy`]. [`CachedGraph`] wraps any service with the
//! process-scoped [`ResolutionCache`] so repeated lookups within a run hit
//! the network exactly once.

mod cache;
mod http;
mod retry;
mod wikidata;

pub use cache::{CachedGraph, ResolutionCache};
pub use retry::RetryPolicy;
pub use wikidata::{ClientOptions, WikidataClient};
