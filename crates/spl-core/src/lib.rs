//! # spl-core
//!
//! Domain types and pure logic for sponsorlink.
//!
//! This crate defines the shapes that flow through the resolution pipeline
//! (`SponsorQuery` in, `ResolutionResult` out, `Entity` in between), the
//! [`GraphService`] trait that the HTTP client and test mocks both
//! implement, and the name normalizer. No I/O lives here.

pub mod entity;
pub mod normalize;
pub mod query;
pub mod result;

mod errors;
mod graph;

pub use entity::{Entity, EntityId};
pub use errors::GraphError;
pub use graph::GraphService;
pub use query::SponsorQuery;
pub use result::{ResolutionResult, ResolutionStatus, PRIVATE_UNLISTED};
