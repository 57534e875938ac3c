//! # spl-engine
//!
//! The sponsor-resolution pipeline: normalize → search → succession →
//! ownership → verify, orchestrated per query by [`ResolutionEngine`].
//!
//! Each stage is a strict sequential step (later hops depend on earlier
//! results), but independent queries are embarrassingly parallel: the
//! engine is `&self` throughout, shares one memoizing graph handle, and
//! can be driven concurrently by the caller.

mod engine;
mod ownership;
mod succession;
mod trail;
mod verify;

#[cfg(test)]
mod mock;

pub use engine::{ResolutionEngine, TraversalLimits};
pub use ownership::{Ascent, ascend_to_public};
pub use succession::advance_to_current;
pub use trail::{Trail, TraversalError};
pub use verify::{Verification, verify};
