//! Query resolution: similarity matching, confidence gating, and answer translation.

pub mod gateway;
pub mod matcher;
pub mod resolver;
#[cfg(test)]
pub(crate) mod testing;

pub use resolver::{QueryResolver, ResolveError, ResolvedAnswer};
