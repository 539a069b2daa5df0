//! A minimal entity-component-system world: dense per-type component pools
//! indexed by entity ID, bitmask queries, and a binary snapshot format.
//!
//! The ECS is an orthogonal organizational layer -- it does not know about
//! [`crate::nbody::Body`] or [`crate::scene::Scene`]; a caller is free to
//! register a `Transform`/`Velocity`-style component set of its own and use
//! this world to drive higher-level scenarios.

mod query;
mod snapshot;
mod world;

pub use query::Query;
pub use snapshot::{load, save, LoadReport};
pub use world::{EntityId, World, MAX_COMPONENT_TYPES, MAX_ENTITY_CAPACITY};
