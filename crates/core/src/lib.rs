//! `outfitter-core` — domain building blocks shared by the outfit builder crates.
//!
//! Everything here is **pure domain** (no clocks, no IO, no UI concerns).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{InstanceId, OutfitId, SessionId};
pub use value_object::ValueObject;
