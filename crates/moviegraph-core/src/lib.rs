//! moviegraph-core: Shared types, configuration, and error handling for MovieGraph.
//!
//! This crate provides the foundational types used across all MovieGraph crates:
//! - Entity types (Country, Person, Movie) written to the graph
//! - Relationship types linking them
//! - Configuration management
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use error::MovieGraphError;
pub use types::{
    Country, Movie, MovieRecord, MovieRequest, NodeLabel, Person, RelationshipType,
    StoredEntity,
};
