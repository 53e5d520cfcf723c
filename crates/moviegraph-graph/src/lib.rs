//! moviegraph-graph: Neo4j client for the movie graph.
//!
//! This crate is the single mutation point for the Neo4j store. Writes go
//! through a scoped [`session::GraphSession`] that is released on every
//! exit path, and every value reaches the store as a bound parameter.

pub mod client;
pub mod mutations;
pub mod queries;
pub mod session;

pub use client::{GraphClient, GraphConfig, GraphError};
pub use mutations::{movie_record_statement, write_in_session, write_movie_record};
pub use session::{BoltConnector, BoltSession, Connector, GraphSession, Statement};
