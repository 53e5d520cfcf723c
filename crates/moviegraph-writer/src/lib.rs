//! moviegraph-writer: Command-line movie record writer.
//!
//! Loads connection settings, builds a movie record request from flags or a
//! JSON file, writes it through a scoped graph session, and reports the result.

pub mod cli;
pub mod error;
pub mod report;
pub mod run;
