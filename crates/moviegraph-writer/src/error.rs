//! Error types for the moviegraph-writer crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriterError {
    #[error("Graph error: {0}")]
    Graph(#[from] moviegraph_graph::GraphError),

    #[error("{0}")]
    Settings(#[from] moviegraph_core::MovieGraphError),

    #[error("Invalid input file {path}: {source}")]
    Input {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WriterError>;
