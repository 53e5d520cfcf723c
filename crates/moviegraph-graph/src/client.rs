//! Neo4j connection management and shared graph client.

use std::time::Duration;

use neo4rs::{query, ConfigBuilder, Graph, Query};

use moviegraph_core::config::Neo4jSettings;
use moviegraph_core::MovieGraphError;

/// Errors from graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The store could not be reached, or refused the credentials.
    #[error("Neo4j connection error: {0}")]
    Connection(String),

    /// The store rejected or failed to execute a statement.
    #[error("Neo4j query error: {0}")]
    Query(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Transport failures after a session is open are connection errors;
/// everything the server or driver reports about a statement is a query error.
impl From<neo4rs::Error> for GraphError {
    fn from(err: neo4rs::Error) -> Self {
        match err {
            neo4rs::Error::IOError { .. } | neo4rs::Error::ConnectionError { .. } => {
                Self::Connection(err.to_string())
            }
            _ => Self::Query(err.to_string()),
        }
    }
}

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub fetch_size: usize,
    pub connect_timeout: Duration,
    pub query_timeout: Duration,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: String::new(),
            max_connections: 4,
            fetch_size: 256,
            connect_timeout: Duration::from_secs(10),
            query_timeout: Duration::from_secs(30),
        }
    }
}

impl TryFrom<&Neo4jSettings> for GraphConfig {
    type Error = MovieGraphError;

    fn try_from(settings: &Neo4jSettings) -> Result<Self, Self::Error> {
        Ok(Self {
            uri: settings.uri.clone(),
            user: settings.user.clone(),
            password: settings.require_password()?.to_string(),
            max_connections: settings.max_connections,
            fetch_size: settings.fetch_size,
            connect_timeout: Duration::from_secs(settings.connect_timeout_secs),
            query_timeout: Duration::from_secs(settings.query_timeout_secs),
        })
    }
}

/// Neo4j graph client with connection pooling.
///
/// Clone is cheap (inner Arc). Dropping the last clone releases the pool.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
    query_timeout: Duration,
}

impl GraphClient {
    /// Connect to Neo4j and verify the endpoint answers a ping.
    ///
    /// The pool connects lazily, so the ping is what surfaces an unreachable
    /// endpoint or bad credentials as [`GraphError::Connection`].
    pub async fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        let neo_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .max_connections(config.max_connections as usize)
            .fetch_size(config.fetch_size)
            .build()
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        let connect = async {
            let graph = Graph::connect(neo_config)
                .await
                .map_err(|e| GraphError::Connection(e.to_string()))?;
            graph
                .run(query("RETURN 1"))
                .await
                .map_err(|e| GraphError::Connection(e.to_string()))?;
            Ok::<_, GraphError>(graph)
        };

        let graph = tokio::time::timeout(config.connect_timeout, connect)
            .await
            .map_err(|_| {
                GraphError::Connection(format!(
                    "timed out after {}s connecting to {}",
                    config.connect_timeout.as_secs(),
                    config.uri
                ))
            })??;

        tracing::info!(uri = %config.uri, "Connected to Neo4j");
        Ok(Self {
            graph,
            query_timeout: config.query_timeout,
        })
    }

    /// Execute a write-only query (CREATE, MERGE, DELETE, SET).
    pub async fn run(&self, query: Query) -> Result<(), GraphError> {
        self.bounded(self.graph.run(query)).await
    }

    /// Execute a read query and collect all rows.
    pub async fn query_rows(&self, query: Query) -> Result<Vec<neo4rs::Row>, GraphError> {
        self.bounded(async {
            let mut stream = self.graph.execute(query).await?;
            let mut rows = Vec::new();
            while let Some(row) = stream.next().await? {
                rows.push(row);
            }
            Ok(rows)
        })
        .await
    }

    /// Execute a query and return the first row, if any.
    pub async fn query_one(&self, query: Query) -> Result<Option<neo4rs::Row>, GraphError> {
        self.bounded(async {
            let mut stream = self.graph.execute(query).await?;
            stream.next().await
        })
        .await
    }

    /// Run a driver future under the configured query timeout.
    async fn bounded<T, F>(&self, fut: F) -> Result<T, GraphError>
    where
        F: std::future::Future<Output = Result<T, neo4rs::Error>>,
    {
        match tokio::time::timeout(self.query_timeout, fut).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(GraphError::Query(format!(
                "timed out after {}s",
                self.query_timeout.as_secs()
            ))),
        }
    }
}
