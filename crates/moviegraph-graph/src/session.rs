//! Scoped sessions against the graph store.
//!
//! A [`Connector`] opens a [`GraphSession`]; the caller owns the session for
//! the duration of one operation and closes it on every exit path. The
//! neo4rs-backed pair is [`BoltConnector`] / [`BoltSession`].

use std::collections::BTreeMap;

use async_trait::async_trait;
use neo4rs::{BoltNull, BoltType, Query};

use crate::client::{GraphClient, GraphConfig, GraphError};

// ── Statements ───────────────────────────────────────────────────

/// A bound parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    String(String),
    Integer(i64),
    Null,
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Self::Null)
    }
}

impl From<ParamValue> for BoltType {
    fn from(v: ParamValue) -> Self {
        match v {
            ParamValue::String(s) => BoltType::from(s),
            ParamValue::Integer(i) => BoltType::from(i),
            ParamValue::Null => BoltType::Null(BoltNull),
        }
    }
}

/// Cypher text plus its bound parameters and the node columns it returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub cypher: String,
    pub params: BTreeMap<String, ParamValue>,
    pub columns: Vec<String>,
}

impl Statement {
    pub fn new(cypher: impl Into<String>) -> Self {
        Self {
            cypher: cypher.into(),
            params: BTreeMap::new(),
            columns: Vec::new(),
        }
    }

    pub fn param(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Declare the node columns of the `RETURN` clause.
    pub fn returning(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| (*c).to_string()).collect();
        self
    }

    /// Build the neo4rs query with every parameter bound.
    pub fn to_query(&self) -> Query {
        self.params
            .iter()
            .fold(neo4rs::query(&self.cypher), |q, (key, value)| {
                q.param(key, BoltType::from(value.clone()))
            })
    }
}

// ── Result Rows ──────────────────────────────────────────────────

/// A node as returned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredNode {
    pub id: i64,
    pub labels: Vec<String>,
    pub properties: serde_json::Map<String, serde_json::Value>,
}

/// One result row of node columns, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeRow {
    columns: BTreeMap<String, StoredNode>,
}

impl NodeRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: &str, node: StoredNode) {
        self.columns.insert(column.to_string(), node);
    }

    pub fn get(&self, column: &str) -> Option<&StoredNode> {
        self.columns.get(column)
    }
}

// ── Session Traits ───────────────────────────────────────────────

/// A unit of connectivity to the store, exclusively owned by one operation.
#[async_trait]
pub trait GraphSession: Send {
    /// Run one statement and return its first row, if any.
    async fn run_single(&mut self, statement: Statement) -> Result<Option<NodeRow>, GraphError>;

    /// Release the session. Safe to call more than once.
    async fn close(&mut self) -> Result<(), GraphError>;
}

/// Opens sessions against a store.
#[async_trait]
pub trait Connector: Send + Sync {
    type Session: GraphSession;

    async fn open(&self) -> Result<Self::Session, GraphError>;
}

// ── Bolt Implementation ──────────────────────────────────────────

/// Opens [`BoltSession`]s from a [`GraphConfig`].
#[derive(Debug, Clone)]
pub struct BoltConnector {
    config: GraphConfig,
}

impl BoltConnector {
    pub fn new(config: GraphConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Connector for BoltConnector {
    type Session = BoltSession;

    async fn open(&self) -> Result<BoltSession, GraphError> {
        let client = GraphClient::connect(&self.config).await?;
        Ok(BoltSession {
            client: Some(client),
        })
    }
}

/// A session backed by a neo4rs connection pool.
pub struct BoltSession {
    client: Option<GraphClient>,
}

#[async_trait]
impl GraphSession for BoltSession {
    async fn run_single(&mut self, statement: Statement) -> Result<Option<NodeRow>, GraphError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| GraphError::Connection("session already closed".to_string()))?;

        tracing::debug!(params = statement.params.len(), "Dispatching statement");
        let Some(row) = client.query_one(statement.to_query()).await? else {
            return Ok(None);
        };

        let mut out = NodeRow::new();
        for column in &statement.columns {
            let node: neo4rs::Node = row.get(column).map_err(|e| {
                GraphError::Query(format!("column `{column}` missing from result: {e}"))
            })?;
            out.insert(column, stored_node(&node)?);
        }
        Ok(Some(out))
    }

    async fn close(&mut self) -> Result<(), GraphError> {
        if self.client.take().is_some() {
            tracing::debug!("Closed Neo4j session");
        }
        Ok(())
    }
}

/// Convert a neo4rs::Node into a [`StoredNode`], keeping every property.
fn stored_node(node: &neo4rs::Node) -> Result<StoredNode, GraphError> {
    let mut properties = serde_json::Map::new();
    for key in node.keys() {
        let value: serde_json::Value = node.get(key).map_err(|e| {
            GraphError::Serialization(format!("Failed to read property `{key}`: {e}"))
        })?;
        properties.insert(key.to_string(), value);
    }

    Ok(StoredNode {
        id: node.id(),
        labels: node.labels().iter().map(|l| l.to_string()).collect(),
        properties,
    })
}
