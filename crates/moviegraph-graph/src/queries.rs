//! Read-back queries for checking what a write left in the graph.

use neo4rs::query;
use serde::{Deserialize, Serialize};

use moviegraph_core::NodeLabel;

use crate::client::{GraphClient, GraphError};

/// An edge pointing into a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingEdge {
    pub rel_type: String,
    pub source_label: String,
}

impl GraphClient {
    /// Count all nodes with a given label.
    pub async fn count_nodes(&self, label: NodeLabel) -> Result<i64, GraphError> {
        match self.query_one(query(&count_nodes_cypher(label))).await? {
            Some(row) => Ok(row.get::<i64>("cnt").unwrap_or(0)),
            None => Ok(0),
        }
    }

    /// Count Country nodes with exactly this name.
    pub async fn count_countries_named(&self, name: &str) -> Result<i64, GraphError> {
        let q = query(
            "MATCH (c:Country {name: $name})
             RETURN count(c) AS cnt",
        )
        .param("name", name.to_string());

        match self.query_one(q).await? {
            Some(row) => Ok(row.get::<i64>("cnt").unwrap_or(0)),
            None => Ok(0),
        }
    }

    /// Count Person nodes with exactly this name.
    pub async fn count_people_named(&self, name: &str) -> Result<i64, GraphError> {
        let q = query(
            "MATCH (p:Person {name: $name})
             RETURN count(p) AS cnt",
        )
        .param("name", name.to_string());

        match self.query_one(q).await? {
            Some(row) => Ok(row.get::<i64>("cnt").unwrap_or(0)),
            None => Ok(0),
        }
    }

    /// List the edges pointing into a Movie node, ordered by relationship type.
    pub async fn incoming_relationships(
        &self,
        movie_id: i64,
    ) -> Result<Vec<IncomingEdge>, GraphError> {
        let q = query(
            "MATCH (src)-[r]->(m:Movie)
             WHERE id(m) = $movie_id
             RETURN type(r) AS rel_type, labels(src) AS labels
             ORDER BY rel_type",
        )
        .param("movie_id", movie_id);

        let rows = self.query_rows(q).await?;
        let mut edges = Vec::with_capacity(rows.len());
        for row in rows {
            let rel_type: String = row.get("rel_type").map_err(|e| {
                GraphError::Serialization(format!("Failed to read relationship type: {e}"))
            })?;
            let labels: Vec<String> = row.get("labels").unwrap_or_default();
            edges.push(IncomingEdge {
                rel_type,
                source_label: labels.first().cloned().unwrap_or_default(),
            });
        }
        Ok(edges)
    }

    /// Read the `release_year` property of a Movie node as stored.
    pub async fn movie_release_year(&self, movie_id: i64) -> Result<Option<i64>, GraphError> {
        let q = query(
            "MATCH (m:Movie)
             WHERE id(m) = $movie_id
             RETURN m.release_year AS year",
        )
        .param("movie_id", movie_id);

        match self.query_one(q).await? {
            Some(row) => row.get::<Option<i64>>("year").map_err(|e| {
                GraphError::Serialization(format!("release_year is not an integer: {e}"))
            }),
            None => Ok(None),
        }
    }
}

fn count_nodes_cypher(label: NodeLabel) -> String {
    let label = label.as_cypher();
    format!("MATCH (n:{label}) RETURN count(n) AS cnt")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_nodes_cypher_uses_fixed_label() {
        assert_eq!(
            count_nodes_cypher(NodeLabel::Movie),
            "MATCH (n:Movie) RETURN count(n) AS cnt"
        );
        assert_eq!(
            count_nodes_cypher(NodeLabel::Country),
            "MATCH (n:Country) RETURN count(n) AS cnt"
        );
    }
}
