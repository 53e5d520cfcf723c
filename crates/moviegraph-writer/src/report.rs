//! Human-readable output for a finished write.

use moviegraph_core::MovieRecord;
use moviegraph_graph::queries::IncomingEdge;

use crate::error::Result;

/// The line printed on success.
pub fn confirmation(record: &MovieRecord) -> Result<String> {
    let json = serde_json::to_string(record).map_err(moviegraph_core::MovieGraphError::from)?;
    Ok(format!("Successfully created movie node: {json}"))
}

/// What `--verify` read back after the write.
#[derive(Debug, Clone)]
pub struct Verification {
    pub country_name: String,
    pub country_nodes: i64,
    pub person_total: i64,
    pub movie_total: i64,
    pub incoming: Vec<IncomingEdge>,
}

impl Verification {
    pub fn summary(&self) -> String {
        let edges = self
            .incoming
            .iter()
            .map(|e| format!("{}-[:{}]", e.source_label, e.rel_type))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Country \"{}\" nodes: {}; Person total: {}; Movie total: {}; movie incoming edges ({}): {}",
            self.country_name,
            self.country_nodes,
            self.person_total,
            self.movie_total,
            self.incoming.len(),
            edges
        )
    }
}

#[cfg(test)]
mod tests {
    use moviegraph_core::{MovieRequest, StoredEntity};

    use super::*;

    #[test]
    fn test_confirmation_contains_record() {
        let demo = MovieRequest::demo();
        let record = MovieRecord {
            country: StoredEntity {
                node_id: 10,
                properties: demo.country,
            },
            person: StoredEntity {
                node_id: 11,
                properties: demo.person,
            },
            movie: StoredEntity {
                node_id: 12,
                properties: demo.movie,
            },
        };

        let line = confirmation(&record).unwrap();
        assert!(line.starts_with("Successfully created movie node: {"));
        assert!(line.contains(r#""title":"The Evil""#));
        assert!(line.contains(r#""release_year":2024"#));
    }

    #[test]
    fn test_verification_summary() {
        let v = Verification {
            country_name: "USA".to_string(),
            country_nodes: 1,
            person_total: 4,
            movie_total: 5,
            incoming: vec![
                IncomingEdge {
                    rel_type: "ACTED_IN".to_string(),
                    source_label: "Person".to_string(),
                },
                IncomingEdge {
                    rel_type: "PRODUCED_IN".to_string(),
                    source_label: "Country".to_string(),
                },
            ],
        };
        assert_eq!(
            v.summary(),
            "Country \"USA\" nodes: 1; Person total: 4; Movie total: 5; movie incoming edges (2): Person-[:ACTED_IN], Country-[:PRODUCED_IN]"
        );
    }
}
