//! Integration tests for moviegraph-graph against a live Neo4j instance.
//!
//! Credentials come from `MOVIEGRAPH__NEO4J__*` environment variables or
//! `moviegraph.toml`.
//! Run with: cargo test --package moviegraph-graph --test integration -- --ignored
//!
//! Skipped automatically if Neo4j is not available.

use std::time::Duration;

use moviegraph_core::config::load_settings;
use moviegraph_core::{MovieRequest, NodeLabel, RelationshipType};
use moviegraph_graph::{write_movie_record, BoltConnector, GraphClient, GraphConfig, GraphError};

fn config_or_skip() -> Option<GraphConfig> {
    let settings = load_settings("moviegraph").ok()?;
    match GraphConfig::try_from(&settings.neo4j) {
        Ok(config) => Some(config),
        Err(e) => {
            eprintln!("Skipping integration test (no Neo4j credentials): {e}");
            None
        }
    }
}

async fn connect_or_skip() -> Option<(GraphClient, BoltConnector)> {
    let config = config_or_skip()?;
    match GraphClient::connect(&config).await {
        Ok(client) => Some((client, BoltConnector::new(config))),
        Err(e) => {
            eprintln!("Skipping integration test (Neo4j not available): {e}");
            None
        }
    }
}

/// A request whose country name no other test run shares.
fn unique_request() -> MovieRequest {
    let mut request = MovieRequest::demo();
    request.country.name = format!("Country-{}", uuid::Uuid::new_v4());
    request.person.name = format!("Person-{}", uuid::Uuid::new_v4());
    request
}

async fn cleanup(client: &GraphClient, request: &MovieRequest) {
    let q = neo4rs::query(
        "MATCH (c:Country {name: $country})
         OPTIONAL MATCH (c)-->(m:Movie)
         OPTIONAL MATCH (p:Person)-->(m)
         DETACH DELETE c, m, p",
    )
    .param("country", request.country.name.clone());
    let _ = client.run(q).await;

    let q = neo4rs::query("MATCH (p:Person {name: $person}) DETACH DELETE p")
        .param("person", request.person.name.clone());
    let _ = client.run(q).await;
}

async fn count_movies_of(client: &GraphClient, country: &str) -> i64 {
    let q = neo4rs::query(
        "MATCH (:Country {name: $country})-->(m:Movie)
         RETURN count(m) AS cnt",
    )
    .param("country", country.to_string());
    client
        .query_one(q)
        .await
        .unwrap()
        .and_then(|row| row.get::<i64>("cnt").ok())
        .unwrap_or(0)
}

#[tokio::test]
#[ignore = "requires live Neo4j; run with: cargo test --package moviegraph-graph --test integration -- --ignored"]
async fn test_demo_record_round_trip() {
    let Some((client, connector)) = connect_or_skip().await else {
        return;
    };
    let request = unique_request();

    let record = write_movie_record(&connector, &request, RelationshipType::ProducedIn)
        .await
        .unwrap();

    assert_eq!(record.country.properties, request.country);
    assert_eq!(record.person.properties, request.person);
    assert_eq!(record.movie.properties, request.movie);

    // Stored as an integer, not a string.
    let year = client.movie_release_year(record.movie.node_id).await.unwrap();
    assert_eq!(year, Some(2024));

    let edges = client
        .incoming_relationships(record.movie.node_id)
        .await
        .unwrap();
    assert_eq!(edges.len(), 2);
    assert_eq!(edges[0].rel_type, "ACTED_IN");
    assert_eq!(edges[0].source_label, "Person");
    assert_eq!(edges[1].rel_type, "PRODUCED_IN");
    assert_eq!(edges[1].source_label, "Country");

    cleanup(&client, &request).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_country_is_shared_across_writes() {
    let Some((client, connector)) = connect_or_skip().await else {
        return;
    };
    let request = unique_request();
    let movies_before = client.count_nodes(NodeLabel::Movie).await.unwrap();

    let mut country_ids = Vec::new();
    for _ in 0..3 {
        let record = write_movie_record(&connector, &request, RelationshipType::ProducedIn)
            .await
            .unwrap();
        country_ids.push(record.country.node_id);
    }

    assert!(country_ids.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(
        client
            .count_countries_named(&request.country.name)
            .await
            .unwrap(),
        1
    );
    assert_eq!(
        client.count_people_named(&request.person.name).await.unwrap(),
        3
    );
    assert_eq!(count_movies_of(&client, &request.country.name).await, 3);
    assert!(client.count_nodes(NodeLabel::Movie).await.unwrap() >= movies_before + 3);

    cleanup(&client, &request).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_legacy_country_edge() {
    let Some((client, connector)) = connect_or_skip().await else {
        return;
    };
    let request = unique_request();

    let record = write_movie_record(&connector, &request, RelationshipType::ActedIn)
        .await
        .unwrap();

    let edges = client
        .incoming_relationships(record.movie.node_id)
        .await
        .unwrap();
    assert_eq!(edges.len(), 2);
    assert!(edges.iter().all(|e| e.rel_type == "ACTED_IN"));

    cleanup(&client, &request).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_injection_payload_is_stored_literally() {
    let Some((client, connector)) = connect_or_skip().await else {
        return;
    };
    let mut request = unique_request();
    request.person.name = format!(
        r#"{}"}}) MATCH (n) DETACH DELETE n //'"#,
        request.person.name
    );

    let record = write_movie_record(&connector, &request, RelationshipType::ProducedIn)
        .await
        .unwrap();

    assert_eq!(record.person.properties.name, request.person.name);
    assert_eq!(
        client.count_people_named(&request.person.name).await.unwrap(),
        1
    );

    cleanup(&client, &request).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_person_without_family() {
    let Some((client, connector)) = connect_or_skip().await else {
        return;
    };
    let mut request = unique_request();
    request.person.family = None;

    let record = write_movie_record(&connector, &request, RelationshipType::ProducedIn)
        .await
        .unwrap();
    assert_eq!(record.person.properties.family, None);

    cleanup(&client, &request).await;
}

#[tokio::test]
async fn test_unreachable_endpoint_fails_to_open() {
    let connector = BoltConnector::new(GraphConfig {
        uri: "bolt://127.0.0.1:1".to_string(),
        connect_timeout: Duration::from_secs(5),
        ..Default::default()
    });

    let err = write_movie_record(&connector, &MovieRequest::demo(), RelationshipType::ProducedIn)
        .await
        .unwrap_err();
    assert!(matches!(err, GraphError::Connection(_)));
}
