//! Write operations for the movie graph.
//!
//! One movie record write is a single statement: the Country is MERGEd by
//! name, the Person and Movie are always CREATEd, and both are linked to the
//! Movie. Every value is a bound parameter.

use serde::de::DeserializeOwned;

use moviegraph_core::{MovieRecord, MovieRequest, RelationshipType, StoredEntity};

use crate::client::GraphError;
use crate::session::{Connector, GraphSession, NodeRow, Statement};

const RETURN_COLUMNS: [&str; 3] = ["country", "person", "movie"];

/// Build the movie record statement.
///
/// `country_edge` is rendered into the text from a closed enum; nothing else is.
pub fn movie_record_statement(
    request: &MovieRequest,
    country_edge: RelationshipType,
) -> Statement {
    let person_edge = RelationshipType::ActedIn.as_cypher();
    let country_edge = country_edge.as_cypher();
    let cypher = format!(
        "MERGE (country:Country {{name: $country_name}})
         CREATE (person:Person {{name: $person_name, family: $person_family}})
         CREATE (movie:Movie {{title: $title, genre: $genre, release_year: $release_year}})
         CREATE (person)-[:{person_edge}]->(movie)
         CREATE (country)-[:{country_edge}]->(movie)
         RETURN country, person, movie"
    );

    Statement::new(cypher)
        .param("country_name", request.country.name.as_str())
        .param("person_name", request.person.name.as_str())
        .param("person_family", request.person.family.clone())
        .param("title", request.movie.title.as_str())
        .param("genre", request.movie.genre.as_str())
        .param("release_year", request.movie.release_year)
        .returning(&RETURN_COLUMNS)
}

/// Open a session, write one movie record, and close the session.
///
/// The session is closed whether the write succeeds or fails. A close
/// failure is logged and never replaces the write outcome.
pub async fn write_movie_record<C: Connector>(
    connector: &C,
    request: &MovieRequest,
    country_edge: RelationshipType,
) -> Result<MovieRecord, GraphError> {
    let mut session = connector.open().await?;
    let outcome = write_in_session(&mut session, request, country_edge).await;

    if let Err(e) = session.close().await {
        tracing::warn!(error = %e, "Failed to close graph session");
    }

    outcome
}

/// Write one movie record through an already-open session.
pub async fn write_in_session<S: GraphSession>(
    session: &mut S,
    request: &MovieRequest,
    country_edge: RelationshipType,
) -> Result<MovieRecord, GraphError> {
    let statement = movie_record_statement(request, country_edge);
    let row = session
        .run_single(statement)
        .await?
        .ok_or_else(|| GraphError::Query("movie record write returned no rows".to_string()))?;

    let record = decode_record(&row)?;
    tracing::info!(
        country = %record.country.properties.name,
        person = %record.person.properties.name,
        movie = %record.movie.properties.title,
        movie_id = record.movie.node_id,
        %country_edge,
        "Wrote movie record"
    );
    Ok(record)
}

fn decode_record(row: &NodeRow) -> Result<MovieRecord, GraphError> {
    Ok(MovieRecord {
        country: decode_entity(row, "country")?,
        person: decode_entity(row, "person")?,
        movie: decode_entity(row, "movie")?,
    })
}

fn decode_entity<T: DeserializeOwned>(
    row: &NodeRow,
    column: &str,
) -> Result<StoredEntity<T>, GraphError> {
    let node = row
        .get(column)
        .ok_or_else(|| GraphError::Query(format!("column `{column}` missing from result")))?;

    let properties = serde_json::from_value(serde_json::Value::Object(node.properties.clone()))
        .map_err(|e| GraphError::Serialization(format!("Failed to decode `{column}`: {e}")))?;

    Ok(StoredEntity {
        node_id: node.id,
        properties,
    })
}
