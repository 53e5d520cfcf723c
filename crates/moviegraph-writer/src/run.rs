//! One writer invocation: write, then optionally read back.

use tracing::Instrument;
use uuid::Uuid;

use moviegraph_core::{MovieRecord, MovieRequest, NodeLabel, RelationshipType};
use moviegraph_graph::{write_movie_record, Connector, GraphClient, GraphConfig};

use crate::error::Result;
use crate::report::Verification;

/// Write one movie record inside a span tagged with a fresh `write_id`.
pub async fn run_write<C: Connector>(
    connector: &C,
    request: &MovieRequest,
    country_edge: RelationshipType,
) -> Result<MovieRecord> {
    let write_id = Uuid::new_v4();
    let span = tracing::info_span!("write", %write_id);

    let record = write_movie_record(connector, request, country_edge)
        .instrument(span)
        .await?;
    Ok(record)
}

/// Read back what the write left behind over a separate, short-lived client.
pub async fn verify(config: &GraphConfig, record: &MovieRecord) -> Result<Verification> {
    let client = GraphClient::connect(config).await?;
    let country_name = record.country.properties.name.clone();

    let country_nodes = client.count_countries_named(&country_name).await?;
    let person_total = client.count_nodes(NodeLabel::Person).await?;
    let movie_total = client.count_nodes(NodeLabel::Movie).await?;
    let incoming = client
        .incoming_relationships(record.movie.node_id)
        .await?;

    Ok(Verification {
        country_name,
        country_nodes,
        person_total,
        movie_total,
        incoming,
    })
}
