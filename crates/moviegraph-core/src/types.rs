//! Core domain types for the MovieGraph store.
//!
//! These types describe the entities written by one movie record write and
//! the shape of what the graph hands back afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ── Input Entities ────────────────────────────────────────────────

/// A country. Upserted by exact `name` match, so repeated writes share one node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Country {
    pub name: String,
}

/// A person credited on a movie. Always created anew.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
}

/// A movie. Always created anew; there is no natural key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movie {
    pub title: String,
    pub genre: String,
    pub release_year: i64,
}

/// Everything one write needs: the country, the person and the movie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieRequest {
    pub country: Country,
    pub person: Person,
    pub movie: Movie,
}

impl MovieRequest {
    /// The demonstration record written when no input is supplied.
    pub fn demo() -> Self {
        Self {
            country: Country {
                name: "USA".to_string(),
            },
            person: Person {
                name: "name".to_string(),
                family: Some("family".to_string()),
            },
            movie: Movie {
                title: "The Evil".to_string(),
                genre: "Data Science".to_string(),
                release_year: 2024,
            },
        }
    }
}

// ── Stored Entities ───────────────────────────────────────────────

/// A node as stored in the graph: its store-assigned id plus its properties.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredEntity<T> {
    pub node_id: i64,
    #[serde(flatten)]
    pub properties: T,
}

/// Result of a movie record write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieRecord {
    pub country: StoredEntity<Country>,
    pub person: StoredEntity<Person>,
    pub movie: StoredEntity<Movie>,
}

// ── Node Labels ───────────────────────────────────────────────────

/// Node labels written into the graph.
///
/// Labels cannot be bound as Cypher parameters either, so read-back queries
/// take one of these instead of a free-form string.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum NodeLabel {
    Country,
    Person,
    Movie,
}

impl NodeLabel {
    /// The Cypher label string.
    pub fn as_cypher(&self) -> &'static str {
        match self {
            Self::Country => "Country",
            Self::Person => "Person",
            Self::Movie => "Movie",
        }
    }
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_cypher())
    }
}

// ── Relationship Types ────────────────────────────────────────────

/// Relationship types written into the graph.
///
/// Relationship types cannot be bound as Cypher parameters, so they are
/// only ever rendered from this closed set.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    ActedIn,
    #[default]
    ProducedIn,
}

impl RelationshipType {
    /// The Cypher relationship type string.
    pub fn as_cypher(&self) -> &'static str {
        match self {
            Self::ActedIn => "ACTED_IN",
            Self::ProducedIn => "PRODUCED_IN",
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_cypher())
    }
}

impl FromStr for RelationshipType {
    type Err = String;

    /// Accepts `ACTED_IN`, `acted_in` and `acted-in` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "ACTED_IN" => Ok(Self::ActedIn),
            "PRODUCED_IN" => Ok(Self::ProducedIn),
            _ => Err(format!(
                "Invalid relationship type: {s}. Choose: acted-in, produced-in"
            )),
        }
    }
}
