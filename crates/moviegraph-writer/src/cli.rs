//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use moviegraph_core::{Country, Movie, MovieRequest, Person, RelationshipType};

use crate::error::{Result, WriterError};

#[derive(Debug, Parser)]
#[command(name = "moviegraph-writer")]
#[command(about = "Write a country, a person and a movie into the movie graph")]
pub struct Cli {
    /// Country name (matched or created).
    #[arg(long, default_value = "USA")]
    pub country: String,

    /// Person name (always created).
    #[arg(long, default_value = "name")]
    pub person: String,

    /// Person family name. Omit with --no-family.
    #[arg(long, default_value = "family", conflicts_with = "no_family")]
    pub family: String,

    /// Create the person without a family name.
    #[arg(long)]
    pub no_family: bool,

    /// Movie title (always created).
    #[arg(long, default_value = "The Evil")]
    pub title: String,

    /// Movie genre.
    #[arg(long, default_value = "Data Science")]
    pub genre: String,

    /// Movie release year.
    #[arg(long, default_value_t = 2024)]
    pub release_year: i64,

    /// Read the whole request from a JSON file instead of the flags above.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Country -> Movie relationship type: produced-in, acted-in.
    /// Overrides writer.country_edge from config.
    #[arg(long)]
    pub country_edge: Option<RelationshipType>,

    /// After writing, read back the country count and the movie's incoming edges.
    #[arg(long)]
    pub verify: bool,

    /// Config file prefix (default: moviegraph).
    #[arg(short, long, default_value = "moviegraph")]
    pub config: String,
}

impl Cli {
    /// Build the request from `--input` if given, otherwise from the flags.
    pub fn request(&self) -> Result<MovieRequest> {
        if let Some(path) = &self.input {
            let raw = std::fs::read_to_string(path)?;
            return serde_json::from_str(&raw).map_err(|source| WriterError::Input {
                path: path.display().to_string(),
                source,
            });
        }

        Ok(MovieRequest {
            country: Country {
                name: self.country.clone(),
            },
            person: Person {
                name: self.person.clone(),
                family: (!self.no_family).then(|| self.family.clone()),
            },
            movie: Movie {
                title: self.title.clone(),
                genre: self.genre.clone(),
                release_year: self.release_year,
            },
        })
    }

    /// The flag wins over the configured value.
    pub fn country_edge_or(&self, configured: RelationshipType) -> RelationshipType {
        self.country_edge.unwrap_or(configured)
    }
}
