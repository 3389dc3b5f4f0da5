//! Core domain types for the MovieLens catalog.

use mining::{ItemId, PresenceMatrix};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for a movie (as assigned by MovieLens)
pub type MovieId = u32;

/// One catalog entry: a movie and its category labels.
///
/// Genres stay as free strings rather than a closed enum: MovieLens 20M has
/// labels (e.g. "IMAX") that older snapshots lack, and the mining core only
/// cares about distinct labels, not their meaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Year extracted from the title (e.g. "Toy Story (1995)")
    pub year: Option<u16>,
    /// Genre labels, possibly empty for "(no genres listed)" entries
    pub genres: Vec<String>,
}

/// The loaded movie catalog plus its genre vocabulary.
///
/// The vocabulary is the sorted, deduplicated set of genre labels across all
/// movies. Its indices are the `ItemId`s of the presence matrix handed to the
/// miner, so a genre's label and its matrix column always correspond.
#[derive(Debug, Clone)]
pub struct MovieCatalog {
    movies: Vec<Movie>,
    /// Sorted genre vocabulary; index = ItemId
    genres: Vec<String>,
    /// Reverse lookup: genre label -> ItemId
    genre_ids: HashMap<String, ItemId>,
}

impl MovieCatalog {
    /// Build a catalog from parsed movies, deriving the genre vocabulary
    pub fn from_movies(movies: Vec<Movie>) -> Self {
        let mut genres: Vec<String> = movies
            .iter()
            .flat_map(|m| m.genres.iter().cloned())
            .collect();
        genres.sort();
        genres.dedup();

        let genre_ids = genres
            .iter()
            .enumerate()
            .map(|(id, name)| (name.clone(), id as ItemId))
            .collect();

        Self {
            movies,
            genres,
            genre_ids,
        }
    }

    /// Number of movies in the catalog
    pub fn movie_count(&self) -> usize {
        self.movies.len()
    }

    /// All movies, in file order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// The sorted genre vocabulary; indices are `ItemId`s
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    /// Resolve a genre label to its matrix column id
    pub fn genre_id(&self, name: &str) -> Option<ItemId> {
        self.genre_ids.get(name).copied()
    }

    /// Number of movies carrying each genre, most common first.
    ///
    /// Ties break alphabetically so the ordering is stable across runs.
    pub fn genre_counts(&self) -> Vec<(String, usize)> {
        let mut counts = vec![0usize; self.genres.len()];
        for movie in &self.movies {
            for genre in &movie.genres {
                if let Some(id) = self.genre_id(genre) {
                    counts[id as usize] += 1;
                }
            }
        }
        let mut pairs: Vec<(String, usize)> = self
            .genres
            .iter()
            .cloned()
            .zip(counts)
            .collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        pairs
    }

    /// One-hot encode the catalog into the miner's presence matrix.
    ///
    /// One row per movie in file order, one column per vocabulary genre.
    /// Movies without genres become all-zero rows.
    pub fn presence_matrix(&self) -> PresenceMatrix {
        let mut matrix = PresenceMatrix::new(self.genres.clone());
        let mut row: Vec<ItemId> = Vec::new();
        for movie in &self.movies {
            row.clear();
            row.extend(movie.genres.iter().filter_map(|g| self.genre_id(g)));
            matrix.push_row(&row);
        }
        matrix
    }
}
