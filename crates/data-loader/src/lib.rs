//! # Data Loader Crate
//!
//! This crate loads a MovieLens `movies.csv` catalog and prepares it for
//! genre association mining.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, MovieCatalog)
//! - **parser**: Parse movies.csv into Rust structs
//! - **error**: Error types for catalog loading
//!
//! The catalog owns the genre vocabulary (sorted, deduplicated) and one-hot
//! encodes the movies into the `mining` crate's presence matrix. The mining
//! core never sees raw files or delimiter-separated genre strings.
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::MovieCatalog;
//! use std::path::Path;
//!
//! let catalog = MovieCatalog::load(Path::new("data/ml-20m/movies.csv"))?;
//! let matrix = catalog.presence_matrix();
//!
//! println!(
//!     "{} movies over {} genres",
//!     catalog.movie_count(),
//!     catalog.genres().len()
//! );
//! ```

// Public modules
pub mod error;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use types::{Movie, MovieCatalog, MovieId};

use std::path::Path;

impl MovieCatalog {
    /// Load a catalog from a movies.csv file
    pub fn load(path: &Path) -> Result<Self> {
        let movies = parser::parse_movies(path)?;
        Ok(Self::from_movies(movies))
    }
}
