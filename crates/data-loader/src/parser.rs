//! Parser for the MovieLens `movies.csv` file.
//!
//! Format: `movieId,title,genres` with a header row. Titles may contain
//! commas and are quoted; genres are pipe-separated labels, or the sentinel
//! `(no genres listed)` for movies without any.

use crate::error::{CatalogError, Result};
use crate::types::Movie;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Sentinel MovieLens uses instead of an empty genre column
const NO_GENRES: &str = "(no genres listed)";

/// Raw CSV record, as serde sees one row of movies.csv
#[derive(Debug, serde::Deserialize)]
struct MovieRecord {
    #[serde(rename = "movieId")]
    movie_id: u32,
    title: String,
    genres: String,
}

/// Parse movies.csv from a file path
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let file = File::open(path).map_err(|_| CatalogError::FileNotFound {
        path: path.display().to_string(),
    })?;
    let movies = read_movies(file)?;
    debug!(movies = movies.len(), path = %path.display(), "parsed movie catalog");
    Ok(movies)
}

/// Parse movies.csv from any reader (used directly by tests)
pub fn read_movies<R: Read>(reader: R) -> Result<Vec<Movie>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut movies = Vec::new();

    for record in csv_reader.deserialize() {
        let record: MovieRecord = record?;
        movies.push(Movie {
            id: record.movie_id,
            year: extract_year_from_title(&record.title),
            genres: split_genres(&record.genres),
            title: record.title,
        });
    }
    Ok(movies)
}

/// Split a pipe-separated genre column into labels
///
/// Example: "Adventure|Animation|Children" -> 3 labels
///          "(no genres listed)" -> empty
fn split_genres(raw: &str) -> Vec<String> {
    if raw.is_empty() || raw == NO_GENRES {
        return Vec::new();
    }
    raw.split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extract year from movie title
///
/// Example: "Toy Story (1995)" -> Some(1995)
///          "Movie Title" -> None
fn extract_year_from_title(title: &str) -> Option<u16> {
    let start = title.rfind('(')?;
    let end = title.rfind(')')?;
    if start < end {
        let year_str = &title[start + 1..end];
        if let Ok(year) = year_str.parse::<u16>() {
            return Some(year);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
movieId,title,genres
1,Toy Story (1995),Adventure|Animation|Children|Comedy|Fantasy
2,Jumanji (1995),Adventure|Children|Fantasy
126929,Li'l Quinquin,(no genres listed)
40697,\"Babylon 5\",Sci-Fi
";

    #[test]
    fn test_read_movies() {
        let movies = read_movies(SAMPLE.as_bytes()).unwrap();
        assert_eq!(movies.len(), 4);

        assert_eq!(movies[0].id, 1);
        assert_eq!(movies[0].title, "Toy Story (1995)");
        assert_eq!(movies[0].year, Some(1995));
        assert_eq!(movies[0].genres.len(), 5);

        // Sentinel maps to an empty genre list
        assert_eq!(movies[2].id, 126929);
        assert!(movies[2].genres.is_empty());
        assert_eq!(movies[2].year, None);

        assert_eq!(movies[3].genres, vec!["Sci-Fi".to_string()]);
    }

    #[test]
    fn test_quoted_title_with_comma() {
        let input = "movieId,title,genres\n11,\"American President, The (1995)\",Comedy|Drama|Romance\n";
        let movies = read_movies(input.as_bytes()).unwrap();
        assert_eq!(movies[0].title, "American President, The (1995)");
        assert_eq!(movies[0].year, Some(1995));
        assert_eq!(movies[0].genres.len(), 3);
    }

    #[test]
    fn test_malformed_row_is_an_error() {
        let input = "movieId,title,genres\nnot-a-number,Broken,Drama\n";
        assert!(matches!(
            read_movies(input.as_bytes()),
            Err(CatalogError::Csv(_))
        ));
    }

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year_from_title("Toy Story (1995)"), Some(1995));
        assert_eq!(extract_year_from_title("Movie Title"), None);
        assert_eq!(
            extract_year_from_title("Seven (a.k.a. Se7en) (1995)"),
            Some(1995)
        );
    }

    #[test]
    fn test_split_genres() {
        assert_eq!(split_genres("Action"), vec!["Action".to_string()]);
        assert_eq!(split_genres("Action|Drama").len(), 2);
        assert!(split_genres("(no genres listed)").is_empty());
        assert!(split_genres("").is_empty());
    }
}
