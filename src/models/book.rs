//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::author::Author;
use super::book_instance::BookInstance;
use super::genre::{Genre, Language};

/// Maximum length of a book title
pub const MAX_TITLE_LEN: u64 = 200;
/// Maximum length of a book summary
pub const MAX_SUMMARY_LEN: u64 = 1000;
/// Maximum length of an ISBN string (length is the only rule, no checksum)
pub const MAX_ISBN_LEN: u64 = 13;

/// Book row from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: Option<String>,
    pub author_id: i32,
    pub language_id: i32,
}

impl Book {
    /// Canonical public path for this book's detail page
    pub fn public_path(&self) -> String {
        format!("/catalog/book/{}/", self.id)
    }
}

/// Book list entry with joined display fields
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookSummary {
    pub id: i32,
    pub title: String,
    pub author_name: String,
    /// Comma-joined genre names, truncated to the display limit
    pub genres: String,
}

/// Full book detail with related records
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookDetail {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: Option<String>,
    /// Canonical detail-page path, e.g. "/catalog/book/3/"
    pub public_path: String,
    pub author: Author,
    pub language: Language,
    pub genres: Vec<Genre>,
    pub instances: Vec<BookInstance>,
}

/// Join the first `limit` genre names with ", " for summary display
pub fn display_genres(names: &[String], limit: usize) -> String {
    names
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(max = 1000, message = "Summary must be at most 1000 characters"))]
    pub summary: String,
    #[validate(length(max = 13, message = "ISBN must be at most 13 characters"))]
    pub isbn: Option<String>,
    pub author_id: i32,
    pub language_id: i32,
    /// Genre ids; may be empty
    #[serde(default)]
    pub genre_ids: Vec<i32>,
}

/// Update book request.
///
/// Absent fields keep their current value; an optional field such as
/// `isbn` cannot be cleared through this request, only overwritten.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 1000, message = "Summary must be at most 1000 characters"))]
    pub summary: Option<String>,
    #[validate(length(max = 13, message = "ISBN must be at most 13 characters"))]
    pub isbn: Option<String>,
    pub author_id: Option<i32>,
    pub language_id: Option<i32>,
    /// When present, replaces the book's genre set
    pub genre_ids: Option<Vec<i32>>,
}

/// Query parameters for book listings
#[derive(Debug, Deserialize, IntoParams)]
pub struct BookQuery {
    /// Page number (default: 1)
    pub page: Option<i64>,
    /// Case-insensitive substring filter on the title
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_path() {
        let book = Book {
            id: 1,
            title: "Book Title".to_string(),
            summary: "My book summary".to_string(),
            isbn: Some("ABCDEFG".to_string()),
            author_id: 1,
            language_id: 1,
        };
        assert_eq!(book.public_path(), "/catalog/book/1/");
    }

    #[test]
    fn test_display_genres_single() {
        let names = vec!["Fantasy".to_string()];
        assert_eq!(display_genres(&names, 3), "Fantasy");
    }

    #[test]
    fn test_display_genres_truncates_to_first_three() {
        let names: Vec<String> = ["Fantasy", "Thriller", "Horror", "Poetry"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(display_genres(&names, 3), "Fantasy, Thriller, Horror");
    }

    #[test]
    fn test_display_genres_empty() {
        assert_eq!(display_genres(&[], 3), "");
    }

    #[test]
    fn test_field_bounds() {
        assert_eq!(MAX_TITLE_LEN, 200);
        assert_eq!(MAX_SUMMARY_LEN, 1000);
        assert_eq!(MAX_ISBN_LEN, 13);

        let ok = CreateBook {
            title: "Book Title".to_string(),
            summary: "My book summary".to_string(),
            isbn: Some("ABCDEFG".to_string()),
            author_id: 1,
            language_id: 1,
            genre_ids: vec![1],
        };
        assert!(validator::Validate::validate(&ok).is_ok());

        let long_isbn = CreateBook {
            isbn: Some("X".repeat(14)),
            ..ok_book()
        };
        assert!(validator::Validate::validate(&long_isbn).is_err());

        let long_summary = CreateBook {
            summary: "x".repeat(1001),
            ..ok_book()
        };
        assert!(validator::Validate::validate(&long_summary).is_err());
    }

    fn ok_book() -> CreateBook {
        CreateBook {
            title: "Book Title".to_string(),
            summary: String::new(),
            isbn: None,
            author_id: 1,
            language_id: 1,
            genre_ids: vec![],
        }
    }
}
