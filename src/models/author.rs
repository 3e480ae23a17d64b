//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Maximum length of an author first or last name
pub const MAX_NAME_LEN: u64 = 100;

/// Full author model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Display identity: "last, first"
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }

    /// Canonical public path for this author's detail page
    pub fn public_path(&self) -> String {
        format!("/catalog/author/{}/", self.id)
    }
}

/// Author with the number of books referencing them
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AuthorSummary {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    pub book_count: i64,
}

/// Create author request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAuthor {
    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Update author request.
///
/// Absent fields keep their current value; the date fields cannot be
/// cleared through this request, only overwritten.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAuthor {
    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(id: i32, first: &str, last: &str) -> Author {
        Author {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            date_of_birth: None,
            date_of_death: None,
        }
    }

    #[test]
    fn test_display_name_is_last_comma_first() {
        assert_eq!(author(1, "John", "Smith").display_name(), "Smith, John");
    }

    #[test]
    fn test_public_path() {
        assert_eq!(author(1, "John", "Smith").public_path(), "/catalog/author/1/");
        assert_eq!(author(42, "Big", "Bob").public_path(), "/catalog/author/42/");
    }

    #[test]
    fn test_name_bounds() {
        assert_eq!(MAX_NAME_LEN, 100);

        let ok = CreateAuthor {
            first_name: "a".repeat(100),
            last_name: "b".repeat(100),
            date_of_birth: None,
            date_of_death: None,
        };
        assert!(validator::Validate::validate(&ok).is_ok());

        let too_long = CreateAuthor {
            first_name: "a".repeat(101),
            last_name: "Bob".to_string(),
            date_of_birth: None,
            date_of_death: None,
        };
        assert!(validator::Validate::validate(&too_long).is_err());
    }
}
