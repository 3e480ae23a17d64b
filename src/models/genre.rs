//! Genre and language lookup models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Maximum length of a genre or language name
pub const MAX_LABEL_LEN: u64 = 200;

/// Book genre, e.g. "Science Fiction"
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

/// Natural language of a book, e.g. "English"
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Language {
    pub id: i32,
    pub name: String,
}

/// Create genre request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateGenre {
    /// Genre label (e.g. Science Fiction, French Poetry etc.)
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
}

/// Create language request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLanguage {
    /// Language name (e.g. English, French, Japanese etc.)
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_bound() {
        assert_eq!(MAX_LABEL_LEN, 200);

        let ok = CreateGenre { name: "x".repeat(200) };
        assert!(validator::Validate::validate(&ok).is_ok());

        let too_long = CreateLanguage { name: "x".repeat(201) };
        assert!(validator::Validate::validate(&too_long).is_err());
    }

    #[test]
    fn test_display_is_name() {
        let language = Language { id: 1, name: "English".to_string() };
        assert_eq!(language.name, "English");
    }
}
