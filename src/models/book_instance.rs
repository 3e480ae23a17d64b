//! Book instance (physical copy) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Maximum length of a copy's imprint string
pub const MAX_IMPRINT_LEN: u64 = 200;

/// Loan status of a copy, stored as a one-character code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum LoanStatus {
    #[serde(rename = "m")]
    Maintenance,
    #[serde(rename = "o")]
    OnLoan,
    #[serde(rename = "a")]
    Available,
    #[serde(rename = "r")]
    Reserved,
}

impl LoanStatus {
    /// Return the one-character DB code for this status
    pub fn as_code(&self) -> &'static str {
        match self {
            LoanStatus::Maintenance => "m",
            LoanStatus::OnLoan => "o",
            LoanStatus::Available => "a",
            LoanStatus::Reserved => "r",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            LoanStatus::Maintenance => "Maintenance",
            LoanStatus::OnLoan => "On loan",
            LoanStatus::Available => "Available",
            LoanStatus::Reserved => "Reserved",
        }
    }
}

impl From<&str> for LoanStatus {
    fn from(s: &str) -> Self {
        match s {
            "o" => LoanStatus::OnLoan,
            "a" => LoanStatus::Available,
            "r" => LoanStatus::Reserved,
            _ => LoanStatus::Maintenance,
        }
    }
}

impl Default for LoanStatus {
    fn default() -> Self {
        LoanStatus::Maintenance
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

/// A physical copy of a book.
///
/// The UUID is the unique ID for this particular book across the whole
/// library, and is the loan-tracking key.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookInstance {
    pub id: Uuid,
    pub book_id: i32,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub borrower_id: Option<i32>,
    /// One-character status code (m, o, a, r)
    pub status: String,
}

impl BookInstance {
    pub fn loan_status(&self) -> LoanStatus {
        LoanStatus::from(self.status.as_str())
    }
}

/// Active loan row with joined display fields
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LoanDetails {
    pub id: Uuid,
    pub book_id: i32,
    pub book_title: String,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    /// Borrower display name; omitted on the borrower's own listing
    pub borrower_name: Option<String>,
    pub is_overdue: bool,
}

/// Create copy request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookInstance {
    #[validate(length(min = 1, max = 200, message = "Imprint must be 1-200 characters"))]
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    /// Status code; defaults to maintenance
    pub status: Option<LoanStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_round_trip() {
        for (code, status) in [
            ("m", LoanStatus::Maintenance),
            ("o", LoanStatus::OnLoan),
            ("a", LoanStatus::Available),
            ("r", LoanStatus::Reserved),
        ] {
            assert_eq!(LoanStatus::from(code), status);
            assert_eq!(status.as_code(), code);
        }
    }

    #[test]
    fn test_default_status_is_maintenance() {
        assert_eq!(LoanStatus::default(), LoanStatus::Maintenance);
        assert_eq!(LoanStatus::default().as_code(), "m");
        assert_eq!(LoanStatus::default().label(), "Maintenance");
    }

    #[test]
    fn test_unknown_code_maps_to_maintenance() {
        assert_eq!(LoanStatus::from("z"), LoanStatus::Maintenance);
    }

    #[test]
    fn test_new_instance_status() {
        let copy = BookInstance {
            id: Uuid::new_v4(),
            book_id: 1,
            imprint: "First edition".to_string(),
            due_back: None,
            borrower_id: None,
            status: LoanStatus::default().as_code().to_string(),
        };
        assert_eq!(copy.loan_status(), LoanStatus::Maintenance);
        assert!(copy.borrower_id.is_none());
    }
}
