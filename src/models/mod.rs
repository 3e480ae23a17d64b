//! Data models for the Local Library catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;
pub mod user;

// Re-export commonly used types
pub use author::Author;
pub use book::{Book, BookDetail, BookSummary};
pub use book_instance::{BookInstance, LoanDetails, LoanStatus};
pub use genre::{Genre, Language};
pub use user::UserClaims;
