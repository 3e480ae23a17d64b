//! Home-page aggregate counts

use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::book_instance::LoanStatus, repository::Repository};

/// Aggregate catalog counts for the home page
#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogStats {
    pub num_books: i64,
    pub num_instances: i64,
    pub num_instances_available: i64,
    pub num_authors: i64,
    pub num_genres: i64,
    pub num_languages: i64,
    /// Genres whose name contains "fiction" (case-insensitive)
    pub num_genres_fiction: i64,
    /// Books whose title contains "the" (case-insensitive)
    pub num_books_the: i64,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Round-trip the database pool, used by the readiness probe
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.repository.pool)
            .await?;
        Ok(())
    }

    /// Collect the aggregate counts shown on the index page
    pub async fn catalog_stats(&self) -> AppResult<CatalogStats> {
        Ok(CatalogStats {
            num_books: self.repository.books.count().await?,
            num_instances: self.repository.book_instances.count().await?,
            num_instances_available: self
                .repository
                .book_instances
                .count_by_status(LoanStatus::Available)
                .await?,
            num_authors: self.repository.authors.count().await?,
            num_genres: self.repository.genres.count().await?,
            num_languages: self.repository.languages.count().await?,
            num_genres_fiction: self.repository.genres.count_name_contains("fiction").await?,
            num_books_the: self.repository.books.count_title_contains("the").await?,
        })
    }
}
