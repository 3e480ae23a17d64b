//! Loan listings and the renewal-date rule

use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    models::book_instance::{BookInstance, LoanDetails},
    repository::Repository,
};

/// Validate a proposed due-back date against an injected "today".
///
/// Rejects dates in the past and dates more than `window_weeks` ahead;
/// otherwise returns the date unchanged.
pub fn validate_renewal_date(
    proposed: NaiveDate,
    today: NaiveDate,
    window_weeks: i64,
) -> AppResult<NaiveDate> {
    if proposed < today {
        return Err(AppError::Validation(
            "Invalid date - renewal in past".to_string(),
        ));
    }
    if proposed > today + Duration::weeks(window_weeks) {
        return Err(AppError::Validation(format!(
            "Invalid date - renewal more than {} weeks ahead",
            window_weeks
        )));
    }
    Ok(proposed)
}

/// Default proposed renewal date, a form prefill convenience
pub fn default_renewal_date(today: NaiveDate, default_weeks: i64) -> NaiveDate {
    today + Duration::weeks(default_weeks)
}

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    config: CatalogConfig,
}

impl LoansService {
    pub fn new(repository: Repository, config: CatalogConfig) -> Self {
        Self { repository, config }
    }

    /// Active loans for one borrower, soonest due first. A pure filter:
    /// a borrower with no loans (or no row at all) gets an empty list.
    pub async fn loans_for_borrower(&self, borrower_id: i32) -> AppResult<Vec<LoanDetails>> {
        self.repository.book_instances.loans_for_borrower(borrower_id).await
    }

    /// All active loans across borrowers, soonest due first
    pub async fn all_active_loans(&self) -> AppResult<Vec<LoanDetails>> {
        self.repository.book_instances.all_active_loans().await
    }

    /// Proposed due-back date used to prefill the renewal form
    pub fn proposed_renewal_date(&self) -> NaiveDate {
        default_renewal_date(Utc::now().date_naive(), self.config.renewal_default_weeks)
    }

    /// Renew a loan: validate the proposed date and persist it on the copy.
    /// Fails with NotFound for an unknown copy before anything is written.
    pub async fn renew(&self, instance_id: Uuid, due_back: NaiveDate) -> AppResult<BookInstance> {
        self.repository.book_instances.get_by_id(instance_id).await?;

        let validated = validate_renewal_date(
            due_back,
            Utc::now().date_naive(),
            self.config.renewal_window_weeks,
        )?;

        let renewed = self
            .repository
            .book_instances
            .set_due_back(instance_id, validated)
            .await?;

        tracing::info!("Renewed copy {} until {}", instance_id, validated);
        Ok(renewed)
    }
}
