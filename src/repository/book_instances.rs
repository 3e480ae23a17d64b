//! Book instances (copies) repository for database operations

use chrono::{NaiveDate, Utc};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book_instance::{BookInstance, CreateBookInstance, LoanDetails, LoanStatus},
};

#[derive(Clone)]
pub struct BookInstancesRepository {
    pool: Pool<Postgres>,
}

impl BookInstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get copy by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BookInstance> {
        sqlx::query_as::<_, BookInstance>(
            "SELECT id, book_id, imprint, due_back, borrower_id, status FROM book_instances WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book copy {} not found", id)))
    }

    /// Count all copies
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count copies with the given status
    pub async fn count_by_status(&self, status: LoanStatus) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = $1")
                .bind(status.as_code())
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Active loans for one borrower, soonest due date first (nulls last)
    pub async fn loans_for_borrower(&self, borrower_id: i32) -> AppResult<Vec<LoanDetails>> {
        let today = Utc::now().date_naive();

        let loans = sqlx::query_as::<_, LoanDetails>(
            r#"
            SELECT bi.id, bi.book_id, b.title as book_title, bi.imprint, bi.due_back,
                   NULL::text as borrower_name,
                   COALESCE(bi.due_back < $2, false) as is_overdue
            FROM book_instances bi
            JOIN books b ON b.id = bi.book_id
            WHERE bi.borrower_id = $1 AND bi.status = 'o'
            ORDER BY bi.due_back ASC NULLS LAST
            "#,
        )
        .bind(borrower_id)
        .bind(today)
        .fetch_all(&self.pool)
        .await?;

        Ok(loans)
    }

    /// All active loans across borrowers, soonest due date first (nulls last)
    pub async fn all_active_loans(&self) -> AppResult<Vec<LoanDetails>> {
        let today = Utc::now().date_naive();

        let loans = sqlx::query_as::<_, LoanDetails>(
            r#"
            SELECT bi.id, bi.book_id, b.title as book_title, bi.imprint, bi.due_back,
                   u.username as borrower_name,
                   COALESCE(bi.due_back < $1, false) as is_overdue
            FROM book_instances bi
            JOIN books b ON b.id = bi.book_id
            LEFT JOIN users u ON u.id = bi.borrower_id
            WHERE bi.status = 'o'
            ORDER BY bi.due_back ASC NULLS LAST
            "#,
        )
        .bind(today)
        .fetch_all(&self.pool)
        .await?;

        Ok(loans)
    }

    /// Create a copy for a book. Status defaults to maintenance.
    pub async fn create(&self, book_id: i32, copy: &CreateBookInstance) -> AppResult<BookInstance> {
        let status = copy.status.unwrap_or_default();

        let created = sqlx::query_as::<_, BookInstance>(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, due_back, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, book_id, imprint, due_back, borrower_id, status
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(book_id)
        .bind(&copy.imprint)
        .bind(copy.due_back)
        .bind(status.as_code())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Set a new due-back date on a copy
    pub async fn set_due_back(&self, id: Uuid, due_back: NaiveDate) -> AppResult<BookInstance> {
        sqlx::query_as::<_, BookInstance>(
            r#"
            UPDATE book_instances
            SET due_back = $2
            WHERE id = $1
            RETURNING id, book_id, imprint, due_back, borrower_id, status
            "#,
        )
        .bind(id)
        .bind(due_back)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book copy {} not found", id)))
    }

    /// Delete a copy
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book copy {} not found", id)));
        }
        Ok(())
    }
}
