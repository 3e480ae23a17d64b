//! Books repository for database operations

use sqlx::{FromRow, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        author::Author,
        book::{display_genres, Book, BookDetail, BookSummary, CreateBook, UpdateBook},
        book_instance::BookInstance,
        genre::{Genre, Language},
    },
};

/// Raw list row; genre names come back as an array and are joined in Rust
#[derive(FromRow)]
struct BookSummaryRow {
    id: i32,
    title: String,
    author_name: String,
    genre_names: Vec<String>,
}

impl BookSummaryRow {
    fn into_summary(self, genre_limit: usize) -> BookSummary {
        BookSummary {
            id: self.id,
            title: self.title,
            author_name: self.author_name,
            genres: display_genres(&self.genre_names, genre_limit),
        }
    }
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book row by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            "SELECT id, title, summary, isbn, author_id, language_id FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Get full book detail with author, language, genres and copies
    pub async fn get_detail(&self, id: i32) -> AppResult<BookDetail> {
        let book = self.get_by_id(id).await?;

        let author = sqlx::query_as::<_, Author>(
            "SELECT id, first_name, last_name, date_of_birth, date_of_death FROM authors WHERE id = $1",
        )
        .bind(book.author_id)
        .fetch_one(&self.pool)
        .await?;

        let language = sqlx::query_as::<_, Language>(
            "SELECT id, name FROM languages WHERE id = $1",
        )
        .bind(book.language_id)
        .fetch_one(&self.pool)
        .await?;

        let genres = sqlx::query_as::<_, Genre>(
            r#"
            SELECT g.id, g.name
            FROM genres g
            JOIN book_genres bg ON bg.genre_id = g.id
            WHERE bg.book_id = $1
            ORDER BY bg.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let instances = sqlx::query_as::<_, BookInstance>(
            r#"
            SELECT id, book_id, imprint, due_back, borrower_id, status
            FROM book_instances
            WHERE book_id = $1
            ORDER BY imprint
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(BookDetail {
            id: book.id,
            public_path: book.public_path(),
            title: book.title,
            summary: book.summary,
            isbn: book.isbn,
            author,
            language,
            genres,
            instances,
        })
    }

    /// List books ordered by title, paginated, with optional case-insensitive
    /// title filter. The genre string is truncated to `genre_limit` names.
    pub async fn list(
        &self,
        page: i64,
        per_page: i64,
        title_contains: Option<&str>,
        genre_limit: usize,
    ) -> AppResult<(Vec<BookSummary>, i64)> {
        let offset = (page - 1).max(0) * per_page;
        let title_pattern = title_contains.map(|t| format!("%{}%", t));

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM books WHERE ($1::text IS NULL OR title ILIKE $1)",
        )
        .bind(&title_pattern)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, BookSummaryRow>(
            r#"
            SELECT b.id, b.title,
                   a.last_name || ', ' || a.first_name as author_name,
                   COALESCE((
                       SELECT array_agg(g.name ORDER BY bg.id)
                       FROM genres g
                       JOIN book_genres bg ON bg.genre_id = g.id
                       WHERE bg.book_id = b.id
                   ), '{}') as genre_names
            FROM books b
            JOIN authors a ON a.id = b.author_id
            WHERE ($1::text IS NULL OR b.title ILIKE $1)
            ORDER BY b.title
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&title_pattern)
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let books = rows
            .into_iter()
            .map(|row| row.into_summary(genre_limit))
            .collect();

        Ok((books, total))
    }

    /// Books by one author, ordered by title
    pub async fn list_by_author(
        &self,
        author_id: i32,
        genre_limit: usize,
    ) -> AppResult<Vec<BookSummary>> {
        let rows = sqlx::query_as::<_, BookSummaryRow>(
            r#"
            SELECT b.id, b.title,
                   a.last_name || ', ' || a.first_name as author_name,
                   COALESCE((
                       SELECT array_agg(g.name ORDER BY bg.id)
                       FROM genres g
                       JOIN book_genres bg ON bg.genre_id = g.id
                       WHERE bg.book_id = b.id
                   ), '{}') as genre_names
            FROM books b
            JOIN authors a ON a.id = b.author_id
            WHERE b.author_id = $1
            ORDER BY b.title
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| row.into_summary(genre_limit))
            .collect())
    }

    /// Count all books
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count books whose title contains a substring, case-insensitive
    pub async fn count_title_contains(&self, substring: &str) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE title ILIKE $1")
            .bind(format!("%{}%", substring))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Create a new book and its genre links in one transaction
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, summary, isbn, author_id, language_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, summary, isbn, author_id, language_id
            "#,
        )
        .bind(&book.title)
        .bind(&book.summary)
        .bind(&book.isbn)
        .bind(book.author_id)
        .bind(book.language_id)
        .fetch_one(&mut *tx)
        .await?;

        for genre_id in &book.genre_ids {
            sqlx::query("INSERT INTO book_genres (book_id, genre_id) VALUES ($1, $2)")
                .bind(created.id)
                .bind(genre_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Update an existing book; absent fields keep their current value.
    /// When `genre_ids` is present the genre set is replaced.
    pub async fn update(&self, id: i32, book: &UpdateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = COALESCE($2, title),
                summary = COALESCE($3, summary),
                isbn = COALESCE($4, isbn),
                author_id = COALESCE($5, author_id),
                language_id = COALESCE($6, language_id)
            WHERE id = $1
            RETURNING id, title, summary, isbn, author_id, language_id
            "#,
        )
        .bind(id)
        .bind(&book.title)
        .bind(&book.summary)
        .bind(&book.isbn)
        .bind(book.author_id)
        .bind(book.language_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        if let Some(ref genre_ids) = book.genre_ids {
            sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for genre_id in genre_ids {
                sqlx::query("INSERT INTO book_genres (book_id, genre_id) VALUES ($1, $2)")
                    .bind(id)
                    .bind(genre_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(updated)
    }

    /// Count copies of a book
    pub async fn instance_count(&self, id: i32) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE book_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Delete a book and its genre links. The caller enforces the
    /// referential policy on copies.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_genres_truncated_to_display_limit() {
        let row = BookSummaryRow {
            id: 1,
            title: "Book Title".to_string(),
            author_name: "Smith, John".to_string(),
            genre_names: ["Fantasy", "Thriller", "Horror", "Poetry"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };

        let summary = row.into_summary(3);
        assert_eq!(summary.genres, "Fantasy, Thriller, Horror");
    }

    #[test]
    fn test_row_without_genres_gives_empty_string() {
        let row = BookSummaryRow {
            id: 2,
            title: "Plain".to_string(),
            author_name: "Doe, Jane".to_string(),
            genre_names: vec![],
        };

        assert_eq!(row.into_summary(3).genres, "");
    }
}
