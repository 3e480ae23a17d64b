//! Catalog management service: authors, books, genres, languages, copies

use uuid::Uuid;

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    models::{
        author::{Author, AuthorSummary, CreateAuthor, UpdateAuthor},
        book::{Book, BookDetail, BookSummary, CreateBook, UpdateBook},
        book_instance::{BookInstance, CreateBookInstance},
        genre::{CreateGenre, CreateLanguage, Genre, Language},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    config: CatalogConfig,
}

impl CatalogService {
    pub fn new(repository: Repository, config: CatalogConfig) -> Self {
        Self { repository, config }
    }

    pub fn page_size(&self) -> i64 {
        self.config.page_size
    }

    // --- Authors ---

    pub async fn list_authors(&self, page: i64) -> AppResult<(Vec<AuthorSummary>, i64)> {
        self.repository.authors.list(page, self.config.page_size).await
    }

    pub async fn get_author(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    pub async fn create_author(&self, author: CreateAuthor) -> AppResult<Author> {
        self.repository.authors.create(&author).await
    }

    pub async fn update_author(&self, id: i32, author: UpdateAuthor) -> AppResult<Author> {
        self.repository.authors.update(id, &author).await
    }

    /// Delete an author. Restricted while any book references them.
    pub async fn delete_author(&self, id: i32) -> AppResult<()> {
        self.repository.authors.get_by_id(id).await?;

        let book_count = self.repository.authors.book_count(id).await?;
        if book_count > 0 {
            return Err(AppError::Conflict(format!(
                "Author {} is referenced by {} book(s)",
                id, book_count
            )));
        }

        self.repository.authors.delete(id).await
    }

    // --- Books ---

    pub async fn list_books(
        &self,
        page: i64,
        title_contains: Option<&str>,
    ) -> AppResult<(Vec<BookSummary>, i64)> {
        self.repository
            .books
            .list(
                page,
                self.config.page_size,
                title_contains,
                self.config.genre_display_limit,
            )
            .await
    }

    pub async fn books_by_author(&self, author_id: i32) -> AppResult<Vec<BookSummary>> {
        self.repository
            .books
            .list_by_author(author_id, self.config.genre_display_limit)
            .await
    }

    pub async fn get_book(&self, id: i32) -> AppResult<BookDetail> {
        self.repository.books.get_detail(id).await
    }

    /// Create a book after checking its author, language and genres exist
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        self.repository.authors.get_by_id(book.author_id).await?;
        self.repository.languages.get_by_id(book.language_id).await?;
        for genre_id in &book.genre_ids {
            self.repository.genres.get_by_id(*genre_id).await?;
        }

        self.repository.books.create(&book).await
    }

    pub async fn update_book(&self, id: i32, book: UpdateBook) -> AppResult<Book> {
        if let Some(author_id) = book.author_id {
            self.repository.authors.get_by_id(author_id).await?;
        }
        if let Some(language_id) = book.language_id {
            self.repository.languages.get_by_id(language_id).await?;
        }
        if let Some(ref genre_ids) = book.genre_ids {
            for genre_id in genre_ids {
                self.repository.genres.get_by_id(*genre_id).await?;
            }
        }

        self.repository.books.update(id, &book).await
    }

    /// Delete a book. Restricted while copies exist.
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.get_by_id(id).await?;

        let instance_count = self.repository.books.instance_count(id).await?;
        if instance_count > 0 {
            return Err(AppError::Conflict(format!(
                "Book {} still has {} cop(ies)",
                id, instance_count
            )));
        }

        self.repository.books.delete(id).await
    }

    // --- Copies ---

    pub async fn create_instance(
        &self,
        book_id: i32,
        copy: CreateBookInstance,
    ) -> AppResult<BookInstance> {
        self.repository.books.get_by_id(book_id).await?;
        self.repository.book_instances.create(book_id, &copy).await
    }

    pub async fn get_book_instance(&self, id: Uuid) -> AppResult<BookInstance> {
        self.repository.book_instances.get_by_id(id).await
    }

    pub async fn delete_instance(&self, id: Uuid) -> AppResult<()> {
        self.repository.book_instances.delete(id).await
    }

    // --- Genres and languages ---

    pub async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.list().await
    }

    pub async fn create_genre(&self, genre: CreateGenre) -> AppResult<Genre> {
        self.repository.genres.create(&genre).await
    }

    pub async fn list_languages(&self) -> AppResult<Vec<Language>> {
        self.repository.languages.list().await
    }

    pub async fn create_language(&self, language: CreateLanguage) -> AppResult<Language> {
        self.repository.languages.create(&language).await
    }
}
