//! Author endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        author::{Author, AuthorSummary, CreateAuthor, UpdateAuthor},
        book::BookSummary,
    },
};

use super::{AuthenticatedUser, PaginatedResponse};

#[derive(Deserialize, IntoParams)]
pub struct AuthorQuery {
    /// Page number (default: 1)
    pub page: Option<i64>,
}

/// Author detail with their books
#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct AuthorDetailResponse {
    #[serde(flatten)]
    pub author: Author,
    /// Canonical detail-page path, e.g. "/catalog/author/3/"
    pub public_path: String,
    pub books: Vec<BookSummary>,
}

/// List authors, ordered by last name, 10 per page
#[utoipa::path(
    get,
    path = "/authors/",
    tag = "authors",
    params(AuthorQuery),
    responses(
        (status = 200, description = "Paginated author list", body = PaginatedResponse<AuthorSummary>)
    )
)]
pub async fn list_authors(
    State(state): State<crate::AppState>,
    Query(query): Query<AuthorQuery>,
) -> AppResult<Json<PaginatedResponse<AuthorSummary>>> {
    let page = query.page.unwrap_or(1);
    let (authors, total) = state.services.catalog.list_authors(page).await?;

    Ok(Json(PaginatedResponse {
        items: authors,
        total,
        page,
        per_page: state.services.catalog.page_size(),
    }))
}

/// Get author details by ID, including their books
#[utoipa::path(
    get,
    path = "/authors/{id}/",
    tag = "authors",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author details", body = AuthorDetailResponse),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AuthorDetailResponse>> {
    let author = state.services.catalog.get_author(id).await?;
    let books = state.services.catalog.books_by_author(id).await?;

    Ok(Json(AuthorDetailResponse {
        public_path: author.public_path(),
        author,
        books,
    }))
}

/// Create a new author
#[utoipa::path(
    post,
    path = "/authors/",
    tag = "authors",
    security(("bearer_auth" = [])),
    request_body = CreateAuthor,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Missing 'can mark returned' permission")
    )
)]
pub async fn create_author(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(author): Json<CreateAuthor>,
) -> AppResult<(StatusCode, Json<Author>)> {
    claims.require_mark_returned()?;
    author.validate()?;

    let created = state.services.catalog.create_author(author).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing author
#[utoipa::path(
    put,
    path = "/authors/{id}/",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    request_body = UpdateAuthor,
    responses(
        (status = 200, description = "Author updated", body = Author),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_author(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(author): Json<UpdateAuthor>,
) -> AppResult<Json<Author>> {
    claims.require_mark_returned()?;
    author.validate()?;

    let updated = state.services.catalog.update_author(id, author).await?;
    Ok(Json(updated))
}

/// Delete an author
#[utoipa::path(
    delete,
    path = "/authors/{id}/",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 404, description = "Author not found"),
        (status = 409, description = "Author is referenced by books")
    )
)]
pub async fn delete_author(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_mark_returned()?;

    state.services.catalog.delete_author(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
