//! Loan endpoints: borrowed listings and loan renewal

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{error::AppResult, models::book_instance::LoanDetails};

use super::AuthenticatedUser;

/// Renewal form prefill
#[derive(Serialize, ToSchema)]
pub struct RenewalFormResponse {
    /// Copy being renewed
    pub instance_id: Uuid,
    /// Proposed due-back date (today + 3 weeks)
    pub proposed_due_back: NaiveDate,
}

/// Renewal request
#[derive(Deserialize, ToSchema)]
pub struct RenewRequest {
    /// New due-back date; must not be in the past or more than 4 weeks out
    pub due_back: NaiveDate,
}

/// Renewal result
#[derive(Serialize, ToSchema)]
pub struct RenewResponse {
    pub instance_id: Uuid,
    pub due_back: NaiveDate,
    pub message: String,
}

/// Active loans of the authenticated user
#[utoipa::path(
    get,
    path = "/mybooks/",
    tag = "loans",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's active loans, soonest due first", body = Vec<LoanDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_loans(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<LoanDetails>>> {
    let loans = state.services.loans.loans_for_borrower(claims.user_id).await?;
    Ok(Json(loans))
}

/// All active loans across borrowers
#[utoipa::path(
    get,
    path = "/borrowed/",
    tag = "loans",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All active loans, soonest due first", body = Vec<LoanDetails>),
        (status = 403, description = "Missing 'can mark returned' permission")
    )
)]
pub async fn all_borrowed(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<LoanDetails>>> {
    claims.require_mark_returned()?;

    let loans = state.services.loans.all_active_loans().await?;
    Ok(Json(loans))
}

/// Renewal form prefill for a copy
#[utoipa::path(
    get,
    path = "/bookinstance/{id}/renew/",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Copy ID")
    ),
    responses(
        (status = 200, description = "Prefilled renewal form", body = RenewalFormResponse),
        (status = 403, description = "Missing 'can mark returned' permission"),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn renewal_form(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RenewalFormResponse>> {
    claims.require_mark_returned()?;

    // 404 for unknown copies before offering a form
    state.services.catalog.get_book_instance(id).await?;

    Ok(Json(RenewalFormResponse {
        instance_id: id,
        proposed_due_back: state.services.loans.proposed_renewal_date(),
    }))
}

/// Renew a loan: set a new due-back date on the copy
#[utoipa::path(
    post,
    path = "/bookinstance/{id}/renew/",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Copy ID")
    ),
    request_body = RenewRequest,
    responses(
        (status = 200, description = "Loan renewed", body = RenewResponse),
        (status = 400, description = "Date in the past or more than 4 weeks ahead"),
        (status = 403, description = "Missing 'can mark returned' permission"),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn renew(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<RenewRequest>,
) -> AppResult<Json<RenewResponse>> {
    claims.require_mark_returned()?;

    let renewed = state.services.loans.renew(id, request.due_back).await?;

    Ok(Json(RenewResponse {
        instance_id: renewed.id,
        due_back: request.due_back,
        message: format!("Loan renewed until {}", request.due_back),
    }))
}
