//! Home page endpoint: aggregate counts plus the session visit counter

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, services::stats::CatalogStats};

const SESSION_COOKIE: &str = "sessionid";

/// Index page payload
#[derive(Serialize, ToSchema)]
pub struct IndexResponse {
    #[serde(flatten)]
    pub stats: CatalogStats,
    /// Number of times this session has viewed the index page
    pub num_visits: u64,
}

/// Home page: catalog counts and the per-session visit counter
#[utoipa::path(
    get,
    path = "/",
    tag = "catalog",
    responses(
        (status = 200, description = "Catalog overview", body = IndexResponse)
    )
)]
pub async fn index(
    State(state): State<crate::AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<IndexResponse>)> {
    let sessions = &state.services.sessions;

    let (jar, session_id) = match jar.get(SESSION_COOKIE) {
        Some(cookie) => {
            let sid = cookie.value().to_string();
            (jar, sid)
        }
        None => {
            let sid = sessions.new_session_id();
            let cookie = Cookie::build((SESSION_COOKIE, sid.clone()))
                .path("/")
                .http_only(true)
                .build();
            (jar.add(cookie), sid)
        }
    };

    let num_visits = sessions.increment_visits(&session_id).await;
    let stats = state.services.stats.catalog_stats().await?;

    Ok((jar, Json(IndexResponse { stats, num_visits })))
}
