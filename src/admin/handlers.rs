use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use crate::admin::dto::{DashboardResponse, UserOverview};
use crate::admin::repo::{DashboardCounts, UserOverviewRow};
use crate::auth::extractors::AuthUser;
use crate::auth::repo::Role;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/users", get(list_users))
}

#[instrument(skip(state, auth))]
pub async fn dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<DashboardResponse>, ApiError> {
    match auth.role {
        Role::Admin => {}
        Role::Doctor | Role::Patient => return Err(ApiError::forbidden()),
    }

    let counts = DashboardCounts::fetch(&state.db).await?;
    Ok(Json(counts.into()))
}

#[instrument(skip(state, auth))]
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<UserOverview>>, ApiError> {
    match auth.role {
        Role::Admin => {}
        Role::Doctor | Role::Patient => return Err(ApiError::forbidden()),
    }

    let users = UserOverviewRow::list_all(&state.db).await?;
    Ok(Json(users.into_iter().map(UserOverview::from).collect()))
}
