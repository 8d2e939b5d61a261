use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use crate::auth::extractors::AuthUser;
use crate::auth::repo::Role;
use crate::error::{is_unique_violation, ApiError};
use crate::specialties::dto::{CreateSpecialtyRequest, CreatedSpecialtyResponse};
use crate::specialties::repo::{normalize_name, Specialty};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/especialidades", get(list_specialties).post(create_specialty))
}

#[instrument(skip(state, _auth))]
pub async fn list_specialties(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Specialty>>, ApiError> {
    Ok(Json(Specialty::list(&state.db).await?))
}

#[instrument(skip(state, auth, payload))]
pub async fn create_specialty(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateSpecialtyRequest>,
) -> Result<(StatusCode, Json<CreatedSpecialtyResponse>), ApiError> {
    match auth.role {
        Role::Admin => {}
        Role::Doctor | Role::Patient => return Err(ApiError::forbidden()),
    }

    let name = normalize_name(&payload.name);
    if name.is_empty() {
        return Err(ApiError::BadRequest("El nombre es obligatorio".into()));
    }

    if Specialty::find_by_name(&state.db, &name).await?.is_some() {
        return Err(ApiError::Conflict("La especialidad ya existe".into()));
    }

    let specialty = Specialty::insert(&state.db, &name).await.map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict("La especialidad ya existe".into())
        } else {
            e.into()
        }
    })?;

    info!(specialty_id = %specialty.id, name = %specialty.name, "specialty created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedSpecialtyResponse {
            message: "Especialidad creada correctamente".into(),
            specialty,
        }),
    ))
}
