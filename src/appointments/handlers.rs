use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::appointments::dto::{CreateAppointmentRequest, UpdateStatusRequest};
use crate::appointments::repo::{
    AdminAppointmentRow, Appointment, AppointmentStatus, DoctorAppointmentRow,
    PatientAppointmentRow,
};
use crate::appointments::services::book_appointment;
use crate::auth::extractors::AuthUser;
use crate::auth::repo::{Doctor, Patient, Role};
use crate::error::{ApiError, MessageBody};
use crate::state::AppState;

pub fn patient_routes() -> Router<AppState> {
    Router::new()
        .route("/citas", post(create_appointment))
        .route("/citas/me", get(my_appointments))
        .route("/cita/:id/cancel", put(cancel_appointment))
}

pub fn staff_routes() -> Router<AppState> {
    Router::new()
        .route("/cita/:id/status", put(update_status))
        .route("/doctor/:id/citas", get(doctor_appointments))
        .route("/admin/citas", get(all_appointments))
}

#[instrument(skip(state, auth, payload))]
pub async fn create_appointment(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    match auth.role {
        Role::Patient => {}
        Role::Doctor | Role::Admin => return Err(ApiError::forbidden()),
    }

    let appointment = book_appointment(&state.db, auth.user_id, &payload).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

#[instrument(skip(state, auth))]
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<MessageBody>, ApiError> {
    match auth.role {
        Role::Doctor | Role::Admin => {}
        Role::Patient => return Err(ApiError::forbidden()),
    }

    // PENDING is the creation state, never a transition target.
    if payload.status == AppointmentStatus::Pending {
        return Err(ApiError::BadRequest("Estado inválido".into()));
    }

    let appointment = Appointment::find(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Cita no encontrada".into()))?;

    if auth.role == Role::Doctor {
        let own = Doctor::for_user(&state.db, auth.user_id).await?;
        if own.map(|d| d.id) != Some(appointment.doctor_id) {
            return Err(ApiError::forbidden());
        }
    }

    if !appointment.status.can_transition_to(payload.status) {
        warn!(
            appointment_id = %id,
            from = ?appointment.status,
            to = ?payload.status,
            "illegal status transition"
        );
        return Err(ApiError::BadRequest(
            "Transición de estado no permitida".into(),
        ));
    }

    Appointment::update_status(&state.db, id, payload.status).await?;

    info!(appointment_id = %id, status = ?payload.status, "appointment status updated");
    Ok(Json(MessageBody::new("Estado actualizado correctamente")))
}

#[instrument(skip(state, auth))]
pub async fn cancel_appointment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageBody>, ApiError> {
    match auth.role {
        Role::Patient => {}
        Role::Doctor | Role::Admin => return Err(ApiError::forbidden()),
    }

    let patient = Patient::for_user(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::Forbidden("No es un paciente válido".into()))?;

    let appointment = Appointment::find(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Cita no encontrada".into()))?;

    if appointment.patient_id != patient.id {
        return Err(ApiError::forbidden());
    }

    match appointment.status {
        AppointmentStatus::Completed => {
            return Err(ApiError::BadRequest(
                "No se puede cancelar una cita completada".into(),
            ));
        }
        AppointmentStatus::Cancelled => {
            return Err(ApiError::BadRequest("La cita ya está cancelada".into()));
        }
        AppointmentStatus::Pending | AppointmentStatus::Confirmed => {}
    }

    Appointment::update_status(&state.db, id, AppointmentStatus::Cancelled).await?;

    info!(appointment_id = %id, "appointment cancelled");
    Ok(Json(MessageBody::new("Cita cancelada correctamente")))
}

#[instrument(skip(state, auth))]
pub async fn my_appointments(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<PatientAppointmentRow>>, ApiError> {
    match auth.role {
        Role::Patient => {}
        Role::Doctor | Role::Admin => return Err(ApiError::forbidden()),
    }

    let patient = Patient::for_user(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::Forbidden("No es un paciente válido".into()))?;

    Ok(Json(PatientAppointmentRow::list(&state.db, patient.id).await?))
}

#[instrument(skip(state, auth))]
pub async fn doctor_appointments(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<DoctorAppointmentRow>>, ApiError> {
    match auth.role {
        Role::Admin => {}
        // Doctors only see their own agenda.
        Role::Doctor => {
            let own = Doctor::for_user(&state.db, auth.user_id).await?;
            if own.map(|d| d.id) != Some(id) {
                return Err(ApiError::forbidden());
            }
        }
        Role::Patient => return Err(ApiError::forbidden()),
    }

    Ok(Json(DoctorAppointmentRow::list(&state.db, id).await?))
}

#[instrument(skip(state, auth))]
pub async fn all_appointments(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<AdminAppointmentRow>>, ApiError> {
    match auth.role {
        Role::Admin => {}
        Role::Doctor | Role::Patient => return Err(ApiError::forbidden()),
    }

    Ok(Json(AdminAppointmentRow::list_all(&state.db).await?))
}
