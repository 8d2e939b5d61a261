use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::auth::extractors::AuthUser;
use crate::auth::repo::{Doctor, Role};
use crate::doctors::availability::available_slots;
use crate::doctors::dto::{
    AssignSpecialtyRequest, AvailabilityQuery, AvailabilityResponse, CreateScheduleRequest,
    DoctorListQuery, DoctorResponse,
};
use crate::doctors::repo::{booked_times, DayOfWeek, DoctorSpecialty, DoctorSummary, Schedule};
use crate::error::{is_unique_violation, ApiError, MessageBody};
use crate::specialties::repo::Specialty;
use crate::state::AppState;
use crate::timefmt;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/doctores", get(list_doctors))
        .route("/doctor/:id", get(get_doctor))
        // Availability is public: no bearer needed to browse open slots.
        .route("/doctor/:id/available", get(get_availability))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/doctor/:id/especialidad", post(assign_specialty))
        .route("/doctor/:id/horario", post(create_schedule))
}

#[instrument(skip(state, _auth))]
pub async fn list_doctors(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(q): Query<DoctorListQuery>,
) -> Result<Json<Vec<DoctorResponse>>, ApiError> {
    let doctors = DoctorSummary::list(&state.db, q.specialty).await?;
    if doctors.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let ids: Vec<Uuid> = doctors.iter().map(|d| d.id).collect();
    let specialties = DoctorSpecialty::for_doctors(&state.db, &ids).await?;
    let schedules = Schedule::for_doctors(&state.db, &ids).await?;

    let result = doctors
        .into_iter()
        .map(|d| DoctorResponse {
            specialties: specialties
                .iter()
                .filter(|s| s.doctor_id == d.id)
                .map(|s| s.name.clone())
                .collect(),
            schedules: schedules
                .iter()
                .filter(|s| s.doctor_id == d.id)
                .cloned()
                .collect(),
            id: d.id,
            name: d.name,
            email: d.email,
            telefono: d.telefono,
        })
        .collect();

    Ok(Json(result))
}

#[instrument(skip(state, _auth))]
pub async fn get_doctor(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DoctorResponse>, ApiError> {
    let doctor = DoctorSummary::find(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Doctor no encontrado".into()))?;

    let ids = [id];
    let specialties = DoctorSpecialty::for_doctors(&state.db, &ids).await?;
    let schedules = Schedule::for_doctors(&state.db, &ids).await?;

    Ok(Json(DoctorResponse {
        id: doctor.id,
        name: doctor.name,
        email: doctor.email,
        telefono: doctor.telefono,
        specialties: specialties.into_iter().map(|s| s.name).collect(),
        schedules,
    }))
}

#[instrument(skip(state))]
pub async fn get_availability(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(q): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let raw_date = q
        .date
        .ok_or_else(|| ApiError::BadRequest("La fecha es requerida".into()))?;
    let date = timefmt::parse_date(&raw_date)
        .ok_or_else(|| ApiError::BadRequest("Fecha inválida".into()))?;

    let day = DayOfWeek::from(date.weekday());

    // No schedule that weekday means no slots, not an error.
    let Some(schedule) = Schedule::for_day(&state.db, id, day).await? else {
        return Ok(Json(AvailabilityResponse {
            date: raw_date,
            available_slots: Vec::new(),
        }));
    };

    let booked = booked_times(&state.db, id, date).await?;
    let slots = available_slots(schedule.start_time, schedule.end_time, &booked);

    Ok(Json(AvailabilityResponse {
        date: raw_date,
        available_slots: slots.into_iter().map(timefmt::format_time).collect(),
    }))
}

#[instrument(skip(state, auth))]
pub async fn assign_specialty(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignSpecialtyRequest>,
) -> Result<(StatusCode, Json<MessageBody>), ApiError> {
    match auth.role {
        Role::Admin => {}
        Role::Doctor | Role::Patient => return Err(ApiError::forbidden()),
    }

    if Doctor::find(&state.db, id).await?.is_none() {
        return Err(ApiError::NotFound("Doctor no encontrado".into()));
    }
    if Specialty::find(&state.db, payload.specialty_id).await?.is_none() {
        return Err(ApiError::NotFound("Especialidad no encontrada".into()));
    }
    if DoctorSpecialty::exists(&state.db, id, payload.specialty_id).await? {
        return Err(ApiError::Conflict(
            "El doctor ya tiene esta especialidad".into(),
        ));
    }

    DoctorSpecialty::assign(&state.db, id, payload.specialty_id)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict("El doctor ya tiene esta especialidad".into())
            } else {
                e.into()
            }
        })?;

    info!(doctor_id = %id, specialty_id = %payload.specialty_id, "specialty assigned");
    Ok((
        StatusCode::CREATED,
        Json(MessageBody::new("Especialidad asignada correctamente")),
    ))
}

#[instrument(skip(state, auth))]
pub async fn create_schedule(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateScheduleRequest>,
) -> Result<(StatusCode, Json<MessageBody>), ApiError> {
    match auth.role {
        Role::Admin => {}
        // A doctor may only edit their own schedule.
        Role::Doctor => {
            let own = Doctor::for_user(&state.db, auth.user_id).await?;
            if own.map(|d| d.id) != Some(id) {
                return Err(ApiError::forbidden());
            }
        }
        Role::Patient => return Err(ApiError::forbidden()),
    }

    if Doctor::find(&state.db, id).await?.is_none() {
        return Err(ApiError::NotFound("Doctor no encontrado".into()));
    }

    if payload.start_time >= payload.end_time {
        warn!(doctor_id = %id, "schedule with start >= end rejected");
        return Err(ApiError::BadRequest(
            "Hora de inicio debe ser menor que hora fin".into(),
        ));
    }

    if Schedule::for_day(&state.db, id, payload.day_of_week).await?.is_some() {
        return Err(ApiError::Conflict("Ya existe horario para ese día".into()));
    }

    Schedule::insert(
        &state.db,
        id,
        payload.day_of_week,
        payload.start_time,
        payload.end_time,
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict("Ya existe horario para ese día".into())
        } else {
            e.into()
        }
    })?;

    info!(doctor_id = %id, day = ?payload.day_of_week, "schedule created");
    Ok((
        StatusCode::CREATED,
        Json(MessageBody::new("Horario creado correctamente")),
    ))
}
