//! Booking validation and write path.

use sqlx::PgPool;
use time::{OffsetDateTime, Time};
use tracing::{info, warn};
use uuid::Uuid;

use crate::appointments::dto::CreateAppointmentRequest;
use crate::appointments::repo::Appointment;
use crate::auth::repo::{Doctor, Patient};
use crate::doctors::repo::{DayOfWeek, Schedule};
use crate::error::{is_unique_violation, ApiError};

/// Requested time must start within the working window; a booking at the
/// closing time itself is rejected.
fn within_working_hours(start: Time, end: Time, t: Time) -> bool {
    start <= t && t < end
}

/// Validate and persist a booking, fail-fast in this order: patient
/// profile, doctor existence, date not in the past, working day, working
/// hours, free slot. The slot pre-check is advisory; losing the race to
/// a concurrent insert surfaces as a unique violation and reports the
/// same conflict.
pub async fn book_appointment(
    db: &PgPool,
    user_id: Uuid,
    req: &CreateAppointmentRequest,
) -> Result<Appointment, ApiError> {
    let patient = Patient::for_user(db, user_id)
        .await?
        .ok_or_else(|| ApiError::Forbidden("No es un paciente válido".into()))?;

    if Doctor::find(db, req.doctor_id).await?.is_none() {
        return Err(ApiError::NotFound("Doctor no encontrado".into()));
    }

    let today = OffsetDateTime::now_utc().date();
    if req.appointment_date < today {
        return Err(ApiError::BadRequest("Fecha inválida".into()));
    }

    let day = DayOfWeek::from(req.appointment_date.weekday());
    let schedule = Schedule::for_day(db, req.doctor_id, day)
        .await?
        .ok_or_else(|| ApiError::BadRequest("El doctor no trabaja ese día".into()))?;

    if !within_working_hours(schedule.start_time, schedule.end_time, req.appointment_time) {
        return Err(ApiError::BadRequest(
            "Hora fuera del horario del doctor".into(),
        ));
    }

    if Appointment::slot_taken(db, req.doctor_id, req.appointment_date, req.appointment_time)
        .await?
    {
        return Err(ApiError::Conflict("Ya existe una cita en ese horario".into()));
    }

    let appointment = Appointment::insert(
        db,
        patient.id,
        req.doctor_id,
        req.appointment_date,
        req.appointment_time,
        req.reason.as_deref(),
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            warn!(doctor_id = %req.doctor_id, "booking lost slot race");
            ApiError::Conflict("Ya existe una cita en ese horario".into())
        } else {
            e.into()
        }
    })?;

    info!(appointment_id = %appointment.id, doctor_id = %req.doctor_id, "appointment booked");
    Ok(appointment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::time;

    #[test]
    fn window_is_half_open() {
        let (start, end) = (time!(09:00), time!(17:00));
        assert!(within_working_hours(start, end, time!(09:00)));
        assert!(within_working_hours(start, end, time!(16:59)));
        assert!(!within_working_hours(start, end, time!(17:00)));
        assert!(!within_working_hours(start, end, time!(08:59)));
    }
}
