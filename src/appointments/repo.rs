use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime, Time};
use uuid::Uuid;

use crate::timefmt;

/// Appointment lifecycle state. Transitions are one-directional;
/// CANCELLED and COMPLETED are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "appointment_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    pub fn can_transition_to(self, to: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        match self {
            Pending => matches!(to, Confirmed | Completed | Cancelled),
            Confirmed => matches!(to, Completed | Cancelled),
            Cancelled | Completed => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    #[serde(with = "timefmt::ymd")]
    pub appointment_date: Date,
    #[serde(with = "timefmt::hhmm")]
    pub appointment_time: Time,
    pub status: AppointmentStatus,
    pub reason: Option<String>,
    pub created_at: OffsetDateTime,
}

impl Appointment {
    pub async fn find(db: &PgPool, id: Uuid) -> sqlx::Result<Option<Appointment>> {
        sqlx::query_as::<_, Appointment>(
            r#"
            SELECT id, patient_id, doctor_id, appointment_date, appointment_time,
                   status, reason, created_at
            FROM appointments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// True when a PENDING/CONFIRMED appointment already holds the slot.
    /// Advisory only; the partial unique index is the real guard.
    pub async fn slot_taken(
        db: &PgPool,
        doctor_id: Uuid,
        date: Date,
        time: Time,
    ) -> sqlx::Result<bool> {
        let row: Option<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT id FROM appointments
            WHERE doctor_id = $1
              AND appointment_date = $2
              AND appointment_time = $3
              AND status IN ('PENDING', 'CONFIRMED')
            "#,
        )
        .bind(doctor_id)
        .bind(date)
        .bind(time)
        .fetch_optional(db)
        .await?;
        Ok(row.is_some())
    }

    pub async fn insert(
        db: &PgPool,
        patient_id: Uuid,
        doctor_id: Uuid,
        date: Date,
        time: Time,
        reason: Option<&str>,
    ) -> sqlx::Result<Appointment> {
        sqlx::query_as::<_, Appointment>(
            r#"
            INSERT INTO appointments (patient_id, doctor_id, appointment_date, appointment_time, reason)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, patient_id, doctor_id, appointment_date, appointment_time,
                      status, reason, created_at
            "#,
        )
        .bind(patient_id)
        .bind(doctor_id)
        .bind(date)
        .bind(time)
        .bind(reason)
        .fetch_one(db)
        .await
    }

    pub async fn update_status(
        db: &PgPool,
        id: Uuid,
        status: AppointmentStatus,
    ) -> sqlx::Result<()> {
        sqlx::query("UPDATE appointments SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}

/// Patient-facing listing row: own appointments with the doctor's name.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PatientAppointmentRow {
    pub id: Uuid,
    #[serde(with = "timefmt::ymd")]
    pub appointment_date: Date,
    #[serde(with = "timefmt::hhmm")]
    pub appointment_time: Time,
    pub status: AppointmentStatus,
    pub reason: Option<String>,
    pub doctor_name: String,
}

impl PatientAppointmentRow {
    pub async fn list(db: &PgPool, patient_id: Uuid) -> sqlx::Result<Vec<PatientAppointmentRow>> {
        sqlx::query_as::<_, PatientAppointmentRow>(
            r#"
            SELECT a.id, a.appointment_date, a.appointment_time, a.status, a.reason,
                   u.name AS doctor_name
            FROM appointments a
            JOIN doctors d ON a.doctor_id = d.id
            JOIN users u ON d.user_id = u.id
            WHERE a.patient_id = $1
            ORDER BY a.appointment_date DESC
            "#,
        )
        .bind(patient_id)
        .fetch_all(db)
        .await
    }
}

/// Doctor-facing listing row: the doctor's agenda with patient names.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DoctorAppointmentRow {
    pub id: Uuid,
    #[serde(with = "timefmt::ymd")]
    pub appointment_date: Date,
    #[serde(with = "timefmt::hhmm")]
    pub appointment_time: Time,
    pub status: AppointmentStatus,
    pub reason: Option<String>,
    pub patient_name: String,
}

impl DoctorAppointmentRow {
    pub async fn list(db: &PgPool, doctor_id: Uuid) -> sqlx::Result<Vec<DoctorAppointmentRow>> {
        sqlx::query_as::<_, DoctorAppointmentRow>(
            r#"
            SELECT a.id, a.appointment_date, a.appointment_time, a.status, a.reason,
                   u.name AS patient_name
            FROM appointments a
            JOIN patients p ON a.patient_id = p.id
            JOIN users u ON p.user_id = u.id
            WHERE a.doctor_id = $1
            ORDER BY a.appointment_date ASC, a.appointment_time ASC
            "#,
        )
        .bind(doctor_id)
        .fetch_all(db)
        .await
    }
}

/// Admin listing row: every appointment with both party names.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AdminAppointmentRow {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub patient: String,
    pub doctor: String,
    #[serde(with = "timefmt::ymd")]
    pub date: Date,
    #[serde(with = "timefmt::hhmm")]
    pub time: Time,
    pub status: AppointmentStatus,
}

impl AdminAppointmentRow {
    pub async fn list_all(db: &PgPool) -> sqlx::Result<Vec<AdminAppointmentRow>> {
        sqlx::query_as::<_, AdminAppointmentRow>(
            r#"
            SELECT a.id,
                   a.doctor_id,
                   p_user.name AS patient,
                   d_user.name AS doctor,
                   a.appointment_date AS date,
                   a.appointment_time AS time,
                   a.status
            FROM appointments a
            JOIN patients p ON a.patient_id = p.id
            JOIN users p_user ON p.user_id = p_user.id
            JOIN doctors d ON a.doctor_id = d.id
            JOIN users d_user ON d.user_id = d_user.id
            ORDER BY a.appointment_date DESC
            "#,
        )
        .fetch_all(db)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AppointmentStatus::*;

    #[test]
    fn pending_can_move_anywhere_forward() {
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Completed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn confirmed_can_complete_or_cancel_only() {
        assert!(Confirmed.can_transition_to(Completed));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(!Confirmed.can_transition_to(Pending));
        assert!(!Confirmed.can_transition_to(Confirmed));
    }

    #[test]
    fn terminal_states_admit_nothing() {
        for to in [Pending, Confirmed, Cancelled, Completed] {
            assert!(!Cancelled.can_transition_to(to));
            assert!(!Completed.can_transition_to(to));
        }
    }

    #[test]
    fn status_wire_format() {
        assert_eq!(serde_json::to_string(&Pending).unwrap(), r#""PENDING""#);
        assert_eq!(
            serde_json::from_str::<AppointmentStatus>(r#""CANCELLED""#).unwrap(),
            Cancelled
        );
    }
}
