use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, Time, Weekday};
use uuid::Uuid;

use crate::timefmt;

/// Day of the week as stored in `doctor_schedules.day_of_week`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "week_day", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum DayOfWeek {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl From<Weekday> for DayOfWeek {
    fn from(w: Weekday) -> Self {
        match w {
            Weekday::Monday => DayOfWeek::Mon,
            Weekday::Tuesday => DayOfWeek::Tue,
            Weekday::Wednesday => DayOfWeek::Wed,
            Weekday::Thursday => DayOfWeek::Thu,
            Weekday::Friday => DayOfWeek::Fri,
            Weekday::Saturday => DayOfWeek::Sat,
            Weekday::Sunday => DayOfWeek::Sun,
        }
    }
}

/// Weekly recurring availability window for one day.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Schedule {
    #[serde(skip_serializing)]
    pub doctor_id: Uuid,
    pub day_of_week: DayOfWeek,
    #[serde(with = "timefmt::hhmm")]
    pub start_time: Time,
    #[serde(with = "timefmt::hhmm")]
    pub end_time: Time,
}

impl Schedule {
    pub async fn for_doctors(db: &PgPool, doctor_ids: &[Uuid]) -> sqlx::Result<Vec<Schedule>> {
        sqlx::query_as::<_, Schedule>(
            r#"
            SELECT doctor_id, day_of_week, start_time, end_time
            FROM doctor_schedules
            WHERE doctor_id = ANY($1)
            ORDER BY day_of_week
            "#,
        )
        .bind(doctor_ids)
        .fetch_all(db)
        .await
    }

    pub async fn for_day(
        db: &PgPool,
        doctor_id: Uuid,
        day: DayOfWeek,
    ) -> sqlx::Result<Option<Schedule>> {
        sqlx::query_as::<_, Schedule>(
            r#"
            SELECT doctor_id, day_of_week, start_time, end_time
            FROM doctor_schedules
            WHERE doctor_id = $1 AND day_of_week = $2
            "#,
        )
        .bind(doctor_id)
        .bind(day)
        .fetch_optional(db)
        .await
    }

    pub async fn insert(
        db: &PgPool,
        doctor_id: Uuid,
        day: DayOfWeek,
        start_time: Time,
        end_time: Time,
    ) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO doctor_schedules (doctor_id, day_of_week, start_time, end_time)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(doctor_id)
        .bind(day)
        .bind(start_time)
        .bind(end_time)
        .execute(db)
        .await?;
        Ok(())
    }
}

/// Doctor joined with its user row, as shown in listings and detail.
#[derive(Debug, Clone, FromRow)]
pub struct DoctorSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub telefono: String,
}

impl DoctorSummary {
    pub async fn list(db: &PgPool, specialty: Option<Uuid>) -> sqlx::Result<Vec<DoctorSummary>> {
        match specialty {
            Some(specialty_id) => {
                sqlx::query_as::<_, DoctorSummary>(
                    r#"
                    SELECT DISTINCT d.id, u.name, u.email, u.telefono
                    FROM doctors d
                    JOIN users u ON d.user_id = u.id
                    JOIN doctor_specialties ds ON d.id = ds.doctor_id
                    WHERE ds.specialty_id = $1
                    ORDER BY u.name ASC
                    "#,
                )
                .bind(specialty_id)
                .fetch_all(db)
                .await
            }
            None => {
                sqlx::query_as::<_, DoctorSummary>(
                    r#"
                    SELECT d.id, u.name, u.email, u.telefono
                    FROM doctors d
                    JOIN users u ON d.user_id = u.id
                    ORDER BY u.name ASC
                    "#,
                )
                .fetch_all(db)
                .await
            }
        }
    }

    pub async fn find(db: &PgPool, id: Uuid) -> sqlx::Result<Option<DoctorSummary>> {
        sqlx::query_as::<_, DoctorSummary>(
            r#"
            SELECT d.id, u.name, u.email, u.telefono
            FROM doctors d
            JOIN users u ON d.user_id = u.id
            WHERE d.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }
}

/// (doctor, specialty name) pair for assembling listings.
#[derive(Debug, Clone, FromRow)]
pub struct DoctorSpecialty {
    pub doctor_id: Uuid,
    pub name: String,
}

impl DoctorSpecialty {
    pub async fn for_doctors(db: &PgPool, doctor_ids: &[Uuid]) -> sqlx::Result<Vec<DoctorSpecialty>> {
        sqlx::query_as::<_, DoctorSpecialty>(
            r#"
            SELECT ds.doctor_id, s.name
            FROM doctor_specialties ds
            JOIN specialties s ON ds.specialty_id = s.id
            WHERE ds.doctor_id = ANY($1)
            ORDER BY s.name ASC
            "#,
        )
        .bind(doctor_ids)
        .fetch_all(db)
        .await
    }

    pub async fn exists(db: &PgPool, doctor_id: Uuid, specialty_id: Uuid) -> sqlx::Result<bool> {
        let row: Option<(i32,)> = sqlx::query_as(
            r#"
            SELECT 1 FROM doctor_specialties
            WHERE doctor_id = $1 AND specialty_id = $2
            "#,
        )
        .bind(doctor_id)
        .bind(specialty_id)
        .fetch_optional(db)
        .await?;
        Ok(row.is_some())
    }

    pub async fn assign(db: &PgPool, doctor_id: Uuid, specialty_id: Uuid) -> sqlx::Result<()> {
        sqlx::query("INSERT INTO doctor_specialties (doctor_id, specialty_id) VALUES ($1, $2)")
            .bind(doctor_id)
            .bind(specialty_id)
            .execute(db)
            .await?;
        Ok(())
    }
}

/// Times already held by a non-cancelled appointment for one doctor on
/// one date. PENDING/CONFIRMED occupy a slot; CANCELLED and COMPLETED
/// do not.
pub async fn booked_times(db: &PgPool, doctor_id: Uuid, date: Date) -> sqlx::Result<Vec<Time>> {
    sqlx::query_scalar::<_, Time>(
        r#"
        SELECT appointment_time
        FROM appointments
        WHERE doctor_id = $1
          AND appointment_date = $2
          AND status IN ('PENDING', 'CONFIRMED')
        "#,
    )
    .bind(doctor_id)
    .bind(date)
    .fetch_all(db)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn weekday_maps_to_schedule_day() {
        assert_eq!(DayOfWeek::from(Weekday::Monday), DayOfWeek::Mon);
        assert_eq!(DayOfWeek::from(Weekday::Sunday), DayOfWeek::Sun);
        // 2025-03-17 is a Monday.
        assert_eq!(
            DayOfWeek::from(date!(2025 - 03 - 17).weekday()),
            DayOfWeek::Mon
        );
        assert_eq!(
            DayOfWeek::from(date!(2025 - 03 - 22).weekday()),
            DayOfWeek::Sat
        );
    }

    #[test]
    fn day_of_week_wire_format() {
        assert_eq!(serde_json::to_string(&DayOfWeek::Wed).unwrap(), r#""WED""#);
        assert_eq!(
            serde_json::from_str::<DayOfWeek>(r#""SUN""#).unwrap(),
            DayOfWeek::Sun
        );
    }
}
