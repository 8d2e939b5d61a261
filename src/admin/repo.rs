use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::auth::repo::Role;

/// Aggregate counters for the admin dashboard, fetched in one round trip.
#[derive(Debug, Clone, FromRow)]
pub struct DashboardCounts {
    pub total_users: i64,
    pub total_admins: i64,
    pub total_doctors: i64,
    pub total_patients: i64,
    pub total_appointments: i64,
    pub appointments_today: i64,
    pub pending_appointments: i64,
}

impl DashboardCounts {
    pub async fn fetch(db: &PgPool) -> sqlx::Result<DashboardCounts> {
        sqlx::query_as::<_, DashboardCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users)                                          AS total_users,
                (SELECT COUNT(*) FROM users WHERE role = 'ADMIN')                     AS total_admins,
                (SELECT COUNT(*) FROM doctors)                                        AS total_doctors,
                (SELECT COUNT(*) FROM patients)                                       AS total_patients,
                (SELECT COUNT(*) FROM appointments)                                   AS total_appointments,
                (SELECT COUNT(*) FROM appointments
                  WHERE appointment_date = CURRENT_DATE)                              AS appointments_today,
                (SELECT COUNT(*) FROM appointments WHERE status = 'PENDING')          AS pending_appointments
            "#,
        )
        .fetch_one(db)
        .await
    }
}

/// User row for the admin listing, with aggregated specialty names for
/// doctors (empty for everyone else).
#[derive(Debug, Clone, FromRow)]
pub struct UserOverviewRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub telefono: String,
    pub specialties: Vec<String>,
}

impl UserOverviewRow {
    pub async fn list_all(db: &PgPool) -> sqlx::Result<Vec<UserOverviewRow>> {
        sqlx::query_as::<_, UserOverviewRow>(
            r#"
            SELECT u.id, u.name, u.email, u.role, u.telefono,
                   COALESCE(array_remove(array_agg(s.name), NULL), '{}') AS specialties
            FROM users u
            LEFT JOIN doctors d ON u.id = d.user_id
            LEFT JOIN doctor_specialties ds ON d.id = ds.doctor_id
            LEFT JOIN specialties s ON ds.specialty_id = s.id
            GROUP BY u.id
            ORDER BY u.created_at DESC
            "#,
        )
        .fetch_all(db)
        .await
    }
}
