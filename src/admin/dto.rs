use serde::Serialize;
use uuid::Uuid;

use crate::admin::repo::{DashboardCounts, UserOverviewRow};
use crate::auth::repo::Role;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub total_users: i64,
    pub total_admins: i64,
    pub total_doctors: i64,
    pub total_patients: i64,
    pub total_appointments: i64,
    pub appointments_today: i64,
    pub pending_appointments: i64,
}

impl From<DashboardCounts> for DashboardResponse {
    fn from(c: DashboardCounts) -> Self {
        Self {
            total_users: c.total_users,
            total_admins: c.total_admins,
            total_doctors: c.total_doctors,
            total_patients: c.total_patients,
            total_appointments: c.total_appointments,
            appointments_today: c.appointments_today,
            pending_appointments: c.pending_appointments,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserOverview {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub telefono: String,
    pub specialties: Vec<String>,
}

impl From<UserOverviewRow> for UserOverview {
    fn from(r: UserOverviewRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            email: r.email,
            role: r.role,
            telefono: r.telefono,
            specialties: r.specialties,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_serializes_camel_case() {
        let res = DashboardResponse {
            total_users: 10,
            total_admins: 1,
            total_doctors: 3,
            total_patients: 6,
            total_appointments: 20,
            appointments_today: 2,
            pending_appointments: 5,
        };
        let json = serde_json::to_string(&res).unwrap();
        assert!(json.contains(r#""totalUsers":10"#));
        assert!(json.contains(r#""appointmentsToday":2"#));
        assert!(json.contains(r#""pendingAppointments":5"#));
    }
}
