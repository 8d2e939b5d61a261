use serde::Deserialize;
use time::{Date, Time};
use uuid::Uuid;

use crate::appointments::repo::AppointmentStatus;
use crate::timefmt;

/// Request body for booking an appointment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub doctor_id: Uuid,
    #[serde(with = "timefmt::ymd")]
    pub appointment_date: Date,
    #[serde(with = "timefmt::hhmm")]
    pub appointment_time: Time,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Request body for a status transition.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, time};

    #[test]
    fn create_request_parses_wire_formats() {
        let req: CreateAppointmentRequest = serde_json::from_str(
            r#"{
                "doctorId": "6f2b9e4e-3d1a-4a8e-9a7b-2c5e8d1f0a3b",
                "appointmentDate": "2025-06-02",
                "appointmentTime": "10:00",
                "reason": "Control anual"
            }"#,
        )
        .unwrap();
        assert_eq!(req.appointment_date, date!(2025 - 06 - 02));
        assert_eq!(req.appointment_time, time!(10:00));
        assert_eq!(req.reason.as_deref(), Some("Control anual"));
    }

    #[test]
    fn create_request_rejects_malformed_date() {
        let res = serde_json::from_str::<CreateAppointmentRequest>(
            r#"{
                "doctorId": "6f2b9e4e-3d1a-4a8e-9a7b-2c5e8d1f0a3b",
                "appointmentDate": "02/06/2025",
                "appointmentTime": "10:00"
            }"#,
        );
        assert!(res.is_err());
    }
}
