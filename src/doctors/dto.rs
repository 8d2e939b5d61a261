use serde::{Deserialize, Serialize};
use time::Time;
use uuid::Uuid;

use crate::doctors::repo::{DayOfWeek, Schedule};
use crate::timefmt;

#[derive(Debug, Deserialize)]
pub struct DoctorListQuery {
    pub specialty: Option<Uuid>,
}

/// Doctor with specialties and weekly schedule, used for both the
/// listing and the detail view.
#[derive(Debug, Serialize)]
pub struct DoctorResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub telefono: String,
    pub specialties: Vec<String>,
    pub schedules: Vec<Schedule>,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub date: String,
    pub available_slots: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignSpecialtyRequest {
    pub specialty_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    pub day_of_week: DayOfWeek,
    #[serde(with = "timefmt::hhmm")]
    pub start_time: Time,
    #[serde(with = "timefmt::hhmm")]
    pub end_time: Time,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::time;

    #[test]
    fn schedule_request_parses_wire_times() {
        let req: CreateScheduleRequest = serde_json::from_str(
            r#"{"dayOfWeek": "MON", "startTime": "09:00", "endTime": "17:00"}"#,
        )
        .unwrap();
        assert_eq!(req.day_of_week, DayOfWeek::Mon);
        assert_eq!(req.start_time, time!(09:00));
        assert_eq!(req.end_time, time!(17:00));
    }

    #[test]
    fn availability_response_uses_camel_case() {
        let res = AvailabilityResponse {
            date: "2025-03-17".into(),
            available_slots: vec!["09:00".into()],
        };
        let json = serde_json::to_string(&res).unwrap();
        assert_eq!(json, r#"{"date":"2025-03-17","availableSlots":["09:00"]}"#);
    }
}
