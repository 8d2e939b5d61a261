use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::repo::Role;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub telefono: String,
    #[serde(default)]
    pub license_number: Option<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for token refresh.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Public part of the user returned to the client. `doctor_id` is the
/// doctor profile id, present only for doctors.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
    pub doctor_id: Option<Uuid>,
}

/// Response returned after register, login or refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: PublicUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_accepts_camel_case() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{
                "name": "Ana",
                "email": "ana@example.com",
                "password": "secreta123",
                "role": "DOCTOR",
                "telefono": "555-0100",
                "licenseNumber": "MED-42"
            }"#,
        )
        .unwrap();
        assert_eq!(req.role, Role::Doctor);
        assert_eq!(req.license_number.as_deref(), Some("MED-42"));
    }

    #[test]
    fn public_user_serializes_doctor_id_camel_case() {
        let user = PublicUser {
            id: Uuid::new_v4(),
            name: "Ana".into(),
            role: Role::Doctor,
            doctor_id: Some(Uuid::new_v4()),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("doctorId"));
        assert!(json.contains(r#""role":"DOCTOR""#));
    }
}
