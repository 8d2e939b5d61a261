use serde::{Deserialize, Serialize};

use crate::specialties::repo::Specialty;

#[derive(Debug, Deserialize)]
pub struct CreateSpecialtyRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedSpecialtyResponse {
    pub message: String,
    pub specialty: Specialty,
}
