use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Medical discipline tag, attachable to doctors many-to-many.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Specialty {
    pub id: Uuid,
    pub name: String,
}

/// Catalogue names are stored capitalized: first letter upper, rest
/// lower ("cardioLOGÍA" -> "Cardiología").
pub fn normalize_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

impl Specialty {
    pub async fn list(db: &PgPool) -> sqlx::Result<Vec<Specialty>> {
        sqlx::query_as::<_, Specialty>("SELECT id, name FROM specialties ORDER BY name ASC")
            .fetch_all(db)
            .await
    }

    pub async fn find(db: &PgPool, id: Uuid) -> sqlx::Result<Option<Specialty>> {
        sqlx::query_as::<_, Specialty>("SELECT id, name FROM specialties WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await
    }

    pub async fn find_by_name(db: &PgPool, name: &str) -> sqlx::Result<Option<Specialty>> {
        sqlx::query_as::<_, Specialty>("SELECT id, name FROM specialties WHERE name = $1")
            .bind(name)
            .fetch_optional(db)
            .await
    }

    pub async fn insert(db: &PgPool, name: &str) -> sqlx::Result<Specialty> {
        sqlx::query_as::<_, Specialty>(
            "INSERT INTO specialties (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(db)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(normalize_name("cardiología"), "Cardiología");
        assert_eq!(normalize_name("  cardioLOGÍA "), "Cardiología");
        assert_eq!(normalize_name("PEDIATRÍA"), "Pediatría");
        assert_eq!(normalize_name("x"), "X");
    }

    #[test]
    fn normalizes_empty_to_empty() {
        assert_eq!(normalize_name(""), "");
        assert_eq!(normalize_name("   "), "");
    }
}
