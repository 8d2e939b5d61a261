use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Closed role set. Stored as the `user_role` enum; immutable after
/// registration (there is no update path).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Patient,
    Doctor,
    Admin,
}

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub telefono: String,
    pub created_at: OffsetDateTime,
}

impl User {
    pub async fn find_by_email(db: &PgPool, email: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, telefono, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, telefono, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Create the user together with its role profile. Both rows commit
    /// or neither does, so a failed profile insert cannot leave an
    /// orphaned user behind.
    pub async fn create_with_profile(
        db: &PgPool,
        name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
        telefono: &str,
        license_number: Option<&str>,
    ) -> sqlx::Result<User> {
        let mut tx = db.begin().await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, role, telefono)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, password_hash, role, telefono, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(telefono)
        .fetch_one(&mut *tx)
        .await?;

        match role {
            Role::Patient => {
                sqlx::query("INSERT INTO patients (user_id) VALUES ($1)")
                    .bind(user.id)
                    .execute(&mut *tx)
                    .await?;
            }
            Role::Doctor => {
                sqlx::query("INSERT INTO doctors (user_id, license_number) VALUES ($1, $2)")
                    .bind(user.id)
                    .bind(license_number)
                    .execute(&mut *tx)
                    .await?;
            }
            Role::Admin => {}
        }

        tx.commit().await?;
        Ok(user)
    }
}

/// Patient profile row.
#[derive(Debug, Clone, FromRow)]
pub struct Patient {
    pub id: Uuid,
    pub user_id: Uuid,
}

impl Patient {
    pub async fn for_user(db: &PgPool, user_id: Uuid) -> sqlx::Result<Option<Patient>> {
        sqlx::query_as::<_, Patient>("SELECT id, user_id FROM patients WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(db)
            .await
    }
}

/// Doctor profile row.
#[derive(Debug, Clone, FromRow)]
pub struct Doctor {
    pub id: Uuid,
    pub user_id: Uuid,
    pub license_number: Option<String>,
}

impl Doctor {
    pub async fn for_user(db: &PgPool, user_id: Uuid) -> sqlx::Result<Option<Doctor>> {
        sqlx::query_as::<_, Doctor>(
            "SELECT id, user_id, license_number FROM doctors WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await
    }

    pub async fn find(db: &PgPool, id: Uuid) -> sqlx::Result<Option<Doctor>> {
        sqlx::query_as::<_, Doctor>(
            "SELECT id, user_id, license_number FROM doctors WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_format_is_uppercase() {
        assert_eq!(serde_json::to_string(&Role::Patient).unwrap(), r#""PATIENT""#);
        assert_eq!(
            serde_json::from_str::<Role>(r#""DOCTOR""#).unwrap(),
            Role::Doctor
        );
        assert!(serde_json::from_str::<Role>(r#""doctor""#).is_err());
    }
}
