use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// User identity record. Created at registration, never hard-deleted.
///
/// phone + country_code + user_type is the practical lookup key; the schema
/// does not enforce uniqueness on it (duplicate prevention happens in the
/// registration flow).
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub country_code: String,
    pub user_type: i32,
    pub password: String,
    pub status: i32,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Find user by phone + country code + role
    pub async fn find_by_phone(
        phone: &str,
        country_code: &str,
        user_type: i32,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM users
             WHERE phone = $1 AND country_code = $2 AND user_type = $3 AND is_deleted = false",
        )
        .bind(phone)
        .bind(country_code)
        .bind(user_type)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Find user by id
    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert a new user with the stored password hash
    pub async fn create(
        full_name: &str,
        phone: &str,
        country_code: &str,
        user_type: i32,
        password_hash: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO users (full_name, phone, country_code, user_type, password)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(full_name)
        .bind(phone)
        .bind(country_code)
        .bind(user_type)
        .bind(password_hash)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Sanitized wire projection; never exposes the password hash.
    pub fn projection(&self) -> UserProjection {
        UserProjection {
            id: self.id,
            full_name: self.full_name.clone(),
            phone: self.phone.clone(),
            country_code: self.country_code.clone(),
            user_type: vec![self.user_type],
            is_deleted: self.is_deleted,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Client-facing user shape. Role tag is an array for client compatibility.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProjection {
    pub id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub country_code: String,
    pub user_type: Vec<i32>,
    pub is_deleted: bool,
    pub status: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reduce a phone number to its digits; clients send dashes, spaces and
/// bracketed area codes.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("98765-43210"), "9876543210");
        assert_eq!(normalize_phone("98765 43210"), "9876543210");
        assert_eq!(normalize_phone(" 9876543210 "), "9876543210");
        assert_eq!(normalize_phone("(987)6543210"), "9876543210");
        assert_eq!(normalize_phone("9876543210"), "9876543210");
    }

    #[test]
    fn test_projection_hides_password_and_wraps_role() {
        let user = User {
            id: Uuid::new_v4(),
            full_name: "Asha Rao".to_string(),
            phone: "9876543210".to_string(),
            country_code: "+91".to_string(),
            user_type: 2,
            password: "$2b$12$hash".to_string(),
            status: 2,
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let projection = user.projection();
        assert_eq!(projection.user_type, vec![2]);

        let json = serde_json::to_value(&projection).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["fullName"], serde_json::json!("Asha Rao"));
        assert_eq!(json["countryCode"], serde_json::json!("+91"));
    }
}
