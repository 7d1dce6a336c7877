//! Health profile repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use medivault_core::error::{AppError, ErrorKind};
use medivault_core::result::AppResult;
use medivault_entity::profile::{EmergencyContact, HealthProfile, UpsertProfile};

use crate::traits::ProfileSource;

/// Flat row; the emergency contact is stored as two nullable columns.
#[derive(sqlx::FromRow)]
struct ProfileRow {
    user_id: String,
    full_name: Option<String>,
    blood_group: Option<String>,
    allergies: Vec<String>,
    emergency_contact_name: Option<String>,
    emergency_contact_phone: Option<String>,
    updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for HealthProfile {
    fn from(row: ProfileRow) -> Self {
        let emergency_contact = match (row.emergency_contact_name, row.emergency_contact_phone) {
            (Some(name), Some(phone)) => Some(EmergencyContact { name, phone }),
            _ => None,
        };
        Self {
            user_id: row.user_id,
            full_name: row.full_name,
            blood_group: row.blood_group,
            allergies: row.allergies,
            emergency_contact,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL-backed profile store.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Create a new profile repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileSource for ProfileRepository {
    async fn find_by_user(&self, user_id: &str) -> AppResult<Option<HealthProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>("SELECT * FROM health_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find profile", e))?;
        Ok(row.map(HealthProfile::from))
    }

    async fn upsert(&self, data: UpsertProfile) -> AppResult<HealthProfile> {
        let (contact_name, contact_phone) = match data.emergency_contact {
            Some(c) => (Some(c.name), Some(c.phone)),
            None => (None, None),
        };

        let row = sqlx::query_as::<_, ProfileRow>(
            "INSERT INTO health_profiles
                (user_id, full_name, blood_group, allergies, emergency_contact_name, emergency_contact_phone, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, NOW())
             ON CONFLICT (user_id) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                blood_group = EXCLUDED.blood_group,
                allergies = EXCLUDED.allergies,
                emergency_contact_name = EXCLUDED.emergency_contact_name,
                emergency_contact_phone = EXCLUDED.emergency_contact_phone,
                updated_at = NOW()
             RETURNING *",
        )
        .bind(&data.user_id)
        .bind(&data.full_name)
        .bind(&data.blood_group)
        .bind(&data.allergies)
        .bind(contact_name)
        .bind(contact_phone)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save profile", e))?;

        Ok(row.into())
    }
}
