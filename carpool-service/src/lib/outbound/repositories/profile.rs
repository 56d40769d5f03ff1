use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::database_error;
use crate::domain::errors::AppError;
use crate::domain::identity::models::Profile;
use crate::domain::identity::models::ProfileId;
use crate::domain::identity::ports::ProfileRepository;

#[derive(Debug, sqlx::FromRow)]
pub(super) struct ProfileRow {
    id: Uuid,
    ref_id: i64,
    credential_ref_id: i64,
    first_name: String,
    last_name: String,
    phone: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: ProfileId(row.id),
            ref_id: row.ref_id,
            credential_ref_id: row.credential_ref_id,
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn find_by_credential_ref_id(&self, ref_id: i64) -> Result<Option<Profile>, AppError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, ref_id, credential_ref_id, first_name, last_name, phone, created_at, updated_at
            FROM profiles
            WHERE credential_ref_id = $1
            "#,
        )
        .bind(ref_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(Profile::from))
    }

    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, AppError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, ref_id, credential_ref_id, first_name, last_name, phone, created_at, updated_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(Profile::from))
    }
}
