use async_trait::async_trait;
use auth::Role;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::database_error;
use super::profile::ProfileRow;
use crate::domain::errors::AppError;
use crate::domain::identity::models::Credential;
use crate::domain::identity::models::CredentialId;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::NewCredential;
use crate::domain::identity::models::NewProfile;
use crate::domain::identity::models::Profile;
use crate::domain::identity::models::ProfileId;
use crate::domain::identity::ports::CredentialRepository;

const EMAIL_UNIQUE_CONSTRAINT: &str = "credentials_email_key";

#[derive(Debug, sqlx::FromRow)]
struct CredentialRow {
    id: Uuid,
    ref_id: i64,
    email: String,
    password_hash: String,
    role: String,
    anonymized_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CredentialRow> for Credential {
    type Error = AppError;

    fn try_from(row: CredentialRow) -> Result<Self, Self::Error> {
        let email = EmailAddress::new(row.email)
            .map_err(|e| AppError::internal(format!("Stored email is invalid: {}", e)))?;
        let role = row
            .role
            .parse::<Role>()
            .map_err(|e| AppError::internal(format!("Stored role is invalid: {}", e)))?;

        Ok(Credential {
            id: CredentialId(row.id),
            ref_id: row.ref_id,
            email,
            password_hash: row.password_hash,
            role,
            anonymized_at: row.anonymized_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub struct PostgresCredentialRepository {
    pool: PgPool,
}

impl PostgresCredentialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialRepository for PostgresCredentialRepository {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Credential>, AppError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT id, ref_id, email, password_hash, role, anonymized_at, created_at, updated_at
            FROM credentials
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Credential::try_from).transpose()
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, AppError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM credentials WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(database_error)?;

        Ok(exists)
    }

    async fn create_with_profile(
        &self,
        credential: NewCredential,
        profile: NewProfile,
    ) -> Result<(Credential, Profile), AppError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let credential_row = sqlx::query_as::<_, CredentialRow>(
            r#"
            INSERT INTO credentials (id, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, ref_id, email, password_hash, role, anonymized_at, created_at, updated_at
            "#,
        )
        .bind(CredentialId::new().0)
        .bind(credential.email.as_str())
        .bind(&credential.password_hash)
        .bind(credential.role.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
                {
                    return AppError::user_already_exists(credential.email.as_str());
                }
            }
            database_error(e)
        })?;

        let profile_row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO profiles (id, credential_ref_id, first_name, last_name, phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, ref_id, credential_ref_id, first_name, last_name, phone, created_at, updated_at
            "#,
        )
        .bind(ProfileId::new().0)
        .bind(credential_row.ref_id)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.phone)
        .fetch_one(&mut *tx)
        .await
        .map_err(database_error)?;

        // Dropping the transaction before this point rolls both inserts back.
        tx.commit().await.map_err(database_error)?;

        Ok((
            Credential::try_from(credential_row)?,
            Profile::from(profile_row),
        ))
    }

    async fn update_role(&self, ref_id: i64, role: Role) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE credentials
            SET role = $2, updated_at = NOW()
            WHERE ref_id = $1
            "#,
        )
        .bind(ref_id)
        .bind(role.as_str())
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::user_not_found(ref_id));
        }

        Ok(())
    }
}
