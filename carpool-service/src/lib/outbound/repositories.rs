use crate::domain::errors::AppError;

pub mod credential;
pub mod profile;

pub use credential::PostgresCredentialRepository;
pub use profile::PostgresProfileRepository;

fn database_error(e: sqlx::Error) -> AppError {
    AppError::internal(format!("Database error: {}", e))
}
