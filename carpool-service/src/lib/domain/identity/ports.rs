use async_trait::async_trait;
use auth::Role;

use crate::domain::errors::AppError;
use crate::domain::identity::errors::NotifierError;
use crate::domain::identity::models::AuthSession;
use crate::domain::identity::models::Credential;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::LoginCommand;
use crate::domain::identity::models::NewCredential;
use crate::domain::identity::models::NewProfile;
use crate::domain::identity::models::Profile;
use crate::domain::identity::models::ProfileId;
use crate::domain::identity::models::RegisterCommand;

/// Port for identity use cases.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account and issue its first token.
    ///
    /// # Arguments
    /// * `command` - Validated email, plaintext password and profile fields
    ///
    /// # Returns
    /// Profile id of the new identity and a signed token
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Email is already registered
    /// * `Internal` - Hashing, storage or signing failed
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AppError>;

    /// Authenticate with email and password.
    ///
    /// # Arguments
    /// * `command` - Email and plaintext password
    ///
    /// # Returns
    /// Profile id of the identity and a signed token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email, wrong password or broken profile link
    /// * `Internal` - Stored digest is corrupt, storage or signing failed
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AppError>;

    /// Change the role of the credential linked to a profile.
    ///
    /// # Arguments
    /// * `profile_id` - Public identity whose credential is updated
    /// * `role` - New role
    ///
    /// # Errors
    /// * `UserNotFound` - No profile with this id
    /// * `Internal` - Storage failed
    async fn change_role(&self, profile_id: &ProfileId, role: Role) -> Result<(), AppError>;
}

/// Persistence operations for credentials.
#[async_trait]
pub trait CredentialRepository: Send + Sync + 'static {
    /// Retrieve credential by email address.
    ///
    /// # Returns
    /// Optional credential (None if not found)
    ///
    /// # Errors
    /// * `Internal` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Credential>, AppError>;

    /// Check whether a credential with this email exists.
    ///
    /// # Errors
    /// * `Internal` - Database operation failed
    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, AppError>;

    /// Persist a credential and its linked profile. Both are stored or neither is.
    ///
    /// # Arguments
    /// * `credential` - Credential fields with the already hashed password
    /// * `profile` - Profile fields linked to the new credential
    ///
    /// # Returns
    /// Stored credential and profile
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Email was taken by a concurrent registration
    /// * `Internal` - Database operation failed
    async fn create_with_profile(
        &self,
        credential: NewCredential,
        profile: NewProfile,
    ) -> Result<(Credential, Profile), AppError>;

    /// Set the role of the credential with this reference id.
    ///
    /// # Errors
    /// * `UserNotFound` - No credential with this reference id
    /// * `Internal` - Database operation failed
    async fn update_role(&self, ref_id: i64, role: Role) -> Result<(), AppError>;
}

/// Persistence operations for profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync + 'static {
    /// Retrieve the profile linked to a credential reference id.
    ///
    /// # Errors
    /// * `Internal` - Database operation failed
    async fn find_by_credential_ref_id(&self, ref_id: i64) -> Result<Option<Profile>, AppError>;

    /// Retrieve profile by identifier.
    ///
    /// # Errors
    /// * `Internal` - Database operation failed
    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, AppError>;
}

/// Best-effort delivery of welcome messages.
#[async_trait]
pub trait WelcomeNotifier: Send + Sync + 'static {
    /// Send a welcome message.
    ///
    /// # Arguments
    /// * `to` - Recipient address
    /// * `display_name` - Name used in the greeting
    ///
    /// # Errors
    /// * `ConnectionFailed` - Provider could not be reached
    /// * `Rejected` - Provider refused the message
    async fn send_welcome(&self, to: &EmailAddress, display_name: &str)
        -> Result<(), NotifierError>;
}
