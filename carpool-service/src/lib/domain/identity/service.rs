use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordError;
use auth::PasswordHasher;
use auth::Role;
use auth::TokenIdentity;
use auth::TokenService;

use crate::domain::errors::AppError;
use crate::domain::identity::models::AuthSession;
use crate::domain::identity::models::Credential;
use crate::domain::identity::models::LoginCommand;
use crate::domain::identity::models::NewCredential;
use crate::domain::identity::models::Profile;
use crate::domain::identity::models::ProfileId;
use crate::domain::identity::models::RegisterCommand;
use crate::domain::identity::ports::AuthServicePort;
use crate::domain::identity::ports::CredentialRepository;
use crate::domain::identity::ports::ProfileRepository;
use crate::domain::identity::ports::WelcomeNotifier;

const DECOY_PASSWORD: &str = "decoy-password-never-matched";

/// Domain service implementation for registration, login and role changes.
///
/// Hashing and verification are CPU and memory heavy, so they run on the blocking pool
/// instead of the async workers.
pub struct AuthService<CR, PR, N>
where
    CR: CredentialRepository,
    PR: ProfileRepository,
    N: WelcomeNotifier,
{
    credentials: Arc<CR>,
    profiles: Arc<PR>,
    notifier: Arc<N>,
    password_hasher: Arc<PasswordHasher>,
    tokens: Arc<TokenService>,
    decoy_digest: Option<String>,
}

impl<CR, PR, N> AuthService<CR, PR, N>
where
    CR: CredentialRepository,
    PR: ProfileRepository,
    N: WelcomeNotifier,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `credentials` - Credential store
    /// * `profiles` - Profile store
    /// * `notifier` - Best-effort welcome notifier
    /// * `password_hasher` - Configured Argon2id hasher
    /// * `tokens` - Token signer shared with the HTTP middleware
    pub fn new(
        credentials: Arc<CR>,
        profiles: Arc<PR>,
        notifier: Arc<N>,
        password_hasher: Arc<PasswordHasher>,
        tokens: Arc<TokenService>,
    ) -> Self {
        // Verified against on unknown e-mails so they cost as much as a wrong password.
        let decoy_digest = password_hasher
            .hash(DECOY_PASSWORD)
            .map_err(|e| tracing::warn!("Failed to prepare decoy password digest: {}", e))
            .ok();

        Self {
            credentials,
            profiles,
            notifier,
            password_hasher,
            tokens,
            decoy_digest,
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, AppError> {
        let hasher = Arc::clone(&self.password_hasher);

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::internal(format!("Hashing task failed: {}", e)))?
            .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))
    }

    async fn verify_password(&self, password: String, digest: String) -> Result<bool, AppError> {
        let hasher = Arc::clone(&self.password_hasher);

        let outcome = tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| AppError::internal(format!("Verification task failed: {}", e)))?;

        match outcome {
            Ok(matches) => Ok(matches),
            Err(PasswordError::InvalidFormat(reason)) => Err(AppError::internal(format!(
                "Stored password digest is corrupt: {}",
                reason
            ))),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {}",
                e
            ))),
        }
    }

    fn issue_session(
        &self,
        credential: &Credential,
        profile: &Profile,
    ) -> Result<AuthSession, AppError> {
        let token = self
            .tokens
            .sign(&TokenIdentity::new(profile.id, credential.role.as_str()))
            .map_err(|e| AppError::internal(format!("Token signing failed: {}", e)))?;

        Ok(AuthSession {
            identity_id: profile.id,
            token,
        })
    }
}

#[async_trait]
impl<CR, PR, N> AuthServicePort for AuthService<CR, PR, N>
where
    CR: CredentialRepository,
    PR: ProfileRepository,
    N: WelcomeNotifier,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AppError> {
        if self.credentials.exists_by_email(&command.email).await? {
            return Err(AppError::user_already_exists(command.email.as_str()));
        }

        let password_hash = self.hash_password(command.password).await?;

        let (credential, profile) = self
            .credentials
            .create_with_profile(
                NewCredential {
                    email: command.email,
                    password_hash,
                    role: Role::User,
                },
                command.profile,
            )
            .await?;

        tracing::info!(identity_id = %profile.id, "Registered new identity");

        if let Err(e) = self
            .notifier
            .send_welcome(&credential.email, profile.display_name())
            .await
        {
            tracing::warn!(
                "Failed to send welcome message for identity {}: {}",
                profile.id,
                e
            );
        }

        self.issue_session(&credential, &profile)
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AppError> {
        let Some(credential) = self.credentials.find_by_email(&command.email).await? else {
            if let Some(digest) = &self.decoy_digest {
                let _ = self.verify_password(command.password, digest.clone()).await;
            }
            return Err(AppError::invalid_credentials());
        };

        let matches = self
            .verify_password(command.password, credential.password_hash.clone())
            .await?;
        if !matches {
            return Err(AppError::invalid_credentials());
        }

        let Some(profile) = self
            .profiles
            .find_by_credential_ref_id(credential.ref_id)
            .await?
        else {
            tracing::warn!(
                credential_ref_id = credential.ref_id,
                "Credential has no linked profile"
            );
            return Err(AppError::invalid_credentials());
        };

        self.issue_session(&credential, &profile)
    }

    async fn change_role(&self, profile_id: &ProfileId, role: Role) -> Result<(), AppError> {
        let profile = self
            .profiles
            .find_by_id(profile_id)
            .await?
            .ok_or_else(|| AppError::user_not_found(profile_id))?;

        self.credentials
            .update_role(profile.credential_ref_id, role)
            .await?;

        tracing::info!(identity_id = %profile_id, role = %role, "Changed identity role");

        Ok(())
    }
}
