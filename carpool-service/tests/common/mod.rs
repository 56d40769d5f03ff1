use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::HashingParams;
use auth::PasswordHasher;
use auth::Role;
use auth::TokenIdentity;
use auth::TokenLifetime;
use auth::TokenService;
use carpool_service::domain::errors::AppError;
use carpool_service::domain::identity::errors::NotifierError;
use carpool_service::domain::identity::models::Credential;
use carpool_service::domain::identity::models::CredentialId;
use carpool_service::domain::identity::models::EmailAddress;
use carpool_service::domain::identity::models::NewCredential;
use carpool_service::domain::identity::models::NewProfile;
use carpool_service::domain::identity::models::Profile;
use carpool_service::domain::identity::models::ProfileId;
use carpool_service::domain::identity::ports::CredentialRepository;
use carpool_service::domain::identity::ports::ProfileRepository;
use carpool_service::domain::identity::ports::WelcomeNotifier;
use carpool_service::domain::identity::service::AuthService;
use carpool_service::inbound::http::router::create_router;
use chrono::Utc;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory adapters
pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub tokens: TokenService,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with_notifier(RecordingNotifier::default()).await
    }

    pub async fn spawn_with_notifier(notifier: RecordingNotifier) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryStore::default());
        let notifier = Arc::new(notifier);

        // Cheap parameters keep the suite fast; the digest format is unchanged.
        let password_hasher = Arc::new(
            PasswordHasher::new(HashingParams {
                memory_cost: 1024,
                time_cost: 1,
                parallelism: 1,
            })
            .expect("Failed to build password hasher"),
        );
        let tokens = Arc::new(TokenService::new(TEST_SECRET, TokenLifetime::default()));

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&notifier),
            password_hasher,
            Arc::clone(&tokens),
        ));

        let router = create_router(auth_service, tokens);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            store,
            notifier,
            tokens: TokenService::new(TEST_SECRET, TokenLifetime::default()),
            api_client: reqwest::Client::new(),
        }
    }

    /// Mint a token for an arbitrary identity, signed with the server's secret
    pub fn token_for(&self, subject: &str, role: Role) -> String {
        self.tokens
            .sign(&TokenIdentity::new(subject, role.as_str()))
            .expect("Failed to sign token")
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }
}

#[derive(Default)]
struct Tables {
    credentials: Vec<Credential>,
    profiles: Vec<Profile>,
    next_ref_id: i64,
}

/// Credential and profile store sharing one lock, so paired inserts are atomic
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn credential_count(&self) -> usize {
        self.tables.lock().unwrap().credentials.len()
    }

    pub fn role_of(&self, email: &str) -> Option<Role> {
        self.tables
            .lock()
            .unwrap()
            .credentials
            .iter()
            .find(|c| c.email.as_str() == email)
            .map(|c| c.role)
    }
}

#[async_trait]
impl CredentialRepository for InMemoryStore {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Credential>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .credentials
            .iter()
            .find(|c| &c.email == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.credentials.iter().any(|c| &c.email == email))
    }

    async fn create_with_profile(
        &self,
        credential: NewCredential,
        profile: NewProfile,
    ) -> Result<(Credential, Profile), AppError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.credentials.iter().any(|c| c.email == credential.email) {
            return Err(AppError::user_already_exists(credential.email.as_str()));
        }

        let now = Utc::now();
        tables.next_ref_id += 1;
        let credential = Credential {
            id: CredentialId::new(),
            ref_id: tables.next_ref_id,
            email: credential.email,
            password_hash: credential.password_hash,
            role: credential.role,
            anonymized_at: None,
            created_at: now,
            updated_at: now,
        };

        tables.next_ref_id += 1;
        let profile = Profile {
            id: ProfileId::new(),
            ref_id: tables.next_ref_id,
            credential_ref_id: credential.ref_id,
            first_name: profile.first_name,
            last_name: profile.last_name,
            phone: profile.phone,
            created_at: now,
            updated_at: now,
        };

        tables.credentials.push(credential.clone());
        tables.profiles.push(profile.clone());
        Ok((credential, profile))
    }

    async fn update_role(&self, ref_id: i64, role: Role) -> Result<(), AppError> {
        let mut tables = self.tables.lock().unwrap();
        let credential = tables
            .credentials
            .iter_mut()
            .find(|c| c.ref_id == ref_id)
            .ok_or_else(|| AppError::user_not_found(ref_id))?;
        credential.role = role;
        credential.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn find_by_credential_ref_id(&self, ref_id: i64) -> Result<Option<Profile>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .profiles
            .iter()
            .find(|p| p.credential_ref_id == ref_id)
            .cloned())
    }

    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.profiles.iter().find(|p| &p.id == id).cloned())
    }
}

/// Notifier that records recipients and can be told to fail
#[derive(Default)]
pub struct RecordingNotifier {
    pub fail: bool,
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl WelcomeNotifier for RecordingNotifier {
    async fn send_welcome(
        &self,
        to: &EmailAddress,
        display_name: &str,
    ) -> Result<(), NotifierError> {
        if self.fail {
            return Err(NotifierError::ConnectionFailed("provider unreachable".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.as_str().to_string(), display_name.to_string()));
        Ok(())
    }
}
