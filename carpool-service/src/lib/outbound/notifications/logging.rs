use async_trait::async_trait;

use crate::domain::identity::errors::NotifierError;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::ports::WelcomeNotifier;

/// Notifier used when no provider is configured. Records the message and succeeds.
#[derive(Debug, Default, Clone)]
pub struct LoggingNotifier;

#[async_trait]
impl WelcomeNotifier for LoggingNotifier {
    async fn send_welcome(
        &self,
        to: &EmailAddress,
        display_name: &str,
    ) -> Result<(), NotifierError> {
        tracing::info!(to = %to, display_name, "Welcome message not sent: no provider configured");
        Ok(())
    }
}
