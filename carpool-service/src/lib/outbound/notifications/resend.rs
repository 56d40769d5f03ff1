use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::NotifierConfig;
use crate::domain::identity::errors::NotifierError;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::ports::WelcomeNotifier;

const WELCOME_SUBJECT: &str = "Welcome to Carpooling!";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: String,
}

/// Sends welcome e-mails through the Resend HTTP API.
pub struct ResendNotifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    from_email: String,
}

impl ResendNotifier {
    pub fn new(
        api_key: String,
        from_email: String,
        api_url: &str,
    ) -> Result<Self, NotifierError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| NotifierError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/emails", api_url.trim_end_matches('/')),
            api_key,
            from_email,
        })
    }

    /// Build a notifier when an API key is configured.
    pub fn from_config(config: &NotifierConfig) -> Result<Option<Self>, NotifierError> {
        match config.resend_api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Self::new(
                key.to_string(),
                config.from_email.clone(),
                &config.api_url,
            )
            .map(Some),
            _ => Ok(None),
        }
    }
}

fn welcome_html(display_name: &str) -> String {
    format!(
        "<h1>Welcome, {}!</h1>\
         <p>Thank you for joining our carpooling platform.</p>\
         <p>Start exploring rides and save money while reducing your carbon footprint!</p>",
        escape_html(display_name)
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[async_trait]
impl WelcomeNotifier for ResendNotifier {
    async fn send_welcome(
        &self,
        to: &EmailAddress,
        display_name: &str,
    ) -> Result<(), NotifierError> {
        let request = SendEmailRequest {
            from: &self.from_email,
            to: [to.as_str()],
            subject: WELCOME_SUBJECT,
            html: welcome_html(display_name),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| NotifierError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifierError::Rejected(format!("{}: {}", status, body)));
        }

        tracing::debug!(to = %to, "Welcome message sent");
        Ok(())
    }
}
