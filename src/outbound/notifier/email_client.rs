use crate::configuration::EmailClientSettings;
use crate::domain::email::{EmailMessage, Mailer, MailerError};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

/// Mail transport backed by a Postmark-compatible HTTP API.
#[derive(Debug, Clone)]
pub struct EmailClient {
    http_client: Client,
    base_url: String,
    authorization_token: Secret<String>,
}

impl EmailClient {
    pub fn new(configuration: EmailClientSettings) -> Result<Self, anyhow::Error> {
        let timeout = configuration.timeout();

        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build the email HTTP client")?;
        Ok(Self {
            http_client,
            base_url: configuration.base_url,
            authorization_token: configuration.authorization_token,
        })
    }

    async fn send_request<'a>(
        &'a self,
        email_request_body: SendEmailRequest<'a>,
    ) -> Result<(), anyhow::Error> {
        let url = format!("{}/email", self.base_url);
        self.http_client
            .post(&url)
            .header(
                "X-Postmark-Server-Token",
                self.authorization_token.expose_secret(),
            )
            .json(&email_request_body)
            .send()
            .await
            .context("Failed to reach the email API")?
            .error_for_status()
            .context("The email API rejected the message")?;

        Ok(())
    }
}

#[async_trait]
impl Mailer for EmailClient {
    #[tracing::instrument(
        name = "Send email",
        skip(self, message),
        fields(recipient = %message.to(), subject = %message.subject_as_ref().as_ref())
    )]
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        let request_body = SendEmailRequest {
            from: message.from().as_ref(),
            to: message.to().as_ref(),
            subject: message.subject_as_ref().as_ref(),
            html_body: message.html_as_ref().as_ref(),
        };
        self.send_request(request_body)
            .await
            .map_err(MailerError::Unexpected)
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
}
