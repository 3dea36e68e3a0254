use std::future::Future;

use mailform_models::{delivery::DeliveryReceipt, email_address::EmailAddress};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailService: Send + Sync + 'static {
    /// Hand the email to the mail provider. On success the provider-assigned
    /// delivery metadata is returned; provider failures are passed through
    /// unmodified as [`EmailSendError::Transport`].
    fn send(
        &self,
        email: Email,
    ) -> impl Future<Output = Result<DeliveryReceipt, EmailSendError>> + Send;

    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[derive(Debug, Error)]
pub enum EmailSendError {
    #[error("{0}")]
    Transport(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub recipients: Vec<EmailAddress>,
    /// Display name paired with the transport's fixed sender address.
    pub sender_name: Option<String>,
    pub reply_to: Option<EmailAddress>,
    pub subject: String,
    pub body: String,
    pub content_type: ContentType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Text,
    Html,
}

#[cfg(feature = "mock")]
impl MockEmailService {
    pub fn with_send(mut self, email: Email, receipt: DeliveryReceipt) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(Ok(receipt))));
        self
    }

    pub fn with_send_error(mut self, email: Email, detail: String) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| {
                Box::pin(std::future::ready(Err(EmailSendError::Transport(detail))))
            });
        self
    }

    pub fn with_ping(mut self, result: anyhow::Result<()>) -> Self {
        self.expect_ping()
            .once()
            .return_once(move || Box::pin(std::future::ready(result)));
        self
    }
}
