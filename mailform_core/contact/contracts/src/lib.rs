use std::future::Future;

use mailform_models::{contact::ContactMessage, delivery::DeliveryReceipt};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactService: Send + Sync + 'static {
    /// Relay a validated submission to the configured recipients.
    fn send_message(
        &self,
        message: ContactMessage,
    ) -> impl Future<Output = Result<DeliveryReceipt, ContactSendMessageError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    /// The mail provider rejected or failed to deliver the message. Carries
    /// the provider-reported detail verbatim.
    #[error("Failed to send message: {0}")]
    Send(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactService {
    pub fn with_send_message(mut self, message: ContactMessage, receipt: DeliveryReceipt) -> Self {
        self.expect_send_message()
            .once()
            .with(mockall::predicate::eq(message))
            .return_once(move |_| Box::pin(std::future::ready(Ok(receipt))));
        self
    }

    pub fn with_send_message_error(mut self, message: ContactMessage, detail: String) -> Self {
        self.expect_send_message()
            .once()
            .with(mockall::predicate::eq(message))
            .return_once(move |_| {
                Box::pin(std::future::ready(Err(ContactSendMessageError::Send(
                    detail,
                ))))
            });
        self
    }
}
