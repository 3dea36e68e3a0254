use std::sync::Arc;

use mailform_core_contact_contracts::{ContactSendMessageError, ContactService};
use mailform_email_contracts::{ContentType, Email, EmailSendError, EmailService};
use mailform_models::{
    contact::ContactMessage, delivery::DeliveryReceipt, email_address::EmailAddress,
};

#[derive(Debug, Clone)]
pub struct ContactServiceImpl<Email> {
    email: Email,
    config: ContactServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    pub recipients: Arc<[EmailAddress]>,
}

impl<Email> ContactServiceImpl<Email> {
    pub fn new(email: Email, config: ContactServiceConfig) -> Self {
        Self { email, config }
    }
}

impl<EmailS> ContactService for ContactServiceImpl<EmailS>
where
    EmailS: EmailService,
{
    async fn send_message(
        &self,
        message: ContactMessage,
    ) -> Result<DeliveryReceipt, ContactSendMessageError> {
        let email = Email {
            recipients: self.config.recipients.to_vec(),
            sender_name: Some(message.author.name.into_inner()),
            reply_to: Some(message.author.email.clone()),
            subject: message.subject.into_inner(),
            body: format!(
                "{} Email: {}",
                *message.content,
                message.author.email.as_str()
            ),
            content_type: ContentType::Text,
        };

        self.email.send(email).await.map_err(|err| match err {
            EmailSendError::Transport(detail) => ContactSendMessageError::Send(detail),
            EmailSendError::Other(err) => ContactSendMessageError::Other(err),
        })
    }
}
