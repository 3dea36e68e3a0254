use lettre::{
    message::{header, Mailbox},
    transport::smtp::{authentication::Credentials, response::Response},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use mailform_email_contracts::{ContentType, Email, EmailSendError, EmailService};
use mailform_models::{delivery::DeliveryReceipt, email_address::EmailAddress};
use tracing::error;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    from: EmailAddress,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailServiceImpl {
    pub async fn new(
        url: &str,
        credentials: Option<(String, String)>,
        from: EmailAddress,
    ) -> anyhow::Result<Self> {
        let mut transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)?;
        if let Some((username, password)) = credentials {
            transport = transport.credentials(Credentials::new(username, password));
        }

        Ok(Self {
            from,
            transport: transport.build(),
        })
    }

    /// Builds the wire message along with its generated Message-ID.
    fn build_message(&self, email: Email) -> anyhow::Result<(Message, String)> {
        let message_id = format!("<{}@{}>", Uuid::new_v4(), self.from.domain());

        let mut builder = Message::builder()
            .from(Mailbox::new(email.sender_name, self.from.0.clone()))
            .subject(email.subject)
            .message_id(Some(message_id.clone()))
            .header(match email.content_type {
                ContentType::Text => header::ContentType::TEXT_PLAIN,
                ContentType::Html => header::ContentType::TEXT_HTML,
            });
        for recipient in email.recipients {
            builder = builder.to(Mailbox::new(None, recipient.0));
        }
        if let Some(reply_to) = email.reply_to {
            builder = builder.reply_to(Mailbox::new(None, reply_to.0));
        }

        let message = builder.body(email.body)?;
        Ok((message, message_id))
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> Result<DeliveryReceipt, EmailSendError> {
        let (message, message_id) = self.build_message(email).map_err(EmailSendError::Other)?;

        match self.transport.send(message).await {
            Ok(response) if response.is_positive() => Ok(DeliveryReceipt {
                message_id,
                response: format_response(&response),
            }),
            Ok(response) => {
                let detail = format_response(&response);
                error!("Mail provider rejected the message: {detail}");
                Err(EmailSendError::Transport(detail))
            }
            Err(err) => {
                error!("Failed to send email: {err}");
                Err(EmailSendError::Transport(err.to_string()))
            }
        }
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow::anyhow!("Failed to ping smtp server"))
    }
}

fn format_response(response: &Response) -> String {
    let mut out = response.code().to_string();
    for line in response.message() {
        out.push(' ');
        out.push_str(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn service() -> EmailServiceImpl {
        EmailServiceImpl::new(
            "smtp://localhost:25",
            None,
            "contact@example.com".parse().unwrap(),
        )
        .await
        .unwrap()
    }

    fn email() -> Email {
        Email {
            recipients: vec!["admin@example.com".parse().unwrap()],
            sender_name: Some("Alice".into()),
            reply_to: Some("alice@example.com".parse().unwrap()),
            subject: "Hi".into(),
            body: "Hello there Email: alice@example.com".into(),
            content_type: ContentType::Text,
        }
    }

    #[tokio::test]
    async fn message_id_is_angle_bracketed() {
        let (_, message_id) = service().await.build_message(email()).unwrap();
        assert!(message_id.starts_with('<'));
        assert!(message_id.ends_with("@example.com>"));
    }

    #[tokio::test]
    async fn message_ids_are_unique() {
        let service = service().await;
        let (_, first) = service.build_message(email()).unwrap();
        let (_, second) = service.build_message(email()).unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn message_carries_submission_fields() {
        let (message, message_id) = service().await.build_message(email()).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: Hi"));
        assert!(raw.contains("Alice"));
        assert!(raw.contains("contact@example.com"));
        assert!(raw.contains("admin@example.com"));
        assert!(raw.contains("Reply-To: "));
        assert!(raw.contains("Hello there Email: alice@example.com"));
        assert!(raw.contains(&message_id));
    }

    #[tokio::test]
    async fn message_fans_out_to_all_recipients() {
        let mut email = email();
        email.recipients = vec![
            "admin@example.com".parse().unwrap(),
            "backup@example.com".parse().unwrap(),
        ];
        let (message, _) = service().await.build_message(email).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("admin@example.com"));
        assert!(raw.contains("backup@example.com"));
    }
}
