use clap::Subcommand;
use mailform_config::Config;
use mailform_email_contracts::{ContentType, Email, EmailService};
use mailform_models::email_address::EmailAddress;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailAddress },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddress) -> anyhow::Result<()> {
    let email_service = email::connect(&config.email).await?;

    let receipt = email_service
        .send(Email {
            recipients: vec![recipient],
            sender_name: None,
            reply_to: None,
            subject: "Email Deliverability Test".into(),
            body: "Email deliverability seems to be working!".into(),
            content_type: ContentType::Text,
        })
        .await?;

    println!("{} {}", receipt.message_id, receipt.response);

    Ok(())
}
