use anyhow::Context;
use mailform_config::EmailConfig;
use mailform_email_impl::EmailServiceImpl;

/// Connect to the SMTP server
pub async fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    EmailServiceImpl::new(&config.smtp_url, config.credentials(), config.from.clone())
        .await
        .context("Failed to connect to SMTP server")
}
