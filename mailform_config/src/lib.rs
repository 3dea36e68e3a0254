use std::{net::IpAddr, path::Path};

use anyhow::Context;
use config::{builder::DefaultState, ConfigBuilder, File, FileFormat};
use mailform_models::{email_address::EmailAddress, Sensitive};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

pub const DEFAULT_PORT: u16 = 8000;

/// Load and merge the given config files in order, then apply environment
/// variable overrides (`USER_EMAIL`, `USER_PASSWORD`, `TO_EMAILS`, `PORT`).
pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    apply_env_overrides(builder, |name| std::env::var(name).ok())?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

fn apply_env_overrides(
    mut builder: ConfigBuilder<DefaultState>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<ConfigBuilder<DefaultState>> {
    if let Some(username) = env("USER_EMAIL") {
        builder = builder.set_override("email.username", username)?;
    }
    if let Some(password) = env("USER_PASSWORD") {
        builder = builder.set_override("email.password", password)?;
    }
    if let Some(recipients) = env("TO_EMAILS") {
        let recipients = recipients
            .split(',')
            .map(|recipient| recipient.trim().to_owned())
            .filter(|recipient| !recipient.is_empty())
            .collect::<Vec<_>>();
        builder = builder.set_override("contact.recipients", recipients)?;
    }
    if let Some(port) = env("PORT") {
        let port = port
            .parse::<u16>()
            .with_context(|| format!("Failed to parse PORT value {port:?}"))?;
        builder = builder.set_override("http.port", i64::from(port))?;
    }
    Ok(builder)
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub smtp_url: String,
    pub username: Option<String>,
    pub password: Option<Sensitive<String>>,
    pub from: EmailAddress,
}

impl EmailConfig {
    /// The SMTP account to authenticate as, if one is configured. A missing
    /// half is treated as no credentials at all; the dispatcher surfaces the
    /// resulting rejection on the first send.
    pub fn credentials(&self) -> Option<(String, String)> {
        let username = self.username.clone()?;
        let password = self.password.clone()?;
        Some((username, password.0))
    }
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub recipients: Vec<EmailAddress>,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_CONFIG: &str = r#"
        [http]
        host = "0.0.0.0"

        [email]
        smtp_url = "smtp://localhost:25"
        from = "contact@example.com"

        [contact]
        recipients = ["admin@example.com"]
    "#;

    fn base_builder() -> ConfigBuilder<DefaultState> {
        config::Config::builder().add_source(File::from_str(BASE_CONFIG, FileFormat::Toml))
    }

    fn deserialize(builder: ConfigBuilder<DefaultState>) -> Config {
        builder.build().unwrap().try_deserialize().unwrap()
    }

    #[test]
    fn load_default_config() {
        load(&[Path::new(DEFAULT_CONFIG_PATH)]).unwrap();
    }

    #[test]
    fn port_defaults_when_unset() {
        let config = deserialize(base_builder());
        assert_eq!(config.http.port, DEFAULT_PORT);
    }

    #[test]
    fn no_overrides_without_env() {
        let builder = apply_env_overrides(base_builder(), |_| None).unwrap();
        let config = deserialize(builder);
        assert_eq!(config.http.port, DEFAULT_PORT);
        assert_eq!(config.email.credentials(), None);
        assert_eq!(
            config.contact.recipients,
            vec!["admin@example.com".parse::<EmailAddress>().unwrap()]
        );
    }

    #[test]
    fn env_overrides() {
        let builder = apply_env_overrides(base_builder(), |name| match name {
            "USER_EMAIL" => Some("relay@example.com".into()),
            "USER_PASSWORD" => Some("hunter2".into()),
            "TO_EMAILS" => Some("a@example.com, b@example.com".into()),
            "PORT" => Some("9000".into()),
            _ => None,
        })
        .unwrap();
        let config = deserialize(builder);
        assert_eq!(config.http.port, 9000);
        assert_eq!(
            config.email.credentials(),
            Some(("relay@example.com".into(), "hunter2".into()))
        );
        assert_eq!(
            config.contact.recipients,
            vec![
                "a@example.com".parse::<EmailAddress>().unwrap(),
                "b@example.com".parse::<EmailAddress>().unwrap(),
            ]
        );
    }

    #[test]
    fn invalid_port_is_rejected() {
        let result = apply_env_overrides(base_builder(), |name| {
            (name == "PORT").then(|| "contact".into())
        });
        assert!(result.is_err());
    }
}
