use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Public settings, read from `config.toml` at the workspace root.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub media: MediaConfig,
    pub mail: MailConfig,
    pub blog: BlogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    pub bucket: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    pub base_url: String,
    pub from: String,
    pub recipient: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlogConfig {
    /// Username of the account that authors anonymous submissions.
    pub fallback_author: String,
}

/// Credentials, read from `Secrets.toml` at the workspace root. Never logged.
#[derive(Debug, Clone, Deserialize)]
pub struct Secrets {
    pub database_url: String,
    pub mail_api_key: String,
}

pub fn workspace_dir() -> PathBuf {
    let output = std::process::Command::new(env!("CARGO"))
        .arg("locate-project")
        .arg("--workspace")
        .arg("--message-format=plain")
        .output()
        .unwrap()
        .stdout;
    let cargo_path = Path::new(std::str::from_utf8(&output).unwrap().trim());
    cargo_path.parent().unwrap().to_path_buf()
}

pub fn load_config(config_name: &str) -> anyhow::Result<Config> {
    let path = workspace_dir().join(config_name);
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    toml::from_str::<Config>(&raw).context("failed to parse config")
}

pub fn load_secrets() -> anyhow::Result<Secrets> {
    let raw = std::fs::read_to_string(workspace_dir().join("Secrets.toml"))
        .context("failed to read Secrets.toml")?;

    toml::from_str::<Secrets>(&raw).context("failed to parse Secrets.toml")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_config() {
        // Arrange
        let raw = r#"
            [server]
            host = "127.0.0.1"
            port = 8000

            [media]
            bucket = "blog-media"
            base_url = "https://media.example.com"

            [mail]
            base_url = "https://api.mailgun.net/v3/example.com"
            from = "noreply@example.com"
            recipient = "owner@example.com"

            [blog]
            fallback_author = "admin"
        "#;

        // Act
        let config = toml::from_str::<Config>(raw);

        // Assert
        let config = config.unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.blog.fallback_author, "admin");
    }

    #[test]
    fn test_parse_secrets() {
        let raw = r#"
            database_url = "postgres://localhost/blog"
            mail_api_key = "key"
        "#;

        let secrets = toml::from_str::<Secrets>(raw).unwrap();

        assert_eq!(secrets.database_url, "postgres://localhost/blog");
    }
}
