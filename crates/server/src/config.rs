use clap::Parser;
use lds_auth::Crypto;
use lds_mail::Mailer;
use lds_mail::Mailgun;
use lds_mail::Outbox;
use lds_mail::Postman;
use std::sync::Arc;

/// Server settings. Every flag can also be set through its environment variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "lodestar", about = "Multiplayer game backend")]
pub struct Config {
    /// Address the HTTP server listens on.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:3000")]
    pub bind: String,
    /// PostgreSQL connection string. Without it the server keeps everything in memory.
    #[arg(long, env = "DB_URL", hide_env_values = true)]
    pub db_url: Option<String>,
    /// Secret for access tokens.
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,
    /// Secret for refresh tokens.
    #[arg(long, env = "JWT_REFRESH_SECRET", hide_env_values = true)]
    pub jwt_refresh_secret: String,
    /// Mailgun API key.
    #[arg(long, env = "MAILGUN_API", hide_env_values = true)]
    pub mailgun_api: Option<String>,
    /// Mailgun sending domain.
    #[arg(long, env = "MAILGUN_DOMAIN")]
    pub mailgun_domain: Option<String>,
    /// Mailgun API host.
    #[arg(long, env = "MAILGUN_HOST", default_value = "api.eu.mailgun.net")]
    pub mailgun_host: String,
    /// Sender address of account emails.
    #[arg(long, env = "EMAIL", default_value = "noreply@localhost")]
    pub email: String,
    /// Public front-end URL used in email links.
    #[arg(long, env = "APP_URL", default_value = "http://localhost:8080")]
    pub app_url: String,
    /// Project name shown in email subjects.
    #[arg(long, env = "PROJECT_NAME", default_value = "Lodestar")]
    pub project_name: String,
    /// HTTP worker threads.
    #[arg(long, env = "WORKERS", default_value_t = 6)]
    pub workers: usize,
}

impl Config {
    pub fn crypto(&self) -> Crypto {
        Crypto::new(self.jwt_secret.as_bytes(), self.jwt_refresh_secret.as_bytes())
    }
    /// Mailgun when both the key and domain are set, otherwise the outbox.
    pub fn mailer(&self) -> Arc<dyn Mailer> {
        match (&self.mailgun_api, &self.mailgun_domain) {
            (Some(key), Some(domain)) => Arc::new(Mailgun::new(
                self.mailgun_host.clone(),
                domain.clone(),
                key.clone(),
            )),
            _ => {
                log::warn!("mailgun is not configured, emails stay in the outbox");
                Arc::new(Outbox::default())
            }
        }
    }
    pub fn postman(&self) -> Postman {
        Postman::new(
            self.mailer(),
            self.email.clone(),
            self.app_url.clone(),
            self.project_name.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "lodestar",
            "--jwt-secret",
            "access",
            "--jwt-refresh-secret",
            "refresh",
            "--bind",
            "127.0.0.1:9000",
            "--workers",
            "2",
        ])
        .unwrap();
        assert_eq!(config.bind, "127.0.0.1:9000");
        assert_eq!(config.workers, 2);
        assert_eq!(config.jwt_secret, "access");
        assert_eq!(config.jwt_refresh_secret, "refresh");
    }
    #[test]
    fn secrets_are_required() {
        if std::env::var_os("JWT_SECRET").is_none() {
            assert!(Config::try_parse_from(["lodestar"]).is_err());
        }
    }
}
