use super::*;

/// Mailgun HTTP API transport.
pub struct Mailgun {
    http: reqwest::Client,
    host: String,
    domain: String,
    key: String,
}

impl Mailgun {
    pub fn new(host: String, domain: String, key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            host,
            domain,
            key,
        }
    }
    fn endpoint(&self) -> String {
        format!("https://{}/v3/{}/messages", self.host, self.domain)
    }
}

#[async_trait::async_trait]
impl Mailer for Mailgun {
    async fn send(&self, mail: Mail) -> anyhow::Result<()> {
        self.http
            .post(self.endpoint())
            .basic_auth("api", Some(&self.key))
            .form(&[
                ("from", mail.from.as_str()),
                ("to", mail.to.as_str()),
                ("subject", mail.subject.as_str()),
                ("html", mail.html.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;
        log::info!("sent \"{}\" to {}", mail.subject, mail.to);
        Ok(())
    }
}
