use super::*;
use std::sync::Arc;

/// Renders account letters and hands them to a [`Mailer`].
pub struct Postman {
    mailer: Arc<dyn Mailer>,
    from: String,
    url: String,
    project: String,
}

impl Postman {
    /// `url` is the public front-end address that email links point to.
    pub fn new(mailer: Arc<dyn Mailer>, from: String, url: String, project: String) -> Self {
        Self {
            mailer,
            from,
            url: url.trim_end_matches('/').to_string(),
            project,
        }
    }
    pub async fn verify(&self, to: &str, name: &str, token: &str) -> anyhow::Result<()> {
        let url = format!("{}/activate/{}", self.url, token);
        self.post(
            to,
            format!("Verify your account on {}", self.project),
            Template::Verify.render(&[("name", name), ("url", &url)]),
        )
        .await
        .inspect(|_| log::info!("sent verification email to {}", to))
    }
    pub async fn forgot(&self, to: &str, name: &str, token: &str) -> anyhow::Result<()> {
        let url = format!("{}/set-password?token={}", self.url, token);
        self.post(
            to,
            format!("{} Password Reset", self.project),
            Template::Forgot.render(&[("name", name), ("url", &url)]),
        )
        .await
        .inspect(|_| log::info!("sent reset password email to {}", to))
    }
    pub async fn confirm(&self, to: &str, name: &str) -> anyhow::Result<()> {
        self.post(
            to,
            "Password successfully reset!".to_string(),
            Template::Reset.render(&[("name", name)]),
        )
        .await
    }
    async fn post(&self, to: &str, subject: String, html: String) -> anyhow::Result<()> {
        self.mailer
            .send(Mail {
                from: self.from.clone(),
                to: to.to_string(),
                subject,
                html,
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postman(outbox: Arc<Outbox>) -> Postman {
        Postman::new(
            outbox,
            "noreply@lodestar.gg".to_string(),
            "http://localhost:3000/".to_string(),
            "Lodestar".to_string(),
        )
    }

    #[tokio::test]
    async fn verify_links_to_activation_page() {
        let outbox = Arc::new(Outbox::default());
        postman(outbox.clone())
            .verify("ada@example.com", "ada", "abc123")
            .await
            .unwrap();
        let mail = outbox.last().await.unwrap();
        assert_eq!(mail.to, "ada@example.com");
        assert_eq!(mail.subject, "Verify your account on Lodestar");
        assert!(mail.html.contains("http://localhost:3000/activate/abc123"));
    }
    #[tokio::test]
    async fn forgot_links_to_reset_page() {
        let outbox = Arc::new(Outbox::default());
        postman(outbox.clone())
            .forgot("ada@example.com", "ada", "beef")
            .await
            .unwrap();
        let mail = outbox.last().await.unwrap();
        assert_eq!(mail.subject, "Lodestar Password Reset");
        assert!(mail.html.contains("http://localhost:3000/set-password?token=beef"));
    }
}
