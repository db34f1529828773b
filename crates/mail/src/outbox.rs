use super::*;
use tokio::sync::Mutex;

/// Keeps every message in memory instead of delivering it.
#[derive(Default)]
pub struct Outbox {
    sent: Mutex<Vec<Mail>>,
}

impl Outbox {
    pub async fn sent(&self) -> Vec<Mail> {
        self.sent.lock().await.clone()
    }
    pub async fn last(&self) -> Option<Mail> {
        self.sent.lock().await.last().cloned()
    }
}

#[async_trait::async_trait]
impl Mailer for Outbox {
    async fn send(&self, mail: Mail) -> anyhow::Result<()> {
        log::info!("outbox holds \"{}\" for {}", mail.subject, mail.to);
        log::debug!("{}", mail.html);
        self.sent.lock().await.push(mail);
        Ok(())
    }
}
