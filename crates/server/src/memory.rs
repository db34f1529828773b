use lds_auth::Member;
use lds_auth::Reset;
use lds_auth::UserRepository;
use lds_auth::wallet;
use lds_core::ID;
use lds_core::Unique;
use lds_records::Chat;
use lds_records::ChatRepository;
use lds_records::Score;
use lds_records::ScoreRepository;
use std::collections::HashMap;
use std::time::SystemTime;
use tokio::sync::RwLock;

/// In-process store for development and tests. Forgets everything on exit.
#[derive(Default)]
pub struct Memory {
    users: RwLock<HashMap<ID<Member>, (Member, String)>>,
    chats: RwLock<Vec<Chat>>,
}

impl Memory {
    pub async fn chats(&self) -> Vec<Chat> {
        self.chats.read().await.clone()
    }
    async fn find(&self, f: impl Fn(&Member) -> bool) -> Option<Member> {
        self.users
            .read()
            .await
            .values()
            .map(|(member, _)| member)
            .find(|member| f(member))
            .cloned()
    }
    async fn update(&self, user: ID<Member>, f: impl FnOnce(&mut Member, &mut String)) -> anyhow::Result<()> {
        self.users
            .write()
            .await
            .get_mut(&user)
            .map(|(member, hashword)| f(member, hashword))
            .ok_or_else(|| anyhow::anyhow!("user {} not found", user))
    }
}

impl UserRepository for Memory {
    async fn clashes(&self, name: &str, email: &str, wallet: &str) -> anyhow::Result<Vec<Member>> {
        let wallet = wallet::normalize(wallet);
        Ok(self
            .users
            .read()
            .await
            .values()
            .map(|(member, _)| member)
            .filter(|m| m.named(name) || m.email() == email || m.wallet() == wallet)
            .cloned()
            .collect())
    }
    async fn create(&self, member: &Member, hashword: &str) -> anyhow::Result<()> {
        let mut users = self.users.write().await;
        if users.values().any(|(m, _)| {
            m.email() == member.email() || m.named(member.name()) || m.wallet() == member.wallet()
        }) {
            anyhow::bail!("duplicate account for {}", member.email());
        }
        users.insert(member.id(), (member.clone(), hashword.to_string()));
        Ok(())
    }
    async fn lookup(&self, email: &str) -> anyhow::Result<Option<(Member, String)>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|(member, _)| member.email() == email)
            .cloned())
    }
    async fn by_wallet(&self, wallet: &str) -> anyhow::Result<Option<Member>> {
        let wallet = wallet::normalize(wallet);
        Ok(self.find(|m| m.wallet() == wallet).await)
    }
    async fn by_verify_token(&self, token: &str) -> anyhow::Result<Option<Member>> {
        Ok(self.find(|m| m.verify_token() == token).await)
    }
    async fn by_reset_token(&self, token: &str, now: SystemTime) -> anyhow::Result<Option<Member>> {
        Ok(self
            .find(|m| m.reset().is_some_and(|r| r.valid(token, now)))
            .await)
    }
    async fn verify(&self, user: ID<Member>) -> anyhow::Result<()> {
        self.update(user, |m, _| m.set_verified(true)).await
    }
    async fn stamp(&self, user: ID<Member>, at: SystemTime) -> anyhow::Result<()> {
        self.update(user, |m, _| m.set_verify_sent(at)).await
    }
    async fn renonce(&self, user: ID<Member>, nonce: i64) -> anyhow::Result<()> {
        self.update(user, |m, _| m.set_nonce(nonce)).await
    }
    async fn forgot(&self, user: ID<Member>, reset: &Reset) -> anyhow::Result<()> {
        self.update(user, |m, _| m.set_reset(Some(reset.clone()))).await
    }
    async fn rehash(&self, user: ID<Member>, hashword: &str) -> anyhow::Result<()> {
        self.update(user, |m, h| {
            m.set_reset(None);
            *h = hashword.to_string();
        })
        .await
    }
}

impl ChatRepository for Memory {
    async fn append(&self, chat: &Chat) -> anyhow::Result<()> {
        self.chats.write().await.push(chat.clone());
        Ok(())
    }
}

impl ScoreRepository for Memory {
    async fn submit(&self, user: ID<Member>, score: i64) -> anyhow::Result<()> {
        self.update(user, |m, _| m.set_score(score)).await
    }
    async fn top(&self, limit: usize) -> anyhow::Result<Vec<Score>> {
        let scores = self
            .users
            .read()
            .await
            .values()
            .map(|(member, _)| Score {
                name: member.name().to_string(),
                high_score: member.score(),
            })
            .collect();
        Ok(lds_records::rank(scores, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn member(name: &str) -> Member {
        Member::new(
            ID::default(),
            format!("{}@example.com", name),
            name.to_string(),
            format!("0x{:0>40}", name),
        )
    }

    #[tokio::test]
    async fn clashes_match_any_unique_field() {
        let db = Memory::default();
        let ada = member("ada");
        db.create(&ada, "hash").await.unwrap();
        assert_eq!(db.clashes("ADA", "x@y.z", "0x1").await.unwrap().len(), 1);
        assert_eq!(db.clashes("bob", "ada@example.com", "0x1").await.unwrap().len(), 1);
        assert_eq!(db.clashes("bob", "x@y.z", &ada.wallet().to_uppercase()).await.unwrap().len(), 1);
        assert!(db.clashes("bob", "bob@example.com", "0x2").await.unwrap().is_empty());
        assert!(db.create(&member("ada"), "hash").await.is_err());
    }
    #[tokio::test]
    async fn reset_token_expires_and_is_cleared_by_rehash() {
        let db = Memory::default();
        let ada = member("ada");
        db.create(&ada, "old").await.unwrap();
        let reset = Reset::new("abc".to_string(), SystemTime::now() + Duration::from_secs(60));
        db.forgot(ada.id(), &reset).await.unwrap();
        assert!(db.by_reset_token("abc", SystemTime::now()).await.unwrap().is_some());
        let later = SystemTime::now() + Duration::from_secs(120);
        assert!(db.by_reset_token("abc", later).await.unwrap().is_none());
        db.rehash(ada.id(), "new").await.unwrap();
        assert!(db.by_reset_token("abc", SystemTime::now()).await.unwrap().is_none());
        let (_, hashword) = db.lookup("ada@example.com").await.unwrap().unwrap();
        assert_eq!(hashword, "new");
    }
    #[tokio::test]
    async fn scores_overwrite_and_rank() {
        let db = Memory::default();
        let ada = member("ada");
        let bob = member("bob");
        db.create(&ada, "h").await.unwrap();
        db.create(&bob, "h").await.unwrap();
        db.submit(ada.id(), 50).await.unwrap();
        db.submit(bob.id(), 30).await.unwrap();
        db.submit(ada.id(), 10).await.unwrap();
        let top = db.top(10).await.unwrap();
        assert_eq!(top[0].name, "bob");
        assert_eq!(top[0].high_score, 30);
        assert_eq!(top[1].high_score, 10);
        assert!(db.submit(ID::default(), 1).await.is_err());
    }
}
