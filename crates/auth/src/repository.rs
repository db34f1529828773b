use super::*;
use lds_core::ID;
use std::time::SystemTime;

/// Account storage operations.
/// Implemented by the PostgreSQL client and by the in-memory store.
#[allow(async_fn_in_trait)]
pub trait UserRepository {
    /// Every member sharing the (case-insensitive) name, the email, or the wallet.
    async fn clashes(&self, name: &str, email: &str, wallet: &str) -> anyhow::Result<Vec<Member>>;
    async fn create(&self, member: &Member, hashword: &str) -> anyhow::Result<()>;
    /// Member and password hash by email.
    async fn lookup(&self, email: &str) -> anyhow::Result<Option<(Member, String)>>;
    async fn by_wallet(&self, wallet: &str) -> anyhow::Result<Option<Member>>;
    async fn by_verify_token(&self, token: &str) -> anyhow::Result<Option<Member>>;
    /// Member holding `token` as a reset token that is still valid at `now`.
    async fn by_reset_token(&self, token: &str, now: SystemTime) -> anyhow::Result<Option<Member>>;
    async fn verify(&self, user: ID<Member>) -> anyhow::Result<()>;
    async fn stamp(&self, user: ID<Member>, at: SystemTime) -> anyhow::Result<()>;
    async fn renonce(&self, user: ID<Member>, nonce: i64) -> anyhow::Result<()>;
    async fn forgot(&self, user: ID<Member>, reset: &Reset) -> anyhow::Result<()>;
    /// Stores a new password hash and clears any pending reset.
    async fn rehash(&self, user: ID<Member>, hashword: &str) -> anyhow::Result<()>;
}
