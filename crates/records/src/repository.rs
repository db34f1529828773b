use super::*;
use lds_auth::Member;
use lds_core::ID;

/// Chat line storage.
#[allow(async_fn_in_trait)]
pub trait ChatRepository {
    async fn append(&self, chat: &Chat) -> anyhow::Result<()>;
}

/// High score storage. Scores live on the member record.
#[allow(async_fn_in_trait)]
pub trait ScoreRepository {
    /// Overwrites the member's high score.
    async fn submit(&self, user: ID<Member>, score: i64) -> anyhow::Result<()>;
    /// Highest scores first, at most `limit` rows.
    async fn top(&self, limit: usize) -> anyhow::Result<Vec<Score>>;
}
