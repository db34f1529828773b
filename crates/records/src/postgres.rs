use super::*;
use lds_auth::Member;
use lds_core::ID;
use lds_core::Unique;
use lds_pg::*;
use std::sync::Arc;
use tokio_postgres::Client;

impl ChatRepository for Arc<Client> {
    async fn append(&self, chat: &Chat) -> anyhow::Result<()> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                CHATS,
                " (id, email, message, created) VALUES ($1, $2, $3, $4)"
            ),
            &[
                &chat.id().inner(),
                &chat.email(),
                &chat.message(),
                &chat.created(),
            ],
        )
        .await
        .map(|_| ())
        .map_err(anyhow::Error::from)
    }
}

impl ScoreRepository for Arc<Client> {
    async fn submit(&self, user: ID<Member>, score: i64) -> anyhow::Result<()> {
        self.execute(
            const_format::concatcp!("UPDATE ", USERS, " SET high_score = $2 WHERE id = $1"),
            &[&user.inner(), &score],
        )
        .await
        .map(|_| ())
        .map_err(anyhow::Error::from)
    }

    async fn top(&self, limit: usize) -> anyhow::Result<Vec<Score>> {
        Ok(self
            .query(
                const_format::concatcp!(
                    "SELECT name, high_score FROM ",
                    USERS,
                    " ORDER BY high_score DESC LIMIT $1"
                ),
                &[&(limit as i64)],
            )
            .await?
            .iter()
            .map(|row| Score {
                name: row.get(0),
                high_score: row.get(1),
            })
            .collect())
    }
}
