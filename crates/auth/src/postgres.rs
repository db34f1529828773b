use super::*;
use lds_core::ID;
use lds_core::Unique;
use lds_pg::*;
use std::sync::Arc;
use std::time::SystemTime;
use tokio_postgres::Client;

impl UserRepository for Arc<Client> {
    async fn clashes(&self, name: &str, email: &str, wallet: &str) -> anyhow::Result<Vec<Member>> {
        Ok(self
            .query(
                const_format::concatcp!(
                    "SELECT ",
                    COLUMNS,
                    " FROM ",
                    USERS,
                    " WHERE name_lower = $1 OR email = $2 OR wallet = $3"
                ),
                &[&name.to_lowercase(), &email, &wallet::normalize(wallet)],
            )
            .await?
            .iter()
            .map(Member::hydrate)
            .collect())
    }

    async fn create(&self, member: &Member, hashword: &str) -> anyhow::Result<()> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                USERS,
                " (id, email, hashword, wallet, nonce, name, name_lower, verified, verify_token)
                  VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"
            ),
            &[
                &member.id().inner(),
                &member.email(),
                &hashword,
                &member.wallet(),
                &member.nonce(),
                &member.name(),
                &member.name().to_lowercase(),
                &member.verified(),
                &member.verify_token(),
            ],
        )
        .await
        .map(|_| ())
        .map_err(anyhow::Error::from)
    }

    async fn lookup(&self, email: &str) -> anyhow::Result<Option<(Member, String)>> {
        Ok(self
            .query_opt(
                const_format::concatcp!("SELECT ", COLUMNS, " FROM ", USERS, " WHERE email = $1"),
                &[&email],
            )
            .await?
            .map(|row| (Member::hydrate(&row), row.get::<_, String>(11))))
    }

    async fn by_wallet(&self, wallet: &str) -> anyhow::Result<Option<Member>> {
        Ok(self
            .query_opt(
                const_format::concatcp!("SELECT ", COLUMNS, " FROM ", USERS, " WHERE wallet = $1"),
                &[&wallet::normalize(wallet)],
            )
            .await?
            .as_ref()
            .map(Member::hydrate))
    }

    async fn by_verify_token(&self, token: &str) -> anyhow::Result<Option<Member>> {
        Ok(self
            .query_opt(
                const_format::concatcp!(
                    "SELECT ",
                    COLUMNS,
                    " FROM ",
                    USERS,
                    " WHERE verify_token = $1"
                ),
                &[&token],
            )
            .await?
            .as_ref()
            .map(Member::hydrate))
    }

    async fn by_reset_token(&self, token: &str, now: SystemTime) -> anyhow::Result<Option<Member>> {
        Ok(self
            .query_opt(
                const_format::concatcp!(
                    "SELECT ",
                    COLUMNS,
                    " FROM ",
                    USERS,
                    " WHERE reset_token = $1 AND reset_expires > $2"
                ),
                &[&token, &now],
            )
            .await?
            .as_ref()
            .map(Member::hydrate))
    }

    async fn verify(&self, user: ID<Member>) -> anyhow::Result<()> {
        self.execute(
            const_format::concatcp!("UPDATE ", USERS, " SET verified = TRUE WHERE id = $1"),
            &[&user.inner()],
        )
        .await
        .map(|_| ())
        .map_err(anyhow::Error::from)
    }

    async fn stamp(&self, user: ID<Member>, at: SystemTime) -> anyhow::Result<()> {
        self.execute(
            const_format::concatcp!("UPDATE ", USERS, " SET verify_sent = $2 WHERE id = $1"),
            &[&user.inner(), &at],
        )
        .await
        .map(|_| ())
        .map_err(anyhow::Error::from)
    }

    async fn renonce(&self, user: ID<Member>, nonce: i64) -> anyhow::Result<()> {
        self.execute(
            const_format::concatcp!("UPDATE ", USERS, " SET nonce = $2 WHERE id = $1"),
            &[&user.inner(), &nonce],
        )
        .await
        .map(|_| ())
        .map_err(anyhow::Error::from)
    }

    async fn forgot(&self, user: ID<Member>, reset: &Reset) -> anyhow::Result<()> {
        self.execute(
            const_format::concatcp!(
                "UPDATE ",
                USERS,
                " SET reset_token = $2, reset_expires = $3 WHERE id = $1"
            ),
            &[&user.inner(), &reset.token(), &reset.expires()],
        )
        .await
        .map(|_| ())
        .map_err(anyhow::Error::from)
    }

    async fn rehash(&self, user: ID<Member>, hashword: &str) -> anyhow::Result<()> {
        self.execute(
            const_format::concatcp!(
                "UPDATE ",
                USERS,
                " SET hashword = $2, reset_token = NULL, reset_expires = NULL WHERE id = $1"
            ),
            &[&user.inner(), &hashword],
        )
        .await
        .map(|_| ())
        .map_err(anyhow::Error::from)
    }
}
