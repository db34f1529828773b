use super::*;
use lds_core::ID;
use lds_core::Unique;
use std::time::SystemTime;

/// Pending password reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reset {
    token: String,
    expires: SystemTime,
}

impl Reset {
    pub fn new(token: String, expires: SystemTime) -> Self {
        Self { token, expires }
    }
    /// Fresh random token expiring after the reset window.
    pub fn random() -> Self {
        use rand::Rng;
        let ref mut bytes = [0u8; lds_core::RESET_TOKEN_BYTES];
        rand::rng().fill(bytes);
        Self::new(
            hex::encode(bytes),
            SystemTime::now() + lds_core::RESET_TOKEN_DURATION,
        )
    }
    pub fn token(&self) -> &str {
        &self.token
    }
    pub fn expires(&self) -> SystemTime {
        self.expires
    }
    pub fn valid(&self, token: &str, at: SystemTime) -> bool {
        self.token == token && self.expires > at
    }
}

/// Registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    id: ID<Self>,
    email: String,
    name: String,
    wallet: String,
    nonce: i64,
    verified: bool,
    verify_token: String,
    verify_sent: Option<SystemTime>,
    reset: Option<Reset>,
    score: i64,
}

impl Member {
    /// New unverified account. The wallet is stored lower-cased.
    pub fn new(id: ID<Self>, email: String, name: String, wallet: String) -> Self {
        Self {
            id,
            email,
            name,
            wallet: wallet::normalize(&wallet),
            nonce: wallet::nonce(),
            verified: false,
            verify_token: verify_token(),
            verify_sent: None,
            reset: None,
            score: 0,
        }
    }
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn wallet(&self) -> &str {
        &self.wallet
    }
    pub fn nonce(&self) -> i64 {
        self.nonce
    }
    pub fn verified(&self) -> bool {
        self.verified
    }
    pub fn verify_token(&self) -> &str {
        &self.verify_token
    }
    pub fn verify_sent(&self) -> Option<SystemTime> {
        self.verify_sent
    }
    pub fn reset(&self) -> Option<&Reset> {
        self.reset.as_ref()
    }
    pub fn score(&self) -> i64 {
        self.score
    }
    /// Case-insensitive name comparison used for uniqueness.
    pub fn named(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
    /// Earliest time another verification email may be sent.
    pub fn resend_at(&self) -> Option<SystemTime> {
        self.verify_sent
            .map(|sent| sent + lds_core::VERIFY_RESEND_COOLDOWN)
    }

    pub fn set_verified(&mut self, verified: bool) {
        self.verified = verified;
    }
    pub fn set_verify_sent(&mut self, at: SystemTime) {
        self.verify_sent = Some(at);
    }
    pub fn set_nonce(&mut self, nonce: i64) {
        self.nonce = nonce;
    }
    pub fn set_reset(&mut self, reset: Option<Reset>) {
        self.reset = reset;
    }
    pub fn set_score(&mut self, score: i64) {
        self.score = score;
    }
}

impl Unique for Member {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

fn verify_token() -> String {
    use rand::Rng;
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(lds_core::VERIFY_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use lds_pg::*;

    impl Schema for Member {
        fn name() -> &'static str {
            USERS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                USERS,
                " (
                    id            UUID PRIMARY KEY,
                    email         VARCHAR(255) UNIQUE NOT NULL,
                    hashword      TEXT NOT NULL,
                    wallet        VARCHAR(42) UNIQUE NOT NULL,
                    nonce         BIGINT NOT NULL DEFAULT 0,
                    name          VARCHAR(64) NOT NULL,
                    name_lower    VARCHAR(64) UNIQUE NOT NULL,
                    verified      BOOLEAN NOT NULL DEFAULT FALSE,
                    verify_token  VARCHAR(64) NOT NULL,
                    verify_sent   TIMESTAMPTZ,
                    reset_token   VARCHAR(64),
                    reset_expires TIMESTAMPTZ,
                    high_score    BIGINT NOT NULL DEFAULT 0
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_users_verify_token ON ",
                USERS,
                " (verify_token);
                 CREATE INDEX IF NOT EXISTS idx_users_reset_token ON ",
                USERS,
                " (reset_token) WHERE reset_token IS NOT NULL;
                 CREATE INDEX IF NOT EXISTS idx_users_high_score ON ",
                USERS,
                " (high_score DESC);"
            )
        }
    }

    impl Member {
        /// Rebuilds a member from a `SELECT` over [`COLUMNS`].
        pub(crate) fn hydrate(row: &tokio_postgres::Row) -> Self {
            let token = row.get::<_, Option<String>>(9);
            let expires = row.get::<_, Option<SystemTime>>(10);
            Self {
                id: ID::from(row.get::<_, uuid::Uuid>(0)),
                email: row.get(1),
                name: row.get(2),
                wallet: row.get(3),
                nonce: row.get(4),
                verified: row.get(5),
                verify_token: row.get(6),
                verify_sent: row.get(7),
                score: row.get(8),
                reset: token.zip(expires).map(|(t, e)| Reset::new(t, e)),
            }
        }
    }

    /// Column list matching [`Member::hydrate`], followed by `hashword`.
    pub(crate) const COLUMNS: &str = "id, email, name, wallet, nonce, verified, verify_token, verify_sent, high_score, reset_token, reset_expires, hashword";
}
#[cfg(feature = "database")]
pub(crate) use schema::COLUMNS;

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> Member {
        Member::new(
            ID::default(),
            "ada@example.com".to_string(),
            "Ada".to_string(),
            "0xABCDEF0123456789abcdef0123456789ABCDEF01".to_string(),
        )
    }

    #[test]
    fn new_member_is_unverified_with_fresh_secrets() {
        let member = ada();
        assert!(!member.verified());
        assert_eq!(member.verify_token().len(), lds_core::VERIFY_TOKEN_LENGTH);
        assert!(member.verify_token().chars().all(|c| c.is_ascii_alphanumeric()));
        assert!((0..lds_core::NONCE_BOUND).contains(&member.nonce()));
        assert_eq!(member.wallet(), "0xabcdef0123456789abcdef0123456789abcdef01");
    }
    #[test]
    fn names_compare_case_insensitively() {
        assert!(ada().named("ADA"));
        assert!(!ada().named("adam"));
    }
    #[test]
    fn reset_token_expires() {
        let reset = Reset::random();
        assert_eq!(reset.token().len(), lds_core::RESET_TOKEN_BYTES * 2);
        assert!(reset.valid(reset.token(), SystemTime::now()));
        assert!(!reset.valid("nope", SystemTime::now()));
        assert!(!reset.valid(reset.token(), reset.expires()));
    }
    #[test]
    fn resend_window_follows_last_send() {
        let mut member = ada();
        assert_eq!(member.resend_at(), None);
        let sent = SystemTime::now();
        member.set_verify_sent(sent);
        assert_eq!(member.resend_at(), Some(sent + lds_core::VERIFY_RESEND_COOLDOWN));
    }
}
