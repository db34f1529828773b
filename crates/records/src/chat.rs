use lds_core::ID;
use lds_core::Unique;
use std::time::SystemTime;

/// A chat line as persisted. Never edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chat {
    id: ID<Self>,
    email: String,
    message: String,
    created: SystemTime,
}

impl Chat {
    pub fn new(email: String, message: String) -> Self {
        Self {
            id: ID::default(),
            email,
            message,
            created: SystemTime::now(),
        }
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn message(&self) -> &str {
        &self.message
    }
    pub fn created(&self) -> SystemTime {
        self.created
    }
}

impl Unique for Chat {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use lds_pg::*;

    impl Schema for Chat {
        fn name() -> &'static str {
            CHATS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                CHATS,
                " (
                    id       UUID PRIMARY KEY,
                    email    VARCHAR(255) NOT NULL,
                    message  TEXT NOT NULL,
                    created  TIMESTAMPTZ NOT NULL DEFAULT now()
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_chats_created ON ",
                CHATS,
                " (created);"
            )
        }
    }
}
