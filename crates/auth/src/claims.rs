use super::*;
use lds_core::ID;

/// Public identity embedded in every token.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Identity {
    #[serde(rename = "_id")]
    pub id: ID<Member>,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub user: Identity,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user: Identity, lifetime: std::time::Duration) -> Self {
        let now = lds_core::now();
        Self {
            user,
            iat: now,
            exp: now + lifetime.as_secs() as i64,
        }
    }
    pub fn expired(&self) -> bool {
        self.exp < lds_core::now()
    }
    pub fn user(&self) -> ID<Member> {
        self.user.id
    }
    pub fn email(&self) -> &str {
        &self.user.email
    }
    pub fn name(&self) -> &str {
        &self.user.name
    }
}
