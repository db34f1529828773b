use super::*;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Token pair issued at login, keyed by its refresh token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    pub token: String,
    pub refresh: String,
    pub user: Identity,
}

/// Volatile refresh-token table.
/// Lives only as long as the process; nothing is persisted.
#[derive(Default)]
pub struct Tokens {
    grants: RwLock<HashMap<String, Grant>>,
}

impl Tokens {
    pub async fn insert(&self, grant: Grant) {
        self.grants.write().await.insert(grant.refresh.clone(), grant);
    }
    pub async fn get(&self, refresh: &str) -> Option<Grant> {
        self.grants.read().await.get(refresh).cloned()
    }
    /// Replaces the access token of an existing grant.
    pub async fn rotate(&self, refresh: &str, token: String) -> Option<Grant> {
        self.grants
            .write()
            .await
            .get_mut(refresh)
            .map(|grant| {
                grant.token = token;
                grant.clone()
            })
    }
    pub async fn remove(&self, refresh: &str) -> Option<Grant> {
        self.grants.write().await.remove(refresh)
    }
    pub async fn len(&self) -> usize {
        self.grants.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lds_core::ID;

    fn grant(refresh: &str) -> Grant {
        Grant {
            token: "access".to_string(),
            refresh: refresh.to_string(),
            user: Identity {
                id: ID::default(),
                email: "ada@example.com".to_string(),
                name: "ada".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn rotate_replaces_access_token() {
        let tokens = Tokens::default();
        tokens.insert(grant("r1")).await;
        let rotated = tokens.rotate("r1", "fresh".to_string()).await.unwrap();
        assert_eq!(rotated.token, "fresh");
        assert_eq!(tokens.get("r1").await.unwrap().token, "fresh");
        assert!(tokens.rotate("missing", "x".to_string()).await.is_none());
    }
    #[tokio::test]
    async fn remove_forgets_grant() {
        let tokens = Tokens::default();
        tokens.insert(grant("r1")).await;
        tokens.insert(grant("r2")).await;
        assert!(tokens.remove("r1").await.is_some());
        assert!(tokens.get("r1").await.is_none());
        assert_eq!(tokens.len().await, 1);
    }
}
