use super::*;

struct Keys {
    encoding: jsonwebtoken::EncodingKey,
    decoding: jsonwebtoken::DecodingKey,
}

impl Keys {
    fn new(secret: &[u8]) -> Self {
        Self {
            encoding: jsonwebtoken::EncodingKey::from_secret(secret),
            decoding: jsonwebtoken::DecodingKey::from_secret(secret),
        }
    }
}

/// Signs and verifies access and refresh tokens with separate secrets.
pub struct Crypto {
    access: Keys,
    refresh: Keys,
}

impl Crypto {
    pub fn new(access: &[u8], refresh: &[u8]) -> Self {
        Self {
            access: Keys::new(access),
            refresh: Keys::new(refresh),
        }
    }
    /// Access token valid for the login lifetime.
    pub fn access(&self, user: Identity) -> Result<String, jsonwebtoken::errors::Error> {
        Self::encode(&Claims::new(user, lds_core::ACCESS_TOKEN_DURATION), &self.access)
    }
    /// Short-lived access token handed out on refresh.
    pub fn reissue(&self, user: Identity) -> Result<String, jsonwebtoken::errors::Error> {
        Self::encode(&Claims::new(user, lds_core::REISSUE_TOKEN_DURATION), &self.access)
    }
    pub fn refresh(&self, user: Identity) -> Result<String, jsonwebtoken::errors::Error> {
        Self::encode(&Claims::new(user, lds_core::REFRESH_TOKEN_DURATION), &self.refresh)
    }
    pub fn decode(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify(token, &self.access)
    }
    pub fn decode_refresh(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify(token, &self.refresh)
    }
    pub fn sign(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        Self::encode(claims, &self.access)
    }
    fn encode(claims: &Claims, keys: &Keys) -> Result<String, jsonwebtoken::errors::Error> {
        jsonwebtoken::encode(&jsonwebtoken::Header::default(), claims, &keys.encoding)
    }
    fn verify(token: &str, keys: &Keys) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = jsonwebtoken::Validation::default();
        validation.leeway = 0;
        jsonwebtoken::decode::<Claims>(token, &keys.decoding, &validation).map(|data| data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lds_core::ID;

    fn ada() -> Identity {
        Identity {
            id: ID::default(),
            email: "ada@example.com".to_string(),
            name: "ada".to_string(),
        }
    }

    #[test]
    fn access_token_carries_identity() {
        let crypto = Crypto::new(b"access", b"refresh");
        let user = ada();
        let token = crypto.access(user.clone()).unwrap();
        let claims = crypto.decode(&token).unwrap();
        assert_eq!(claims.user, user);
        assert!(!claims.expired());
    }
    #[test]
    fn keys_are_not_interchangeable() {
        let crypto = Crypto::new(b"access", b"refresh");
        let refresh = crypto.refresh(ada()).unwrap();
        let access = crypto.access(ada()).unwrap();
        assert!(crypto.decode(&refresh).is_err());
        assert!(crypto.decode_refresh(&access).is_err());
        assert!(crypto.decode_refresh(&refresh).is_ok());
    }
    #[test]
    fn expired_token_is_rejected() {
        let crypto = Crypto::new(b"access", b"refresh");
        let now = lds_core::now();
        let stale = Claims {
            user: ada(),
            iat: now - 600,
            exp: now - 300,
        };
        let token = crypto.sign(&stale).unwrap();
        assert!(stale.expired());
        assert!(crypto.decode(&token).is_err());
    }
    #[test]
    fn reissued_token_is_short_lived() {
        let crypto = Crypto::new(b"access", b"refresh");
        let claims = crypto.decode(&crypto.reissue(ada()).unwrap()).unwrap();
        assert_eq!(
            claims.exp - claims.iat,
            lds_core::REISSUE_TOKEN_DURATION.as_secs() as i64
        );
    }
}
