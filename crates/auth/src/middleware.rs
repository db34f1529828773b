use super::*;
use actix_web::FromRequest;
use actix_web::HttpRequest;
use actix_web::dev::Payload;
use actix_web::web;
use lds_core::ID;
use std::future::Ready;

/// Extractor for authenticated requests.
///
/// The access token is read from the `jwt` cookie, then from a
/// `Bearer` authorization header, then from a `token` query parameter
/// (browsers cannot set headers on WebSocket upgrades).
pub struct Auth(pub Claims);

impl Auth {
    pub fn claims(&self) -> &Claims {
        &self.0
    }
    pub fn user(&self) -> ID<Member> {
        self.0.user()
    }
    fn token(req: &HttpRequest) -> Option<String> {
        req.cookie(lds_core::ACCESS_COOKIE)
            .map(|c| c.value().to_string())
            .or_else(|| {
                req.headers()
                    .get("Authorization")
                    .and_then(|h| h.to_str().ok())
                    .and_then(|s| s.strip_prefix("Bearer "))
                    .map(|s| s.to_string())
            })
            .or_else(|| {
                web::Query::<std::collections::HashMap<String, String>>::from_query(
                    req.query_string(),
                )
                .ok()
                .and_then(|q| q.get("token").cloned())
            })
    }
    fn authenticate(req: &HttpRequest) -> Result<Self, Failure> {
        let token = Self::token(req).ok_or_else(|| Failure::unauthorized("Unauthorized"))?;
        let crypto = req
            .app_data::<web::Data<Crypto>>()
            .ok_or_else(|| Failure::Internal(anyhow::anyhow!("token service not configured")))?;
        let claims = crypto
            .decode(&token)
            .map_err(|_| Failure::unauthorized("Unauthorized"))?;
        Ok(Auth(claims))
    }
}

impl FromRequest for Auth {
    type Error = Failure;
    type Future = Ready<Result<Self, Self::Error>>;
    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        std::future::ready(Self::authenticate(req))
    }
}
