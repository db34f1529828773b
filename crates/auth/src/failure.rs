use actix_web::HttpResponse;
use actix_web::ResponseError;
use actix_web::http::StatusCode;

/// Error returned by HTTP handlers, rendered as a JSON body.
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    /// Request was understood but rejected. 400 `{message}`.
    #[error("{0}")]
    Invalid(String),
    /// Missing or bad credentials. 401 `{message}`.
    #[error("{0}")]
    Unauthorized(String),
    /// Action repeated too soon. 400 `{message, canRequest}` with unix seconds.
    #[error("{message}")]
    Cooldown { message: String, can_request: i64 },
    /// Anything the caller cannot fix. 500 `{error}`.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl Failure {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }
}

impl From<jsonwebtoken::errors::Error> for Failure {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Internal(anyhow::anyhow!("token signing failed: {}", e))
    }
}

impl ResponseError for Failure {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Invalid(_) => StatusCode::BAD_REQUEST,
            Self::Cooldown { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            Self::Invalid(message) | Self::Unauthorized(message) => {
                serde_json::json!({ "message": message })
            }
            Self::Cooldown {
                message,
                can_request,
            } => serde_json::json!({ "message": message, "canRequest": can_request }),
            Self::Internal(e) => {
                log::error!("{:#}", e);
                serde_json::json!({ "error": e.to_string() })
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
