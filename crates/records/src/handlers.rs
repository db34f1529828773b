use super::*;
use actix_web::HttpResponse;
use actix_web::web;
use lds_auth::Auth;
use lds_auth::Failure;
use lds_lobby::Lobby;
use lds_lobby::ServerMessage;

/// Stores a chat line and relays it to every socket.
pub async fn submit_chatline<R: ChatRepository + 'static>(
    db: web::Data<R>,
    lobby: web::Data<Lobby>,
    auth: Auth,
    req: web::Json<ChatRequest>,
) -> Result<HttpResponse, Failure> {
    if req.message.trim().is_empty() {
        return Err(Failure::invalid("message is required"));
    }
    let chat = Chat::new(auth.claims().email().to_string(), req.into_inner().message);
    db.append(&chat).await?;
    lobby
        .broadcast(&ServerMessage::chat(auth.claims().name(), chat.message()))
        .await;
    Ok(HttpResponse::Ok().json(StatusResponse::ok()))
}

pub async fn submit_score<R: ScoreRepository + 'static>(
    db: web::Data<R>,
    auth: Auth,
    req: web::Json<ScoreRequest>,
) -> Result<HttpResponse, Failure> {
    db.submit(auth.user(), req.score).await?;
    log::debug!("user {} scored {}", auth.claims().email(), req.score);
    Ok(HttpResponse::Ok().json(StatusResponse::ok()))
}

pub async fn scores<R: ScoreRepository + 'static>(
    db: web::Data<R>,
    _: Auth,
) -> Result<HttpResponse, Failure> {
    Ok(HttpResponse::Ok().json(db.top(lds_core::LEADERBOARD_SIZE).await?))
}
