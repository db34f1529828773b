use super::*;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::web;
use lds_auth::Auth;

/// `GET /socket`: upgrades an authenticated request and joins the lobby.
pub async fn socket(
    lobby: web::Data<Lobby>,
    auth: Auth,
    body: web::Payload,
    req: HttpRequest,
) -> Result<HttpResponse, actix_web::Error> {
    let (response, session, streams) = actix_ws::handle(&req, body)?;
    log::info!("user {} connected to the lobby", auth.claims().email());
    lobby.into_inner().bridge(session, streams).await;
    Ok(response)
}
