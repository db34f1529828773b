use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;
use lds_auth::Crypto;
use lds_auth::Failure;
use lds_auth::MessageResponse;
use lds_auth::Tokens;
use lds_auth::UserRepository;
use lds_lobby::Lobby;
use lds_mail::Postman;
use lds_records::ChatRepository;
use lds_records::ScoreRepository;
use lds_records::StatusResponse;

/// Everything a backing store must provide.
pub trait Store: UserRepository + ChatRepository + ScoreRepository + Send + Sync + 'static {}
impl<T> Store for T where T: UserRepository + ChatRepository + ScoreRepository + Send + Sync + 'static {}

/// Application state shared by every worker.
pub struct Backend<R> {
    pub db: web::Data<R>,
    pub crypto: web::Data<Crypto>,
    pub postman: web::Data<Postman>,
    pub tokens: web::Data<Tokens>,
    pub lobby: web::Data<Lobby>,
}

impl<R> Clone for Backend<R> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            crypto: self.crypto.clone(),
            postman: self.postman.clone(),
            tokens: self.tokens.clone(),
            lobby: self.lobby.clone(),
        }
    }
}

impl<R: Store> Backend<R> {
    /// Registers state and routes on an app.
    #[rustfmt::skip]
    pub fn mount(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.db.clone())
            .app_data(self.crypto.clone())
            .app_data(self.postman.clone())
            .app_data(self.tokens.clone())
            .app_data(self.lobby.clone())
            .app_data(web::JsonConfig::default().error_handler(|e, _| Failure::invalid(e.to_string()).into()))
            .route("/status",             web::get().to(status))
            .route("/signup",             web::post().to(lds_auth::signup::<R>))
            .route("/login",              web::post().to(lds_auth::login::<R>))
            .route("/token",              web::post().to(lds_auth::token))
            .route("/logout",             web::post().to(lds_auth::logout))
            .route("/verify-account",     web::post().to(lds_auth::verify_account::<R>))
            .route("/send-verify-link",   web::post().to(lds_auth::send_verify_link::<R>))
            .route("/forgot-password",    web::post().to(lds_auth::forgot_password::<R>))
            .route("/reset-password",     web::post().to(lds_auth::reset_password::<R>))
            .route("/nonce/{wallet}",     web::get().to(lds_auth::nonce::<R>))
            .route("/verify-signature",   web::post().to(lds_auth::verify_signature::<R>))
            .route("/socket",             web::get().to(lds_lobby::socket))
            .route("/submit-chatline",    web::post().to(lds_records::submit_chatline::<R>))
            .route("/submit-score",       web::post().to(lds_records::submit_score::<R>))
            .route("/scores",             web::get().to(lds_records::scores::<R>))
            .default_service(web::to(not_found));
    }
}

async fn status() -> impl Responder {
    HttpResponse::Ok().json(StatusResponse::ok())
}

async fn not_found() -> impl Responder {
    HttpResponse::NotFound().json(MessageResponse::new("404 - Not Found"))
}
