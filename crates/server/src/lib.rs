//! Lodestar backend server.
//!
//! Wires accounts, chat, the leaderboard, and the realtime lobby into a
//! single actix-web server.
//!
//! - [`Config`] — Command line and environment settings
//! - [`Memory`] — In-process store used when no database is configured
//! - [`Backend`] — Shared state and the route table
//! - [`run()`] — Starts the server
mod config;
mod memory;
mod routes;

pub use config::*;
pub use memory::*;
pub use routes::*;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpServer;
use actix_web::middleware::Logger;
use actix_web::web;
use clap::Parser;
use lds_auth::Member;
use lds_auth::Tokens;
use lds_lobby::Lobby;
use lds_records::Chat;

/// Parses [`Config`], picks a store, and serves until shutdown.
/// `DB_URL` selects PostgreSQL; without it every table lives in memory.
pub async fn run() -> anyhow::Result<()> {
    let config = Config::parse();
    let crypto = web::Data::new(config.crypto());
    let postman = web::Data::new(config.postman());
    let tokens = web::Data::new(Tokens::default());
    let lobby = web::Data::new(Lobby::default());
    match config.db_url.as_deref() {
        Some(url) => {
            let client = lds_pg::db(url).await?;
            lds_pg::migrate::<Member>(&client).await?;
            lds_pg::migrate::<Chat>(&client).await?;
            let db = web::Data::new(client);
            serve(&config, Backend { db, crypto, postman, tokens, lobby }).await
        }
        None => {
            log::warn!("DB_URL is not set, accounts and chat live in memory");
            let db = web::Data::new(Memory::default());
            serve(&config, Backend { db, crypto, postman, tokens, lobby }).await
        }
    }
}

/// Access log line: method, path, status, seconds.
/// The query string is left out since it may carry an access token.
pub fn request_logger() -> Logger {
    Logger::new("%{method}xi %U %s %Ts").custom_request_replace("method", |req| req.method().to_string())
}

async fn serve<R: Store>(config: &Config, backend: Backend<R>) -> anyhow::Result<()> {
    log::info!("starting lodestar on {}", config.bind);
    HttpServer::new(move || {
        let backend = backend.clone();
        App::new()
            .wrap(request_logger())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .configure(move |cfg| backend.mount(cfg))
    })
    .workers(config.workers)
    .bind(&config.bind)?
    .run()
    .await
    .map_err(anyhow::Error::from)
}
