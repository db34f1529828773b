//! Lodestar Backend Binary
//!
//! Accounts, chat, leaderboard, and the realtime lobby in one server.
//! Configured through flags or environment variables (see `--help`).

#[tokio::main]
async fn main() {
    lds_core::log();
    lds_core::kys();
    if let Err(e) = lds_server::run().await {
        log::error!("server stopped: {:#}", e);
        std::process::exit(1);
    }
}
