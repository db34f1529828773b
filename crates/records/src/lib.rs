//! Chat history and the leaderboard.
//!
//! - [`Chat`] — An append-only chat line
//! - [`Score`] — A leaderboard row
//! - [`ChatRepository`], [`ScoreRepository`] — Storage seams
//!
//! With the `server` feature: the chat, score, and leaderboard handlers.
mod chat;
mod dto;
mod repository;
mod score;

pub use chat::*;
pub use dto::*;
pub use repository::*;
pub use score::*;

#[cfg(feature = "database")]
mod postgres;

#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
pub use handlers::*;
