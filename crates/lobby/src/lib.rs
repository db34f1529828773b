//! Realtime presence.
//!
//! Every authenticated WebSocket joins the [`Lobby`] as a [`Player`]
//! at a random spawn point. Movement is relayed to the other sockets,
//! and chat lines are broadcast to all of them.
//!
//! Frames are JSON text of the form `{"event": <name>, "data": <payload>}`.
mod handlers;
mod lobby;
mod message;
mod player;

pub use handlers::*;
pub use lobby::*;
pub use message::*;
pub use player::*;
