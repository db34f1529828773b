//! Accounts, sessions, and identity proofs.
//!
//! JWT access/refresh tokens, Argon2 password hashing, and wallet
//! signature recovery for personal-sign challenges.
//!
//! ## Identity Types
//!
//! - [`Member`] — Registered account and its lifecycle fields
//! - [`Identity`] — The public slice of a member carried inside tokens
//! - [`Grant`] — Issued token pair held in the refresh table
//!
//! ## Security
//!
//! - [`Crypto`] — JWT signing and verification (access and refresh keys)
//! - [`Claims`] — JWT payload structure
//! - [`Tokens`] — In-memory refresh-token table
//! - [`password`] — Argon2 hashing and verification
//! - [`wallet`] — Signature recovery and nonce challenges
//!
//! ## Server
//!
//! With the `server` feature: HTTP handlers, the [`Auth`] extractor,
//! and [`Failure`], the JSON error type shared by every route.
mod claims;
mod crypto;
mod dto;
mod member;
mod repository;
mod tokens;
pub mod password;
pub mod wallet;

pub use claims::*;
pub use crypto::*;
pub use dto::*;
pub use member::*;
pub use repository::*;
pub use tokens::*;

#[cfg(feature = "database")]
mod postgres;

#[cfg(feature = "server")]
mod cookies;
#[cfg(feature = "server")]
mod failure;
#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
mod middleware;
#[cfg(feature = "server")]
pub use cookies::*;
#[cfg(feature = "server")]
pub use failure::*;
#[cfg(feature = "server")]
pub use handlers::*;
#[cfg(feature = "server")]
pub use middleware::*;
