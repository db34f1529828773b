//! Core identifiers, traits, and constants for lodestar.
//!
//! Shared by every crate in the workspace: typed IDs, the session and
//! challenge parameters, and the logging bootstrap used by the binary.

// ============================================================================
// TRAITS
// ============================================================================
/// Unique identifier trait for domain entities.
pub trait Unique<T = Self> {
    fn id(&self) -> ID<T>;
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Generic ID wrapper providing compile-time type safety over uuid::Uuid.
pub struct ID<T> {
    inner: uuid::Uuid,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn inner(&self) -> uuid::Uuid {
        self.inner
    }
    /// Cast ID<T> to ID<U> while preserving the underlying UUID.
    pub fn cast<U>(self) -> ID<U> {
        ID {
            inner: self.inner,
            marker: PhantomData,
        }
    }
}

impl<T> From<ID<T>> for uuid::Uuid {
    fn from(id: ID<T>) -> Self {
        id.inner()
    }
}
impl<T> From<uuid::Uuid> for ID<T> {
    fn from(inner: uuid::Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> TryFrom<&str> for ID<T> {
    type Error = uuid::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        uuid::Uuid::parse_str(s).map(Self::from)
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self {
            inner: uuid::Uuid::now_v7(),
            marker: PhantomData,
        }
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

impl<T> serde::Serialize for ID<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.inner.serialize(serializer)
    }
}
impl<'de, T> serde::Deserialize<'de> for ID<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        uuid::Uuid::deserialize(deserializer).map(Self::from)
    }
}

// ============================================================================
// SESSION PARAMETERS
// ============================================================================
/// Lifetime of an access token issued at login.
pub const ACCESS_TOKEN_DURATION: std::time::Duration = std::time::Duration::from_secs(60 * 60);
/// Lifetime of an access token reissued from a refresh token.
pub const REISSUE_TOKEN_DURATION: std::time::Duration = std::time::Duration::from_secs(300);
/// Lifetime of a refresh token.
pub const REFRESH_TOKEN_DURATION: std::time::Duration = std::time::Duration::from_secs(24 * 60 * 60);
/// Cookie carrying the access token.
pub const ACCESS_COOKIE: &str = "jwt";
/// Cookie carrying the refresh token.
pub const REFRESH_COOKIE: &str = "refreshJwt";

// ============================================================================
// ACCOUNT PARAMETERS
// ============================================================================
/// Minimum accepted password length.
pub const PASSWORD_MIN_LENGTH: usize = 8;
/// Longest accepted display name.
pub const NAME_MAX_LENGTH: usize = 64;
/// Longest accepted email address.
pub const EMAIL_MAX_LENGTH: usize = 255;
/// Length of the alphanumeric email verification token.
pub const VERIFY_TOKEN_LENGTH: usize = 64;
/// Minimum spacing between two verification emails.
pub const VERIFY_RESEND_COOLDOWN: std::time::Duration = std::time::Duration::from_secs(60);
/// Random bytes in a password reset token (hex encoded on the wire).
pub const RESET_TOKEN_BYTES: usize = 20;
/// Validity window of a password reset token.
pub const RESET_TOKEN_DURATION: std::time::Duration = std::time::Duration::from_secs(10 * 60);

// ============================================================================
// WALLET CHALLENGES
// ============================================================================
/// Exclusive upper bound for wallet challenge nonces.
pub const NONCE_BOUND: i64 = 9_999_999;
/// Message signed by the wallet when an account is created.
pub const SIGNUP_CHALLENGE: &str = "Creating new account account! Request: 0";
/// Prefix of the message signed to prove wallet control after signup.
pub const NONCE_CHALLENGE: &str = "Approve signature with nonce ";

// ============================================================================
// LOBBY
// ============================================================================
/// Horizontal spawn range for new players.
pub const SPAWN_X: std::ops::Range<i64> = 60..460;
/// Vertical spawn range for new players.
pub const SPAWN_Y: std::ops::Range<i64> = 50..550;
/// Number of rows returned by the leaderboard.
pub const LEADERBOARD_SIZE: usize = 10;

// ============================================================================
// TIME
// ============================================================================
/// Seconds since the unix epoch.
pub fn unix(time: std::time::SystemTime) -> i64 {
    time.duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

/// Seconds since the unix epoch, right now.
pub fn now() -> i64 {
    unix(std::time::SystemTime::now())
}

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize logging to the terminal and to `logs/`.
/// INFO goes to the terminal, DEBUG to `logs/all.log`, ERROR to `logs/error.log`.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let file = |path: &str| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .expect("open log file")
    };
    let every = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        file("logs/all.log"),
    );
    let error = simplelog::WriteLogger::new(
        log::LevelFilter::Error,
        config.clone(),
        file("logs/error.log"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, every, error]).expect("initialize logger");
}

/// Register Ctrl+C handler for immediate (non-graceful) termination.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!();
            log::warn!("interrupt received, exiting immediately");
            std::process::exit(0);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker;

    #[test]
    fn id_parses_its_own_display() {
        let id = ID::<Marker>::default();
        let back = ID::<Marker>::try_from(id.to_string().as_str()).unwrap();
        assert!(id == back);
    }
    #[test]
    fn id_serializes_as_plain_uuid() {
        let id = ID::<Marker>::default();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.inner()));
        let back = serde_json::from_str::<ID<Marker>>(&json).unwrap();
        assert!(id == back);
    }
    #[test]
    fn spawn_ranges_are_nonempty() {
        assert!(!SPAWN_X.is_empty());
        assert!(!SPAWN_Y.is_empty());
    }
}
