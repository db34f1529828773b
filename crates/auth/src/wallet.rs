//! Wallet ownership proofs.
//!
//! Clients sign a challenge with `personal_sign` (EIP-191). The server
//! recovers the signing address and compares it with the claimed wallet.
use ethers::types::Signature;
use std::str::FromStr;

/// Lower-cased wallet address, used for storage and comparison.
pub fn normalize(address: &str) -> String {
    address.trim().to_lowercase()
}

/// Random challenge nonce in `[0, NONCE_BOUND)`.
pub fn nonce() -> i64 {
    use rand::Rng;
    rand::rng().random_range(0..lds_core::NONCE_BOUND)
}

/// Message a wallet signs to prove control for the given nonce.
pub fn challenge(nonce: i64) -> String {
    format!("{}{}", lds_core::NONCE_CHALLENGE, nonce)
}

/// Recovers the lower-cased `0x` address that signed `message`.
pub fn recover(message: &str, signature: &str) -> Option<String> {
    Signature::from_str(signature.trim())
        .ok()?
        .recover(message)
        .ok()
        .map(|address| format!("{:#x}", address))
}

/// True when `signature` over `message` was produced by `wallet`.
pub fn signed_by(wallet: &str, message: &str, signature: &str) -> bool {
    recover(message, signature)
        .map(|address| address == normalize(wallet))
        .unwrap_or(false)
}
