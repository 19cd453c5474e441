//! Error types for key-identity operations
//!
//! Every interactive failure is single-shot: errors propagate to the
//! immediate caller and prompts are never retried.

use thiserror::Error;

/// Result type for key operations
pub type Result<T> = std::result::Result<T, KeyError>;

/// Errors that can occur while managing key identities
#[derive(Debug, Error)]
pub enum KeyError {
    /// Requested key name is not present in the keybase
    #[error("Key {0} not found")]
    KeyNotFound(String),

    /// Supplied passphrase does not match the stored one
    #[error("invalid account password")]
    WrongPassword,

    /// Multisig threshold is zero or negative
    #[error("threshold must be a positive integer")]
    InvalidThreshold,

    /// Multisig member count is zero or negative
    #[error("member count must be a positive integer")]
    InvalidMemberCount,

    /// Threshold exceeds the number of member keys
    #[error("threshold k of n multisignature: {n} < {k}")]
    UnreachableThreshold { k: i64, n: i64 },

    /// Empty or unrecognized bech32 selector prefix
    #[error("invalid Bech32 prefix encoding provided: {0}")]
    InvalidPrefix(String),

    /// Caller-supplied entropy text is below the minimum strength
    #[error(
        "256-bits is 43 characters in Base-64, and 100 in Base-6. \
         You entered {0}, and probably want more"
    )]
    InsufficientEntropy(usize),

    /// User declined an action that required assent
    #[error("aborted")]
    Aborted,

    /// The two passphrase entries differ
    #[error("passphrases do not match")]
    PassphraseMismatch,

    /// Entered passphrase is shorter than the minimum
    #[error("password must be at least {0} characters")]
    PasswordTooShort(usize),

    /// Input stream was exhausted while a prompt awaited an answer
    #[error("EOF")]
    EndOfInput,

    /// Confirmation answer was neither a yes nor a no
    #[error("unrecognized response: {0}")]
    UnrecognizedResponse(String),

    /// Caller combined options that exclude each other
    #[error("{0}")]
    InvalidRequest(String),

    /// Public key bytes failed to parse
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Secret key bytes are not a valid curve scalar
    #[error("invalid secret key")]
    InvalidSecretKey,

    /// Mnemonic phrase failed to parse or derive
    #[error("invalid mnemonic phrase: {0}")]
    Mnemonic(String),

    /// Hierarchical key derivation failed
    #[error("key derivation failed: {0}")]
    Derivation(String),

    /// Address encoding failed
    #[error("address encoding failed: {0}")]
    AddressEncoding(String),

    /// Storage backend failure
    #[error("keybase error: {0}")]
    Store(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<bip39::Error> for KeyError {
    fn from(err: bip39::Error) -> Self {
        KeyError::Mnemonic(err.to_string())
    }
}

impl From<bip32::Error> for KeyError {
    fn from(err: bip32::Error) -> Self {
        KeyError::Derivation(err.to_string())
    }
}
