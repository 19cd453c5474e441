//! Key-identity management core for Keyport
//!
//! This crate provides:
//! - Polymorphic key records (local, offline, ledger, multisig view) with
//!   one shared capability set: name, type, public key, address
//! - Bech32 address rendering with prefix-keyed selection (acc/val/cons)
//! - Threshold-multisig views with deterministic composite addresses
//! - BIP-39 seed phrase generation, including caller-supplied entropy with
//!   strength validation and an accept/decline confirmation gate
//! - The keybase storage gateway (memory and file backends) and the
//!   add/delete/update/show lifecycle operations on top of it

pub mod address;
pub mod config;
pub mod error;
pub mod hd;
pub mod io;
pub mod keybase;
pub mod mnemonic;
pub mod multisig;
pub mod ops;
pub mod record;
pub mod secp256k1;

pub use address::{bech_key_output, AccountAddress, BechKeyOutFn, KeyOutput};
pub use config::{Bech32Prefixes, Config, OutputFormat};
pub use error::{KeyError, Result};
pub use io::PromptIo;
pub use keybase::{FileKeybase, Keybase, MemoryKeybase};
pub use mnemonic::{Mnemonic, MnemonicGenerator, MnemonicOutcome, MnemonicRequest};
pub use multisig::{validate_threshold, MultisigPubKey};
pub use ops::{DeleteOptions, PassphraseSource, ShowOptions};
pub use record::{KeyRecord, KeyType, PubKey};
pub use secp256k1::{Secp256k1PublicKey, Secp256k1SecretKey};
