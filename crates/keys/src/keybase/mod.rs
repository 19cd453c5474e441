//! Keybase storage gateway
//!
//! The gateway owns persistence of named key records behind a small trait:
//! get, list, create, delete, update. Two backends ship here: an
//! in-memory map and a plaintext JSON file store. Neither encrypts at
//! rest; local records carry a salted passphrase digest so wrong-password
//! answers can be detected without decrypting anything.
//!
//! Multisig views are derived values and are never stored.

pub mod file;
pub mod memory;

pub use file::FileKeybase;
pub use memory::MemoryKeybase;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{KeyError, Result};
use crate::record::{KeyRecord, KeyType, PubKey};
use crate::secp256k1::{Secp256k1PublicKey, Secp256k1SecretKey};

/// Storage gateway for named key records
///
/// Implementations provide at-most-one-writer-per-name consistency;
/// callers hold nothing across interactive prompts.
pub trait Keybase: Send {
    /// Fetch one record by name
    fn get(&self, name: &str) -> Result<KeyRecord>;

    /// All records, sorted by name
    fn list(&self) -> Result<Vec<KeyRecord>>;

    /// Store a record, replacing any existing entry with the same name
    ///
    /// Local records carry their secret and a verification passphrase;
    /// reference records (offline/ledger) carry neither.
    fn create(
        &mut self,
        record: &KeyRecord,
        secret: Option<&Secp256k1SecretKey>,
        passphrase: Option<&str>,
    ) -> Result<()>;

    /// Remove a record
    ///
    /// Reference records delete without a passphrase. Local records
    /// verify `passphrase` unless `skip_pass` is set.
    fn delete(&mut self, name: &str, passphrase: &str, skip_pass: bool) -> Result<()>;

    /// Re-key the passphrase of a local record
    fn update(&mut self, name: &str, old_pass: &str, new_pass: &str) -> Result<()>;

    /// Whether a record with this name exists
    fn exists(&self, name: &str) -> bool;
}

/// Salted passphrase digest for wrong-password detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PassAuth {
    salt: String,
    digest: String,
}

impl PassAuth {
    fn new(passphrase: &str) -> Self {
        let mut salt = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut salt);
        Self {
            salt: hex::encode(salt),
            digest: Self::digest_hex(&salt, passphrase),
        }
    }

    fn verify(&self, passphrase: &str) -> Result<()> {
        let salt = hex::decode(&self.salt).map_err(|e| KeyError::Store(e.to_string()))?;
        if Self::digest_hex(&salt, passphrase) != self.digest {
            return Err(KeyError::WrongPassword);
        }
        Ok(())
    }

    fn digest_hex(salt: &[u8], passphrase: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(passphrase.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Persisted form of one key record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoredKey {
    name: String,
    key_type: String,
    pub_key: Secp256k1PublicKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret_hex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    auth: Option<PassAuth>,
}

impl StoredKey {
    pub(crate) fn from_record(
        record: &KeyRecord,
        secret: Option<&Secp256k1SecretKey>,
        passphrase: Option<&str>,
    ) -> Result<Self> {
        if record.name().is_empty() {
            return Err(KeyError::Store("key name must not be empty".to_string()));
        }
        let pub_key = match record.pub_key() {
            PubKey::Secp256k1(pk) => pk,
            PubKey::Multisig(_) => {
                return Err(KeyError::Store(
                    "multisig views are derived and cannot be stored".to_string(),
                ))
            }
        };
        let path = match record {
            KeyRecord::Ledger { path, .. } => Some(path.clone()),
            _ => None,
        };
        Ok(Self {
            name: record.name().to_string(),
            key_type: record.key_type().to_string(),
            pub_key,
            path,
            secret_hex: secret.map(|s| hex::encode(s.to_bytes())),
            auth: passphrase.map(PassAuth::new),
        })
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn to_record(&self) -> Result<KeyRecord> {
        let key_type: KeyType = self.key_type.parse()?;
        Ok(match key_type {
            KeyType::Local => KeyRecord::new_local(&self.name, self.pub_key.clone()),
            KeyType::Offline => KeyRecord::new_offline(&self.name, self.pub_key.clone()),
            KeyType::Ledger => KeyRecord::new_ledger(
                &self.name,
                self.pub_key.clone(),
                self.path.clone().unwrap_or_default(),
            ),
        })
    }

    /// Offline and ledger entries are public-key references only
    pub(crate) fn is_reference(&self) -> bool {
        self.key_type != KeyType::Local.to_string()
    }

    pub(crate) fn verify_passphrase(&self, passphrase: &str) -> Result<()> {
        match &self.auth {
            Some(auth) => auth.verify(passphrase),
            None => Err(KeyError::WrongPassword),
        }
    }

    /// Delete precondition: references go freely, local entries verify
    /// unless the caller skips the check
    pub(crate) fn check_delete(&self, passphrase: &str, skip_pass: bool) -> Result<()> {
        if self.is_reference() || skip_pass {
            return Ok(());
        }
        self.verify_passphrase(passphrase)
    }

    /// Apply a passphrase change, verifying the old one first
    pub(crate) fn rekey(&mut self, old_pass: &str, new_pass: &str) -> Result<()> {
        if self.is_reference() {
            return Err(KeyError::Store("locally stored key required".to_string()));
        }
        self.verify_passphrase(old_pass)?;
        self.auth = Some(PassAuth::new(new_pass));
        Ok(())
    }
}
