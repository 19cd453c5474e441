//! Polymorphic key records
//!
//! A `KeyRecord` is the unit the keybase hands out: a named public key
//! with a storage flavor. Every variant satisfies the same capability set
//! (name, type, public key, address); callers never need to know which
//! variant they hold to render it.

use crate::address::AccountAddress;
use crate::multisig::MultisigPubKey;
use crate::secp256k1::Secp256k1PublicKey;

/// Storage flavor of a key record
///
/// Offline and Ledger records are public-key references only; the secret
/// lives elsewhere. A multisig view reports `Local` because it is derived
/// locally from its members, not a reference to external material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    Local,
    Offline,
    Ledger,
}

impl std::fmt::Display for KeyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyType::Local => write!(f, "local"),
            KeyType::Offline => write!(f, "offline"),
            KeyType::Ledger => write!(f, "ledger"),
        }
    }
}

impl std::str::FromStr for KeyType {
    type Err = crate::error::KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(KeyType::Local),
            "offline" => Ok(KeyType::Offline),
            "ledger" => Ok(KeyType::Ledger),
            _ => Err(crate::error::KeyError::Store(format!(
                "unknown key type: {}",
                s
            ))),
        }
    }
}

/// Public key held by a record: a plain curve point or a composite
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PubKey {
    Secp256k1(Secp256k1PublicKey),
    Multisig(MultisigPubKey),
}

impl PubKey {
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            PubKey::Secp256k1(pk) => pk.to_bytes().to_vec(),
            PubKey::Multisig(pk) => pk.to_bytes(),
        }
    }

    pub fn address(&self) -> AccountAddress {
        match self {
            PubKey::Secp256k1(pk) => pk.address(),
            PubKey::Multisig(pk) => pk.address(),
        }
    }
}

/// Named key identity, tagged by storage flavor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyRecord {
    /// Key whose secret is held by the local keybase
    Local { name: String, pub_key: PubKey },
    /// Reference to a key whose secret is kept offline
    Offline { name: String, pub_key: PubKey },
    /// Reference to a key held on a hardware device
    Ledger {
        name: String,
        pub_key: PubKey,
        path: String,
    },
    /// Derived threshold-multisig view, never persisted
    Multisig { name: String, pub_key: MultisigPubKey },
}

impl KeyRecord {
    pub fn new_local(name: impl Into<String>, pub_key: Secp256k1PublicKey) -> Self {
        KeyRecord::Local {
            name: name.into(),
            pub_key: PubKey::Secp256k1(pub_key),
        }
    }

    pub fn new_offline(name: impl Into<String>, pub_key: Secp256k1PublicKey) -> Self {
        KeyRecord::Offline {
            name: name.into(),
            pub_key: PubKey::Secp256k1(pub_key),
        }
    }

    pub fn new_ledger(
        name: impl Into<String>,
        pub_key: Secp256k1PublicKey,
        path: impl Into<String>,
    ) -> Self {
        KeyRecord::Ledger {
            name: name.into(),
            pub_key: PubKey::Secp256k1(pub_key),
            path: path.into(),
        }
    }

    pub fn new_multisig(name: impl Into<String>, pub_key: MultisigPubKey) -> Self {
        KeyRecord::Multisig {
            name: name.into(),
            pub_key,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            KeyRecord::Local { name, .. }
            | KeyRecord::Offline { name, .. }
            | KeyRecord::Ledger { name, .. }
            | KeyRecord::Multisig { name, .. } => name,
        }
    }

    pub fn key_type(&self) -> KeyType {
        match self {
            KeyRecord::Local { .. } | KeyRecord::Multisig { .. } => KeyType::Local,
            KeyRecord::Offline { .. } => KeyType::Offline,
            KeyRecord::Ledger { .. } => KeyType::Ledger,
        }
    }

    pub fn pub_key(&self) -> PubKey {
        match self {
            KeyRecord::Local { pub_key, .. }
            | KeyRecord::Offline { pub_key, .. }
            | KeyRecord::Ledger { pub_key, .. } => pub_key.clone(),
            KeyRecord::Multisig { pub_key, .. } => PubKey::Multisig(pub_key.clone()),
        }
    }

    pub fn address(&self) -> AccountAddress {
        self.pub_key().address()
    }
}
