//! Threshold multisignature key views
//!
//! A multisig view is a synthetic key computed from an ordered set of
//! member public keys plus a threshold. It is never persisted; the address
//! is a pure function of the ordered inputs, so two views built from the
//! same members in the same order are byte-identical. Member order is
//! significant and is not canonicalized.

use crate::address::AccountAddress;
use crate::error::{KeyError, Result};
use crate::secp256k1::Secp256k1PublicKey;
use sha2::{Digest, Sha256};

/// Validate a multisig threshold against the member count
///
/// Checked in order: the threshold must be positive, the member count must
/// be positive, and the threshold must not exceed the member count.
pub fn validate_threshold(threshold: i64, member_count: i64) -> Result<()> {
    if threshold <= 0 {
        return Err(KeyError::InvalidThreshold);
    }
    if member_count <= 0 {
        return Err(KeyError::InvalidMemberCount);
    }
    if threshold > member_count {
        return Err(KeyError::UnreachableThreshold {
            k: threshold,
            n: member_count,
        });
    }
    Ok(())
}

/// Composite public key for a k-of-n multisignature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultisigPubKey {
    threshold: u32,
    pub_keys: Vec<Secp256k1PublicKey>,
}

impl MultisigPubKey {
    /// Build a composite key, validating the threshold against the members
    pub fn new(threshold: i64, pub_keys: Vec<Secp256k1PublicKey>) -> Result<Self> {
        validate_threshold(threshold, pub_keys.len() as i64)?;
        Ok(Self {
            threshold: threshold as u32,
            pub_keys,
        })
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn pub_keys(&self) -> &[Secp256k1PublicKey] {
        &self.pub_keys
    }

    /// Deterministic wire form: big-endian threshold followed by the
    /// compressed member keys in caller order
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(4 + 33 * self.pub_keys.len());
        bytes.extend_from_slice(&self.threshold.to_be_bytes());
        for key in &self.pub_keys {
            bytes.extend_from_slice(&key.to_bytes());
        }
        bytes
    }

    /// Composite address: SHA256 of the wire form, truncated to 20 bytes
    pub fn address(&self) -> AccountAddress {
        let digest = Sha256::digest(self.to_bytes());
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&digest[..20]);
        AccountAddress::new(bytes)
    }
}
