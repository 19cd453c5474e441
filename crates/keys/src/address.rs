//! Account addresses and bech32 rendering
//!
//! A key has one 20-byte binary address. What varies is the textual
//! rendering: the same bytes are encoded under different human-readable
//! prefixes depending on the role they are shown in (account, validator
//! operator, consensus). The selector prefixes `acc`, `val` and `cons`
//! pick the rendering; everything else is rejected.

use crate::config::Bech32Prefixes;
use crate::error::{KeyError, Result};
use crate::record::KeyRecord;
use bech32::{Bech32, Hrp};
use serde::{Deserialize, Serialize};

/// 20-byte binary account address
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountAddress([u8; 20]);

impl AccountAddress {
    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Render under the given human-readable part
    pub fn to_bech32(&self, hrp: &str) -> Result<String> {
        encode_bech32(hrp, &self.0)
    }
}

impl std::fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}

impl std::fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccountAddress({})", self)
    }
}

fn encode_bech32(hrp: &str, data: &[u8]) -> Result<String> {
    let hrp = Hrp::parse(hrp).map_err(|e| KeyError::AddressEncoding(e.to_string()))?;
    bech32::encode::<Bech32>(hrp, data).map_err(|e| KeyError::AddressEncoding(e.to_string()))
}

/// Renderable view of one key record
///
/// This is the tuple the command layer prints, in text columns or JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyOutput {
    pub name: String,
    #[serde(rename = "type")]
    pub key_type: String,
    pub address: String,
    pub pub_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mnemonic: Option<String>,
}

/// Function rendering a record under one prefix family
pub type BechKeyOutFn = fn(&KeyRecord, &Bech32Prefixes) -> Result<KeyOutput>;

/// Resolve the selector prefix to a rendering function
///
/// `acc`, `val` and `cons` are the only recognized selectors; the empty
/// string and anything else fail.
pub fn bech_key_output(prefix: &str) -> Result<BechKeyOutFn> {
    match prefix {
        "acc" => Ok(account_key_output),
        "val" => Ok(validator_key_output),
        "cons" => Ok(consensus_key_output),
        _ => Err(KeyError::InvalidPrefix(prefix.to_string())),
    }
}

/// Render with the account address/pubkey prefixes
pub fn account_key_output(record: &KeyRecord, prefixes: &Bech32Prefixes) -> Result<KeyOutput> {
    key_output(record, &prefixes.account, &prefixes.account_pub)
}

/// Render with the validator operator prefixes
pub fn validator_key_output(record: &KeyRecord, prefixes: &Bech32Prefixes) -> Result<KeyOutput> {
    key_output(record, &prefixes.validator, &prefixes.validator_pub)
}

/// Render with the consensus node prefixes
pub fn consensus_key_output(record: &KeyRecord, prefixes: &Bech32Prefixes) -> Result<KeyOutput> {
    key_output(record, &prefixes.consensus, &prefixes.consensus_pub)
}

fn key_output(record: &KeyRecord, addr_hrp: &str, pub_hrp: &str) -> Result<KeyOutput> {
    Ok(KeyOutput {
        name: record.name().to_string(),
        key_type: record.key_type().to_string(),
        address: record.address().to_bech32(addr_hrp)?,
        pub_key: encode_bech32(pub_hrp, &record.pub_key().to_bytes())?,
        mnemonic: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secp256k1::Secp256k1SecretKey;
    use sha2::{Digest, Sha256};

    fn test_record() -> KeyRecord {
        let scalar: [u8; 32] = Sha256::digest(b"mySecret").into();
        let secret = Secp256k1SecretKey::from_bytes(&scalar).unwrap();
        KeyRecord::new_local("testkey", secret.public_key())
    }

    #[test]
    fn test_resolve_recognized_prefixes() {
        for prefix in ["acc", "val", "cons"] {
            let out_fn = bech_key_output(prefix).unwrap();
            let out = out_fn(&test_record(), &Bech32Prefixes::default()).unwrap();
            assert_eq!(out.name, "testkey");
            assert_eq!(out.key_type, "local");
        }
    }

    #[test]
    fn test_resolve_rejects_unknown_prefixes() {
        for prefix in ["", "???", "account", "ACC"] {
            let err = bech_key_output(prefix).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("invalid Bech32 prefix encoding provided: {}", prefix)
            );
        }
    }

    #[test]
    fn test_account_bech32_known_vector() {
        let out = account_key_output(&test_record(), &Bech32Prefixes::default()).unwrap();
        assert_eq!(out.address, "cosmos1q9dtl7cfmdec53t5t2g733qpgglvusqk6xdntl");
    }

    #[test]
    fn test_prefixes_share_bytes_but_differ_in_text() {
        let record = test_record();
        let prefixes = Bech32Prefixes::default();
        let acc = account_key_output(&record, &prefixes).unwrap();
        let val = validator_key_output(&record, &prefixes).unwrap();
        let cons = consensus_key_output(&record, &prefixes).unwrap();

        assert_ne!(acc.address, val.address);
        assert_ne!(val.address, cons.address);
        assert!(acc.address.starts_with("cosmos1"));
        assert!(val.address.starts_with("cosmosvaloper1"));
        assert!(cons.address.starts_with("cosmosvalcons1"));
    }

    #[test]
    fn test_address_hex_display_is_uppercase() {
        let record = test_record();
        assert_eq!(
            record.address().to_string(),
            "015ABFFB09DB738A45745A91E8C401423ECE4016"
        );
    }
}
