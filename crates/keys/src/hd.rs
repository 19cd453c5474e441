//! Hierarchical deterministic account derivation
//!
//! Accounts derive along the BIP-44 path `m/44'/118'/{account}'/0/{index}`
//! from a BIP-39 seed. Same mnemonic, account and index always reproduce
//! the same key.

use bip32::XPrv;

use crate::error::Result;
use crate::mnemonic::Mnemonic;
use crate::secp256k1::Secp256k1SecretKey;

/// BIP-44 coin type for account keys
pub const COIN_TYPE: u32 = 118;

/// Build the derivation path for an account/index pair
pub fn derivation_path(account: u32, index: u32) -> String {
    format!("m/44'/{}'/{}'/0/{}", COIN_TYPE, account, index)
}

/// Derive the secp256k1 secret key for one account/index pair
pub fn derive_secp256k1(
    mnemonic: &Mnemonic,
    bip39_passphrase: Option<&str>,
    account: u32,
    index: u32,
) -> Result<Secp256k1SecretKey> {
    let seed = mnemonic.to_seed(bip39_passphrase);
    let path = derivation_path(account, index).parse::<bip32::DerivationPath>()?;
    let child = XPrv::derive_from_path(seed, &path)?;
    let scalar: [u8; 32] = child.private_key().to_bytes().into();
    Secp256k1SecretKey::from_bytes(&scalar)
}
