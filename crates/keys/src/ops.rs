//! Key lifecycle operations
//!
//! Add, delete, update, show, list and mnemonic generation. Each
//! operation composes the leaf components, runs its interactive prompts
//! through a [`PromptIo`], and delegates persistence to the storage
//! gateway, surfacing its errors unchanged. One invocation completes
//! fully before another begins; nothing is held across prompts.

use tracing::{debug, info};

use crate::address::{account_key_output, bech_key_output, KeyOutput};
use crate::config::{Config, OutputFormat};
use crate::error::{KeyError, Result};
use crate::hd;
use crate::io::PromptIo;
use crate::keybase::Keybase;
use crate::mnemonic::{Mnemonic, MnemonicGenerator, MnemonicOutcome, MnemonicRequest};
use crate::multisig::MultisigPubKey;
use crate::record::{KeyRecord, KeyType, PubKey};

/// Name given to the synthetic multisig record built by `show`
const MULTISIG_KEY_NAME: &str = "multi";

/// Where the update operation obtains the new passphrase
#[derive(Debug, Clone)]
pub enum PassphraseSource {
    /// Ask interactively, twice
    Prompt,
    /// Use the given value as-is (REST path)
    Provided(String),
}

/// Options for the delete operation
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteOptions {
    /// Skip the confirmation prompt for reference-only deletion
    pub yes: bool,
    /// Skip passphrase verification for local deletion
    pub force: bool,
}

/// Options for the show operation
#[derive(Debug, Clone)]
pub struct ShowOptions {
    /// Bech32 selector prefix: `acc`, `val` or `cons`
    pub bech_prefix: String,
    /// Threshold for the multisig view; required with several names
    pub multisig_threshold: i64,
    /// Print only the address
    pub address_only: bool,
    /// Print only the public key
    pub pubkey_only: bool,
}

impl Default for ShowOptions {
    fn default() -> Self {
        Self {
            bech_prefix: "acc".to_string(),
            multisig_threshold: 0,
            address_only: false,
            pubkey_only: false,
        }
    }
}

/// Create a named local key from a fresh mnemonic
///
/// Prompts for a passphrase twice; an existing name requires an explicit
/// overwrite confirmation before it is replaced. The backup phrase is
/// shown exactly once.
pub fn add(
    kb: &mut dyn Keybase,
    io: &mut PromptIo<'_>,
    cfg: &Config,
    name: &str,
) -> Result<()> {
    if kb.exists(name) {
        let answer = io.get_confirmation(&format!("override the existing name {}", name))?;
        if !answer {
            return Err(KeyError::Aborted);
        }
    }

    let password = io.get_check_password(
        "Enter a passphrase to encrypt your key to disk:",
        "Repeat the passphrase:",
    )?;

    let mnemonic = Mnemonic::generate()?;
    let secret = hd::derive_secp256k1(&mnemonic, None, 0, 0)?;
    let record = KeyRecord::new_local(name, secret.public_key());
    kb.create(&record, Some(&secret), Some(&password))?;
    info!(name, "stored new local key");

    let mut out = account_key_output(&record, &cfg.bech32)?;
    match cfg.output {
        OutputFormat::Text => {
            print_key_output(io, cfg, &out)?;
            io.println("")?;
            io.println("**Important** write this mnemonic phrase in a safe place.")?;
            io.println(
                "It is the only way to recover your account if you ever forget your password.",
            )?;
            io.println("")?;
            io.println(mnemonic.phrase())?;
        }
        OutputFormat::Json => {
            out.mnemonic = Some(mnemonic.phrase().to_string());
            io.println(&serde_json::to_string(&out)?)?;
        }
    }
    Ok(())
}

/// Delete a key by name
///
/// Offline and ledger records are local references: deleting them needs a
/// confirmation (unless `yes`) but no passphrase. Local records need the
/// passphrase unless `force` is set.
pub fn delete(
    kb: &mut dyn Keybase,
    io: &mut PromptIo<'_>,
    name: &str,
    opts: DeleteOptions,
) -> Result<()> {
    let record = kb.get(name)?;

    if matches!(record.key_type(), KeyType::Ledger | KeyType::Offline) {
        if !opts.yes {
            let answer = io.get_confirmation("Key reference will be deleted. Continue?")?;
            if !answer {
                return Err(KeyError::Aborted);
            }
        }
        kb.delete(name, "", true)?;
        debug!(name, "deleted key reference");
        io.println("Public key reference deleted")?;
        return Ok(());
    }

    let oldpass = if opts.force {
        String::new()
    } else {
        io.get_password("DANGER - enter password to permanently delete key:")?
    };

    kb.delete(name, &oldpass, opts.force)?;
    debug!(name, "deleted local key");
    io.println("Key deleted forever (uh oh!)")?;
    Ok(())
}

/// Change the passphrase protecting a local key
///
/// Both passphrases come from explicit sources selected by the caller:
/// the CLI prompts for each, the REST path supplies both directly. The
/// record is only rewritten after the backend verifies the current
/// passphrase.
pub fn update(
    kb: &mut dyn Keybase,
    io: &mut PromptIo<'_>,
    name: &str,
    old_pass: PassphraseSource,
    new_pass: PassphraseSource,
) -> Result<()> {
    let oldpass = match old_pass {
        PassphraseSource::Prompt => io.get_password("Enter the current passphrase:")?,
        PassphraseSource::Provided(pass) => pass,
    };
    let newpass = match new_pass {
        PassphraseSource::Prompt => {
            io.get_check_password("Enter the new passphrase:", "Repeat the new passphrase:")?
        }
        PassphraseSource::Provided(pass) => pass,
    };

    kb.update(name, &oldpass, &newpass)?;
    debug!(name, "updated key passphrase");
    io.println("Password successfully updated!")?;
    Ok(())
}

/// Show one key, or a multisig view over several
///
/// A single name renders that record. Several names fetch each member in
/// the given order and build a threshold-multisig view named `multi`;
/// the threshold option must validate against the member count.
pub fn show(
    kb: &dyn Keybase,
    io: &mut PromptIo<'_>,
    cfg: &Config,
    names: &[String],
    opts: &ShowOptions,
) -> Result<()> {
    let record = if names.len() == 1 {
        kb.get(&names[0])?
    } else {
        let mut members = Vec::with_capacity(names.len());
        for name in names {
            match kb.get(name)?.pub_key() {
                PubKey::Secp256k1(pk) => members.push(pk),
                PubKey::Multisig(_) => {
                    return Err(KeyError::InvalidRequest(format!(
                        "key {} is itself a multisig view",
                        name
                    )))
                }
            }
        }
        let multi = MultisigPubKey::new(opts.multisig_threshold, members)?;
        KeyRecord::new_multisig(MULTISIG_KEY_NAME, multi)
    };

    if opts.address_only && opts.pubkey_only {
        return Err(KeyError::InvalidRequest(
            "cannot use both --address and --pubkey at once".to_string(),
        ));
    }

    let out_fn = bech_key_output(&opts.bech_prefix)?;
    let out = out_fn(&record, &cfg.bech32)?;

    if opts.address_only {
        io.println(&out.address)?;
    } else if opts.pubkey_only {
        io.println(&out.pub_key)?;
    } else {
        print_key_output(io, cfg, &out)?;
    }
    Ok(())
}

/// List every record in the keybase under the account encoding
pub fn list(kb: &dyn Keybase, io: &mut PromptIo<'_>, cfg: &Config) -> Result<()> {
    let outputs = kb
        .list()?
        .iter()
        .map(|record| account_key_output(record, &cfg.bech32))
        .collect::<Result<Vec<_>>>()?;
    print_key_outputs(io, cfg, &outputs)
}

/// Generate a seed phrase
pub fn mnemonic(io: &mut PromptIo<'_>, request: MnemonicRequest) -> Result<MnemonicOutcome> {
    MnemonicGenerator::new(request).run(io)
}

fn print_key_output(io: &mut PromptIo<'_>, cfg: &Config, out: &KeyOutput) -> Result<()> {
    match cfg.output {
        OutputFormat::Text => print_text_row(io, out),
        OutputFormat::Json => io.println(&serde_json::to_string(out)?),
    }
}

fn print_key_outputs(io: &mut PromptIo<'_>, cfg: &Config, outputs: &[KeyOutput]) -> Result<()> {
    match cfg.output {
        OutputFormat::Text => {
            for out in outputs {
                print_text_row(io, out)?;
            }
            Ok(())
        }
        OutputFormat::Json => io.println(&serde_json::to_string(outputs)?),
    }
}

fn print_text_row(io: &mut PromptIo<'_>, out: &KeyOutput) -> Result<()> {
    io.println("NAME:\tTYPE:\tADDRESS:\tPUBKEY:")?;
    io.println(&format!(
        "{}\t{}\t{}\t{}",
        out.name, out.key_type, out.address, out.pub_key
    ))
}
