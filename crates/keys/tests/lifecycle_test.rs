//! Integration tests for the key lifecycle
//!
//! These drive the full workflow against the file-backed keybase:
//! add with overwrite confirmation, show (single and multisig view),
//! update, and the two delete paths.

use std::io::Cursor;

use keyport_keys::ops::{self, DeleteOptions, PassphraseSource, ShowOptions};
use keyport_keys::{
    Config, FileKeybase, KeyRecord, Keybase, MnemonicRequest, OutputFormat, PromptIo,
    Secp256k1SecretKey,
};
use tempfile::TempDir;

fn run_io<F, T>(input: &str, f: F) -> (keyport_keys::Result<T>, String)
where
    F: FnOnce(&mut PromptIo<'_>) -> keyport_keys::Result<T>,
{
    let mut input = Cursor::new(input.to_string());
    let mut output = Vec::new();
    let mut prompt = Vec::new();
    let mut io = PromptIo::new(&mut input, &mut output, &mut prompt);
    let result = f(&mut io);
    (result, String::from_utf8(output).unwrap())
}

#[test]
fn test_add_show_update_delete_roundtrip() {
    let home = TempDir::new().unwrap();
    let mut kb = FileKeybase::open(home.path()).unwrap();
    let cfg = Config::new(home.path());

    // Add
    let (result, output) = run_io("test1234\ntest1234\n", |io| {
        ops::add(&mut kb, io, &cfg, "alice")
    });
    result.unwrap();
    assert!(output.contains("alice"));
    assert!(output.contains("cosmos1"));

    // Show
    let (result, output) = run_io("", |io| {
        ops::show(
            &kb,
            io,
            &cfg,
            &["alice".to_string()],
            &ShowOptions::default(),
        )
    });
    result.unwrap();
    assert!(output.contains("alice\tlocal\tcosmos1"));

    // Update, then the old passphrase must stop working
    let (result, _) = run_io("test1234\nnext5678\nnext5678\n", |io| {
        ops::update(
            &mut kb,
            io,
            "alice",
            PassphraseSource::Prompt,
            PassphraseSource::Prompt,
        )
    });
    result.unwrap();

    let (result, _) = run_io("test1234\n", |io| {
        ops::delete(&mut kb, io, "alice", DeleteOptions::default())
    });
    assert_eq!(result.unwrap_err().to_string(), "invalid account password");

    let (result, _) = run_io("next5678\n", |io| {
        ops::delete(&mut kb, io, "alice", DeleteOptions::default())
    });
    result.unwrap();
    assert!(!kb.exists("alice"));
}

#[test]
fn test_add_same_name_needs_overwrite_confirmation() {
    let home = TempDir::new().unwrap();
    let mut kb = FileKeybase::open(home.path()).unwrap();
    let cfg = Config::new(home.path());

    run_io("test1234\ntest1234\n", |io| {
        ops::add(&mut kb, io, &cfg, "alice")
    })
    .0
    .unwrap();
    let first = kb.get("alice").unwrap();

    // Same input again: the leading line is taken as the overwrite answer
    // and rejected, so the add fails and the record survives.
    let (result, _) = run_io("test1234\ntest1234\n", |io| {
        ops::add(&mut kb, io, &cfg, "alice")
    });
    assert!(result.is_err());
    assert_eq!(kb.get("alice").unwrap(), first);

    // Confirming replaces the record.
    let (result, _) = run_io("y\ntest1234\ntest1234\n", |io| {
        ops::add(&mut kb, io, &cfg, "alice")
    });
    result.unwrap();
    assert_ne!(kb.get("alice").unwrap().address(), first.address());
}

#[test]
fn test_multisig_view_is_stable_across_invocations() {
    let home = TempDir::new().unwrap();
    let mut kb = FileKeybase::open(home.path()).unwrap();
    let cfg = Config::new(home.path()).with_output(OutputFormat::Json);

    // Two members derived from the same phrase at indices 0 and 1, stored
    // as reference records.
    let phrase = keyport_keys::Mnemonic::generate().unwrap();
    for (name, index) in [("m0", 0u32), ("m1", 1u32)] {
        let secret = keyport_keys::hd::derive_secp256k1(&phrase, None, 0, index).unwrap();
        kb.create(
            &KeyRecord::new_offline(name, secret.public_key()),
            None,
            None,
        )
        .unwrap();
    }

    let names = vec!["m0".to_string(), "m1".to_string()];
    let opts = ShowOptions {
        multisig_threshold: 2,
        ..ShowOptions::default()
    };

    let (result, first) = run_io("", |io| ops::show(&kb, io, &cfg, &names, &opts));
    result.unwrap();
    let (result, second) = run_io("", |io| ops::show(&kb, io, &cfg, &names, &opts));
    result.unwrap();
    assert_eq!(first, second);

    let parsed: serde_json::Value = serde_json::from_str(first.trim()).unwrap();
    assert_eq!(parsed["name"], "multi");
    assert_eq!(parsed["type"], "local");

    // The composite address differs from both member addresses.
    let m0 = kb.get("m0").unwrap().address().to_bech32("cosmos").unwrap();
    let m1 = kb.get("m1").unwrap().address().to_bech32("cosmos").unwrap();
    let multi_addr = parsed["address"].as_str().unwrap();
    assert_ne!(multi_addr, m0);
    assert_ne!(multi_addr, m1);

    // Reversed member order yields a different composite address.
    let reversed = vec!["m1".to_string(), "m0".to_string()];
    let (result, swapped) = run_io("", |io| ops::show(&kb, io, &cfg, &reversed, &opts));
    result.unwrap();
    let parsed_swapped: serde_json::Value = serde_json::from_str(swapped.trim()).unwrap();
    assert_ne!(parsed_swapped["address"], parsed["address"]);
}

#[test]
fn test_offline_reference_delete_flows() {
    let home = TempDir::new().unwrap();
    let mut kb = FileKeybase::open(home.path()).unwrap();

    let secret = Secp256k1SecretKey::generate(&mut rand::thread_rng());
    kb.create(
        &KeyRecord::new_offline("watcher", secret.public_key()),
        None,
        None,
    )
    .unwrap();

    // Declined confirmation aborts.
    let (result, _) = run_io("n\n", |io| {
        ops::delete(&mut kb, io, "watcher", DeleteOptions::default())
    });
    assert_eq!(result.unwrap_err().to_string(), "aborted");

    // --yes skips the prompt entirely.
    let opts = DeleteOptions {
        yes: true,
        ..Default::default()
    };
    let (result, output) = run_io("", |io| ops::delete(&mut kb, io, "watcher", opts));
    result.unwrap();
    assert!(output.contains("Public key reference deleted"));
}

#[test]
fn test_mnemonic_operation_matches_generator_contract() {
    // Default path: emits 24 words without reading anything.
    let (result, output) = run_io("", |io| ops::mnemonic(io, MnemonicRequest::default()));
    result.unwrap();
    assert_eq!(output.trim_end().split_whitespace().count(), 24);

    // User entropy path with the known vector.
    let request = MnemonicRequest { user_entropy: true };
    let entropy = ":)".repeat(40);
    let (result, output) = run_io(&format!("{}\ny\n", entropy), |io| {
        ops::mnemonic(io, request)
    });
    result.unwrap();
    assert!(output.starts_with("volcano hungry midnight"));
    assert!(output.trim_end().ends_with("improve print"));
}
