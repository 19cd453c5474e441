//! Key management subcommands
//!
//! The command layer is a thin shell: it parses flags into a `Config` and
//! option structs, wires the standard streams into a `PromptIo`, and
//! dispatches to the lifecycle operations. All interactive and storage
//! logic lives in `keyport-keys`.

use std::io::IsTerminal;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use keyport_keys::ops::{self, DeleteOptions, PassphraseSource, ShowOptions};
use keyport_keys::{Config, FileKeybase, MnemonicRequest, OutputFormat, PromptIo};
use keyport_rest::AppState;

#[derive(Parser)]
#[command(name = "keyport", about = "Manage named key identities", version)]
pub struct Cli {
    /// Keybase home directory
    #[arg(long, global = true, default_value = ".keyport")]
    pub home: PathBuf,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    pub output: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a new key with a fresh mnemonic
    ///
    /// Prompts for a passphrase twice. If a key with this name already
    /// exists, an explicit overwrite confirmation is required. The backup
    /// phrase is shown once; write it down.
    Add { name: String },

    /// Delete the given key
    ///
    /// Removing offline or ledger keys removes only the public key
    /// references stored locally; secrets held elsewhere are untouched.
    Delete {
        name: String,

        /// Skip confirmation prompt when deleting offline or ledger key references
        #[arg(long, short = 'y')]
        yes: bool,

        /// Remove the key unconditionally without asking for the passphrase
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Change the password used to protect a private key
    Update { name: String },

    /// Show key info for one name, or a multisig view over several
    Show {
        #[arg(required = true)]
        names: Vec<String>,

        /// Bech32 prefix family: acc, val or cons
        #[arg(long, default_value = "acc")]
        bech: String,

        /// K-of-N threshold for the multisig view
        #[arg(long, default_value_t = 0)]
        multisig_threshold: i64,

        /// Print only the address
        #[arg(long)]
        address: bool,

        /// Print only the public key
        #[arg(long)]
        pubkey: bool,
    },

    /// List all keys in the keybase
    List,

    /// Generate a seed phrase
    Mnemonic {
        /// Supply your own entropy instead of the system's
        #[arg(long)]
        unsafe_entropy: bool,
    },

    /// Serve the key management REST API
    Serve {
        /// Listen address
        #[arg(long, default_value = "127.0.0.1:1317")]
        listen: SocketAddr,
    },
}

/// Execute one parsed invocation
pub fn execute(cli: Cli) -> Result<()> {
    let output: OutputFormat = cli.output.parse()?;
    let cfg = Config::new(&cli.home).with_output(output);

    let stdin = std::io::stdin();
    let terminal = stdin.is_terminal();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();
    let mut prompt = std::io::stderr();
    let mut io = PromptIo::new(&mut input, &mut out, &mut prompt);
    if terminal {
        io = io.terminal();
    }

    match cli.command {
        Command::Add { name } => {
            let mut kb = FileKeybase::open(&cfg.home)?;
            ops::add(&mut kb, &mut io, &cfg, &name)?;
        }
        Command::Delete { name, yes, force } => {
            let mut kb = FileKeybase::open(&cfg.home)?;
            ops::delete(&mut kb, &mut io, &name, DeleteOptions { yes, force })?;
        }
        Command::Update { name } => {
            let mut kb = FileKeybase::open(&cfg.home)?;
            ops::update(
                &mut kb,
                &mut io,
                &name,
                PassphraseSource::Prompt,
                PassphraseSource::Prompt,
            )?;
        }
        Command::Show {
            names,
            bech,
            multisig_threshold,
            address,
            pubkey,
        } => {
            let kb = FileKeybase::open(&cfg.home)?;
            let opts = ShowOptions {
                bech_prefix: bech,
                multisig_threshold,
                address_only: address,
                pubkey_only: pubkey,
            };
            ops::show(&kb, &mut io, &cfg, &names, &opts)?;
        }
        Command::List => {
            let kb = FileKeybase::open(&cfg.home)?;
            ops::list(&kb, &mut io, &cfg)?;
        }
        Command::Mnemonic { unsafe_entropy } => {
            ops::mnemonic(
                &mut io,
                MnemonicRequest {
                    user_entropy: unsafe_entropy,
                },
            )?;
        }
        Command::Serve { listen } => {
            let keybase = FileKeybase::open(&cfg.home)?;
            let state = Arc::new(AppState::new(Box::new(keybase)));
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(keyport_rest::serve(listen, state))?;
        }
    }
    Ok(())
}
