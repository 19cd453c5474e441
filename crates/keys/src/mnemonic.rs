//! Seed phrase generation
//!
//! Implements BIP-39 phrase handling plus the interactive generation
//! protocol: either 256 bits from the OS CSPRNG (no questions asked), or
//! caller-supplied entropy text that is strength-checked, hashed to a
//! 32-byte seed, and gated behind an explicit accept/decline answer.

use rand::rngs::OsRng;
use rand::RngCore;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{KeyError, Result};
use crate::io::PromptIo;

/// Entropy for the default generation path: 256 bits, 24 words
const ENTROPY_BYTES: usize = 32;

/// Minimum length of caller-supplied entropy text
///
/// 256 bits is 43 characters in a 64-symbol alphabet.
const MIN_ENTROPY_CHARS: usize = 43;

/// BIP-39 mnemonic phrase wrapper
///
/// The phrase is held as a `SecretString` so it never shows up in logs,
/// and the buffer is zeroed on drop. `Debug` hides the words.
#[derive(ZeroizeOnDrop)]
pub struct Mnemonic {
    #[zeroize(skip)] // bip39::Mnemonic holds no Zeroize impl, handled via phrase
    inner: bip39::Mnemonic,
    phrase: SecretString,
}

impl Mnemonic {
    /// Generate a fresh 24-word mnemonic from the OS CSPRNG
    pub fn generate() -> Result<Self> {
        let mut entropy = [0u8; ENTROPY_BYTES];
        OsRng.fill_bytes(&mut entropy);
        let mnemonic = Self::from_entropy(&entropy);
        entropy.zeroize();
        mnemonic
    }

    /// Derive the word sequence for the given entropy bytes
    ///
    /// Deterministic: the same bytes always yield the same words.
    pub fn from_entropy(entropy: &[u8]) -> Result<Self> {
        let inner = bip39::Mnemonic::from_entropy(entropy)?;
        let phrase = inner.to_string();
        Ok(Self {
            inner,
            phrase: phrase.into(),
        })
    }

    /// Import an existing phrase, validating words and checksum
    pub fn from_phrase(phrase: &str) -> Result<Self> {
        let normalized = phrase.trim().to_lowercase();
        let inner = bip39::Mnemonic::parse_normalized(&normalized)?;
        Ok(Self {
            phrase: normalized.into(),
            inner,
        })
    }

    /// Get the phrase text
    pub fn phrase(&self) -> &str {
        self.phrase.expose_secret()
    }

    /// Number of words in the phrase
    pub fn word_count(&self) -> usize {
        self.inner.word_count()
    }

    /// Derive the 64-byte seed (PBKDF2 over the phrase)
    pub fn to_seed(&self, passphrase: Option<&str>) -> [u8; 64] {
        self.inner.to_seed(passphrase.unwrap_or(""))
    }
}

impl std::fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mnemonic")
            .field("word_count", &self.word_count())
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

impl Zeroize for Mnemonic {
    fn zeroize(&mut self) {
        // phrase is zeroized through ZeroizeOnDrop; bip39::Mnemonic offers
        // no hook, so this is best-effort
    }
}

/// Parameters for one mnemonic generation
#[derive(Debug, Clone, Copy, Default)]
pub struct MnemonicRequest {
    /// Read entropy from the input stream instead of the OS CSPRNG
    pub user_entropy: bool,
}

/// Terminal outcome of a generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MnemonicOutcome {
    /// The phrase was written to the output stream
    Emitted,
    /// The user declined the phrase; nothing was written
    Declined,
}

enum GenState {
    Idle,
    CollectingEntropy,
    ValidatingStrength { text: String },
    AwaitingConfirmation { mnemonic: Mnemonic },
    Emitted,
    Declined,
}

/// Interactive mnemonic generation state machine
///
/// `Idle → CollectingEntropy → ValidatingStrength → AwaitingConfirmation
/// → {Emitted | Declined}`, where the secure-random path jumps from
/// `Idle` straight to emission. Declining is a success that emits
/// nothing; a missing answer is an error.
pub struct MnemonicGenerator {
    request: MnemonicRequest,
    state: GenState,
}

impl MnemonicGenerator {
    pub fn new(request: MnemonicRequest) -> Self {
        Self {
            request,
            state: GenState::Idle,
        }
    }

    /// Drive the state machine to a terminal outcome
    pub fn run(mut self, io: &mut PromptIo<'_>) -> Result<MnemonicOutcome> {
        loop {
            self.state = match self.state {
                GenState::Idle => {
                    if self.request.user_entropy {
                        GenState::CollectingEntropy
                    } else {
                        let mnemonic = Mnemonic::generate()?;
                        io.println(mnemonic.phrase())?;
                        GenState::Emitted
                    }
                }
                GenState::CollectingEntropy => {
                    let text = io.get_string(
                        "> WARNING: Generate at least 256-bits of entropy and \
                         enter the results here:",
                    )?;
                    GenState::ValidatingStrength { text }
                }
                GenState::ValidatingStrength { text } => {
                    if text.len() < MIN_ENTROPY_CHARS {
                        return Err(KeyError::InsufficientEntropy(text.len()));
                    }
                    let seed: [u8; 32] = Sha256::digest(text.as_bytes()).into();
                    GenState::AwaitingConfirmation {
                        mnemonic: Mnemonic::from_entropy(&seed)?,
                    }
                }
                GenState::AwaitingConfirmation { mnemonic } => {
                    io.prompt_line("Your generated mnemonic:")?;
                    io.prompt_line(mnemonic.phrase())?;
                    if io.get_confirmation("Use this mnemonic?")? {
                        io.println(mnemonic.phrase())?;
                        GenState::Emitted
                    } else {
                        GenState::Declined
                    }
                }
                GenState::Emitted => return Ok(MnemonicOutcome::Emitted),
                GenState::Declined => return Ok(MnemonicOutcome::Declined),
            };
        }
    }
}
