//! File-backed keybase backend
//!
//! One JSON file per record, `<name>.key.json`, under the keybase home
//! directory. The directory is created on open with owner-only permissions.
//! Secrets are stored as plain hex; this backend verifies passphrases via
//! the salted digest but does not encrypt at rest.

use std::fs;
use std::path::{Path, PathBuf};

use super::{Keybase, StoredKey};
use crate::error::{KeyError, Result};
use crate::record::KeyRecord;
use crate::secp256k1::Secp256k1SecretKey;

const KEY_FILE_SUFFIX: &str = ".key.json";

/// Directory-backed keybase
#[derive(Debug)]
pub struct FileKeybase {
    dir: PathBuf,
}

impl FileKeybase {
    /// Open (creating if needed) a keybase rooted at `dir`
    pub fn open(dir: &Path) -> Result<Self> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
            }
        }
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn key_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}{}", name, KEY_FILE_SUFFIX))
    }

    fn load(&self, name: &str) -> Result<StoredKey> {
        let path = self.key_path(name);
        if !path.exists() {
            return Err(KeyError::KeyNotFound(name.to_string()));
        }
        let contents = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, stored: &StoredKey) -> Result<()> {
        let json = serde_json::to_string_pretty(stored)?;
        fs::write(self.key_path(stored.name()), json)?;
        Ok(())
    }
}

impl Keybase for FileKeybase {
    fn get(&self, name: &str) -> Result<KeyRecord> {
        self.load(name)?.to_record()
    }

    fn list(&self) -> Result<Vec<KeyRecord>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
                if let Some(name) = file_name.strip_suffix(KEY_FILE_SUFFIX) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        names.iter().map(|name| self.get(name)).collect()
    }

    fn create(
        &mut self,
        record: &KeyRecord,
        secret: Option<&Secp256k1SecretKey>,
        passphrase: Option<&str>,
    ) -> Result<()> {
        if record.name().contains(['/', '\\']) {
            return Err(KeyError::Store(format!(
                "invalid key name: {}",
                record.name()
            )));
        }
        self.save(&StoredKey::from_record(record, secret, passphrase)?)
    }

    fn delete(&mut self, name: &str, passphrase: &str, skip_pass: bool) -> Result<()> {
        self.load(name)?.check_delete(passphrase, skip_pass)?;
        fs::remove_file(self.key_path(name))?;
        Ok(())
    }

    fn update(&mut self, name: &str, old_pass: &str, new_pass: &str) -> Result<()> {
        let mut stored = self.load(name)?;
        stored.rekey(old_pass, new_pass)?;
        self.save(&stored)
    }

    fn exists(&self, name: &str) -> bool {
        self.key_path(name).exists()
    }
}
