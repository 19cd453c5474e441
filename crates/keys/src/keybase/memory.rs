//! In-memory keybase backend
//!
//! Backing store for tests and for REST deployments that load their keys
//! at startup. Same semantics as the file backend, no persistence.

use std::collections::BTreeMap;

use super::{Keybase, StoredKey};
use crate::error::{KeyError, Result};
use crate::record::KeyRecord;
use crate::secp256k1::Secp256k1SecretKey;

/// Map-backed keybase
#[derive(Debug, Default)]
pub struct MemoryKeybase {
    keys: BTreeMap<String, StoredKey>,
}

impl MemoryKeybase {
    pub fn new() -> Self {
        Self::default()
    }

    fn get_stored(&self, name: &str) -> Result<&StoredKey> {
        self.keys
            .get(name)
            .ok_or_else(|| KeyError::KeyNotFound(name.to_string()))
    }
}

impl Keybase for MemoryKeybase {
    fn get(&self, name: &str) -> Result<KeyRecord> {
        self.get_stored(name)?.to_record()
    }

    fn list(&self) -> Result<Vec<KeyRecord>> {
        self.keys.values().map(StoredKey::to_record).collect()
    }

    fn create(
        &mut self,
        record: &KeyRecord,
        secret: Option<&Secp256k1SecretKey>,
        passphrase: Option<&str>,
    ) -> Result<()> {
        let stored = StoredKey::from_record(record, secret, passphrase)?;
        self.keys.insert(stored.name().to_string(), stored);
        Ok(())
    }

    fn delete(&mut self, name: &str, passphrase: &str, skip_pass: bool) -> Result<()> {
        self.get_stored(name)?.check_delete(passphrase, skip_pass)?;
        self.keys.remove(name);
        Ok(())
    }

    fn update(&mut self, name: &str, old_pass: &str, new_pass: &str) -> Result<()> {
        let stored = self
            .keys
            .get_mut(name)
            .ok_or_else(|| KeyError::KeyNotFound(name.to_string()))?;
        stored.rekey(old_pass, new_pass)
    }

    fn exists(&self, name: &str) -> bool {
        self.keys.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keybase_with(name: &str, pass: &str) -> MemoryKeybase {
        let mut kb = MemoryKeybase::new();
        let secret = Secp256k1SecretKey::generate(&mut rand::thread_rng());
        let record = KeyRecord::new_local(name, secret.public_key());
        kb.create(&record, Some(&secret), Some(pass)).unwrap();
        kb
    }

    #[test]
    fn test_get_unknown_key() {
        let kb = MemoryKeybase::new();
        let err = kb.get("missing").unwrap_err();
        assert_eq!(err.to_string(), "Key missing not found");
    }

    #[test]
    fn test_create_get_delete() {
        let mut kb = keybase_with("alice", "test1234");
        assert!(kb.exists("alice"));
        assert_eq!(kb.get("alice").unwrap().name(), "alice");

        assert!(matches!(
            kb.delete("alice", "bad-pass", false),
            Err(KeyError::WrongPassword)
        ));
        kb.delete("alice", "test1234", false).unwrap();
        assert!(!kb.exists("alice"));
    }

    #[test]
    fn test_delete_skip_pass() {
        let mut kb = keybase_with("alice", "test1234");
        kb.delete("alice", "", true).unwrap();
        assert!(!kb.exists("alice"));
    }

    #[test]
    fn test_update_passphrase() {
        let mut kb = keybase_with("alice", "test1234");
        assert!(matches!(
            kb.update("alice", "bad-pass", "next5678"),
            Err(KeyError::WrongPassword)
        ));
        kb.update("alice", "test1234", "next5678").unwrap();
        kb.delete("alice", "next5678", false).unwrap();
    }

    #[test]
    fn test_update_missing_key() {
        let mut kb = MemoryKeybase::new();
        assert!(matches!(
            kb.update("ghost", "a", "b"),
            Err(KeyError::KeyNotFound(_))
        ));
    }

    #[test]
    fn test_list_sorted() {
        let mut kb = keybase_with("charlie", "test1234");
        let secret = Secp256k1SecretKey::generate(&mut rand::thread_rng());
        kb.create(
            &KeyRecord::new_offline("alice", secret.public_key()),
            None,
            None,
        )
        .unwrap();

        let names: Vec<_> = kb.list().unwrap().iter().map(|r| r.name().to_string()).collect();
        assert_eq!(names, vec!["alice", "charlie"]);
    }

    #[test]
    fn test_create_replaces_existing() {
        let mut kb = keybase_with("alice", "test1234");
        let first = kb.get("alice").unwrap();

        let secret = Secp256k1SecretKey::generate(&mut rand::thread_rng());
        let record = KeyRecord::new_local("alice", secret.public_key());
        kb.create(&record, Some(&secret), Some("other1234")).unwrap();

        let second = kb.get("alice").unwrap();
        assert_ne!(first.address(), second.address());
    }
}
