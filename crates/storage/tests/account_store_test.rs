//! AccountStore tests against a temporary directory

use alloy_primitives::Address;
use tempfile::TempDir;
use vrun_crypto::{PublicKey, SecretKey};
use vrun_storage::{AccountStore, LogEntry, LogEntryType, StorageError};

fn address() -> Address {
    "0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359".parse().unwrap()
}

fn pubkey(byte: u8) -> PublicKey {
    SecretKey::from_bytes(&[byte; 32]).unwrap().public_key().unwrap()
}

fn store() -> (TempDir, AccountStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = AccountStore::new(dir.path().join("db"), 17000);
    (dir, store)
}

#[test]
fn test_init_layout() {
    let (dir, store) = store();
    store.init_account(&address()).unwrap();

    let account = dir
        .path()
        .join("db")
        .join("17000")
        .join("0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359");
    assert_eq!(store.account_dir(&address()), account);

    let init = std::fs::read_to_string(account.join("init")).unwrap();
    assert!(init.parse::<u64>().unwrap() > 0);

    let seed = std::fs::read(account.join("seed")).unwrap();
    assert_eq!(seed.len(), 32);
    assert_eq!(store.read_seed(&address()).unwrap().expose_secret(), &seed[..]);
}

#[test]
#[cfg(unix)]
fn test_seed_file_private() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, store) = store();
    store.init_account(&address()).unwrap();

    let meta = std::fs::metadata(store.account_dir(&address()).join("seed")).unwrap();
    assert_eq!(meta.permissions().mode() & 0o777, 0o600);
}

#[test]
fn test_init_twice_fails_and_keeps_seed() {
    let (_dir, store) = store();
    store.init_account(&address()).unwrap();
    let before = store.read_seed(&address()).unwrap();

    assert!(matches!(
        store.init_account(&address()),
        Err(StorageError::AlreadyExists(_))
    ));
    let after = store.read_seed(&address()).unwrap();
    assert_eq!(before.expose_secret(), after.expose_secret());
}

#[test]
fn test_existing_seed_blocks_init_marker() {
    let (_dir, store) = store();
    let account = store.account_dir(&address());
    std::fs::create_dir_all(&account).unwrap();
    std::fs::write(account.join("seed"), [7u8; 32]).unwrap();

    assert!(matches!(
        store.init_account(&address()),
        Err(StorageError::AlreadyExists(path)) if path == account.join("seed")
    ));
    assert!(!account.join("init").exists());
    assert_eq!(std::fs::read(account.join("seed")).unwrap(), [7u8; 32]);
}

#[test]
fn test_missing_account() {
    let (_dir, store) = store();
    assert!(matches!(
        store.read_seed(&address()),
        Err(StorageError::AccountNotFound(_))
    ));
    assert!(matches!(
        store.list_keys(&address()),
        Err(StorageError::AccountNotFound(_))
    ));
}

#[test]
fn test_truncated_seed_rejected() {
    let (_dir, store) = store();
    let dir = store.account_dir(&address());
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("seed"), [1u8; 16]).unwrap();

    assert!(matches!(
        store.read_seed(&address()),
        Err(StorageError::InvalidSeedLength(16))
    ));
}

#[test]
fn test_create_key_and_read_index() {
    let (_dir, store) = store();
    store.init_account(&address()).unwrap();
    let pk = pubkey(1);

    assert!(!store.has_key(&address(), &pk));
    store.create_key(&address(), &pk, 7).unwrap();
    assert!(store.has_key(&address(), &pk));
    assert_eq!(store.keygen_index(&address(), &pk).unwrap(), 7);

    let log_path = store.account_dir(&address()).join(pk.to_hex()).join("log");
    let text = std::fs::read_to_string(log_path).unwrap();
    assert!(text.starts_with(r#"{"type":"keygen","time":"#));
    assert!(text.ends_with(",\"data\":7}\n"));
}

#[test]
fn test_create_key_is_exclusive() {
    let (_dir, store) = store();
    store.init_account(&address()).unwrap();
    let pk = pubkey(2);

    store.create_key(&address(), &pk, 0).unwrap();
    assert!(matches!(
        store.create_key(&address(), &pk, 1),
        Err(StorageError::AlreadyExists(_))
    ));
    assert_eq!(store.keygen_index(&address(), &pk).unwrap(), 0);
}

#[test]
fn test_append_and_read_log() {
    let (_dir, store) = store();
    store.init_account(&address()).unwrap();
    let pk = pubkey(3);
    store.create_key(&address(), &pk, 4).unwrap();

    store
        .append_log(&address(), &pk, &LogEntry::set_graffiti("hello"))
        .unwrap();
    store
        .append_log(&address(), &pk, &LogEntry::set_enabled(false))
        .unwrap();
    store.append_log(&address(), &pk, &LogEntry::exit()).unwrap();

    let kinds: Vec<LogEntryType> = store
        .read_log(&address(), &pk)
        .unwrap()
        .iter()
        .map(|e| e.kind)
        .collect();
    assert_eq!(
        kinds,
        [
            LogEntryType::Keygen,
            LogEntryType::SetGraffiti,
            LogEntryType::SetEnabled,
            LogEntryType::Exit
        ]
    );
    assert_eq!(store.keygen_index(&address(), &pk).unwrap(), 4);
}

#[test]
fn test_append_to_unknown_key() {
    let (_dir, store) = store();
    store.init_account(&address()).unwrap();

    assert!(matches!(
        store.append_log(&address(), &pubkey(4), &LogEntry::exit()),
        Err(StorageError::KeyNotFound(_))
    ));
    assert!(matches!(
        store.keygen_index(&address(), &pubkey(4)),
        Err(StorageError::KeyNotFound(_))
    ));
}

#[test]
fn test_first_line_must_be_keygen() {
    let (_dir, store) = store();
    store.init_account(&address()).unwrap();
    let pk = pubkey(5);

    let key_dir = store.account_dir(&address()).join(pk.to_hex());
    std::fs::create_dir_all(&key_dir).unwrap();
    std::fs::write(key_dir.join("log"), "{\"type\":\"exit\",\"time\":1}\n").unwrap();

    assert!(matches!(
        store.keygen_index(&address(), &pk),
        Err(StorageError::MalformedLog { .. })
    ));

    std::fs::write(key_dir.join("log"), "not json\n").unwrap();
    assert!(matches!(
        store.keygen_index(&address(), &pk),
        Err(StorageError::MalformedLog { .. })
    ));
}

#[test]
fn test_list_keys() {
    let (_dir, store) = store();
    store.init_account(&address()).unwrap();

    let mut expected = vec![pubkey(6), pubkey(7)];
    for (i, pk) in expected.iter().enumerate() {
        store.create_key(&address(), pk, i as u32).unwrap();
    }
    expected.sort_by_key(|k| k.to_bytes());

    assert_eq!(store.list_keys(&address()).unwrap(), expected);
}

#[test]
fn test_chains_are_separate() {
    let dir = tempfile::tempdir().unwrap();
    let mainnet = AccountStore::new(dir.path(), 1);
    let holesky = AccountStore::new(dir.path(), 17000);

    mainnet.init_account(&address()).unwrap();
    holesky.init_account(&address()).unwrap();

    assert_ne!(
        mainnet.read_seed(&address()).unwrap().expose_secret(),
        holesky.read_seed(&address()).unwrap().expose_secret()
    );
}
