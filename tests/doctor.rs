use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use byteorder::{ByteOrder, LittleEndian};

use moedit::doctor::check_file;
use moedit::mo::{load, save};
use moedit::Catalog;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let base = std::env::temp_dir();
    base.join(format!("motest-doctor-{prefix}-{pid}-{t}-{id}"))
}

#[test]
fn saved_file_is_clean_and_canonical() -> Result<()> {
    let root = unique_root("clean");
    fs::create_dir_all(&root)?;
    let path = root.join("ok.mo");

    let mut c = Catalog::from_pairs([("One", "Eins"), ("Two", "Zwei")]).with_hash_words(&[0, 1, 2]);
    c.set(0, "Einz")?;
    save(&c, &path)?;

    let rep = check_file(&path)?;
    assert!(rep.is_ok(), "{:?}", rep.issues);
    assert!(rep.canonical);
    assert_eq!(rep.header.count, 2);
    assert_eq!(rep.strings_checked, 4);
    assert_eq!(rep.path, path.display().to_string());

    let json = serde_json::to_string(&rep)?;
    assert!(json.contains("\"canonical\":true"));
    Ok(())
}

#[test]
fn padded_file_is_clean_but_not_canonical() -> Result<()> {
    let root = unique_root("padded");
    fs::create_dir_all(&root)?;
    let path = root.join("pad.mo");

    save(&Catalog::from_pairs([("a", "b")]), &path)?;
    let mut bytes = fs::read(&path)?;
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    fs::write(&path, &bytes)?;

    let rep = check_file(&path)?;
    assert!(rep.is_ok());
    assert!(!rep.canonical);
    // still loads fine
    assert_eq!(load(&path)?.get(0)?.translated, "b");
    Ok(())
}

#[test]
fn broken_offsets_are_listed() -> Result<()> {
    let root = unique_root("broken");
    fs::create_dir_all(&root)?;
    let path = root.join("bad.mo");

    save(&Catalog::from_pairs([("a", "b"), ("c", "d")]), &path)?;
    let mut bytes = fs::read(&path)?;
    // translated #1 offset (T=44, row 1 at 52, offset field at 56) -> far away
    LittleEndian::write_u32(&mut bytes[56..60], 10_000);
    fs::write(&path, &bytes)?;

    let rep = check_file(&path)?;
    assert_eq!(rep.issues_total, 1);
    assert_eq!(rep.issues[0].index, Some(1));
    assert_eq!(rep.issues[0].offset, 10_000);
    assert!(!rep.canonical);

    // load refuses the same file
    assert!(load(&path).is_err());
    Ok(())
}
