use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;

use moedit::export::{export_file, import_file, ImportReport};
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
    base.join(format!("motest-tsv-{prefix}-{pid}-{t}-{id}"))
}

fn sample() -> Catalog {
    Catalog::from_pairs([
        ("", "Content-Type: text/plain; charset=UTF-8\n"),
        ("Open", "Ouvrir"),
        ("Line one\nLine two", "Ligne un\nLigne deux"),
        ("Tab\there", "Onglet\tici"),
    ])
}

#[test]
fn export_then_import_into_fresh_load() -> Result<()> {
    let root = unique_root("roundtrip");
    fs::create_dir_all(&root)?;
    let mo = root.join("fr.mo");
    let tsv = root.join("fr.tsv");

    save(&sample(), &mo)?;
    let c = load(&mo)?;
    assert_eq!(export_file(&c, &tsv, '\t')?, 4);

    // the header entry spans two physical lines (trailing '\n')
    let text = fs::read_to_string(&tsv)?;
    assert!(text.starts_with("2\t0\t\tContent-Type: text/plain; charset=UTF-8\n\n"));
    assert!(text.contains("2\t2\tLine one\\nLine two\tLigne un\nLigne deux\n"));

    let mut c2 = load(&mo)?;
    let rep = import_file(&mut c2, &tsv, '\t')?;
    assert_eq!(
        rep,
        ImportReport {
            rows: 4,
            updated: 0,
            unchanged: 4,
            failed: 0
        }
    );
    Ok(())
}

#[test]
fn edited_export_is_applied_and_saved() -> Result<()> {
    let root = unique_root("edit");
    fs::create_dir_all(&root)?;
    let mo = root.join("fr.mo");
    let tsv = root.join("edits.tsv");

    save(&sample(), &mo)?;
    fs::write(
        &tsv,
        "1\t1\tOpen\tOuvrir…\n\
         3\t2\tignored\tUne\nDeux\nTrois\n\
         1\t42\tnope\tnowhere\n",
    )?;

    let mut c = load(&mo)?;
    let rep = import_file(&mut c, &tsv, '\t')?;
    assert_eq!(rep.updated, 2);
    assert_eq!(rep.failed, 1);
    save(&c, &mo)?;

    let back = load(&mo)?;
    assert_eq!(back.get(1)?.translated, "Ouvrir…");
    assert_eq!(back.get(2)?.translated, "Une\nDeux\nTrois");
    assert_eq!(back.get(2)?.original, "Line one\nLine two");
    assert_eq!(back.get(3)?.translated, "Onglet\tici");
    assert_eq!(back.count(), 4);
    Ok(())
}
