//! catalog — in-memory ordered collection of MO entries.
//!
//! A Catalog is created wholesale by `mo::load` (or `from_pairs`), then only
//! the `translated` side of an entry can change, by index. Entries are never
//! inserted or removed, so `index` always equals the position in the sequence
//! and `count()` stays what the file header said.

use byteorder::{ByteOrder, LittleEndian};
use serde::Serialize;
use std::path::Path;

use crate::consts::HASH_ENTRY_SIZE;
use crate::error::{MoError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub index: u32,
    pub original: String,
    pub translated: String,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    revision: u32,
    /// Raw hash table, `hash_size * 4` bytes, carried through unexamined.
    hash_table: Vec<u8>,
    entries: Vec<Entry>,
    modified: bool,
}

impl Catalog {
    /// Load a catalog from an MO file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        crate::mo::load(path)
    }

    /// Build a catalog from (original, translated) pairs with revision 0 and
    /// no hash table.
    pub fn from_pairs<I, O, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (O, T)>,
        O: Into<String>,
        T: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .enumerate()
            .map(|(i, (o, t))| Entry {
                index: i as u32,
                original: o.into(),
                translated: t.into(),
            })
            .collect();
        Self {
            revision: 0,
            hash_table: Vec::new(),
            entries,
            modified: false,
        }
    }

    pub fn with_revision(mut self, revision: u32) -> Self {
        self.revision = revision;
        self
    }

    /// Attach hash-table words (stored LE, as on disk).
    pub fn with_hash_words(mut self, words: &[u32]) -> Self {
        let mut raw = vec![0u8; words.len() * HASH_ENTRY_SIZE as usize];
        LittleEndian::write_u32_into(words, &mut raw);
        self.hash_table = raw;
        self
    }

    pub(crate) fn from_parts(revision: u32, hash_table: Vec<u8>, entries: Vec<Entry>) -> Self {
        Self {
            revision,
            hash_table,
            entries,
            modified: false,
        }
    }

    pub fn count(&self) -> u32 {
        self.entries.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn revision(&self) -> u32 {
        self.revision
    }

    /// Number of 4-byte hash-table slots.
    pub fn hash_size(&self) -> u32 {
        (self.hash_table.len() / HASH_ENTRY_SIZE as usize) as u32
    }

    pub fn hash_table(&self) -> &[u8] {
        &self.hash_table
    }

    /// True once any translation was replaced with a different text.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn get(&self, index: u32) -> Result<&Entry> {
        self.entries
            .get(index as usize)
            .ok_or(MoError::IndexOutOfRange {
                index,
                count: self.count(),
            })
    }

    /// Replace the translation of entry `index`. Text uses `\n` line breaks.
    pub fn set<S: Into<String>>(&mut self, index: u32, translated: S) -> Result<()> {
        let count = self.count();
        let entry = self
            .entries
            .get_mut(index as usize)
            .ok_or(MoError::IndexOutOfRange { index, count })?;
        let translated = translated.into();
        if entry.translated != translated {
            entry.translated = translated;
            self.modified = true;
        }
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::from_pairs([("Hello", "Bonjour"), ("Bye", "Au revoir")])
    }

    #[test]
    fn get_by_index() {
        let c = sample();
        assert_eq!(c.count(), 2);
        let e = c.get(1).unwrap();
        assert_eq!(e.index, 1);
        assert_eq!(e.original, "Bye");
        assert_eq!(e.translated, "Au revoir");
    }

    #[test]
    fn out_of_range() {
        let mut c = sample();
        assert!(matches!(
            c.get(2),
            Err(MoError::IndexOutOfRange { index: 2, count: 2 })
        ));
        assert!(matches!(
            c.set(7, "x"),
            Err(MoError::IndexOutOfRange { index: 7, count: 2 })
        ));
        assert!(!c.is_modified());
    }

    #[test]
    fn set_keeps_indices_and_count() {
        let mut c = sample();
        c.set(0, "Salut").unwrap();
        c.set(0, "Allô\nça va").unwrap();
        assert_eq!(c.count(), 2);
        for (pos, e) in c.iter().enumerate() {
            assert_eq!(e.index as usize, pos);
        }
        assert_eq!(c.get(0).unwrap().translated, "Allô\nça va");
        assert_eq!(c.get(0).unwrap().original, "Hello");
        assert!(c.is_modified());
    }

    #[test]
    fn same_text_is_not_a_modification() {
        let mut c = sample();
        c.set(1, "Au revoir").unwrap();
        assert!(!c.is_modified());
    }

    #[test]
    fn hash_words_are_le() {
        let c = sample().with_hash_words(&[1, 0x0a0b0c0d]);
        assert_eq!(c.hash_size(), 2);
        assert_eq!(c.hash_table(), &[1, 0, 0, 0, 0x0d, 0x0c, 0x0b, 0x0a]);
    }
}
