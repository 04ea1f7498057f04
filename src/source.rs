//! Verse data: the read-only store that navigation scans.

// other keepers use HashMap with a fast hasher
use core::hash::BuildHasherDefault;
use seahash::SeaHasher;
use std::collections::HashMap;

use crate::address::Address;
use crate::canon::Position;

pub type VerseHasher = BuildHasherDefault<SeaHasher>;

// ------------- Word -------------
/// One annotated word of the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    /// As printed, including punctuation.
    pub text: String,
    /// Punctuation stripped.
    pub word: String,
    pub normalized: String,
    pub lemma: String,
    /// Two character part-of-speech code, e.g. `N-` or `V-`.
    pub part_of_speech: String,
    /// Eight character parse code, e.g. `----NSF-`.
    pub parse: String,
}

// ------------- VerseRecord -------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseRecord {
    address: Address,
    words: Vec<Word>,
}

impl VerseRecord {
    pub fn new(address: Address, words: Vec<Word>) -> Self {
        Self { address, words }
    }
    pub fn address(&self) -> Address {
        self.address
    }
    pub fn book(&self) -> Position {
        self.address.book()
    }
    pub fn chapter(&self) -> u32 {
        self.address.chapter()
    }
    pub fn verse(&self) -> u32 {
        self.address.verse()
    }
    pub fn words(&self) -> &[Word] {
        &self.words
    }
    /// The verse as printed, words separated by single spaces.
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// ------------- VerseSource -------------
/// Anything that can hand out the verse records of a book.
///
/// `records` must be restartable: every call yields the full set of records
/// for the book again, in no particular order.
pub trait VerseSource {
    fn records(&self, book: Position) -> impl Iterator<Item = &VerseRecord>;
    fn verse(&self, address: &Address) -> Option<&VerseRecord> {
        self.records(address.book())
            .find(|record| record.address() == *address)
    }
    fn contains(&self, address: &Address) -> bool {
        self.verse(address).is_some()
    }
}

// ------------- VerseTable -------------
/// In-memory verse store. Records keep the order they were added in.
#[derive(Debug, Default)]
pub struct VerseTable {
    books: HashMap<Position, Vec<VerseRecord>, VerseHasher>,
    index: HashMap<Address, usize, VerseHasher>,
}

impl VerseTable {
    pub fn new() -> Self {
        Self::default()
    }
    /// Adds a record, replacing any record already at the same address.
    /// Returns true when a record was replaced.
    pub fn insert(&mut self, record: VerseRecord) -> bool {
        let address = record.address();
        let records = self.books.entry(address.book()).or_default();
        match self.index.get(&address) {
            Some(&slot) => {
                records[slot] = record;
                true
            }
            None => {
                self.index.insert(address, records.len());
                records.push(record);
                false
            }
        }
    }
    /// Appends a word to the verse at `address`, creating the verse if needed.
    pub fn push_word(&mut self, address: Address, word: Word) {
        let records = self.books.entry(address.book()).or_default();
        match self.index.get(&address) {
            Some(&slot) => records[slot].words.push(word),
            None => {
                self.index.insert(address, records.len());
                records.push(VerseRecord::new(address, vec![word]));
            }
        }
    }
    /// Number of verses held.
    pub fn len(&self) -> usize {
        self.index.len()
    }
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
    /// Positions of the books that have at least one verse, ascending.
    pub fn books(&self) -> Vec<Position> {
        let mut books: Vec<Position> = self.books.keys().copied().collect();
        books.sort_unstable();
        books
    }
}

impl VerseSource for VerseTable {
    fn records(&self, book: Position) -> impl Iterator<Item = &VerseRecord> {
        self.books.get(&book).into_iter().flatten()
    }
    fn verse(&self, address: &Address) -> Option<&VerseRecord> {
        let slot = *self.index.get(address)?;
        self.books.get(&address.book())?.get(slot)
    }
}

impl FromIterator<VerseRecord> for VerseTable {
    fn from_iter<I: IntoIterator<Item = VerseRecord>>(iter: I) -> Self {
        let mut table = VerseTable::new();
        for record in iter {
            table.insert(record);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> Word {
        Word {
            text: text.to_string(),
            word: text.trim_end_matches(['.', ',']).to_string(),
            normalized: text.to_lowercase(),
            lemma: text.to_lowercase(),
            part_of_speech: "N-".to_string(),
            parse: "----NSF-".to_string(),
        }
    }

    #[test]
    fn words_accumulate_per_verse() {
        let mut table = VerseTable::new();
        let address = Address::new(1, 1, 1);
        table.push_word(address, word("Βίβλος"));
        table.push_word(Address::new(1, 1, 2), word("Ἀβραὰμ"));
        table.push_word(address, word("γενέσεως"));
        assert_eq!(table.len(), 2);
        assert_eq!(table.verse(&address).map(|v| v.text()), Some("Βίβλος γενέσεως".to_string()));
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut table = VerseTable::new();
        let address = Address::new(4, 11, 35);
        assert!(!table.insert(VerseRecord::new(address, vec![word("ἐδάκρυσεν")])));
        assert!(table.insert(VerseRecord::new(address, vec![word("ἐδάκρυσεν"), word("ὁ")])));
        assert_eq!(table.len(), 1);
        assert_eq!(table.records(4).count(), 1);
        assert_eq!(table.verse(&address).map(|v| v.words().len()), Some(2));
    }

    #[test]
    fn unknown_books_have_no_records() {
        let table = VerseTable::new();
        assert_eq!(table.records(3).count(), 0);
        assert!(!table.contains(&Address::new(3, 1, 1)));
    }
}
