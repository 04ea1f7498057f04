#![allow(dead_code)]

use lectio::address::Address;
use lectio::canon::{Canon, Position};
use lectio::source::{VerseRecord, VerseTable, Word};

// Every book gets 2 to 4 chapters and every chapter 3 to 7 verses.
pub fn chapters_in(book: Position) -> u32 {
    2 + u32::from(book) % 3
}

pub fn verses_in(book: Position, chapter: u32) -> u32 {
    3 + (u32::from(book) + chapter) % 5
}

/// Every address of the synthetic text, in reading order.
pub fn every_address() -> Vec<Address> {
    let mut addresses = Vec::new();
    for book in Canon::new_testament().iter() {
        let b = book.position();
        for c in 1..=chapters_in(b) {
            for v in 1..=verses_in(b, c) {
                addresses.push(Address::new(b, c, v));
            }
        }
    }
    addresses
}

pub fn word(text: &str) -> Word {
    Word {
        text: text.to_string(),
        word: text.to_string(),
        normalized: text.to_lowercase(),
        lemma: text.to_lowercase(),
        part_of_speech: "N-".to_string(),
        parse: "----NSM-".to_string(),
    }
}

/// The synthetic text with records deliberately out of order.
pub fn fixture() -> VerseTable {
    fixture_without(|_| false)
}

/// Like [`fixture`], leaving out every address for which `skip` is true.
pub fn fixture_without(skip: impl Fn(&Address) -> bool) -> VerseTable {
    let mut addresses: Vec<Address> = every_address().into_iter().filter(|a| !skip(a)).collect();
    addresses.sort_by_key(|a| (u32::from(a.book()) * 37 + a.chapter() * 101 + a.verse() * 53) % 97);
    addresses
        .into_iter()
        .map(|a| VerseRecord::new(a, vec![word(&format!("w{}.{}.{}", a.book(), a.chapter(), a.verse()))]))
        .collect()
}

pub fn last_address_of(book: Position) -> Address {
    let chapter = chapters_in(book);
    Address::new(book, chapter, verses_in(book, chapter))
}
