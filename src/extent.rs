//! Chapter and verse extents, discovered by scanning the verse data.
//!
//! The verse data is static for the life of the process, so every extent is
//! computed at most once and then served from a cache.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use tracing::warn;

use crate::canon::Position;
use crate::error::{LectioError, Result};
use crate::source::{VerseHasher, VerseRecord, VerseSource};

pub struct ExtentResolver<'s, S: VerseSource> {
    source: &'s S,
    chapters: Mutex<HashMap<Position, u32, VerseHasher>>,
    verses: Mutex<HashMap<(Position, u32), u32, VerseHasher>>,
}

impl<'s, S: VerseSource> ExtentResolver<'s, S> {
    pub fn new(source: &'s S) -> Self {
        Self {
            source,
            chapters: Mutex::new(HashMap::default()),
            verses: Mutex::new(HashMap::default()),
        }
    }
    pub fn source(&self) -> &'s S {
        self.source
    }
    /// Highest chapter number found for the book, 0 if it has no verses.
    pub fn max_chapter(&self, book: Position) -> u32 {
        // a poisoned cache still only holds complete scan results
        let mut chapters = self.chapters.lock().unwrap_or_else(PoisonError::into_inner);
        *chapters.entry(book).or_insert_with(|| {
            let max = self
                .source
                .records(book)
                .filter(|record| record.book() == book)
                .map(VerseRecord::chapter)
                .max()
                .unwrap_or(0);
            if max == 0 {
                warn!(book, "no verse data for book");
            }
            max
        })
    }
    /// Highest verse number found for the chapter, 0 if it has no verses.
    pub fn max_verse(&self, book: Position, chapter: u32) -> u32 {
        let mut verses = self.verses.lock().unwrap_or_else(PoisonError::into_inner);
        *verses.entry((book, chapter)).or_insert_with(|| {
            let max = self
                .source
                .records(book)
                .filter(|record| record.book() == book && record.chapter() == chapter)
                .map(VerseRecord::verse)
                .max()
                .unwrap_or(0);
            if max == 0 {
                warn!(book, chapter, "no verse data for chapter");
            }
            max
        })
    }
    /// [`ExtentResolver::max_chapter`], with an empty book reported as an error.
    pub fn require_max_chapter(&self, book: Position) -> Result<u32> {
        match self.max_chapter(book) {
            0 => Err(LectioError::EmptyExtent { book, chapter: None }),
            max => Ok(max),
        }
    }
    /// [`ExtentResolver::max_verse`], with an empty chapter reported as an error.
    pub fn require_max_verse(&self, book: Position, chapter: u32) -> Result<u32> {
        match self.max_verse(book, chapter) {
            0 => Err(LectioError::EmptyExtent { book, chapter: Some(chapter) }),
            max => Ok(max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::source::{VerseRecord, VerseTable};

    fn table(addresses: &[(Position, u32, u32)]) -> VerseTable {
        addresses
            .iter()
            .map(|&(b, c, v)| VerseRecord::new(Address::new(b, c, v), Vec::new()))
            .collect()
    }

    #[test]
    fn scans_unsorted_records() {
        let verses = table(&[(2, 1, 3), (2, 3, 2), (2, 1, 9), (2, 2, 4), (2, 1, 1), (3, 7, 7)]);
        let extents = ExtentResolver::new(&verses);
        assert_eq!(extents.max_chapter(2), 3);
        assert_eq!(extents.max_verse(2, 1), 9);
        assert_eq!(extents.max_verse(2, 2), 4);
        assert_eq!(extents.max_verse(2, 3), 2);
    }

    #[test]
    fn missing_data_is_zero() {
        let verses = table(&[(1, 1, 1)]);
        let extents = ExtentResolver::new(&verses);
        assert_eq!(extents.max_chapter(5), 0);
        assert_eq!(extents.max_verse(1, 2), 0);
        assert!(matches!(
            extents.require_max_chapter(5),
            Err(LectioError::EmptyExtent { book: 5, chapter: None })
        ));
        assert!(matches!(
            extents.require_max_verse(1, 2),
            Err(LectioError::EmptyExtent { book: 1, chapter: Some(2) })
        ));
        assert_eq!(extents.require_max_verse(1, 1).unwrap(), 1);
    }
}
