//! Verse addresses and free-text references such as `John 3:16`, `1Co 13` or
//! `1 Corinthians 13.4`.

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

use crate::canon::{BookDescriptor, BookIdentifier, Canon, Position};
use crate::error::{LectioError, Result};

lazy_static! {
    static ref REFERENCE: Regex = Regex::new(
        r"^\s*(?P<book>[1-3]?\s*\p{L}[\p{L} ]*?)\s*(?P<chapter>\d+)(?:\s*[:.]\s*(?P<verse>\d+))?\s*$"
    )
    .expect("reference pattern compiles");
    static ref SPACES: Regex = Regex::new(r"\s+").expect("whitespace pattern compiles");
}

// ------------- Address -------------
/// A (book, chapter, verse) triple. Ordering follows the canon because books
/// are compared by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address {
    book: Position,
    chapter: u32,
    verse: u32,
}

impl Address {
    pub fn new(book: Position, chapter: u32, verse: u32) -> Self {
        Self { book, chapter, verse }
    }
    /// Resolves `book` through the canon before building the address.
    pub fn named<'a>(
        canon: &Canon,
        book: impl Into<BookIdentifier<'a>>,
        chapter: u32,
        verse: u32,
    ) -> Result<Self> {
        let book = canon.require(book)?;
        Ok(Self::new(book.position(), chapter, verse))
    }
    pub fn book(&self) -> Position {
        self.book
    }
    pub fn chapter(&self) -> u32 {
        self.chapter
    }
    pub fn verse(&self) -> u32 {
        self.verse
    }
    /// `John 3:16` style label, falling back to the raw position for books
    /// the canon does not know.
    pub fn label(&self, canon: &Canon) -> String {
        match canon.resolve(self.book) {
            Some(book) => format!("{} {}:{}", book.full_name(), self.chapter, self.verse),
            None => self.to_string(),
        }
    }
}
impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{} {}:{}", self.book, self.chapter, self.verse)
    }
}

// ------------- Parsing -------------
/// Parses a typed reference. The verse defaults to 1 when only a chapter is
/// given. Book names resolve exactly first and case-insensitively second.
/// Only the shape is checked here; whether the verse exists is up to
/// [`crate::navigate::Navigator::is_valid`].
pub fn parse_reference(canon: &Canon, text: &str) -> Result<Address> {
    let captures = REFERENCE.captures(text).ok_or_else(|| {
        LectioError::parse(
            format!("'{}' is not a reference of the form 'Book chapter:verse'", text.trim()),
            None,
            None,
        )
    })?;
    let name = SPACES.replace_all(&captures["book"], " ");
    let book = canon
        .resolve(&*name)
        .or_else(|| resolve_ignore_case(canon, &name))
        .ok_or_else(|| LectioError::UnknownBook(name.to_string()))?;
    let chapter = parse_number(&captures["chapter"], "chapter", captures.name("chapter").map(|m| m.start()))?;
    let verse = match captures.name("verse") {
        Some(m) => parse_number(m.as_str(), "verse", Some(m.start()))?,
        None => 1,
    };
    Ok(Address::new(book.position(), chapter, verse))
}

fn parse_number(digits: &str, what: &str, col: Option<usize>) -> Result<u32> {
    match digits.parse::<u32>() {
        Ok(0) => Err(LectioError::parse(format!("{} numbers start at 1", what), None, col)),
        Ok(n) => Ok(n),
        Err(e) => Err(LectioError::parse(format!("invalid {} '{}': {}", what, digits, e), None, col)),
    }
}

// same priority as Canon::resolve: full names, then abbreviations, then alternates
fn resolve_ignore_case<'c>(canon: &'c Canon, name: &str) -> Option<&'c BookDescriptor> {
    let schemes: [fn(&BookDescriptor) -> &str; 3] = [
        BookDescriptor::full_name,
        BookDescriptor::abbreviation,
        BookDescriptor::alternate_abbreviation,
    ];
    schemes
        .iter()
        .find_map(|scheme| canon.iter().find(|&book| scheme(book).eq_ignore_ascii_case(name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Address> {
        parse_reference(Canon::new_testament(), text)
    }

    #[test]
    fn parses_all_naming_schemes() {
        let expected = Address::new(7, 13, 4);
        assert_eq!(parse("1 Corinthians 13:4").unwrap(), expected);
        assert_eq!(parse("1Co 13:4").unwrap(), expected);
        assert_eq!(parse("1Cor 13.4").unwrap(), expected);
        assert_eq!(parse("  1   Corinthians   13 : 4 ").unwrap(), expected);
    }

    #[test]
    fn verse_defaults_to_one() {
        assert_eq!(parse("Acts 2").unwrap(), Address::new(5, 2, 1));
    }

    #[test]
    fn book_names_fall_back_to_case_insensitive() {
        assert_eq!(parse("john 3:16").unwrap(), Address::new(4, 3, 16));
        assert_eq!(parse("REV 22:21").unwrap(), Address::new(27, 22, 21));
    }

    #[test]
    fn rejects_zero_and_garbage() {
        assert!(matches!(parse("John 0:1"), Err(LectioError::Parse { .. })));
        assert!(matches!(parse("John 3:0"), Err(LectioError::Parse { .. })));
        assert!(matches!(parse("3:16"), Err(LectioError::Parse { .. })));
        assert!(matches!(parse("John 99999999999:1"), Err(LectioError::Parse { .. })));
        assert!(matches!(parse("Genesis 1:1"), Err(LectioError::UnknownBook(_))));
    }

    #[test]
    fn labels_use_full_names() {
        let canon = Canon::new_testament();
        assert_eq!(Address::new(23, 1, 9).label(canon), "1 John 1:9");
        assert_eq!(Address::new(99, 1, 9).label(canon), "#99 1:9");
    }
}
