//! The canonical book registry.
//!
//! Books are identified by their position in canonical reading order. Full
//! names, abbreviations and alternate abbreviations are alternate keys, all
//! derived from the single ordered list given to [`Canon::new`] so that the
//! lookup tables can never disagree with each other.

// used to keep the one-to-one mappings between names and positions
use bimap::BiMap;
use lazy_static::lazy_static;

use std::fmt;

use crate::error::{LectioError, Result};

// ------------- Position -------------
pub type Position = u8;

/// Static table for the New Testament: (position, full name, abbreviation, title, alternate abbreviation).
const NEW_TESTAMENT: [(Position, &str, &str, &str, &str); 27] = [
    (1, "Matthew", "Mt", "The Gospel According to Matthew", "Matt"),
    (2, "Mark", "Mk", "The Gospel According to Mark", "Mark"),
    (3, "Luke", "Lk", "The Gospel According to Luke", "Luke"),
    (4, "John", "Jn", "The Gospel According to John", "John"),
    (5, "Acts", "Acts", "The Acts of the Apostles", "Acts"),
    (6, "Romans", "Rom", "The Letter to the Romans", "Rom"),
    (7, "1 Corinthians", "1Co", "The First Letter to the Corinthians", "1Cor"),
    (8, "2 Corinthians", "2Co", "The Second Letter to the Corinthians", "2Cor"),
    (9, "Galatians", "Gal", "The Letter to the Galatians", "Gal"),
    (10, "Ephesians", "Eph", "The Letter to the Ephesians", "Eph"),
    (11, "Philippians", "Phil", "The Letter to the Philippians", "Phil"),
    (12, "Colossians", "Col", "The Letter to the Colossians", "Col"),
    (13, "1 Thessalonians", "1Th", "The First Letter to the Thessalonians", "1Thess"),
    (14, "2 Thessalonians", "2Th", "The Second Letter to the Thessalonians", "2Thess"),
    (15, "1 Timothy", "1Ti", "The First Letter to Timothy", "1Tim"),
    (16, "2 Timothy", "2Ti", "The Second Letter to Timothy", "2Tim"),
    (17, "Titus", "Tit", "The Letter to Titus", "Titus"),
    (18, "Philemon", "Phm", "The Letter to Philemon", "Philem"),
    (19, "Hebrews", "Heb", "The Letter to the Hebrews", "Heb"),
    (20, "James", "Jas", "The Letter of James", "Jas"),
    (21, "1 Peter", "1Pe", "The First Letter of Peter", "1Pet"),
    (22, "2 Peter", "2Pe", "The Second Letter of Peter", "2Pet"),
    (23, "1 John", "1Jn", "The First Letter of John", "1John"),
    (24, "2 John", "2Jn", "The Second Letter of John", "2John"),
    (25, "3 John", "3Jn", "The Third Letter of John", "3John"),
    (26, "Jude", "Jude", "The Letter of Jude", "Jude"),
    (27, "Revelation", "Rev", "The Revelation to John", "Rev"),
];

lazy_static! {
    static ref NEW_TESTAMENT_CANON: Canon = Canon::new(
        NEW_TESTAMENT
            .iter()
            .map(|&(position, full_name, abbreviation, title, alternate)| {
                BookDescriptor::new(position, full_name, abbreviation, alternate, title)
            })
            .collect()
    )
    .expect("the New Testament table is contiguous and duplicate free");
}

// ------------- BookDescriptor -------------
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookDescriptor {
    position: Position,
    full_name: String,
    abbreviation: String,
    alternate_abbreviation: String,
    title: String,
}

impl BookDescriptor {
    pub fn new(
        position: Position,
        full_name: &str,
        abbreviation: &str,
        alternate_abbreviation: &str,
        title: &str,
    ) -> Self {
        Self {
            position,
            full_name: full_name.to_string(),
            abbreviation: abbreviation.to_string(),
            alternate_abbreviation: alternate_abbreviation.to_string(),
            title: title.to_string(),
        }
    }
    pub fn position(&self) -> Position {
        self.position
    }
    pub fn full_name(&self) -> &str {
        &self.full_name
    }
    pub fn abbreviation(&self) -> &str {
        &self.abbreviation
    }
    pub fn alternate_abbreviation(&self) -> &str {
        &self.alternate_abbreviation
    }
    pub fn title(&self) -> &str {
        &self.title
    }
}
impl fmt::Display for BookDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.full_name)
    }
}

// ------------- BookIdentifier -------------
/// Anything a book can be looked up by. Integers only ever match positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookIdentifier<'a> {
    Position(Position),
    Name(&'a str),
}
impl From<Position> for BookIdentifier<'_> {
    fn from(position: Position) -> Self {
        BookIdentifier::Position(position)
    }
}
impl<'a> From<&'a str> for BookIdentifier<'a> {
    fn from(name: &'a str) -> Self {
        BookIdentifier::Name(name)
    }
}
impl<'a> From<&'a String> for BookIdentifier<'a> {
    fn from(name: &'a String) -> Self {
        BookIdentifier::Name(name.as_str())
    }
}
impl fmt::Display for BookIdentifier<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BookIdentifier::Position(position) => write!(f, "#{}", position),
            BookIdentifier::Name(name) => write!(f, "{}", name),
        }
    }
}

// ------------- Canon -------------
#[derive(Debug)]
pub struct Canon {
    books: Vec<BookDescriptor>,
    offsets: BiMap<Position, usize>,
    full_names: BiMap<String, Position>,
    abbreviations: BiMap<String, Position>,
    alternates: BiMap<String, Position>,
}

impl Canon {
    /// Builds a registry from books given in canonical order. Positions must
    /// run 1..=N without gaps, and no name may repeat within one naming scheme.
    pub fn new(books: Vec<BookDescriptor>) -> Result<Self> {
        let mut offsets = BiMap::new();
        let mut full_names = BiMap::new();
        let mut abbreviations = BiMap::new();
        let mut alternates = BiMap::new();
        for (offset, book) in books.iter().enumerate() {
            if usize::from(book.position) != offset + 1 {
                return Err(LectioError::Invariant(format!(
                    "book '{}' has position {} but is listed at offset {}",
                    book.full_name, book.position, offset
                )));
            }
            offsets.insert(book.position, offset);
            for (table, key, scheme) in [
                (&mut full_names, &book.full_name, "full name"),
                (&mut abbreviations, &book.abbreviation, "abbreviation"),
                (&mut alternates, &book.alternate_abbreviation, "alternate abbreviation"),
            ] {
                if table.insert_no_overwrite(key.clone(), book.position).is_err() {
                    return Err(LectioError::Invariant(format!(
                        "{} '{}' is used by more than one book",
                        scheme, key
                    )));
                }
            }
        }
        Ok(Self {
            books,
            offsets,
            full_names,
            abbreviations,
            alternates,
        })
    }
    /// The 27 books of the New Testament, built once per process.
    pub fn new_testament() -> &'static Canon {
        &NEW_TESTAMENT_CANON
    }
    /// Strings are tried as full name, then abbreviation, then alternate
    /// abbreviation; the first table that knows the name wins.
    pub fn resolve<'a>(&self, identifier: impl Into<BookIdentifier<'a>>) -> Option<&BookDescriptor> {
        let position = match identifier.into() {
            BookIdentifier::Position(position) => position,
            BookIdentifier::Name(name) => *self
                .full_names
                .get_by_left(name)
                .or_else(|| self.abbreviations.get_by_left(name))
                .or_else(|| self.alternates.get_by_left(name))?,
        };
        self.index_of(position).and_then(|offset| self.at(offset))
    }
    /// Like [`Canon::resolve`], but a miss becomes [`LectioError::UnknownBook`].
    pub fn require<'a>(&self, identifier: impl Into<BookIdentifier<'a>>) -> Result<&BookDescriptor> {
        let identifier = identifier.into();
        self.resolve(identifier)
            .ok_or_else(|| LectioError::UnknownBook(identifier.to_string()))
    }
    pub fn index_of(&self, position: Position) -> Option<usize> {
        self.offsets.get_by_left(&position).copied()
    }
    pub fn at(&self, offset: usize) -> Option<&BookDescriptor> {
        self.books.get(offset)
    }
    pub fn next(&self, position: Position) -> Option<&BookDescriptor> {
        self.index_of(position).and_then(|offset| self.at(offset + 1))
    }
    pub fn previous(&self, position: Position) -> Option<&BookDescriptor> {
        self.index_of(position)
            .and_then(|offset| offset.checked_sub(1))
            .and_then(|offset| self.at(offset))
    }
    pub fn first(&self) -> Option<&BookDescriptor> {
        self.books.first()
    }
    pub fn last(&self) -> Option<&BookDescriptor> {
        self.books.last()
    }
    pub fn len(&self) -> usize {
        self.books.len()
    }
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, BookDescriptor> {
        self.books.iter()
    }
}
