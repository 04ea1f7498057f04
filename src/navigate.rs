//! Sequential navigation over the canon, and address validation.
//!
//! The navigator holds no current position. Callers pass the address they are
//! at together with a [`Directive`] and get the new address back; whoever owns
//! the session replaces its stored address with the result.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::address::{parse_reference, Address};
use crate::canon::{Canon, Position};
use crate::error::{LectioError, Result};
use crate::extent::ExtentResolver;
use crate::source::{VerseRecord, VerseSource};

// ------------- Directive -------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    NextVerse,
    PreviousVerse,
    /// Back to verse 1 of the current chapter, or, when already on verse 1,
    /// to verse 1 of the chapter before.
    StartOfChapter,
    StartOfNextChapter,
}

impl Directive {
    pub const ALL: [Directive; 4] = [
        Directive::NextVerse,
        Directive::PreviousVerse,
        Directive::StartOfChapter,
        Directive::StartOfNextChapter,
    ];
    pub fn name(&self) -> &'static str {
        match self {
            Directive::NextVerse => "next_verse",
            Directive::PreviousVerse => "previous_verse",
            Directive::StartOfChapter => "start_of_chapter",
            Directive::StartOfNextChapter => "start_of_next_chapter",
        }
    }
}
impl FromStr for Directive {
    type Err = LectioError;
    fn from_str(s: &str) -> Result<Self> {
        Directive::ALL
            .into_iter()
            .find(|directive| directive.name() == s)
            .ok_or_else(|| LectioError::UnknownDirective(s.to_string()))
    }
}
impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ------------- Navigator -------------
pub struct Navigator<'s, S: VerseSource> {
    canon: &'s Canon,
    extents: ExtentResolver<'s, S>,
}

impl<'s, S: VerseSource> Navigator<'s, S> {
    pub fn new(canon: &'s Canon, source: &'s S) -> Self {
        Self {
            canon,
            extents: ExtentResolver::new(source),
        }
    }
    pub fn canon(&self) -> &'s Canon {
        self.canon
    }
    pub fn extents(&self) -> &ExtentResolver<'s, S> {
        &self.extents
    }
    /// Moves from `current` according to `directive`.
    ///
    /// Fails only when `current` names a book outside the canon. Moves that
    /// would run past either end of the canon, or that hit a book or chapter
    /// without verse data, leave the address unchanged.
    pub fn navigate(&self, current: Address, directive: Directive) -> Result<Address> {
        let book = self.canon.require(current.book())?.position();
        let (chapter, verse) = (current.chapter(), current.verse());
        let moved = match directive {
            Directive::NextVerse => self.next_verse(book, chapter, verse),
            Directive::PreviousVerse => self.previous_verse(book, chapter, verse),
            Directive::StartOfChapter => self.start_of_chapter(book, chapter, verse),
            Directive::StartOfNextChapter => self.start_of_next_chapter(book, chapter),
        };
        match moved {
            Some(target) => {
                debug!(from=%current, to=%target, %directive, "navigated");
                Ok(target)
            }
            None => {
                debug!(at=%current, %directive, "navigation stays put");
                Ok(current)
            }
        }
    }
    /// [`Navigator::navigate`] with the directive given by name, e.g. `next_verse`.
    pub fn navigate_named(&self, current: Address, directive: &str) -> Result<Address> {
        self.navigate(current, directive.parse()?)
    }

    fn next_verse(&self, book: Position, chapter: u32, verse: u32) -> Option<Address> {
        let max_verse = present(self.extents.max_verse(book, chapter))?;
        if verse < max_verse {
            return Some(Address::new(book, chapter, verse + 1));
        }
        let max_chapter = present(self.extents.max_chapter(book))?;
        if chapter < max_chapter {
            return Some(Address::new(book, chapter + 1, 1));
        }
        let next = self.canon.next(book)?;
        Some(Address::new(next.position(), 1, 1))
    }
    fn previous_verse(&self, book: Position, chapter: u32, verse: u32) -> Option<Address> {
        if verse > 1 {
            return Some(Address::new(book, chapter, verse - 1));
        }
        if chapter > 1 {
            let max_verse = present(self.extents.max_verse(book, chapter - 1))?;
            return Some(Address::new(book, chapter - 1, max_verse));
        }
        let previous = self.canon.previous(book)?.position();
        let max_chapter = present(self.extents.max_chapter(previous))?;
        let max_verse = present(self.extents.max_verse(previous, max_chapter))?;
        Some(Address::new(previous, max_chapter, max_verse))
    }
    fn start_of_chapter(&self, book: Position, chapter: u32, verse: u32) -> Option<Address> {
        if verse != 1 {
            return Some(Address::new(book, chapter, 1));
        }
        if chapter > 1 {
            return Some(Address::new(book, chapter - 1, 1));
        }
        let previous = self.canon.previous(book)?.position();
        let max_chapter = present(self.extents.max_chapter(previous))?;
        Some(Address::new(previous, max_chapter, 1))
    }
    fn start_of_next_chapter(&self, book: Position, chapter: u32) -> Option<Address> {
        let max_chapter = present(self.extents.max_chapter(book))?;
        if chapter < max_chapter {
            return Some(Address::new(book, chapter + 1, 1));
        }
        let next = self.canon.next(book)?;
        Some(Address::new(next.position(), 1, 1))
    }

    /// True when the verse data holds the exact (book, chapter, verse).
    pub fn is_valid(&self, address: &Address) -> bool {
        self.extents.source().contains(address)
    }
    pub fn verse(&self, address: &Address) -> Option<&'s VerseRecord> {
        self.extents.source().verse(address)
    }
    /// Verse 1:1 of the first book in the canon.
    pub fn default_address(&self) -> Address {
        let book = self.canon.first().map_or(1, |book| book.position());
        Address::new(book, 1, 1)
    }
    /// Picks the address to open at: the stored one when it still has verse
    /// data, otherwise [`Navigator::default_address`].
    pub fn restore(&self, stored: Option<Address>) -> Address {
        match stored {
            Some(address) if self.is_valid(&address) => address,
            Some(address) => {
                warn!(stored=%address, "stored position has no verse data, starting at the beginning");
                self.default_address()
            }
            None => self.default_address(),
        }
    }
    /// Parses a typed reference and accepts it only if the verse exists.
    pub fn jump(&self, reference: &str) -> Result<Address> {
        let address = parse_reference(self.canon, reference)?;
        if self.is_valid(&address) {
            Ok(address)
        } else {
            Err(LectioError::InvalidAddress(address.label(self.canon)))
        }
    }
}

// zero extents mean missing data; the move is abandoned
fn present(extent: u32) -> Option<u32> {
    (extent > 0).then_some(extent)
}
