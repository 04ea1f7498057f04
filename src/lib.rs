//! Lectio – a reader and translation notebook for the Greek New Testament.
//!
//! The crate is organised around verse *addresses*: a (book, chapter, verse)
//! triple where the book is identified by its position in canonical order.
//! * A [`canon::Canon`] resolves full names (`1 Corinthians`), abbreviations
//!   (`1Co`), alternate abbreviations (`1Cor`) and positions (`7`) to the same
//!   [`canon::BookDescriptor`].
//! * A [`source::VerseSource`] hands out the annotated [`source::VerseRecord`]s
//!   of a book; [`source::VerseTable`] is the in-memory store and
//!   [`morphgnt`] fills one from MorphGNT text files.
//! * An [`extent::ExtentResolver`] discovers how many chapters a book has and
//!   how many verses a chapter has by scanning those records.
//! * A [`navigate::Navigator`] moves an address forwards and backwards across
//!   verse, chapter and book boundaries, and validates addresses typed by the
//!   user.
//! * A [`persist::Persistor`] keeps the user's own translation of each verse and
//!   the position to reopen at, in SQLite.
//!
//! ## Quick Start
//! ```
//! use lectio::{address::Address, canon::Canon, navigate::{Directive, Navigator}};
//! use lectio::source::{VerseRecord, VerseTable};
//!
//! let canon = Canon::new_testament();
//! let verses: VerseTable = [(1, 1, 1), (1, 1, 2), (1, 2, 1)]
//!     .into_iter()
//!     .map(|(b, c, v)| VerseRecord::new(Address::new(b, c, v), Vec::new()))
//!     .collect();
//! let navigator = Navigator::new(canon, &verses);
//! let here = Address::named(canon, "Matthew", 1, 2).unwrap();
//! let next = navigator.navigate(here, Directive::NextVerse).unwrap();
//! assert_eq!(next.label(canon), "Matthew 2:1");
//! ```
//!
//! The navigator is stateless apart from its extent cache: the caller owns the
//! current address and replaces it with whatever `navigate` returns.

pub mod address;
pub mod canon;
pub mod error;
pub mod extent;
pub mod morphgnt;
pub mod navigate;
pub mod persist;
pub mod settings;
pub mod source;

pub use error::{LectioError, Result};
