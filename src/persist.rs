// used for persistence
use rusqlite::{params, Connection, OptionalExtension};
use chrono::{DateTime, Utc};
use serde::ser::{Serialize, Serializer};

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::address::Address;
use crate::canon::Canon;
use crate::error::Result;

/// Saved translations nested by book full name, then chapter, then verse.
pub type Translations = BTreeMap<String, BTreeMap<u32, BTreeMap<u32, String>>>;

// books in canon order, names the canon does not know last
struct InCanonOrder<'t>(Vec<(&'t String, &'t BTreeMap<u32, BTreeMap<u32, String>>)>);

impl<'t> InCanonOrder<'t> {
    fn new(canon: &Canon, translations: &'t Translations) -> Self {
        let mut books: Vec<_> = translations.iter().collect();
        books.sort_by_key(|(book, _)| canon.resolve(book.as_str()).map_or(u8::MAX, |b| b.position()));
        Self(books)
    }
}
impl Serialize for InCanonOrder<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().copied())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceMode {
    InMemory,
    File(String),
}

impl PersistenceMode {
    /// `:memory:` selects an in-memory database, anything else is a file path.
    pub fn from_setting(database: &str) -> Self {
        match database {
            ":memory:" => PersistenceMode::InMemory,
            path => PersistenceMode::File(path.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedTranslation {
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
    pub saved_at: DateTime<Utc>,
}

pub struct Persistor {
    db: Connection,
}

impl Persistor {
    pub fn new(mode: PersistenceMode) -> Result<Self> {
        let db = match &mode {
            PersistenceMode::InMemory => Connection::open_in_memory()?,
            PersistenceMode::File(path) => {
                if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                Connection::open(path)?
            }
        };
        db.execute_batch(
            "
            create table if not exists Translation (
                Book text not null,
                Chapter integer not null,
                Verse integer not null,
                Text text not null,
                SavedAt text not null,
                constraint referenceable_Translation primary key (
                    Book,
                    Chapter,
                    Verse
                )
            );
            create table if not exists Position (
                Slot integer not null,
                Book text not null,
                Chapter integer not null,
                Verse integer not null,
                constraint single_Position check (
                    Slot = 1
                ),
                constraint referenceable_Position primary key (
                    Slot
                )
            );
            ",
        )?;
        info!(?mode, "persistence ready");
        Ok(Self { db })
    }
    /// Creates or overwrites the translation of one verse.
    pub fn save_translation(&self, book: &str, chapter: u32, verse: u32, text: &str) -> Result<()> {
        self.db
            .prepare_cached(
                "
                insert into Translation (
                    Book,
                    Chapter,
                    Verse,
                    Text,
                    SavedAt
                ) values (?, ?, ?, ?, ?)
                on conflict (Book, Chapter, Verse) do update set
                    Text = excluded.Text,
                    SavedAt = excluded.SavedAt
            ",
            )?
            .execute(params![book, chapter, verse, text, Utc::now()])?;
        debug!(book, chapter, verse, "translation saved");
        Ok(())
    }
    pub fn translation(&self, book: &str, chapter: u32, verse: u32) -> Result<Option<String>> {
        let text = self
            .db
            .prepare_cached(
                "
                select Text
                    from Translation
                    where Book = ?
                    and Chapter = ?
                    and Verse = ?
            ",
            )?
            .query_row(params![book, chapter, verse], |row| row.get(0))
            .optional()?;
        Ok(text)
    }
    pub fn translations(&self) -> Result<Translations> {
        let mut statement = self.db.prepare_cached(
            "
            select Book, Chapter, Verse, Text
                from Translation
        ",
        )?;
        let rows = statement.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, u32>(1)?,
                row.get::<_, u32>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;
        let mut translations = Translations::new();
        for row in rows {
            let (book, chapter, verse, text) = row?;
            translations
                .entry(book)
                .or_default()
                .entry(chapter)
                .or_default()
                .insert(verse, text);
        }
        Ok(translations)
    }
    /// Translations of `book` from `start` to `end` inclusive, both given as
    /// (chapter, verse), in reading order.
    pub fn translations_in_range(
        &self,
        book: &str,
        start: (u32, u32),
        end: (u32, u32),
    ) -> Result<Vec<SavedTranslation>> {
        let mut statement = self.db.prepare_cached(
            "
            select Chapter, Verse, Text, SavedAt
                from Translation
                where Book = ?
                and (Chapter, Verse) >= (?, ?)
                and (Chapter, Verse) <= (?, ?)
                order by Chapter, Verse
        ",
        )?;
        let rows = statement.query_map(params![book, start.0, start.1, end.0, end.1], |row| {
            Ok(SavedTranslation {
                chapter: row.get(0)?,
                verse: row.get(1)?,
                text: row.get(2)?,
                saved_at: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
    /// All translations as pretty printed JSON, nested book, chapter, verse.
    /// Books are written in canon order.
    pub fn export_json(&self, canon: &Canon) -> Result<String> {
        let translations = self.translations()?;
        Ok(serde_json::to_string_pretty(&InCanonOrder::new(canon, &translations))?)
    }
    /// Saves every translation in the nested JSON document, in one transaction.
    /// Returns the number of verses written.
    pub fn import_json(&self, json: &str) -> Result<usize> {
        let translations: Translations = serde_json::from_str(json)?;
        let transaction = self.db.unchecked_transaction()?;
        let mut written = 0;
        for (book, chapters) in &translations {
            for (chapter, verses) in chapters {
                for (verse, text) in verses {
                    self.save_translation(book, *chapter, *verse, text)?;
                    written += 1;
                }
            }
        }
        transaction.commit()?;
        info!(written, "translations imported");
        Ok(written)
    }
    /// Remembers `address` as the place to reopen at.
    pub fn save_position(&self, canon: &Canon, address: &Address) -> Result<()> {
        let book = canon.require(address.book())?;
        self.db
            .prepare_cached(
                "
                insert or replace into Position (
                    Slot,
                    Book,
                    Chapter,
                    Verse
                ) values (1, ?, ?, ?)
            ",
            )?
            .execute(params![book.full_name(), address.chapter(), address.verse()])?;
        Ok(())
    }
    /// The remembered position, if any. Rows naming a book the canon does not
    /// know, or holding values that are not positive numbers, are treated as
    /// absent.
    pub fn last_position(&self, canon: &Canon) -> Result<Option<Address>> {
        let stored = self
            .db
            .prepare_cached(
                "
                select Book, Chapter, Verse
                    from Position
                    where Slot = 1
            ",
            )?
            .query_row([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, u32>(1)?,
                    row.get::<_, u32>(2)?,
                ))
            })
            .optional();
        let stored = match stored {
            Ok(stored) => stored,
            Err(
                e @ (rusqlite::Error::FromSqlConversionFailure(..)
                | rusqlite::Error::IntegralValueOutOfRange(..)
                | rusqlite::Error::InvalidColumnType(..)),
            ) => {
                warn!(%e, "stored position cannot be read");
                None
            }
            Err(e) => return Err(e.into()),
        };
        Ok(stored.and_then(|(book, chapter, verse)| match canon.resolve(&book) {
            Some(descriptor) => Some(Address::new(descriptor.position(), chapter, verse)),
            None => {
                warn!(%book, "stored position names an unknown book");
                None
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setting_selects_mode() {
        assert_eq!(PersistenceMode::from_setting(":memory:"), PersistenceMode::InMemory);
        assert_eq!(
            PersistenceMode::from_setting("userdata/lectio.db"),
            PersistenceMode::File("userdata/lectio.db".to_string())
        );
    }

    #[test]
    fn overwrite_keeps_one_row() {
        let persistor = Persistor::new(PersistenceMode::InMemory).unwrap();
        persistor.save_translation("John", 1, 1, "In the beginning").unwrap();
        persistor.save_translation("John", 1, 1, "In the beginning was the Word").unwrap();
        let all = persistor.translations().unwrap();
        assert_eq!(all["John"][&1].len(), 1);
        assert_eq!(all["John"][&1][&1], "In the beginning was the Word");
    }
}
