//! Reader for the MorphGNT text format.
//!
//! Every line holds one word:
//!
//! ```text
//! 010101 N- ----NSF- Βίβλος Βίβλος βίβλος βίβλος
//! ```
//!
//! The columns are book/chapter/verse (two digits each), part of speech,
//! parse code, text, word, normalized word and lemma.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::address::Address;
use crate::canon::{Canon, Position};
use crate::error::{LectioError, Result};
use crate::source::{VerseTable, Word};

const COLUMNS: usize = 7;

/// Parses one line. `line_number` is only used for error reporting.
pub fn parse_line(canon: &Canon, line: &str, line_number: usize) -> Result<(Address, Word)> {
    let columns: Vec<&str> = line.split_whitespace().collect();
    if columns.len() != COLUMNS {
        return Err(LectioError::parse(
            format!("expected {} columns, found {}", COLUMNS, columns.len()),
            Some(line_number),
            None,
        ));
    }
    let bcv = columns[0];
    if bcv.len() != 6 || !bcv.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LectioError::parse(
            format!("'{}' is not a six digit book/chapter/verse code", bcv),
            Some(line_number),
            Some(1),
        ));
    }
    // all six bytes are ASCII digits, so these cannot fail
    let number = |range: std::ops::Range<usize>| -> u32 {
        bcv[range].bytes().fold(0, |n, b| n * 10 + u32::from(b - b'0'))
    };
    let (book, chapter, verse) = (number(0..2), number(2..4), number(4..6));
    let book = Position::try_from(book)
        .ok()
        .filter(|&position| canon.resolve(position).is_some())
        .ok_or_else(|| {
            LectioError::parse(format!("book {} is not in the canon", book), Some(line_number), Some(1))
        })?;
    if chapter == 0 || verse == 0 {
        return Err(LectioError::parse(
            format!("'{}' has a zero chapter or verse", bcv),
            Some(line_number),
            Some(3),
        ));
    }
    let word = Word {
        part_of_speech: columns[1].to_string(),
        parse: columns[2].to_string(),
        text: columns[3].to_string(),
        word: columns[4].to_string(),
        normalized: columns[5].to_string(),
        lemma: columns[6].to_string(),
    };
    Ok((Address::new(book, chapter, verse), word))
}

/// Adds every word read from `reader` to `table`, returning the number of words.
pub fn read_into<R: BufRead>(canon: &Canon, table: &mut VerseTable, reader: R) -> Result<usize> {
    let mut words = 0;
    for (offset, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let (address, word) = parse_line(canon, trimmed, offset + 1)?;
        table.push_word(address, word);
        words += 1;
    }
    Ok(words)
}

pub fn load_file(canon: &Canon, table: &mut VerseTable, path: &Path) -> Result<usize> {
    let file = File::open(path)
        .map_err(|e| LectioError::Io(format!("{}: {}", path.display(), e)))?;
    let words = read_into(canon, table, BufReader::new(file)).map_err(|e| match e {
        LectioError::Parse { message, line, col } => LectioError::Parse {
            message: format!("{}: {}", path.display(), message),
            line,
            col,
        },
        other => other,
    })?;
    debug!(file=%path.display(), words, "loaded MorphGNT file");
    Ok(words)
}

/// Loads every `.txt` file in `dir`, in file name order.
pub fn load_dir(canon: &Canon, dir: &Path) -> Result<VerseTable> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| LectioError::Io(format!("{}: {}", dir.display(), e)))? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "txt") {
            paths.push(path);
        }
    }
    paths.sort();
    let mut table = VerseTable::new();
    let mut words = 0;
    for path in &paths {
        words += load_file(canon, &mut table, path)?;
    }
    info!(dir=%dir.display(), files=paths.len(), words, verses=table.len(), "verse data loaded");
    Ok(table)
}
