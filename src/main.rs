//! Terminal front-end: reads the verse data, reopens at the last position and
//! then takes one command per line.
//!
//! ```text
//! n                 next verse
//! p                 previous verse
//! r                 start of chapter (again: start of the previous chapter)
//! f                 start of the next chapter
//! g John 3:16       go to a reference
//! t <text>          save your translation of the current verse
//! range 1:1 2:5     your translations of the current book in that range
//! export            all your translations as JSON
//! q                 quit
//! ```

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use lectio::address::Address;
use lectio::canon::Canon;
use lectio::morphgnt;
use lectio::navigate::{Directive, Navigator};
use lectio::persist::{PersistenceMode, Persistor};
use lectio::settings::Settings;
use lectio::source::VerseTable;
use lectio::{LectioError, Result};

fn main() -> ExitCode {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .with_writer(io::stderr)
        .init();
    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(%e, "lectio stopped");
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &Settings) -> Result<()> {
    let canon = Canon::new_testament();
    let verses: VerseTable = morphgnt::load_dir(canon, Path::new(&settings.data_dir))?;
    let persistor = Persistor::new(PersistenceMode::from_setting(&settings.database))?;
    let navigator = Navigator::new(canon, &verses);
    let mut current = navigator.restore(persistor.last_position(canon)?);
    if let Some(name) = &settings.user_name {
        info!(user=%name, "welcome back");
    }
    show(&navigator, &persistor, &current)?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let (command, rest) = line.trim().split_once(' ').unwrap_or((line.trim(), ""));
        let rest = rest.trim();
        let moved = match command {
            "" => continue,
            "q" => break,
            "n" => Some(navigator.navigate(current, Directive::NextVerse)?),
            "p" => Some(navigator.navigate(current, Directive::PreviousVerse)?),
            "r" => Some(navigator.navigate(current, Directive::StartOfChapter)?),
            "f" => Some(navigator.navigate(current, Directive::StartOfNextChapter)?),
            "g" => match navigator.jump(rest) {
                Ok(address) => Some(address),
                Err(e @ (LectioError::Parse { .. } | LectioError::UnknownBook(_) | LectioError::InvalidAddress(_))) => {
                    println!("{e}");
                    None
                }
                Err(e) => return Err(e),
            },
            "t" => {
                let book = canon.require(current.book())?;
                persistor.save_translation(book.full_name(), current.chapter(), current.verse(), rest)?;
                println!("Saved translation for {}.", current.label(canon));
                None
            }
            "range" => {
                print_range(canon, &persistor, settings.user_name.as_deref(), &current, rest)?;
                None
            }
            "export" => {
                println!("{}", persistor.export_json(canon)?);
                None
            }
            other => {
                println!("Unknown command '{other}'");
                None
            }
        };
        if let Some(address) = moved {
            current = address;
            if navigator.is_valid(&current) {
                persistor.save_position(canon, &current)?;
            }
            show(&navigator, &persistor, &current)?;
        }
        io::stdout().flush()?;
    }
    Ok(())
}

fn show(navigator: &Navigator<'_, VerseTable>, persistor: &Persistor, address: &Address) -> Result<()> {
    let canon = navigator.canon();
    let book = canon.require(address.book())?;
    println!("{}", address.label(canon));
    match navigator.verse(address) {
        Some(verse) => {
            println!("{}", verse.text());
            for (i, word) in verse.words().iter().enumerate() {
                println!("  {:>2} {:<20} {:<20} {} {}", i + 1, word.word, word.lemma, word.part_of_speech, word.parse);
            }
        }
        None => warn!(address=%address.label(canon), "no verse data"),
    }
    if let Some(text) = persistor.translation(book.full_name(), address.chapter(), address.verse())? {
        println!("Your translation: {text}");
    }
    Ok(())
}

// "1:1 2:5" -> ((1, 1), (2, 5))
fn parse_span(text: &str) -> Option<((u32, u32), (u32, u32))> {
    let point = |p: &str| -> Option<(u32, u32)> {
        let (chapter, verse) = p.split_once(':')?;
        Some((chapter.parse().ok()?, verse.parse().ok()?))
    };
    let (start, end) = text.split_once(' ')?;
    Some((point(start.trim())?, point(end.trim())?))
}

// "Phoebe's translation of Romans 16:1-16:2"
fn range_title(translator: Option<&str>, book: &str, start: (u32, u32), end: (u32, u32)) -> String {
    let span = format!("{book} {}:{}-{}:{}", start.0, start.1, end.0, end.1);
    match translator {
        Some(name) => format!("{name}'s translation of {span}"),
        None => format!("Translation of {span}"),
    }
}

fn print_range(
    canon: &Canon,
    persistor: &Persistor,
    translator: Option<&str>,
    current: &Address,
    span: &str,
) -> Result<()> {
    let Some((start, end)) = parse_span(span) else {
        println!("Expected a range such as '1:1 2:5'");
        return Ok(());
    };
    let book = canon.require(current.book())?;
    println!("{}", range_title(translator, book.full_name(), start, end));
    let saved = persistor.translations_in_range(book.full_name(), start, end)?;
    if saved.is_empty() {
        println!("(no translations for this range)");
    }
    let mut chapter = 0;
    for entry in saved {
        if entry.chapter != chapter {
            chapter = entry.chapter;
            println!("Chapter {chapter}");
        }
        println!("  {}:{} {}", entry.chapter, entry.verse, entry.text);
    }
    Ok(())
}
