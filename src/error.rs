use thiserror::Error;

#[derive(Error, Debug)]
pub enum LectioError {
    #[error("Unknown book: {0}")]
    UnknownBook(String),
    #[error("Unknown navigation directive: {0}")]
    UnknownDirective(String),
    #[error("No verse data for book {book}{}", in_chapter(.chapter))]
    EmptyExtent { book: u8, chapter: Option<u32> },
    #[error("Reference not found: {0}")]
    InvalidAddress(String),
    #[error("Parse error: {message}")]
    Parse { message: String, line: Option<usize>, col: Option<usize> },
    #[error("Config error: {0}")]
    Config(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Internal invariant violated: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, LectioError>;

// Helper conversions
impl From<rusqlite::Error> for LectioError {
    fn from(e: rusqlite::Error) -> Self { Self::Persistence(e.to_string()) }
}
impl From<serde_json::Error> for LectioError {
    fn from(e: serde_json::Error) -> Self { Self::Persistence(e.to_string()) }
}
impl From<std::io::Error> for LectioError {
    fn from(e: std::io::Error) -> Self { Self::Io(e.to_string()) }
}
impl From<config::ConfigError> for LectioError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}

fn in_chapter(chapter: &Option<u32>) -> String {
    chapter.map(|c| format!(", chapter {c}")).unwrap_or_default()
}

impl LectioError {
    pub(crate) fn parse(message: impl Into<String>, line: Option<usize>, col: Option<usize>) -> Self {
        Self::Parse { message: message.into(), line, col }
    }
}
