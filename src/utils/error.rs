use std::error::Error;
use std::fmt;

/// Crate-wide error types, written out by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    BookNotFound(String),
    ChapterNotFound(String, u32),
    VerseOutOfRange(String, u32, u32),
    OrdinalOutOfRange(u32),
    InvalidReference(String),
    InvalidIndex(String),
    ConfigError(String),
    NetworkError(String),
}

/// Implement `std::fmt::Display` for `AppError`.
impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BookNotFound(book) => write!(f, "Book '{}' not recognized", book),
            AppError::ChapterNotFound(book, chapter) => {
                write!(f, "Chapter {} not found in '{}'", chapter, book)
            }
            AppError::VerseOutOfRange(book, chapter, verse) => write!(
                f,
                "Verse {} out of range for '{}' chapter {}",
                verse, book, chapter
            ),
            AppError::OrdinalOutOfRange(ordinal) => {
                write!(f, "Verse number {} is outside the index", ordinal)
            }
            AppError::InvalidReference(msg) => write!(f, "Invalid reference: {}", msg),
            AppError::InvalidIndex(msg) => write!(f, "Invalid verse index: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::NetworkError(msg) => write!(f, "Network request failed: {}", msg),
        }
    }
}

/// Implement `std::error::Error` for `AppError`.
impl Error for AppError {}

/// Custom Result type that uses `AppError`.
pub type Result<T, E = AppError> = std::result::Result<T, E>;
