use std::fmt;

use crate::core::index::VerseIndex;
use crate::utils::error::{AppError, Result};

/// One verse: book key, chapter, and verse number within that chapter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VerseAddress {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
}

impl VerseAddress {
    pub fn new(book: &str, chapter: u32, verse: u32) -> VerseAddress {
        VerseAddress {
            book: book.to_string(),
            chapter,
            verse,
        }
    }
}

impl fmt::Display for VerseAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.book, self.chapter, self.verse)
    }
}

// Common spellings that don't collapse onto a key by themselves.
const ALIASES: [(&str, &str); 6] = [
    ("psalm", "psalms"),
    ("songofsongs", "songofsolomon"),
    ("song", "songofsolomon"),
    ("revelations", "revelation"),
    ("wisdomofsolomon", "wisdom"),
    ("ecclesiasticus", "sirach"),
];

/// Lowercases a book name and drops whitespace and dots, so "1 Samuel",
/// "1samuel" and "Song of Solomon" all land on their table keys.
pub fn canonical_key(name: &str) -> String {
    let key: String = name
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .flat_map(|c| c.to_lowercase())
        .collect();

    ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, target)| target.to_string())
        .unwrap_or(key)
}

/// Parses `"<Book> <chapter>:<verse>"` and checks it against the index.
pub fn parse_reference(index: &VerseIndex, input: &str) -> Result<VerseAddress> {
    let input = input.trim();
    let (book_part, chapter_verse) = input.rsplit_once(' ').ok_or_else(|| {
        AppError::InvalidReference(format!("expected '<Book> <chapter>:<verse>', got '{}'", input))
    })?;

    let (chapter, verse) = chapter_verse.split_once(':').ok_or_else(|| {
        AppError::InvalidReference(format!("missing ':' in '{}'", chapter_verse))
    })?;

    let chapter: u32 = chapter
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidReference(format!("bad chapter number '{}'", chapter)))?;
    let verse: u32 = verse
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidReference(format!("bad verse number '{}'", verse)))?;

    let book = canonical_key(book_part);
    let (start, end) = index.get_verse_range(&book, chapter)?;
    if verse < 1 || verse > end - start + 1 {
        return Err(AppError::VerseOutOfRange(book, chapter, verse));
    }

    Ok(VerseAddress::new(&book, chapter, verse))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_key() {
        assert_eq!(canonical_key("John"), "john");
        assert_eq!(canonical_key("1 Samuel"), "1samuel");
        assert_eq!(canonical_key("Song of Solomon"), "songofsolomon");
        assert_eq!(canonical_key("Psalm"), "psalms");
        assert_eq!(canonical_key("  REVELATIONS "), "revelation");
    }

    #[test]
    fn test_display() {
        assert_eq!(VerseAddress::new("john", 3, 16).to_string(), "john 3:16");
    }
}
