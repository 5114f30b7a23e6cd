use std::collections::HashSet;

use crate::core::canon::Canon;
use crate::core::reference::{canonical_key, VerseAddress};
use crate::utils::error::{AppError, Result};

/// Global ordinals covered by one chapter, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterRange {
    pub chapter: u32,
    pub start: u32,
    pub end: u32,
}

impl ChapterRange {
    pub fn verse_count(&self) -> u32 {
        self.end - self.start + 1
    }

    fn contains(&self, ordinal: u32) -> bool {
        self.start <= ordinal && ordinal <= self.end
    }
}

#[derive(Debug, Clone)]
pub struct Book {
    key: String,
    name: String,
    chapters: Vec<ChapterRange>,
}

impl Book {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chapters(&self) -> &[ChapterRange] {
        &self.chapters
    }

    fn first_ordinal(&self) -> u32 {
        self.chapters[0].start
    }

    fn last_ordinal(&self) -> u32 {
        self.chapters[self.chapters.len() - 1].end
    }

    fn chapter_position(&self, chapter: u32) -> Result<usize> {
        self.chapters
            .iter()
            .position(|range| range.chapter == chapter)
            .ok_or_else(|| AppError::ChapterNotFound(self.key.clone(), chapter))
    }
}

/// Collects books in canonical order and numbers their verses.
#[derive(Default)]
pub struct VerseIndexBuilder {
    books: Vec<(String, String, Vec<u32>)>,
}

impl VerseIndexBuilder {
    /// Appends a book; `verses[i]` is the verse count of chapter `i + 1`.
    pub fn book(mut self, key: &str, name: &str, verses: &[u32]) -> Self {
        self.books.push((canonical_key(key), name.to_string(), verses.to_vec()));
        self
    }

    pub fn build(self) -> Result<VerseIndex> {
        if self.books.is_empty() {
            return Err(AppError::InvalidIndex("no books given".to_string()));
        }

        let mut seen = HashSet::new();
        let mut books = Vec::with_capacity(self.books.len());
        let mut next_ordinal: u32 = 1;

        for (key, name, verses) in self.books {
            if key.is_empty() {
                return Err(AppError::InvalidIndex(format!("book '{}' has an empty key", name)));
            }
            if !seen.insert(key.clone()) {
                return Err(AppError::InvalidIndex(format!("book '{}' listed twice", key)));
            }
            if verses.is_empty() {
                return Err(AppError::InvalidIndex(format!("book '{}' has no chapters", key)));
            }

            let mut chapters = Vec::with_capacity(verses.len());
            for (idx, count) in verses.iter().enumerate() {
                let chapter = idx as u32 + 1;
                if *count == 0 {
                    return Err(AppError::InvalidIndex(format!(
                        "'{}' chapter {} has no verses",
                        key, chapter
                    )));
                }
                let next = next_ordinal.checked_add(*count).ok_or_else(|| {
                    AppError::InvalidIndex(format!(
                        "'{}' chapter {} overflows the index",
                        key, chapter
                    ))
                })?;
                chapters.push(ChapterRange {
                    chapter,
                    start: next_ordinal,
                    end: next - 1,
                });
                next_ordinal = next;
            }

            books.push(Book {
                key,
                name,
                chapters,
            });
        }

        Ok(VerseIndex {
            books,
            total: next_ordinal - 1,
        })
    }
}

/// Maps every verse to a global ordinal, in canonical book/chapter order.
#[derive(Debug, Clone)]
pub struct VerseIndex {
    books: Vec<Book>,
    total: u32,
}

impl VerseIndex {
    pub fn builder() -> VerseIndexBuilder {
        VerseIndexBuilder::default()
    }

    pub fn for_canon(canon: Canon) -> Result<VerseIndex> {
        canon
            .books()
            .into_iter()
            .fold(VerseIndex::builder(), |builder, counts| {
                builder.book(counts.key, counts.name, counts.verses)
            })
            .build()
    }

    pub fn total_verses(&self) -> u32 {
        self.total
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Looks a book up by any spelling `canonical_key` understands.
    pub fn book(&self, name: &str) -> Option<&Book> {
        let key = canonical_key(name);
        self.books.iter().find(|book| book.key == key)
    }

    /// Display name for a book key, e.g. "1 Samuel" for "1samuel".
    pub fn display_name(&self, book: &str) -> String {
        match self.book(book) {
            Some(found) => found.name.clone(),
            None => book.to_string(),
        }
    }

    fn find_book(&self, name: &str) -> Result<(usize, &Book)> {
        let key = canonical_key(name);
        self.books
            .iter()
            .enumerate()
            .find(|(_, book)| book.key == key)
            .ok_or(AppError::BookNotFound(key))
    }

    /// Resolves a global ordinal in `[1, total_verses]` to its address.
    pub fn get_verse_location(&self, ordinal: u32) -> Result<VerseAddress> {
        if ordinal < 1 || ordinal > self.total {
            return Err(AppError::OrdinalOutOfRange(ordinal));
        }

        // Ranges are sorted and contiguous, so both lookups are binary searches.
        let book_idx = self
            .books
            .partition_point(|book| book.last_ordinal() < ordinal);
        let book = &self.books[book_idx];
        let chapter_idx = book.chapters.partition_point(|range| range.end < ordinal);
        let range = &book.chapters[chapter_idx];
        debug_assert!(range.contains(ordinal));

        Ok(VerseAddress::new(
            &book.key,
            range.chapter,
            ordinal - range.start + 1,
        ))
    }

    /// Inclusive global range of one chapter.
    pub fn get_verse_range(&self, book: &str, chapter: u32) -> Result<(u32, u32)> {
        let (_, found) = self.find_book(book)?;
        let range = found.chapters[found.chapter_position(chapter)?];
        Ok((range.start, range.end))
    }

    pub fn chapter_verse_count(&self, book: &str, chapter: u32) -> Result<u32> {
        let (start, end) = self.get_verse_range(book, chapter)?;
        Ok(end - start + 1)
    }

    /// Inclusive global range of a whole book.
    pub fn book_range(&self, book: &str) -> Result<(u32, u32)> {
        let (_, found) = self.find_book(book)?;
        Ok((found.first_ordinal(), found.last_ordinal()))
    }

    pub fn ordinal_of(&self, address: &VerseAddress) -> Result<u32> {
        let (start, end) = self.get_verse_range(&address.book, address.chapter)?;
        if address.verse < 1 || address.verse > end - start + 1 {
            return Err(AppError::VerseOutOfRange(
                canonical_key(&address.book),
                address.chapter,
                address.verse,
            ));
        }
        Ok(start + address.verse - 1)
    }

    /// The verse after `book chapter:verse`, rolling over into the next
    /// chapter and then the next book. `None` once the index is exhausted.
    pub fn get_next_verse(
        &self,
        book: &str,
        chapter: u32,
        verse: u32,
    ) -> Result<Option<VerseAddress>> {
        let (book_idx, current_book) = self.find_book(book)?;
        let chapter_idx = current_book.chapter_position(chapter)?;
        let range = current_book.chapters[chapter_idx];

        if verse < 1 || verse > range.verse_count() {
            return Err(AppError::VerseOutOfRange(
                current_book.key.clone(),
                chapter,
                verse,
            ));
        }

        let current = range.start + verse - 1;
        if current >= self.total {
            return Ok(None);
        }

        if current + 1 > range.end {
            if let Some(next) = current_book.chapters.get(chapter_idx + 1) {
                return Ok(Some(VerseAddress::new(&current_book.key, next.chapter, 1)));
            }
            return Ok(self.books.get(book_idx + 1).map(|next_book| {
                VerseAddress::new(&next_book.key, next_book.chapters[0].chapter, 1)
            }));
        }

        Ok(Some(VerseAddress::new(&current_book.key, chapter, verse + 1)))
    }
}
