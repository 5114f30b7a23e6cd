use anyhow::Result;

use crate::core::index::VerseIndex;
use crate::core::reference::VerseAddress;

/// Where chapter text comes from.
#[allow(async_fn_in_trait)]
pub trait PassageSource {
    async fn passage_text(&self, book_name: &str, chapter: u32, verse: u32) -> Result<String>;
}

/// Where the commentary paragraph comes from.
#[allow(async_fn_in_trait)]
pub trait CommentarySource {
    /// Shown in the block heading, e.g. "Gemini 2.0 Flash".
    fn label(&self) -> String;

    async fn commentary(
        &self,
        book_name: &str,
        chapter: u32,
        verse: u32,
        persona: Option<&str>,
    ) -> Result<String>;
}

/// Assembles the text block shown for one verse.
pub fn format_verse_block(
    book_name: &str,
    address: &VerseAddress,
    translation: &str,
    passage: &str,
    label: &str,
    persona: Option<&str>,
    context: &str,
) -> String {
    let voiced = match persona {
        Some(persona) => format!(", voiced as {}", persona),
        None => String::new(),
    };
    format!(
        "Selected from {} Chapter {}, Verse {} ({}):\n\n{}\n\n**Context (from {}{}):**\n{}",
        book_name, address.chapter, address.verse, translation, passage, label, voiced, context
    )
}

/// Fetches passage and commentary for a verse and renders them together.
/// A failing source shows up as an error line in its section; rendering
/// itself never fails.
pub struct VerseReader<P, C> {
    passages: P,
    commentary: C,
    translation: String,
}

impl<P: PassageSource, C: CommentarySource> VerseReader<P, C> {
    pub fn new(passages: P, commentary: C, translation: &str) -> Self {
        VerseReader {
            passages,
            commentary,
            translation: translation.to_string(),
        }
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }

    pub async fn render(
        &self,
        index: &VerseIndex,
        address: &VerseAddress,
        persona: Option<&str>,
    ) -> String {
        let book_name = index.display_name(&address.book);

        let passage = self
            .passages
            .passage_text(&book_name, address.chapter, address.verse)
            .await
            .unwrap_or_else(|e| {
                log::error!("Passage for {} failed: {:#}", address, e);
                format!("{:#}", e)
            });

        let context = self
            .commentary
            .commentary(&book_name, address.chapter, address.verse, persona)
            .await
            .unwrap_or_else(|e| {
                log::error!("Commentary for {} failed: {:#}", address, e);
                format!("{:#}", e)
            });

        format_verse_block(
            &book_name,
            address,
            &self.translation,
            &passage,
            &self.commentary.label(),
            persona,
            &context,
        )
    }
}
