use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use scraper::{Html, Selector};

use crate::services::display::PassageSource;
use crate::utils::error::AppError;

pub const PASSAGE_NOT_FOUND: &str = "Chapter content not found.";

// Link text Bible Gateway renders inside the passage block.
const BOILERPLATE: [&str; 2] = ["Read full chapter", "in all English translations"];

/// Scrapes passage text from Bible Gateway's `/passage/` page.
pub struct BibleGateway {
    client: Client,
    base_url: String,
    translation: String,
}

impl BibleGateway {
    pub fn new(client: Client, base_url: &str, translation: &str) -> BibleGateway {
        BibleGateway {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            translation: translation.to_string(),
        }
    }

    pub async fn fetch_passage(&self, book_name: &str, chapter: u32, verse: u32) -> Result<String> {
        let url = format!("{}/passage/", self.base_url);
        let search = format!("{} {}:{}", book_name, chapter, verse);
        log::info!("Fetching {} ({}) from {}", search, self.translation, url);

        let response = self
            .client
            .get(&url)
            .query(&[("search", search.as_str()), ("version", self.translation.as_str())])
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| AppError::NetworkError(e.without_url().to_string()))
            .with_context(|| format!("Error fetching chapter {}", search))?;

        let html = response
            .text()
            .await
            .with_context(|| format!("Error reading chapter {}", search))?;

        match extract_passage_text(&html)? {
            Some(text) => Ok(text),
            None => {
                log::warn!("No passage-text block in page for {}", search);
                Ok(PASSAGE_NOT_FOUND.to_string())
            }
        }
    }
}

impl PassageSource for BibleGateway {
    async fn passage_text(&self, book_name: &str, chapter: u32, verse: u32) -> Result<String> {
        self.fetch_passage(book_name, chapter, verse).await
    }
}

/// Text of the first `div.passage-text`, with Bible Gateway's link text removed.
pub fn extract_passage_text(html: &str) -> Result<Option<String>> {
    let selector = Selector::parse("div.passage-text")
        .map_err(|e| anyhow!("Error parsing chapter: {:?}", e))?;
    let document = Html::parse_document(html);

    Ok(document.select(&selector).next().map(|block| {
        let mut text: String = block.text().collect::<String>().trim().to_string();
        for phrase in BOILERPLATE {
            text = text.replace(phrase, "").trim().to_string();
        }
        text
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_strips_boilerplate() {
        let html = r#"<html><body>
            <div class="passage-text"><p><sup>16</sup>For God loved the world so much.</p>
            <a href="/x">Read full chapter</a></div></body></html>"#;
        let text = extract_passage_text(html).unwrap().unwrap();
        assert_eq!(text, "16For God loved the world so much.");
    }

    #[test]
    fn test_extract_missing_block() {
        assert_eq!(extract_passage_text("<div>nothing</div>").unwrap(), None);
    }
}
