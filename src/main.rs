use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use versicle::core::index::VerseIndex;
use versicle::services::commentary::GeminiClient;
use versicle::services::config::load_config;
use versicle::services::display::VerseReader;
use versicle::services::passage::BibleGateway;
use versicle::services::session::{Console, Session};
use versicle::utils::logger::{default_log_dir, initialize_logger};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    match default_log_dir().and_then(|dir| initialize_logger(&dir)) {
        Ok(path) => log::info!("Logging to {}", path.display()),
        Err(e) => eprintln!("Logging disabled: {:#}", e),
    }

    let config = load_config()?;
    if config.gemini_api_key.is_none() {
        log::warn!("GEMINI_API_KEY is not set; commentary will be unavailable");
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;

    let index = VerseIndex::for_canon(config.canon)?;
    log::info!(
        "Loaded {:?} canon: {} books, {} verses",
        config.canon,
        index.books().len(),
        index.total_verses()
    );

    let passages = BibleGateway::new(client.clone(), &config.passage_base_url, &config.translation);
    let commentary = GeminiClient::new(client, &config);
    let reader = VerseReader::new(passages, commentary, &config.translation);

    let mut session = Session::new(&index, &reader, StdRng::from_entropy());
    let mut console = Console::new(io::stdin().lock(), io::stdout());
    session.run(&mut console).await?;

    Ok(())
}
