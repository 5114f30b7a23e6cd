#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use versicle::services::commentary::{GeminiClient, NO_CANDIDATES};
    use versicle::services::config::AppConfig;
    use versicle::{CommentarySource, PassageSource, VerseAddress, VerseIndex, VerseReader};

    fn config_for(server: &MockServer, api_key: Option<&str>) -> AppConfig {
        AppConfig {
            gemini_endpoint: server.base_url(),
            gemini_api_key: api_key.map(str::to_string),
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn test_commentary_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/models/gemini-2.0-flash:generateContent")
                    .header("x-goog-api-key", "test-key")
                    .header("Content-Type", "application/json")
                    .body_contains("Speaking as Paul")
                    .body_contains("\"maxOutputTokens\":250");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .body(
                        r#"{
                            "candidates": [
                                { "content": { "parts": [ { "text": "  Grace first, then law.  " } ] } }
                            ]
                        }"#,
                    );
            })
            .await;

        let config = config_for(&server, Some("test-key"));
        let client = GeminiClient::new(reqwest::Client::new(), &config);
        let text = client
            .commentary("Romans", 3, 23, Some("Paul"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(text, "Grace first, then law.");
        assert_eq!(client.label(), "Gemini 2.0 Flash");
    }

    #[tokio::test]
    async fn test_commentary_without_candidates() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200)
                    .header("Content-Type", "application/json")
                    .body(r#"{ "candidates": [] }"#);
            })
            .await;

        let client = GeminiClient::new(reqwest::Client::new(), &config_for(&server, Some("k")));
        let err = client.generate("anything").await.unwrap_err();
        assert_eq!(err.to_string(), NO_CANDIDATES);
    }

    #[tokio::test]
    async fn test_commentary_http_error_keeps_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(400).body(r#"{"error":{"message":"API key not valid"}}"#);
            })
            .await;

        let client = GeminiClient::new(reqwest::Client::new(), &config_for(&server, Some("bad")));
        let err = client.generate("anything").await.unwrap_err().to_string();
        assert!(err.starts_with("Error fetching context from Gemini: 400"));
        assert!(err.contains("API key not valid"));
    }

    #[tokio::test]
    async fn test_commentary_requires_api_key() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200);
            })
            .await;

        let client = GeminiClient::new(reqwest::Client::new(), &config_for(&server, None));
        let err = client.generate("anything").await.unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
        mock.assert_hits_async(0).await;
    }

    struct NoPassages;

    impl PassageSource for NoPassages {
        async fn passage_text(&self, _: &str, _: u32, _: u32) -> anyhow::Result<String> {
            Ok(String::new())
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_hides_api_key() {
        let config = AppConfig {
            gemini_endpoint: "http://127.0.0.1:1".to_string(),
            gemini_api_key: Some("SUPERSECRET123".to_string()),
            ..AppConfig::default()
        };
        let client = GeminiClient::new(reqwest::Client::new(), &config);

        let err = format!("{:#}", client.generate("anything").await.unwrap_err());
        assert!(err.starts_with("Error fetching context from Gemini: Network request failed"));
        assert!(!err.contains("SUPERSECRET123"));
        assert!(!err.contains("127.0.0.1"));

        let index = VerseIndex::builder()
            .book("john", "John", &[51])
            .build()
            .unwrap();
        let reader = VerseReader::new(NoPassages, client, "GNT");
        let block = reader
            .render(&index, &VerseAddress::new("john", 1, 1), None)
            .await;
        assert!(block.contains("Error fetching context from Gemini"));
        assert!(!block.contains("SUPERSECRET123"));
    }
}
