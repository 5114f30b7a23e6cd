#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use versicle::services::passage::{BibleGateway, PASSAGE_NOT_FOUND};

    const PAGE: &str = r#"<html><body>
        <div class="passage-text"><h3>The Cleansing of the Temple</h3><p><sup>14</sup>There in the Temple he found people selling cattle.</p><a href="/passage/?search=John+2">Read full chapter</a></div>
        <div class="passage-text">second block is ignored</div>
        </body></html>"#;

    #[tokio::test]
    async fn test_fetch_passage_queries_and_extracts() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/passage/")
                    .query_param("search", "John 2:14")
                    .query_param("version", "GNT");
                then.status(200)
                    .header("Content-Type", "text/html")
                    .body(PAGE);
            })
            .await;

        let gateway = BibleGateway::new(reqwest::Client::new(), &server.base_url(), "GNT");
        let text = gateway.fetch_passage("John", 2, 14).await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            text,
            "The Cleansing of the Temple14There in the Temple he found people selling cattle."
        );
    }

    #[tokio::test]
    async fn test_fetch_passage_without_block() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/passage/");
                then.status(200).body("<html><body><p>No results</p></body></html>");
            })
            .await;

        let gateway = BibleGateway::new(reqwest::Client::new(), &server.base_url(), "GNT");
        let text = gateway.fetch_passage("Tobit", 1, 1).await.unwrap();
        assert_eq!(text, PASSAGE_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_fetch_passage_http_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/passage/");
                then.status(503);
            })
            .await;

        let gateway = BibleGateway::new(reqwest::Client::new(), &server.base_url(), "NRSVCE");
        let err = gateway.fetch_passage("Mark", 1, 1).await.unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.starts_with("Error fetching chapter Mark 1:1: Network request failed"));
        assert!(message.contains("503"));
        assert!(!message.contains(&server.base_url()));
    }
}
