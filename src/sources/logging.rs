use std::time::Instant;

use http::Extensions;
use reqwest::Url;
use reqwest_middleware::{Middleware, Next};
use tracing::debug;

/// Logs each outbound request and its response status at debug level.
#[derive(Clone, Debug, Default)]
pub(crate) struct HttpLoggingMiddleware;

impl HttpLoggingMiddleware {
    pub(crate) fn new() -> Self {
        Self
    }
}

/// Strips credentials from a URL before it is written to the log.
pub(crate) fn redacted_url(url: &Url) -> String {
    let mut out = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let value = if k.eq_ignore_ascii_case("api_key") {
                "REDACTED".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), value)
        })
        .collect();
    if pairs.is_empty() {
        return out.to_string();
    }
    out.query_pairs_mut().clear().extend_pairs(pairs);
    out.to_string()
}

#[async_trait::async_trait]
impl Middleware for HttpLoggingMiddleware {
    async fn handle(
        &self,
        req: reqwest::Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<reqwest::Response> {
        let method = req.method().clone();
        let url = redacted_url(req.url());
        debug!(%method, url = %url, "--> request");

        let start = Instant::now();
        let result = next.run(req, extensions).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(resp) => debug!(
                %method,
                url = %url,
                status = resp.status().as_u16(),
                content_length = resp.content_length(),
                elapsed_ms,
                "<-- response"
            ),
            Err(err) => debug!(%method, url = %url, elapsed_ms, "<-- failed: {err}"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn redacted_url_hides_api_key() {
        let url = Url::parse("https://api.fda.gov/drug/label.json?search=x&api_key=secret").unwrap();
        let out = redacted_url(&url);
        assert!(out.contains("search=x"));
        assert!(out.contains("api_key=REDACTED"));
        assert!(!out.contains("secret"));
    }

    #[test]
    fn redacted_url_leaves_plain_urls_alone() {
        let url = Url::parse("https://api.fda.gov/drug/label.json").unwrap();
        assert_eq!(redacted_url(&url), "https://api.fda.gov/drug/label.json");
    }

    #[tokio::test]
    async fn middleware_passes_response_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = reqwest_middleware::ClientBuilder::new(reqwest::Client::new())
            .with(HttpLoggingMiddleware::new())
            .build();
        let resp = client
            .get(format!("{}/ping", server.uri()))
            .send()
            .await
            .expect("response");
        assert_eq!(resp.status().as_u16(), 204);
    }
}
