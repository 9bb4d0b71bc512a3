// ABOUTME: HTTP fetching of pages to extract, with a body size cap and charset decoding.
// ABOUTME: Maps timeouts, transport failures and non-2xx statuses onto typed errors.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, info};

use crate::error::ExtractError;

/// Maximum allowed content length (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

/// Options for fetching a resource.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Extra headers sent with the request, on top of the client defaults.
    pub headers: HashMap<String, String>,
    /// Per-request timeout, applied on top of the client's own.
    pub timeout: Option<Duration>,
}

/// Result of a successful fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchResult {
    /// Decode the body as UTF-8 text, using the charset from the content-type header
    /// or detection when there is none.
    pub fn text_utf8(&self) -> String {
        decode_body(&self.body, self.content_type.as_deref())
    }
}

fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(encoding) = content_type
        .and_then(extract_charset)
        .and_then(|cs| encoding_rs::Encoding::for_label(cs.as_bytes()))
    {
        let (decoded, _, _) = encoding.decode(body);
        return decoded.into_owned();
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .to_lowercase()
        .split(';')
        .find_map(|part| part.trim().strip_prefix("charset=").map(str::to_string))
        .map(|cs| cs.trim_matches('"').trim_matches('\'').to_string())
}

fn transport_error(url: &str, err: reqwest::Error, what: &str) -> ExtractError {
    if err.is_timeout() {
        ExtractError::timeout(url, "Fetch", Some(anyhow::anyhow!("{}: {}", what, err)))
    } else {
        ExtractError::network(url, "Fetch", Some(anyhow::anyhow!("{}: {}", what, err)))
    }
}

/// Fetch a resource from the given URL.
///
/// The user agent comes from the supplied client. The request times out after
/// `opts.timeout` when set, or the client's own timeout otherwise.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
    opts: &FetchOptions,
) -> Result<FetchResult, ExtractError> {
    let parsed_url = url::Url::parse(url).map_err(|e| {
        ExtractError::invalid_url(url, "Fetch", Some(anyhow::anyhow!("invalid URL: {}", e)))
    })?;

    let scheme = parsed_url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ExtractError::invalid_url(
            url,
            "Fetch",
            Some(anyhow::anyhow!("scheme must be http or https")),
        ));
    }

    let mut request = client.get(parsed_url);
    for (key, value) in &opts.headers {
        request = request.header(key, value);
    }
    if let Some(timeout) = opts.timeout {
        request = request.timeout(timeout);
    }

    debug!(url, "sending request");
    let response = request
        .send()
        .await
        .map_err(|e| transport_error(url, e, "request failed"))?;

    if let Some(len) = response.content_length() {
        if len as usize > MAX_CONTENT_LENGTH {
            return Err(ExtractError::network(
                url,
                "Fetch",
                Some(anyhow::anyhow!("content too large")),
            ));
        }
    }

    let status = response.status();
    if !status.is_success() {
        return Err(ExtractError::network(
            url,
            "Fetch",
            Some(anyhow::anyhow!("HTTP status {}", status.as_u16())),
        ));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_lowercase());

    let body = response
        .bytes()
        .await
        .map_err(|e| transport_error(url, e, "failed to read body"))?;

    if body.len() > MAX_CONTENT_LENGTH {
        return Err(ExtractError::network(
            url,
            "Fetch",
            Some(anyhow::anyhow!("content too large")),
        ));
    }

    info!(url, status = status.as_u16(), bytes = body.len(), "fetched");

    Ok(FetchResult {
        status: status.as_u16(),
        content_type,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn create_test_client() -> reqwest::Client {
        reqwest::Client::builder()
            .user_agent("test-agent")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn fetch_ok_utf8() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/test").header("x-probe", "1");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body("hello");
        });

        let mut headers = HashMap::new();
        headers.insert("x-probe".to_string(), "1".to_string());
        let opts = FetchOptions {
            headers,
            ..Default::default()
        };

        let result = fetch(&create_test_client(), &server.url("/test"), &opts)
            .await
            .expect("fetch should succeed");
        mock.assert();

        assert_eq!(result.status, 200);
        assert_eq!(result.text_utf8(), "hello");
    }

    #[tokio::test]
    async fn fetch_non_2xx_is_network_error() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404).body("not found");
        });

        let err = fetch(
            &create_test_client(),
            &server.url("/missing"),
            &FetchOptions::default(),
        )
        .await
        .expect_err("404 must fail");
        mock.assert();

        assert!(err.is_network());
        assert!(!err.is_timeout());
        assert!(err.to_string().contains("HTTP status 404"));
    }

    #[tokio::test]
    async fn fetch_slow_server_times_out() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/slow");
            then.status(200).delay(Duration::from_millis(1500)).body("late");
        });

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap();
        let err = fetch(&client, &server.url("/slow"), &FetchOptions::default())
            .await
            .expect_err("should time out");
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn fetch_applies_request_timeout_over_client() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/slow");
            then.status(200).delay(Duration::from_millis(1500)).body("late");
        });

        let opts = FetchOptions {
            timeout: Some(Duration::from_millis(200)),
            ..Default::default()
        };
        let err = fetch(&reqwest::Client::new(), &server.url("/slow"), &opts)
            .await
            .expect_err("request timeout should apply");
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn fetch_rejects_non_http_scheme() {
        let err = fetch(
            &create_test_client(),
            "ftp://example.com/file",
            &FetchOptions::default(),
        )
        .await
        .unwrap_err();
        assert!(err.is_invalid_url());
    }

    #[tokio::test]
    async fn fetch_rejects_malformed_url() {
        let err = fetch(&create_test_client(), "not a url", &FetchOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_invalid_url());
    }

    #[test]
    fn decode_iso_8859_1_with_detection() {
        let iso_bytes: &[u8] = &[0x63, 0x61, 0x66, 0xe9];
        assert_eq!(decode_body(iso_bytes, None), "café");
    }

    #[test]
    fn decode_uses_declared_charset() {
        let (encoded, _, _) = encoding_rs::EUC_KR.encode("보안");
        let decoded = decode_body(&encoded, Some("text/html; charset=euc-kr"));
        assert_eq!(decoded, "보안");
    }

    #[test]
    fn charset_parsing() {
        assert_eq!(
            extract_charset("text/html; charset=\"UTF-8\""),
            Some("utf-8".to_string())
        );
        assert_eq!(extract_charset("text/html"), None);
    }
}
