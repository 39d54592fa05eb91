use crate::core::{
    ConfigProvider, DirectoryClient, ExactLookupResponse, LookupEndpoint, SearchResponse,
};
use crate::utils::error::{AutofillError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, COOKIE};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// reqwest 實作的目錄查詢客戶端
#[derive(Debug, Clone)]
pub struct HttpDirectoryClient {
    client: Client,
    base_url: Url,
    endpoint: LookupEndpoint,
}

impl HttpDirectoryClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url, LookupEndpoint::default())
    }

    pub fn with_client(client: Client, base_url: &str, endpoint: LookupEndpoint) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        // 保留掛載路徑，例如 https://host/househelp/
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            endpoint,
        })
    }

    /// 依設定建立：session cookie、額外標頭、逾時
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in config.headers() {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                AutofillError::InvalidConfigValueError {
                    field: "directory.headers".to_string(),
                    value: name.to_string(),
                    reason: e.to_string(),
                }
            })?;
            headers.insert(name, header_value("directory.headers", value)?);
        }
        if let Some(cookie) = config.session_cookie() {
            headers.insert(COOKIE, header_value("directory.session_cookie", cookie)?);
        }

        let mut builder = Client::builder()
            .default_headers(headers)
            .user_agent(format!("househelp-autofill/{}", env!("CARGO_PKG_VERSION")));
        // 未設定時沿用 transport 預設值
        if let Some(timeout) = config.timeout_seconds() {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        Self::with_client(builder.build()?, config.base_url(), config.endpoint())
    }

    pub fn endpoint(&self) -> LookupEndpoint {
        self.endpoint
    }

    /// Builds `{base}/<endpoint path>?<key>=<term>`.
    ///
    /// The term is form-url-encoded, so a space becomes `+` and `&` becomes
    /// `%26`. For digit-only pincodes the URL is byte-for-byte the same as
    /// plain interpolation.
    pub fn request_url(&self, term: &str) -> Result<Url> {
        let mut url = self.base_url.join(self.endpoint.path())?;
        url.query_pairs_mut()
            .append_pair(self.endpoint.query_key(), term);
        Ok(url)
    }
}

fn header_value(field: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| AutofillError::InvalidConfigValueError {
        field: field.to_string(),
        value: "<redacted>".to_string(),
        reason: e.to_string(),
    })
}

#[async_trait]
impl DirectoryClient for HttpDirectoryClient {
    async fn search(&self, term: &str) -> Result<SearchResponse> {
        let url = self.request_url(term)?;
        tracing::debug!("📡 Directory request: GET {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        tracing::debug!("📡 Directory response status: {}", status);

        if !status.is_success() {
            return Err(AutofillError::StatusError {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed = match self.endpoint {
            LookupEndpoint::Search => serde_json::from_str::<SearchResponse>(&body)?,
            LookupEndpoint::Exact => serde_json::from_str::<ExactLookupResponse>(&body)?.into(),
        };
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_search_url_matches_backend_route() {
        let client = HttpDirectoryClient::new("http://127.0.0.1:5000").unwrap();
        let url = client.request_url("560001").unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:5000/admin/pincodes/search?term=560001"
        );
    }

    #[test]
    fn test_mount_path_is_preserved() {
        let client = HttpDirectoryClient::with_client(
            Client::new(),
            "https://example.org/househelp",
            LookupEndpoint::Exact,
        )
        .unwrap();
        let url = client.request_url("110001").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.org/househelp/pincodes/lookup?pincode=110001"
        );
    }

    #[test]
    fn test_odd_terms_are_form_encoded() {
        let client = HttpDirectoryClient::new("http://127.0.0.1:5000").unwrap();
        let url = client.request_url("56 00&1").unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:5000/admin/pincodes/search?term=56+00%261"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpDirectoryClient::new("not a url").unwrap_err();
        assert!(matches!(err, AutofillError::UrlError(_)));
    }

    #[tokio::test]
    async fn test_search_parses_results() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/admin/pincodes/search")
                .query_param("term", "560001");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "success": true,
                    "results": [
                        {"id": 1, "pincode": "560001", "state": "Karnataka", "city": "Bengaluru", "society": "MG Road"}
                    ]
                }));
        });

        let client = HttpDirectoryClient::new(&server.base_url()).unwrap();
        let response = client.search("560001").await.unwrap();

        api_mock.assert();
        assert!(response.success);
        assert_eq!(response.results[0].society, "MG Road");
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/admin/pincodes/search");
            then.status(500);
        });

        let client = HttpDirectoryClient::new(&server.base_url()).unwrap();
        let err = client.search("560001").await.unwrap_err();

        api_mock.assert();
        assert!(matches!(err, AutofillError::StatusError { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_serialization_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/admin/pincodes/search");
            then.status(200).body("<html>login</html>");
        });

        let client = HttpDirectoryClient::new(&server.base_url()).unwrap();
        let err = client.search("560001").await.unwrap_err();

        assert!(matches!(err, AutofillError::SerializationError(_)));
    }

    #[tokio::test]
    async fn test_exact_endpoint() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/pincodes/lookup")
                .query_param("pincode", "110001");
            then.status(200).json_body(serde_json::json!({
                "success": true,
                "result": {"pincode": "110001", "state": "Delhi", "city": "New Delhi", "society": "Connaught Place"}
            }));
        });

        let client =
            HttpDirectoryClient::with_client(Client::new(), &server.base_url(), LookupEndpoint::Exact)
                .unwrap();
        let response = client.search("110001").await.unwrap();

        api_mock.assert();
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].state, "Delhi");
    }
}
