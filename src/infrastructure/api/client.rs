//! reqwest-backed gateway to the inventory REST API

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::{Dataset, LoginResponse, Query, RegisterRequest};
use crate::infrastructure::api::ApiError;

/// Per-call knobs for [`ApiClient::request`]
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub token: Option<String>,
    /// Caller headers; a name present here replaces the default of the same name
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            token: None,
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn get(token: Option<&str>) -> Self {
        Self {
            token: token.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn post_json(body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Result<Self, ApiError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ApiError::InvalidHeader(name.to_string()))?;
        let value =
            HeaderValue::from_str(value).map_err(|_| ApiError::InvalidHeader(name.to_string()))?;
        self.headers.insert(name, value);
        Ok(self)
    }
}

/// Default headers (JSON content type, bearer token) overlaid with the caller's
pub fn merge_headers(token: Option<&str>, overrides: &HeaderMap) -> Result<HeaderMap, ApiError> {
    let mut merged = HeaderMap::new();
    merged.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(token) = token {
        let bearer = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| ApiError::InvalidHeader(AUTHORIZATION.to_string()))?;
        merged.insert(AUTHORIZATION, bearer);
    }
    for name in overrides.keys() {
        merged.remove(name);
    }
    for (name, value) in overrides.iter() {
        merged.append(name.clone(), value.clone());
    }
    Ok(merged)
}

/// Operations the dashboard needs from the backend
#[async_trait]
pub trait InventoryApi: Send + Sync + 'static {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError>;

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError>;

    async fn fetch(&self, query: &Query, token: Option<&str>) -> Result<Dataset, ApiError>;

    fn base_url(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|err| ApiError::InvalidUrl(format!("{base_url}: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }
        let http = Client::builder()
            .user_agent(concat!("stockdesk/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, base_url })
    }

    /// Absolute URL for `segments` below the base; segments and values are percent-encoded
    pub fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?;
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Issue a call and map the status: 401 and other non-2xx become errors
    pub async fn request(&self, url: Url, options: RequestOptions) -> Result<Response, ApiError> {
        let response = self.send(url, options).await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!(url = %response.url(), "request unauthorized");
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }
        Ok(response)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let response = self.request(url, RequestOptions::get(token)).await?;
        decode(response).await
    }

    async fn send(&self, url: Url, options: RequestOptions) -> Result<Response, ApiError> {
        let headers = merge_headers(options.token.as_deref(), &options.headers)?;
        debug!(method = %options.method, %url, "api request");
        let mut builder = self.http.request(options.method, url).headers(headers);
        if let Some(body) = options.body {
            builder = builder.body(body.to_string());
        }
        let response = builder.send().await?;
        debug!(status = %response.status(), "api response");
        Ok(response)
    }

    /// POST to an auth endpoint; any non-2xx is reported with the body text
    async fn post_auth(
        &self,
        segments: &[&str],
        body: serde_json::Value,
        fallback: &str,
    ) -> Result<Response, ApiError> {
        let url = self.endpoint(segments, &[])?;
        let response = self.send(url, RequestOptions::post_json(body)).await?;
        if response.status().is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        let message = if text.trim().is_empty() {
            fallback.to_string()
        } else {
            text
        };
        Err(ApiError::Auth(message))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode(err.to_string()))
}

#[async_trait]
impl InventoryApi for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = serde_json::json!({ "username": username, "password": password });
        let response = self.post_auth(&["auth", "login"], body, "Login failed").await?;
        decode(response).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let body = serde_json::to_value(request).map_err(|err| ApiError::Decode(err.to_string()))?;
        self.post_auth(&["auth", "register"], body, "Registration failed")
            .await?;
        Ok(())
    }

    async fn fetch(&self, query: &Query, token: Option<&str>) -> Result<Dataset, ApiError> {
        let (segments, pairs) = query.route();
        let url = self.endpoint(&segments, &pairs)?;
        let dataset = match query {
            Query::Products | Query::SearchProducts(_) | Query::ProductsByCategory(_) => {
                Dataset::Products(self.get_json(url, token).await?)
            }
            Query::Suppliers | Query::SearchSuppliers(_) => {
                Dataset::Suppliers(self.get_json(url, token).await?)
            }
            Query::Transactions => Dataset::Transactions(self.get_json(url, token).await?),
            Query::Users => Dataset::Users {
                users: self.get_json(url, token).await?,
                filter: None,
            },
            Query::SearchUsers(term) => Dataset::Users {
                users: self.get_json(url, token).await?,
                filter: Some(term.clone()),
            },
        };
        Ok(dataset)
    }

    fn base_url(&self) -> String {
        self.base_url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_headers() {
        let headers = merge_headers(Some("t1"), &HeaderMap::new()).unwrap();
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers[AUTHORIZATION], "Bearer t1");
    }

    #[test]
    fn test_caller_header_wins() {
        let options = RequestOptions::default()
            .header("content-type", "text/plain")
            .unwrap()
            .header("X-Trace", "abc")
            .unwrap();
        let headers = merge_headers(Some("t1"), &options.headers).unwrap();
        assert_eq!(headers.get_all(CONTENT_TYPE).iter().count(), 1);
        assert_eq!(headers[CONTENT_TYPE], "text/plain");
        assert_eq!(headers["x-trace"], "abc");
        assert_eq!(headers[AUTHORIZATION], "Bearer t1");
    }

    #[test]
    fn test_no_token_no_authorization() {
        let headers = merge_headers(None, &HeaderMap::new()).unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_endpoint_encoding() {
        let client = ApiClient::new("http://localhost:3000/api").unwrap();
        let url = client
            .endpoint(&["products", "category", "Tools & Parts"], &[])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/api/products/category/Tools%20&%20Parts"
        );

        let url = client
            .endpoint(&["products", "search"], &[("name", "red widget")])
            .unwrap();
        assert_eq!(url.path(), "/api/products/search");
        let pairs: Vec<_> = url.query_pairs().collect();
        assert_eq!(pairs[0].1, "red widget");
    }

    #[test]
    fn test_endpoint_with_trailing_slash_base() {
        let client = ApiClient::new("http://localhost:3000/api/").unwrap();
        let url = client.endpoint(&["users"], &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/users");
    }

    #[test]
    fn test_rejects_non_base_url() {
        assert!(matches!(
            ApiClient::new("mailto:ops@example.com"),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(ApiClient::new("not a url").is_err());
    }
}
