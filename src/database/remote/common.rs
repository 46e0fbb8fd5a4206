// Shared client and error types for the Holidaze REST API

use log::{debug, warn};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AppConfig;

pub const API_KEY_HEADER: &str = "X-Noroff-API-Key";

/// Error type for remote API calls
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure before a response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),
    /// The API answered with a non-success status; the message is relayed as-is
    #[error("{message}")]
    Api { status: u16, message: String },
    /// Success status but the body did not have the expected shape
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Success status other than the one the operation requires
    #[error("Unexpected status {0}")]
    UnexpectedStatus(u16),
    /// Operation needs a session and none was supplied
    #[error("Not logged in")]
    Unauthenticated,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } | ApiError::UnexpectedStatus(status) => Some(*status),
            _ => None,
        }
    }
}

/// Every success body is wrapped as `{ "data": ..., "meta": ... }`
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorItem>,
}

#[derive(Debug, Deserialize)]
struct ErrorItem {
    #[serde(default)]
    message: String,
}

/// First `errors[].message` of an error body, else the raw body, else the
/// status reason
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(item) = parsed.errors.into_iter().find(|e| !e.message.is_empty()) {
            return item.message;
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

/// Holidaze API client configuration
#[derive(Clone, Debug)]
pub struct HolidazeClient {
    client: Client,
    api_url: String,
    api_key: String,
    access_token: Option<String>,
}

impl HolidazeClient {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let api_url: String = api_url.into();
        Self {
            client: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            access_token: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_url.clone(), config.api_key.clone())
    }

    pub fn with_access_token(mut self, access_token: Option<String>) -> Self {
        self.access_token = access_token;
        self
    }

    pub fn set_access_token(&mut self, access_token: Option<String>) {
        self.access_token = access_token;
    }

    pub fn has_access_token(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn require_access_token(&self) -> Result<(), ApiError> {
        if self.has_access_token() {
            Ok(())
        } else {
            Err(ApiError::Unauthenticated)
        }
    }

    /// `{api_url}/holidaze/{path}`
    pub fn holidaze_url(&self, path: &str) -> String {
        format!("{}/holidaze/{}", self.api_url, path.trim_start_matches('/'))
    }

    /// `{api_url}/holidaze/{segments...}?{query}` with every segment
    /// percent-encoded, so ids and names cannot alter the path or query
    pub fn holidaze_endpoint(
        &self,
        segments: &[&str],
        query: Option<&str>,
    ) -> Result<String, ApiError> {
        let mut url = Url::parse(&self.holidaze_url(""))
            .map_err(|e| ApiError::RequestFailed(format!("Invalid API URL {}: {}", self.api_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::RequestFailed(format!("Invalid API URL {}", self.api_url)))?
            .pop_if_empty()
            .extend(segments);
        url.set_query(query);
        Ok(url.to_string())
    }

    /// `{api_url}/auth/{path}`
    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/{}", self.api_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        debug!("{} {}", method, url);
        let mut builder = self
            .client
            .request(method, url)
            .header(API_KEY_HEADER, &self.api_key);
        if let Some(token) = &self.access_token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        builder
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let res = builder
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            let message = error_message(status, &text);
            warn!("API error {}: {}", status.as_u16(), message);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(res)
    }

    async fn read_data<T: DeserializeOwned>(res: Response) -> Result<T, ApiError> {
        let body = res
            .text()
            .await
            .map_err(|e| ApiError::ParseError(e.to_string()))?;

        let envelope: Envelope<T> = serde_json::from_str(&body)
            .map_err(|e| ApiError::ParseError(format!("Failed to parse response: {}", e)))?;

        Ok(envelope.data)
    }

    /// GET and unwrap `data`
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let res = self.send(self.request(Method::GET, url)).await?;
        Self::read_data(res).await
    }

    /// POST a JSON body and unwrap `data`
    pub async fn post<B, T>(&self, url: &str, payload: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self
            .request(Method::POST, url)
            .header("Content-Type", "application/json")
            .json(payload);
        let res = self.send(builder).await?;
        Self::read_data(res).await
    }

    /// POST a JSON body, discarding whatever the API returns on success
    pub async fn post_unit<B>(&self, url: &str, payload: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let builder = self
            .request(Method::POST, url)
            .header("Content-Type", "application/json")
            .json(payload);
        self.send(builder).await?;
        Ok(())
    }

    /// PUT a JSON body and unwrap `data`
    pub async fn put<B, T>(&self, url: &str, payload: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self
            .request(Method::PUT, url)
            .header("Content-Type", "application/json")
            .json(payload);
        let res = self.send(builder).await?;
        Self::read_data(res).await
    }

    /// DELETE; the API must answer `204 No Content`
    pub async fn delete(&self, url: &str) -> Result<(), ApiError> {
        let res = self.send(self.request(Method::DELETE, url)).await?;
        if res.status() != StatusCode::NO_CONTENT {
            return Err(ApiError::UnexpectedStatus(res.status().as_u16()));
        }
        Ok(())
    }
}
