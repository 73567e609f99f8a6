//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::api::{
    AppApi, BlocklistsApi, CampaignsApi, ChannelTypesApi, ChannelsApi, CommandsApi, DevicesApi,
    ImportsApi, MessagesApi, ModerationApi, PermissionsApi, PushProvidersApi, RemindersApi,
    SegmentsApi, TasksApi, UsersApi,
};
use crate::batch::ChannelBatchUpdater;
use crate::channel::Channel;
use crate::config::ClientSettings;
use crate::error::{Error, ErrorResponse, Result};
use crate::response::{RateLimitHeaders, StreamResponse};
use crate::token::JwtSigner;
use crate::types::{FileSource, into_object};

/// Value of the `X-Stream-Client` header.
const CLIENT_HEADER: &str = concat!("stream-chat-rust-client-", env!("CARGO_PKG_VERSION"));

/// Query string pairs, excluding `api_key`.
pub(crate) type Query = Vec<(String, String)>;

/// Request body variants.
pub(crate) enum Body {
    Empty,
    Json(Value),
    Multipart(Form),
}

/// Stream Chat API client.
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// # Example
///
/// ```no_run
/// use serde_json::json;
/// use stream_chat::StreamClient;
///
/// # async fn example() -> stream_chat::Result<()> {
/// let client = StreamClient::new("api-key", "api-secret")?;
///
/// client.users().upsert(json!({"id": "jane", "role": "admin"})).await?;
///
/// let mut channel = client.channel("messaging", Some("general"), None);
/// channel.create("jane", None).await?;
/// channel.send_message(json!({"text": "hello"}), "jane", None).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct StreamClient {
    inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    signer: JwtSigner,
    /// Server-side token, signed once at construction.
    auth_token: HeaderValue,
    timeout: Duration,
}

impl std::fmt::Debug for StreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamClient")
            .field("base_url", &self.inner.base_url)
            .field("api_key", &self.inner.api_key)
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

impl StreamClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client with the given credentials; everything else comes from
    /// the environment or defaults.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).api_secret(api_secret).build()
    }

    /// Create a client configured entirely from the environment
    /// (`STREAM_KEY`, `STREAM_SECRET`, ...).
    pub fn from_env() -> Result<Self> {
        Self::builder().build()
    }

    /// Base URL of the backend, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// API key this client authenticates with.
    pub fn api_key(&self) -> &str {
        &self.inner.api_key
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// Full URL for an API path.
    pub fn build_request_url(&self, path: &str) -> String {
        format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tokens
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a token a chat user connects with.
    ///
    /// User tokens are valid indefinitely unless `expiration` is set. Both
    /// arguments are unix timestamps in seconds.
    pub fn create_token(
        &self,
        user_id: &str,
        expiration: Option<i64>,
        issued_at: Option<i64>,
    ) -> Result<String> {
        self.inner.signer.user_token(user_id, expiration, issued_at)
    }

    /// Check a webhook's `X-Signature` header against its raw body.
    pub fn verify_webhook(&self, body: &[u8], signature: &str) -> bool {
        self.inner.signer.verify_webhook(body, signature)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access app settings, push checks and rate limits.
    pub fn app(&self) -> AppApi {
        AppApi::new(self.clone())
    }

    /// Access the users API.
    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.clone())
    }

    /// Access channel-wide operations (query, delete, export, batch).
    pub fn channels(&self) -> ChannelsApi {
        ChannelsApi::new(self.clone())
    }

    /// Access the channel types API.
    pub fn channel_types(&self) -> ChannelTypesApi {
        ChannelTypesApi::new(self.clone())
    }

    /// Access the messages API.
    pub fn messages(&self) -> MessagesApi {
        MessagesApi::new(self.clone())
    }

    /// Access bans, flags and mutes.
    pub fn moderation(&self) -> ModerationApi {
        ModerationApi::new(self.clone())
    }

    /// Access the blocklists API.
    pub fn blocklists(&self) -> BlocklistsApi {
        BlocklistsApi::new(self.clone())
    }

    /// Access custom commands.
    pub fn commands(&self) -> CommandsApi {
        CommandsApi::new(self.clone())
    }

    /// Access push devices.
    pub fn devices(&self) -> DevicesApi {
        DevicesApi::new(self.clone())
    }

    /// Access roles and permissions.
    pub fn permissions(&self) -> PermissionsApi {
        PermissionsApi::new(self.clone())
    }

    /// Access push provider configuration.
    pub fn push_providers(&self) -> PushProvidersApi {
        PushProvidersApi::new(self.clone())
    }

    /// Access campaigns.
    pub fn campaigns(&self) -> CampaignsApi {
        CampaignsApi::new(self.clone())
    }

    /// Access segments.
    pub fn segments(&self) -> SegmentsApi {
        SegmentsApi::new(self.clone())
    }

    /// Access imports.
    pub fn imports(&self) -> ImportsApi {
        ImportsApi::new(self.clone())
    }

    /// Access async tasks.
    pub fn tasks(&self) -> TasksApi {
        TasksApi::new(self.clone())
    }

    /// Access message reminders.
    pub fn reminders(&self) -> RemindersApi {
        RemindersApi::new(self.clone())
    }

    /// A handle on one channel.
    ///
    /// `id` may be omitted for distinct (member-based) channels; the id is
    /// filled in from the server on the first [`Channel::query`].
    pub fn channel(&self, channel_type: &str, id: Option<&str>, data: Option<Value>) -> Channel {
        Channel::new(self.clone(), channel_type, id, data)
    }

    /// Batch updates over every channel matching a filter.
    pub fn channel_batch_updater(&self) -> ChannelBatchUpdater {
        ChannelBatchUpdater::new(self.clone())
    }

    /// Upload a file as multipart form data to `path`.
    ///
    /// Used by [`Channel::send_file`] and [`Channel::send_image`].
    pub async fn send_file(
        &self,
        path: &str,
        source: impl Into<FileSource>,
        name: &str,
        user: Value,
        content_type: Option<&str>,
    ) -> Result<StreamResponse> {
        let user = into_object(user, "user")?;
        let contents = self.read_source(source.into()).await?;

        let file = Part::bytes(contents)
            .file_name(name.to_string())
            .mime_str(content_type.unwrap_or("application/octet-stream"))?;
        let user = Part::text(serde_json::to_string(&user)?).mime_str("application/json")?;
        let form = Form::new().part("file", file).part("user", user);

        self.send(Method::POST, path, Vec::new(), Body::Multipart(form))
            .await
    }

    async fn read_source(&self, source: FileSource) -> Result<Vec<u8>> {
        match source {
            FileSource::Bytes(bytes) => Ok(bytes),
            FileSource::Location(location)
                if location.starts_with("http://") || location.starts_with("https://") =>
            {
                let response = self
                    .inner
                    .http
                    .get(location.as_str())
                    .timeout(self.inner.timeout)
                    .send()
                    .await?
                    .error_for_status()?;
                Ok(response.bytes().await?.to_vec())
            }
            FileSource::Location(location) => Ok(tokio::fs::read(&location).await?),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Make a GET request.
    pub(crate) async fn get(&self, path: &str, query: Query) -> Result<StreamResponse> {
        self.send(Method::GET, path, query, Body::Empty).await
    }

    /// Make a GET request with a JSON-encoded `payload` query parameter.
    pub(crate) async fn get_with_payload<P>(
        &self,
        path: &str,
        payload: &P,
    ) -> Result<StreamResponse>
    where
        P: Serialize + ?Sized,
    {
        let payload = serde_json::to_string(payload)?;
        self.get(path, vec![("payload".to_string(), payload)]).await
    }

    /// Make a DELETE request.
    pub(crate) async fn delete(&self, path: &str, query: Query) -> Result<StreamResponse> {
        self.send(Method::DELETE, path, query, Body::Empty).await
    }

    /// Make a POST request.
    pub(crate) async fn post<B>(&self, path: &str, body: &B) -> Result<StreamResponse>
    where
        B: Serialize + ?Sized,
    {
        let body = Body::Json(serde_json::to_value(body)?);
        self.send(Method::POST, path, Vec::new(), body).await
    }

    /// Make a PUT request.
    pub(crate) async fn put<B>(&self, path: &str, body: &B, query: Query) -> Result<StreamResponse>
    where
        B: Serialize + ?Sized,
    {
        let body = Body::Json(serde_json::to_value(body)?);
        self.send(Method::PUT, path, query, body).await
    }

    /// Make a PATCH request.
    pub(crate) async fn patch<B>(&self, path: &str, body: &B) -> Result<StreamResponse>
    where
        B: Serialize + ?Sized,
    {
        let body = Body::Json(serde_json::to_value(body)?);
        self.send(Method::PATCH, path, Vec::new(), body).await
    }

    /// Send a signed request and wrap the response.
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        mut query: Query,
        body: Body,
    ) -> Result<StreamResponse> {
        let url = Url::parse(&self.build_request_url(path))?;
        query.push(("api_key".to_string(), self.inner.api_key.clone()));

        let mut request = self
            .inner
            .http
            .request(method.clone(), url)
            .query(&query)
            .headers(self.auth_headers())
            .timeout(self.inner.timeout);

        request = match body {
            Body::Empty => request.header(CONTENT_TYPE, "application/json"),
            Body::Json(value) => request.json(&value),
            Body::Multipart(form) => request.multipart(form),
        };

        let response = request.send().await?;
        let status = response.status();
        debug!(%method, path, status = status.as_u16(), "stream api request");

        if status.is_success() {
            let headers = response.headers().clone();
            let text = response.text().await?;
            let body = if text.trim().is_empty() {
                Value::Object(Default::default())
            } else {
                serde_json::from_str(&text)?
            };
            Ok(StreamResponse::from_parts(status.as_u16(), headers, body))
        } else {
            Err(self.extract_error(response).await)
        }
    }

    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.inner.auth_token.clone());
        headers.insert("stream-auth-type", HeaderValue::from_static("jwt"));
        headers.insert("x-stream-client", HeaderValue::from_static(CLIENT_HEADER));
        headers
    }

    /// Extract an error from a failed response.
    async fn extract_error(&self, response: reqwest::Response) -> Error {
        let status = response.status().as_u16();
        let rate_limit = RateLimitHeaders::from_headers(response.headers());
        let body = response.text().await.unwrap_or_default();

        let (code, message) = match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(err) => (err.code, err.message.unwrap_or_else(|| body.clone())),
            Err(_) if body.is_empty() => (None, format!("HTTP {}", status)),
            Err(_) => (None, body.clone()),
        };

        warn!(status, ?code, %message, "stream api error");

        Error::Api {
            status,
            code,
            message,
            body,
            rate_limit,
        }
    }
}

/// Builder for creating a [`StreamClient`].
#[derive(Debug, Default)]
pub struct ClientBuilder {
    settings: ClientSettings,
    user_agent: Option<String>,
    http: Option<reqwest::Client>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API key. Falls back to `STREAM_KEY`.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.settings.api_key = Some(key.into());
        self
    }

    /// Set the API secret. Falls back to `STREAM_SECRET`.
    pub fn api_secret(mut self, secret: impl Into<String>) -> Self {
        self.settings.api_secret = Some(secret.into());
        self
    }

    /// Set the base URL. Falls back to `STREAM_CHAT_URL` and friends.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.settings.base_url = Some(url.into());
        self
    }

    /// Set the request timeout. Falls back to `STREAM_CHAT_TIMEOUT`, then 3s.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = Some(timeout);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Use a preconfigured HTTP client. Auth headers are still added per request.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http = Some(client);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<StreamClient> {
        let settings = self.settings.resolve()?;

        let signer = JwtSigner::new(settings.api_secret);
        let auth_token = HeaderValue::from_str(&signer.server_token()?)
            .map_err(|_| Error::Config("Invalid auth token".to_string()))?;

        let http = match self.http {
            Some(http) => http,
            None => {
                let user_agent = self.user_agent.unwrap_or_else(|| CLIENT_HEADER.to_string());
                reqwest::Client::builder().user_agent(user_agent).build()?
            }
        };

        debug!(base_url = %settings.base_url, "stream client configured");

        Ok(StreamClient {
            inner: Arc::new(ClientInner {
                http,
                base_url: settings.base_url,
                api_key: settings.api_key,
                signer,
                auth_token,
                timeout: settings.timeout,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> StreamClient {
        ClientBuilder::new()
            .api_key("key")
            .api_secret("secret")
            .base_url(base_url)
            .build()
            .unwrap()
    }

    #[test]
    fn test_request_url() {
        let client = client("https://chat.stream-io-api.com");
        assert_eq!(client.build_request_url("x"), "https://chat.stream-io-api.com/x");
        assert_eq!(
            client.build_request_url("/channels"),
            "https://chat.stream-io-api.com/channels"
        );
    }

    #[test]
    fn test_builder_normalizes_trailing_slash() {
        let client = client("http://localhost:3030/");
        assert_eq!(client.base_url(), "http://localhost:3030");
    }

    #[test]
    fn test_explicit_timeout() {
        let client = ClientBuilder::new()
            .api_key("key")
            .api_secret("secret")
            .base_url("http://localhost")
            .timeout(Duration::from_secs(9))
            .build()
            .unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(9));
    }

    #[test]
    fn test_builder_debug_hides_secret() {
        let builder = StreamClient::builder()
            .api_key("k")
            .api_secret("TOP-SECRET-VALUE");
        let printed = format!("{:?}", builder);
        assert!(!printed.contains("TOP-SECRET-VALUE"));
        assert!(printed.contains("api_key: Some(\"k\")"));

        let client = builder.base_url("http://localhost").build().unwrap();
        assert!(!format!("{:?}", client).contains("TOP-SECRET-VALUE"));
    }

    #[test]
    fn test_client_header_carries_version() {
        assert!(CLIENT_HEADER.starts_with("stream-chat-rust-client-"));
        assert!(CLIENT_HEADER.ends_with(env!("CARGO_PKG_VERSION")));
    }
}
