//! Client layer: credentials, base URLs and dispatch of validated requests.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::{debug, warn};

use crate::domain::{
    ApiKey, ApiSecret, ApiSurface, AuthPlacement, BearerToken, HttpMethod, ProblemDetails,
    RequestBody, ResponseError, SerializationError, ValidationError, VonageRequest,
};

const DEFAULT_API_URL: &str = "https://api.nexmo.com";
const DEFAULT_MEETINGS_URL: &str = "https://api-eu.vonage.com";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpRequest {
    method: HttpMethod,
    url: String,
    headers: Vec<(&'static str, String)>,
    body: Option<(&'static str, String)>,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn send(
        &self,
        request: HttpRequest,
    ) -> BoxFuture<'_, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

fn reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Patch => reqwest::Method::PATCH,
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> BoxFuture<'_, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut builder = self
                .client
                .request(reqwest_method(request.method), &request.url);
            for (name, value) in request.headers {
                builder = builder.header(name, value);
            }
            if let Some((content_type, body)) = request.body {
                builder = builder
                    .header(reqwest::header::CONTENT_TYPE, content_type)
                    .body(body);
            }
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// Authentication credentials for Vonage API calls.
///
/// Use [`Credentials::api_key_secret`] for account credentials. They are sent as basic auth
/// and, for the legacy Verify endpoints, as `api_key`/`api_secret` parameters.
/// Use [`Credentials::bearer_token`] with an application JWT signed by the caller.
pub enum Credentials {
    ApiKeySecret { key: ApiKey, secret: ApiSecret },
    BearerToken(BearerToken),
}

impl Credentials {
    pub fn api_key_secret(
        key: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::ApiKeySecret {
            key: ApiKey::new(key)?,
            secret: ApiSecret::new(secret)?,
        })
    }

    pub fn bearer_token(token: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self::BearerToken(BearerToken::new(token)?))
    }

    fn authorization_header(&self) -> String {
        match self {
            Self::ApiKeySecret { key, secret } => {
                let encoded = BASE64.encode(format!("{}:{}", key.as_str(), secret.as_str()));
                format!("Basic {encoded}")
            }
            Self::BearerToken(token) => format!("Bearer {}", token.as_str()),
        }
    }

    fn legacy_params(&self) -> Result<[(String, String); 2], VonageError> {
        match self {
            Self::ApiKeySecret { key, secret } => Ok([
                (ApiKey::FIELD.to_owned(), key.as_str().to_owned()),
                (ApiSecret::FIELD.to_owned(), secret.as_str().to_owned()),
            ]),
            Self::BearerToken(_) => Err(VonageError::MissingCredentials(
                "this endpoint requires an API key and secret",
            )),
        }
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`VonageClient`].
pub enum VonageError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status; `problem` is set when the body is RFC 7807 JSON.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus {
        status: u16,
        problem: Option<ProblemDetails>,
        body: Option<String>,
    },

    /// A legacy Verify endpoint reported a failure inside a `2xx` reply.
    #[error("verify error: status {status}: {error_text:?}")]
    Verify {
        status: String,
        error_text: Option<String>,
    },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    #[error("serialization error: {0}")]
    Serialization(#[from] SerializationError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The configured credentials cannot authenticate this request.
    #[error("missing credentials: {0}")]
    MissingCredentials(&'static str),
}

impl From<ResponseError> for VonageError {
    fn from(value: ResponseError) -> Self {
        match value {
            ResponseError::Verify { status, error_text } => Self::Verify { status, error_text },
            other => Self::Parse(Box::new(other)),
        }
    }
}

#[derive(Debug, Clone)]
/// Builder for [`VonageClient`].
///
/// Use this when you need to customize base URLs, the timeout, or the user-agent.
pub struct VonageClientBuilder {
    credentials: Credentials,
    api_url: String,
    meetings_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl VonageClientBuilder {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api_url: DEFAULT_API_URL.to_owned(),
            meetings_url: DEFAULT_MEETINGS_URL.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the base URL for conversations, users and verify.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Override the base URL for meetings.
    pub fn meetings_url(mut self, url: impl Into<String>) -> Self {
        self.meetings_url = url.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> Result<VonageClient, VonageError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| VonageError::Transport(Box::new(err)))?;

        Ok(VonageClient {
            credentials: self.credentials,
            api_url: self.api_url,
            meetings_url: self.meetings_url,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level Vonage client.
///
/// Sends any [`VonageRequest`]: renders its path, query and body, attaches credentials,
/// and decodes the typed response.
pub struct VonageClient {
    credentials: Credentials,
    api_url: String,
    meetings_url: String,
    http: Arc<dyn HttpTransport>,
}

impl VonageClient {
    /// Create a client using the default base URLs.
    ///
    /// For more customization, use [`VonageClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api_url: DEFAULT_API_URL.to_owned(),
            meetings_url: DEFAULT_MEETINGS_URL.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    pub fn builder(credentials: Credentials) -> VonageClientBuilder {
        VonageClientBuilder::new(credentials)
    }

    fn base_url(&self, surface: ApiSurface) -> &str {
        match surface {
            ApiSurface::Api => &self.api_url,
            ApiSurface::Meetings => &self.meetings_url,
        }
    }

    /// Send a validated request and decode its response.
    ///
    /// Errors:
    /// - [`VonageError::HttpStatus`] for non-2xx HTTP responses,
    /// - [`VonageError::Verify`] when a legacy Verify endpoint reports a non-zero status,
    /// - [`VonageError::MissingCredentials`] when a legacy endpoint is called with a bearer token.
    pub async fn send<R: VonageRequest>(&self, request: &R) -> Result<R::Response, VonageError> {
        let http_request = self.render(request)?;

        debug!(
            method = R::METHOD.as_str(),
            surface = ?request.surface(),
            path = %request.resource_path(),
            "sending request"
        );

        let response = self
            .http
            .send(http_request)
            .await
            .map_err(VonageError::Transport)?;

        debug!(status = response.status, "received response");

        if !(200..=299).contains(&response.status) {
            warn!(
                status = response.status,
                path = %request.resource_path(),
                "request failed"
            );
            let problem = serde_json::from_str::<ProblemDetails>(&response.body).ok();
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(VonageError::HttpStatus {
                status: response.status,
                problem,
                body,
            });
        }

        request.decode_response(&response.body).map_err(|err| {
            if let ResponseError::Verify { status, .. } = &err {
                warn!(%status, path = %request.resource_path(), "verify request failed");
            }
            VonageError::from(err)
        })
    }

    fn render<R: VonageRequest>(&self, request: &R) -> Result<HttpRequest, VonageError> {
        let mut headers = vec![("Accept", "application/json".to_owned())];
        let mut query = request.query_string();
        let mut body = request.body_content()?;

        match request.auth() {
            AuthPlacement::Header => {
                headers.push(("Authorization", self.credentials.authorization_header()));
            }
            AuthPlacement::Form => {
                let params = self.credentials.legacy_params()?;
                body = Some(match body {
                    Some(RequestBody::Form(mut fields)) => {
                        fields.extend(params);
                        RequestBody::Form(fields)
                    }
                    _ => RequestBody::Form(params.into()),
                });
            }
            AuthPlacement::Query => {
                let params = self.credentials.legacy_params()?;
                query = url::form_urlencoded::Serializer::for_suffix(query, 0)
                    .extend_pairs(params)
                    .finish();
            }
        }

        let mut url = format!(
            "{}{}",
            self.base_url(request.surface()).trim_end_matches('/'),
            request.resource_path()
        );
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }

        Ok(HttpRequest {
            method: R::METHOD,
            url,
            headers,
            body: body.map(|body| (body.content_type(), body.content())),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;

    use crate::domain::{
        GetConversationRequest, GetDialNumbersRequest, GetUserConversationsRequest,
        UpdateApplicationRequest, VerifyCheckRequest, VerifyRequest, VerifySearchRequest,
    };

    use super::*;

    #[derive(Debug, Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug)]
    struct FakeTransportState {
        last_request: Option<HttpRequest>,
        response_status: u16,
        response_body: String,
    }

    impl FakeTransport {
        fn new(response_status: u16, response_body: impl Into<String>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    last_request: None,
                    response_status,
                    response_body: response_body.into(),
                })),
            }
        }

        fn last_request(&self) -> HttpRequest {
            let state = self.state.lock().unwrap();
            state.last_request.clone().expect("no request was sent")
        }
    }

    impl HttpTransport for FakeTransport {
        fn send(
            &self,
            request: HttpRequest,
        ) -> BoxFuture<'_, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let (status, body) = {
                    let mut state = self.state.lock().unwrap();
                    state.last_request = Some(request);
                    (state.response_status, state.response_body.clone())
                };
                Ok(HttpResponse { status, body })
            })
        }
    }

    fn header<'a>(request: &'a HttpRequest, name: &str) -> Option<&'a str> {
        request
            .headers
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    fn make_client(credentials: Credentials, transport: FakeTransport) -> VonageClient {
        VonageClient {
            credentials,
            api_url: "https://api.example.invalid".to_owned(),
            meetings_url: "https://meetings.example.invalid/".to_owned(),
            http: Arc::new(transport),
        }
    }

    fn key_secret() -> Credentials {
        Credentials::api_key_secret("key", "secret").unwrap()
    }

    #[tokio::test]
    async fn get_user_conversations_uses_basic_auth_and_decodes_page() {
        let json = r#"
        {
          "page_size": 10,
          "_embedded": { "conversations": [ { "id": "CON-1", "name": "chat" } ] },
          "_links": { "self": { "href": "https://api.nexmo.com/v1/users/US-123/conversations" } }
        }
        "#;
        let transport = FakeTransport::new(200, json);
        let client = make_client(key_secret(), transport.clone());
        let request = GetUserConversationsRequest::build()
            .with_user_id("US-123")
            .create()
            .unwrap();

        let page = client.send(&request).await.unwrap();
        assert_eq!(page.conversations().len(), 1);

        let sent = transport.last_request();
        assert_eq!(sent.method, HttpMethod::Get);
        assert_eq!(
            sent.url,
            "https://api.example.invalid/v1/users/US-123/conversations?page_size=10&order=asc&order_by=created"
        );
        assert_eq!(header(&sent, "Accept"), Some("application/json"));
        assert_eq!(header(&sent, "Authorization"), Some("Basic a2V5OnNlY3JldA=="));
        assert!(sent.body.is_none());
    }

    #[tokio::test]
    async fn bearer_token_is_sent_as_authorization_header() {
        let transport = FakeTransport::new(200, r#"{ "id": "CON-1" }"#);
        let client = make_client(Credentials::bearer_token("jwt").unwrap(), transport.clone());

        client
            .send(&GetConversationRequest::parse("CON-1").unwrap())
            .await
            .unwrap();

        let sent = transport.last_request();
        assert_eq!(header(&sent, "Authorization"), Some("Bearer jwt"));
    }

    #[tokio::test]
    async fn meetings_requests_use_the_meetings_base_url() {
        let transport = FakeTransport::new(200, "[]");
        let client = make_client(key_secret(), transport.clone());

        let numbers = client.send(&GetDialNumbersRequest).await.unwrap();
        assert!(numbers.is_empty());

        let sent = transport.last_request();
        assert_eq!(
            sent.url,
            "https://meetings.example.invalid/beta/meetings/dial-in-numbers"
        );
    }

    #[tokio::test]
    async fn json_body_is_sent_with_content_type() {
        let json = r#"
        {
          "application_id": "48ac72d0-a829-4896-a067-dcb1c2b0f30c",
          "account_id": "1234",
          "default_theme_id": "ef2b46f3-8ebb-437e-a671-272e4990fbc8"
        }
        "#;
        let transport = FakeTransport::new(200, json);
        let client = make_client(key_secret(), transport.clone());
        let request =
            UpdateApplicationRequest::parse("ef2b46f3-8ebb-437e-a671-272e4990fbc8".parse().unwrap())
                .unwrap();

        client.send(&request).await.unwrap();

        let sent = transport.last_request();
        assert_eq!(sent.method, HttpMethod::Patch);
        assert_eq!(
            sent.body,
            Some((
                "application/json",
                r#"{"update_details":{"default_theme_id":"ef2b46f3-8ebb-437e-a671-272e4990fbc8"}}"#
                    .to_owned()
            ))
        );
    }

    #[tokio::test]
    async fn legacy_verify_appends_credentials_to_form_body() {
        let transport = FakeTransport::new(200, r#"{ "request_id": "abc", "status": "0" }"#);
        let client = make_client(key_secret(), transport.clone());
        let request = VerifyRequest::build()
            .with_number("447700900000")
            .with_brand("Acme Inc")
            .create()
            .unwrap();

        let response = client.send(&request).await.unwrap();
        assert_eq!(response.request_id, "abc");

        let sent = transport.last_request();
        assert_eq!(sent.url, "https://api.example.invalid/verify/json");
        assert_eq!(header(&sent, "Authorization"), None);
        assert_eq!(
            sent.body,
            Some((
                "application/x-www-form-urlencoded",
                "brand=Acme+Inc&number=447700900000&api_key=key&api_secret=secret".to_owned()
            ))
        );
    }

    #[tokio::test]
    async fn legacy_search_appends_credentials_to_query() {
        let json = r#"{ "request_id": "abc", "status": "IN PROGRESS" }"#;
        let transport = FakeTransport::new(200, json);
        let client = make_client(key_secret(), transport.clone());

        client
            .send(&VerifySearchRequest::parse("abc").unwrap())
            .await
            .unwrap();

        let sent = transport.last_request();
        assert_eq!(
            sent.url,
            "https://api.example.invalid/verify/search/json?request_id=abc&api_key=key&api_secret=secret"
        );
    }

    #[tokio::test]
    async fn legacy_endpoint_rejects_bearer_token() {
        let transport = FakeTransport::new(200, "{}");
        let client = make_client(Credentials::bearer_token("jwt").unwrap(), transport);

        let err = client
            .send(&VerifySearchRequest::parse("abc").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, VonageError::MissingCredentials(_)));
    }

    #[tokio::test]
    async fn verify_failure_in_ok_reply_maps_to_verify_error() {
        let json = r#"{ "request_id": "abc", "status": "16", "error_text": "The code provided does not match" }"#;
        let transport = FakeTransport::new(200, json);
        let client = make_client(key_secret(), transport);
        let request = VerifyCheckRequest::build()
            .with_request_id("abc")
            .with_code("1234")
            .create()
            .unwrap();

        let err = client.send(&request).await.unwrap_err();
        match err {
            VonageError::Verify { status, error_text } => {
                assert_eq!(status, "16");
                assert_eq!(error_text.as_deref(), Some("The code provided does not match"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_success_status_carries_problem_details() {
        let json = r#"
        {
          "type": "https://developer.nexmo.com/api-errors#unauthorized",
          "title": "Unauthorized",
          "detail": "You did not provide correct credentials.",
          "instance": "797a8f199c45014ab7b08bfe9cc1c12c"
        }
        "#;
        let transport = FakeTransport::new(401, json);
        let client = make_client(key_secret(), transport);

        let err = client
            .send(&GetConversationRequest::parse("CON-1").unwrap())
            .await
            .unwrap_err();
        match err {
            VonageError::HttpStatus {
                status,
                problem,
                body,
            } => {
                assert_eq!(status, 401);
                assert_eq!(
                    problem.and_then(|problem| problem.title).as_deref(),
                    Some("Unauthorized")
                );
                assert!(body.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_error_body_maps_to_none() {
        let transport = FakeTransport::new(503, "   ");
        let client = make_client(key_secret(), transport);

        let err = client
            .send(&GetConversationRequest::parse("CON-1").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            VonageError::HttpStatus {
                status: 503,
                problem: None,
                body: None
            }
        ));
    }

    #[tokio::test]
    async fn invalid_json_maps_to_parse_error() {
        let transport = FakeTransport::new(200, "{ not json }");
        let client = make_client(key_secret(), transport);

        let err = client
            .send(&GetConversationRequest::parse("CON-1").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, VonageError::Parse(_)));
    }

    #[test]
    fn credential_constructors_validate_inputs() {
        assert!(Credentials::api_key_secret("  ", "secret").is_err());
        assert!(Credentials::api_key_secret("key", "").is_err());
        assert!(Credentials::bearer_token("").is_err());
    }

    #[test]
    fn builder_url_overrides_are_applied() {
        let client = VonageClient::builder(key_secret())
            .api_url("https://api.example.invalid")
            .meetings_url("https://meetings.example.invalid")
            .timeout(Duration::from_secs(5))
            .user_agent("vonage-tests")
            .build()
            .unwrap();
        assert_eq!(client.base_url(ApiSurface::Api), "https://api.example.invalid");
        assert_eq!(
            client.base_url(ApiSurface::Meetings),
            "https://meetings.example.invalid"
        );

        let client = VonageClient::new(key_secret());
        assert_eq!(client.base_url(ApiSurface::Api), DEFAULT_API_URL);
        assert_eq!(client.base_url(ApiSurface::Meetings), DEFAULT_MEETINGS_URL);
    }
}
