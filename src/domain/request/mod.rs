//! Validated request types and the staged builders that produce them.

mod conversations;
mod meetings;
mod users;
mod verify;

use serde::de::DeserializeOwned;

use crate::domain::response::ResponseError;

pub use conversations::{
    GetConversationRequest, GetUserConversationsRequest, GetUserConversationsRequestBuilder,
};
pub use meetings::{
    GetDialNumbersRequest, UpdateApplicationRequest, UpdateThemeRequest,
    UpdateThemeRequestBuilder,
};
pub use users::{CreateUserRequest, CreateUserRequestBuilder};
pub use verify::{
    Psd2Request, Psd2RequestBuilder, VerifyCheckRequest, VerifyCheckRequestBuilder,
    VerifyControlRequest, VerifyControlRequestBuilder, VerifyOptions, VerifyRequest,
    VerifyRequestBuilder, VerifySearchRequest,
};

/// Builder stage markers.
///
/// A builder parameterized with `ForX` only exposes the setter for the required field `X`;
/// [`ForOptional`] exposes the optional setters and `create()`.
pub mod stage {
    #[derive(Debug, Clone, Copy, Default)]
    pub struct ForUserId;
    #[derive(Debug, Clone, Copy, Default)]
    pub struct ForThemeId;
    #[derive(Debug, Clone, Copy, Default)]
    pub struct ForNumber;
    #[derive(Debug, Clone, Copy, Default)]
    pub struct ForBrand;
    #[derive(Debug, Clone, Copy, Default)]
    pub struct ForPayee;
    #[derive(Debug, Clone, Copy, Default)]
    pub struct ForAmount;
    #[derive(Debug, Clone, Copy, Default)]
    pub struct ForRequestId;
    #[derive(Debug, Clone, Copy, Default)]
    pub struct ForCode;
    #[derive(Debug, Clone, Copy, Default)]
    pub struct ForCommand;
    #[derive(Debug, Clone, Copy, Default)]
    pub struct ForOptional;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Which Vonage host serves a request.
pub enum ApiSurface {
    /// `api.nexmo.com`: conversations, users, verify.
    Api,
    /// `api-eu.vonage.com`: meetings.
    Meetings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Where the client places credentials for a request.
pub enum AuthPlacement {
    /// `Authorization` header (basic auth or bearer token).
    Header,
    /// `api_key`/`api_secret` appended to the form body.
    Form,
    /// `api_key`/`api_secret` appended to the query string.
    Query,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Serialized request body.
pub enum RequestBody {
    Json(String),
    /// Ordered form fields; encoded on demand so the client can append credentials.
    Form(Vec<(String, String)>),
}

impl RequestBody {
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Json(_) => "application/json",
            Self::Form(_) => "application/x-www-form-urlencoded",
        }
    }

    /// Body text as sent on the wire.
    pub fn content(&self) -> String {
        match self {
            Self::Json(json) => json.clone(),
            Self::Form(params) => url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params)
                .finish(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
/// A validated request could not be rendered to its wire form.
pub enum SerializationError {
    #[error("failed to serialize JSON body: {0}")]
    Json(#[from] serde_json::Error),
}

/// A validated request that knows how to render itself to the wire.
///
/// Every projection is recomputed on each call.
pub trait VonageRequest {
    /// Response DTO decoded from a successful reply.
    type Response: DeserializeOwned;

    const METHOD: HttpMethod;

    fn surface(&self) -> ApiSurface {
        ApiSurface::Api
    }

    fn auth(&self) -> AuthPlacement {
        AuthPlacement::Header
    }

    /// Path with parameters substituted, without the query string.
    fn resource_path(&self) -> String;

    /// Encoded query string without the leading `?`; empty when nothing is set.
    fn query_string(&self) -> String {
        String::new()
    }

    /// Path followed by `?query` when the query string is non-empty.
    fn endpoint_path(&self) -> String {
        let path = self.resource_path();
        let query = self.query_string();
        if query.is_empty() {
            path
        } else {
            format!("{path}?{query}")
        }
    }

    /// Body for endpoints that accept one; `None` otherwise.
    fn body_content(&self) -> Result<Option<RequestBody>, SerializationError> {
        Ok(None)
    }

    fn decode_response(&self, body: &str) -> Result<Self::Response, ResponseError> {
        Ok(serde_json::from_str(body)?)
    }
}
