use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use url::Url;
use uuid::Uuid;

use crate::domain::value::{Color, MemberState};

#[derive(Debug, thiserror::Error)]
/// A response body could not be turned into its DTO.
pub enum ResponseError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// A legacy Verify endpoint answered `2xx` with a non-zero status.
    #[error("verify failed with status {status}: {error_text:?}")]
    Verify {
        status: String,
        error_text: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// RFC 7807 problem details returned by the JSON APIs on failure.
pub struct ProblemDetails {
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub instance: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HalLink {
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HalLinks {
    #[serde(rename = "self", default)]
    pub self_link: Option<HalLink>,
    #[serde(default)]
    pub first: Option<HalLink>,
    #[serde(default)]
    pub next: Option<HalLink>,
    #[serde(default)]
    pub prev: Option<HalLink>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConversationState {
    Active,
    Inactive,
    Deleted,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Timestamps {
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub destroyed: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConversationProperties {
    /// Seconds after which an empty conversation is deleted.
    #[serde(default)]
    pub ttl: Option<u64>,
    #[serde(default)]
    pub custom_data: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Conversation {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<Url>,
    #[serde(default)]
    pub state: Option<ConversationState>,
    #[serde(default)]
    pub sequence_number: Option<u64>,
    #[serde(default)]
    pub timestamp: Option<Timestamps>,
    #[serde(default)]
    pub properties: Option<ConversationProperties>,
    #[serde(rename = "_links", default)]
    pub links: Option<HalLinks>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
/// Summary of a conversation as listed for a user.
pub struct UserConversation {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<Url>,
    #[serde(default)]
    pub state: Option<ConversationState>,
    #[serde(default)]
    pub timestamp: Option<Timestamps>,
    #[serde(rename = "_embedded", default)]
    pub member: Option<UserConversationMember>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserConversationMember {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub state: Option<MemberState>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EmbeddedConversations {
    #[serde(default)]
    pub conversations: Vec<UserConversation>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
/// One page of `GET /v1/users/{user_id}/conversations`.
pub struct UserConversations {
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(rename = "_embedded", default)]
    pub embedded: EmbeddedConversations,
    #[serde(rename = "_links", default)]
    pub links: HalLinks,
}

impl UserConversations {
    pub fn conversations(&self) -> &[UserConversation] {
        &self.embedded.conversations
    }

    /// Cursor of the next page, taken from `_links.next.href`.
    pub fn next_cursor(&self) -> Option<String> {
        let href = &self.links.next.as_ref()?.href;
        // `href` may be relative to the API host.
        let url = Url::parse(href)
            .or_else(|_| Url::parse("https://api.nexmo.com").and_then(|base| base.join(href)))
            .ok()?;
        url.query_pairs()
            .find(|(key, _)| key == "cursor")
            .map(|(_, value)| value.into_owned())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserProperties {
    #[serde(default)]
    pub custom_data: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<Url>,
    #[serde(default)]
    pub properties: Option<UserProperties>,
    #[serde(rename = "_links", default)]
    pub links: Option<HalLinks>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
/// Product a meetings theme applies to.
pub enum ThemeDomain {
    Vcp,
    Vbc,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Theme {
    pub theme_id: Uuid,
    #[serde(default)]
    pub theme_name: Option<String>,
    pub domain: ThemeDomain,
    pub account_id: String,
    pub application_id: Uuid,
    pub main_color: Color,
    #[serde(default)]
    pub short_company_url: Option<Url>,
    #[serde(default)]
    pub brand_text: Option<String>,
    #[serde(default)]
    pub brand_image_colored: Option<String>,
    #[serde(default)]
    pub brand_image_white: Option<String>,
    #[serde(default)]
    pub branded_favicon: Option<String>,
    #[serde(default)]
    pub brand_image_colored_url: Option<Url>,
    #[serde(default)]
    pub brand_image_white_url: Option<Url>,
    #[serde(default)]
    pub branded_favicon_url: Option<Url>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Meetings application settings.
pub struct Application {
    pub application_id: Uuid,
    pub account_id: String,
    #[serde(default)]
    pub default_theme_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DialInNumber {
    pub number: String,
    pub locale: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifyResponse {
    pub request_id: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifyCheckResponse {
    pub request_id: String,
    pub status: String,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub estimated_price_messages_sent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifyControlResponse {
    pub status: String,
    pub command: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifySearchCheck {
    #[serde(default)]
    pub date_received: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifySearchEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Verification details; dates are kept as sent (`YYYY-MM-DD HH:MM:SS`).
pub struct VerifySearchResponse {
    pub request_id: String,
    /// Verification progress, e.g. `IN PROGRESS`, `SUCCESS`, `FAILED`.
    pub status: String,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub date_submitted: Option<String>,
    #[serde(default)]
    pub date_finalized: Option<String>,
    #[serde(default)]
    pub first_event_date: Option<String>,
    #[serde(default)]
    pub last_event_date: Option<String>,
    #[serde(default)]
    pub checks: Vec<VerifySearchCheck>,
    #[serde(default)]
    pub events: Vec<VerifySearchEvent>,
    #[serde(default)]
    pub estimated_price_messages_sent: Option<String>,
}
