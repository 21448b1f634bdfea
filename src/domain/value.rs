use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::domain::validation::{ValidationError, ValidationErrorKind};

const CREDENTIALS: &str = "Credentials";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Vonage account API key.
///
/// Invariant: non-empty after trimming.
pub struct ApiKey(String);

impl ApiKey {
    /// Wire field name used by the legacy APIs (`api_key`).
    pub const FIELD: &'static str = "api_key";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::new(
                CREDENTIALS,
                "ApiKey",
                ValidationErrorKind::Empty,
            ));
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Vonage account API secret.
///
/// Invariant: must not be empty (whitespace is preserved). `Debug` output is redacted.
pub struct ApiSecret(String);

impl ApiSecret {
    /// Wire field name used by the legacy APIs (`api_secret`).
    pub const FIELD: &'static str = "api_secret";

    /// Create a validated [`ApiSecret`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::new(
                CREDENTIALS,
                "ApiSecret",
                ValidationErrorKind::Empty,
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiSecret(***)")
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Pre-signed bearer token (application JWT) sent as `Authorization: Bearer ...`.
///
/// Invariant: non-empty after trimming. `Debug` output is redacted.
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::new(
                CREDENTIALS,
                "Token",
                ValidationErrorKind::Empty,
            ));
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Phone number normalized to E.164 digits without the leading `+` (`447700900000`).
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Form field name used by Verify (`number`).
    pub const FIELD: &'static str = "number";

    /// Parse an international number and normalize it.
    ///
    /// The leading `+` is optional; spaces and punctuation are dropped.
    pub fn parse(value: &str) -> Result<Self, ValidationErrorKind> {
        let trimmed = value.trim();
        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed).trim_start();
        if digits.is_empty() {
            return Err(ValidationErrorKind::Empty);
        }
        let parsed = phonenumber::parse(None, format!("+{digits}")).map_err(|_| {
            ValidationErrorKind::InvalidPhoneNumber {
                input: trimmed.to_owned(),
            }
        })?;
        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();
        Ok(Self(e164.trim_start_matches('+').to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Sort direction for paged listings (`order`).
pub enum FetchOrder {
    #[default]
    Ascending,
    Descending,
}

impl FetchOrder {
    /// Query field name (`order`).
    pub const FIELD: &'static str = "order";

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
/// State of a user's membership in a conversation (`state`).
pub enum MemberState {
    #[serde(alias = "INVITED")]
    Invited,
    #[serde(alias = "JOINED")]
    Joined,
    #[serde(alias = "LEFT")]
    Left,
}

impl MemberState {
    /// Query field name (`state`).
    pub const FIELD: &'static str = "state";

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Invited => "invited",
            Self::Joined => "joined",
            Self::Left => "left",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// 24-bit RGB color, rendered on the wire as `#RRGGBB`.
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional, hex digits are case-insensitive).
    pub fn from_hex(value: &str) -> Option<Self> {
        let hex = value.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color: {raw}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Verify delivery workflow (`workflow_id`).
///
/// See the Vonage Verify documentation for the channel sequence of each workflow.
pub enum VerifyWorkflow {
    #[default]
    SmsTtsTts,
    SmsSmsTts,
    TtsTts,
    SmsSms,
    SmsTts,
    Sms,
    Tts,
}

impl VerifyWorkflow {
    /// Form field name (`workflow_id`).
    pub const FIELD: &'static str = "workflow_id";

    pub fn id(self) -> u8 {
        match self {
            Self::SmsTtsTts => 1,
            Self::SmsSmsTts => 2,
            Self::TtsTts => 3,
            Self::SmsSms => 4,
            Self::SmsTts => 5,
            Self::Sms => 6,
            Self::Tts => 7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Command accepted by `verify/control` (`cmd`).
pub enum VerifyCommand {
    Cancel,
    TriggerNextEvent,
}

impl VerifyCommand {
    /// Form field name (`cmd`).
    pub const FIELD: &'static str = "cmd";

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cancel => "cancel",
            Self::TriggerNextEvent => "trigger_next_event",
        }
    }
}
