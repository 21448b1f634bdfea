use std::marker::PhantomData;
use std::net::IpAddr;

use crate::domain::evaluation::InputEvaluation;
use crate::domain::request::stage::{
    ForAmount, ForBrand, ForCode, ForCommand, ForNumber, ForOptional, ForPayee, ForRequestId,
};
use crate::domain::validation::{
    ValidationError, verify_higher_or_equal_than, verify_length_lower_or_equal_than,
    verify_lower_or_equal_than, verify_not_empty, verify_phone_number, verify_positive,
};
use crate::domain::value::{PhoneNumber, VerifyCommand, VerifyWorkflow};

/// Longest brand or payee accepted by Verify.
pub const VERIFY_MAX_BRAND_LENGTH: usize = 18;
/// Longest sender id accepted by Verify.
pub const VERIFY_MAX_SENDER_ID_LENGTH: usize = 11;

/// E.164 digits when `value` parses, otherwise `value` as given for the rule to reject.
fn normalize_number(value: String) -> String {
    PhoneNumber::parse(&value)
        .map(PhoneNumber::into_string)
        .unwrap_or(value)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Delivery options shared by [`VerifyRequest`] and [`Psd2Request`].
///
/// `None` leaves the choice to Vonage; nothing is sent for it.
pub struct VerifyOptions {
    /// Two-letter country code used when `number` is in national format (`country`).
    pub country: Option<String>,
    /// Number of digits in the code, `4..=6` (`code_length`).
    pub code_length: Option<u8>,
    /// Language of the message, e.g. `en-us` (`lg`).
    pub language: Option<String>,
    /// Seconds the code stays valid, `60..=3600` (`pin_expiry`).
    pub pin_expiry: Option<u16>,
    /// Seconds between delivery attempts, `60..=900` (`next_event_wait`).
    pub next_event_wait: Option<u16>,
    pub workflow: Option<VerifyWorkflow>,
}

impl VerifyOptions {
    pub const MIN_CODE_LENGTH: u8 = 4;
    pub const MAX_CODE_LENGTH: u8 = 6;
    pub const MIN_PIN_EXPIRY: u16 = 60;
    pub const MAX_PIN_EXPIRY: u16 = 3600;
    pub const MIN_NEXT_EVENT_WAIT: u16 = 60;
    pub const MAX_NEXT_EVENT_WAIT: u16 = 900;

    fn verify<R>(&self, request: &R) -> Result<(), ValidationError> {
        verify_optional_range(
            request,
            self.code_length,
            Self::MIN_CODE_LENGTH,
            Self::MAX_CODE_LENGTH,
            "CodeLength",
        )?;
        verify_optional_range(
            request,
            self.pin_expiry,
            Self::MIN_PIN_EXPIRY,
            Self::MAX_PIN_EXPIRY,
            "PinExpiry",
        )?;
        verify_optional_range(
            request,
            self.next_event_wait,
            Self::MIN_NEXT_EVENT_WAIT,
            Self::MAX_NEXT_EVENT_WAIT,
            "NextEventWait",
        )
    }
}

fn verify_optional_range<R, T>(
    request: &R,
    value: Option<T>,
    min: T,
    max: T,
    field: &'static str,
) -> Result<(), ValidationError>
where
    T: PartialOrd + Into<i64> + Copy,
{
    let Some(value) = value else {
        return Ok(());
    };
    verify_higher_or_equal_than(request, value, min, field)?;
    verify_lower_or_equal_than(request, value, max, field)
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Starts a verification (`POST /verify/json`).
pub struct VerifyRequest {
    number: String,
    brand: String,
    sender_id: Option<String>,
    options: VerifyOptions,
}

impl VerifyRequest {
    pub fn build() -> VerifyRequestBuilder<ForNumber> {
        VerifyRequestBuilder {
            number: String::new(),
            brand: String::new(),
            sender_id: None,
            options: VerifyOptions::default(),
            stage: PhantomData,
        }
    }

    /// Phone number in E.164 format without the leading `+`.
    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn sender_id(&self) -> Option<&str> {
        self.sender_id.as_deref()
    }

    pub fn options(&self) -> &VerifyOptions {
        &self.options
    }

    fn verify_number(&self) -> Result<(), ValidationError> {
        verify_phone_number(self, &self.number, "Number")
    }

    fn verify_brand(&self) -> Result<(), ValidationError> {
        verify_not_empty(self, &self.brand, "Brand")
    }

    fn verify_brand_length(&self) -> Result<(), ValidationError> {
        verify_length_lower_or_equal_than(self, &self.brand, VERIFY_MAX_BRAND_LENGTH, "Brand")
    }

    fn verify_sender_id(&self) -> Result<(), ValidationError> {
        match self.sender_id.as_deref() {
            Some(sender_id) => {
                verify_not_empty(self, sender_id, "SenderId")?;
                verify_length_lower_or_equal_than(
                    self,
                    sender_id,
                    VERIFY_MAX_SENDER_ID_LENGTH,
                    "SenderId",
                )
            }
            None => Ok(()),
        }
    }

    fn verify_options(&self) -> Result<(), ValidationError> {
        self.options.verify(self)
    }
}

#[derive(Debug, Clone)]
/// Staged builder for [`VerifyRequest`]: number, then brand, then options.
pub struct VerifyRequestBuilder<S> {
    number: String,
    brand: String,
    sender_id: Option<String>,
    options: VerifyOptions,
    stage: PhantomData<S>,
}

impl VerifyRequestBuilder<ForNumber> {
    pub fn with_number(self, value: impl Into<String>) -> VerifyRequestBuilder<ForBrand> {
        VerifyRequestBuilder {
            number: value.into(),
            brand: self.brand,
            sender_id: self.sender_id,
            options: self.options,
            stage: PhantomData,
        }
    }
}

impl VerifyRequestBuilder<ForBrand> {
    pub fn with_brand(self, value: impl Into<String>) -> VerifyRequestBuilder<ForOptional> {
        VerifyRequestBuilder {
            number: self.number,
            brand: value.into(),
            sender_id: self.sender_id,
            options: self.options,
            stage: PhantomData,
        }
    }
}

impl VerifyRequestBuilder<ForOptional> {
    pub fn with_sender_id(self, value: impl Into<String>) -> Self {
        Self {
            sender_id: Some(value.into()),
            ..self
        }
    }

    /// Replace every delivery option at once.
    pub fn with_options(self, options: VerifyOptions) -> Self {
        Self { options, ..self }
    }

    pub fn with_country(self, value: impl Into<String>) -> Self {
        let options = VerifyOptions {
            country: Some(value.into()),
            ..self.options
        };
        Self { options, ..self }
    }

    pub fn with_code_length(self, value: u8) -> Self {
        let options = VerifyOptions {
            code_length: Some(value),
            ..self.options
        };
        Self { options, ..self }
    }

    pub fn with_language(self, value: impl Into<String>) -> Self {
        let options = VerifyOptions {
            language: Some(value.into()),
            ..self.options
        };
        Self { options, ..self }
    }

    pub fn with_pin_expiry(self, seconds: u16) -> Self {
        let options = VerifyOptions {
            pin_expiry: Some(seconds),
            ..self.options
        };
        Self { options, ..self }
    }

    pub fn with_next_event_wait(self, seconds: u16) -> Self {
        let options = VerifyOptions {
            next_event_wait: Some(seconds),
            ..self.options
        };
        Self { options, ..self }
    }

    pub fn with_workflow(self, value: VerifyWorkflow) -> Self {
        let options = VerifyOptions {
            workflow: Some(value),
            ..self.options
        };
        Self { options, ..self }
    }

    pub fn create(self) -> Result<VerifyRequest, ValidationError> {
        InputEvaluation::evaluate(VerifyRequest {
            number: normalize_number(self.number),
            brand: self.brand,
            sender_id: self.sender_id,
            options: self.options,
        })
        .with_rules(&[
            VerifyRequest::verify_number,
            VerifyRequest::verify_brand,
            VerifyRequest::verify_brand_length,
            VerifyRequest::verify_sender_id,
            VerifyRequest::verify_options,
        ])
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Starts a PSD2 payment verification (`POST /verify/psd2/json`).
pub struct Psd2Request {
    number: String,
    payee: String,
    amount: f64,
    options: VerifyOptions,
}

impl Psd2Request {
    pub fn build() -> Psd2RequestBuilder<ForNumber> {
        Psd2RequestBuilder {
            number: String::new(),
            payee: String::new(),
            amount: 0.0,
            options: VerifyOptions::default(),
            stage: PhantomData,
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn payee(&self) -> &str {
        &self.payee
    }

    /// Amount in euros.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn options(&self) -> &VerifyOptions {
        &self.options
    }

    fn verify_number(&self) -> Result<(), ValidationError> {
        verify_phone_number(self, &self.number, "Number")
    }

    fn verify_payee(&self) -> Result<(), ValidationError> {
        verify_not_empty(self, &self.payee, "Payee")
    }

    fn verify_payee_length(&self) -> Result<(), ValidationError> {
        verify_length_lower_or_equal_than(self, &self.payee, VERIFY_MAX_BRAND_LENGTH, "Payee")
    }

    fn verify_amount(&self) -> Result<(), ValidationError> {
        verify_positive(self, self.amount, "Amount")
    }

    fn verify_options(&self) -> Result<(), ValidationError> {
        self.options.verify(self)
    }
}

#[derive(Debug, Clone)]
/// Staged builder for [`Psd2Request`]: number, payee, amount, then options.
pub struct Psd2RequestBuilder<S> {
    number: String,
    payee: String,
    amount: f64,
    options: VerifyOptions,
    stage: PhantomData<S>,
}

impl Psd2RequestBuilder<ForNumber> {
    pub fn with_number(self, value: impl Into<String>) -> Psd2RequestBuilder<ForPayee> {
        Psd2RequestBuilder {
            number: value.into(),
            payee: self.payee,
            amount: self.amount,
            options: self.options,
            stage: PhantomData,
        }
    }
}

impl Psd2RequestBuilder<ForPayee> {
    pub fn with_payee(self, value: impl Into<String>) -> Psd2RequestBuilder<ForAmount> {
        Psd2RequestBuilder {
            number: self.number,
            payee: value.into(),
            amount: self.amount,
            options: self.options,
            stage: PhantomData,
        }
    }
}

impl Psd2RequestBuilder<ForAmount> {
    pub fn with_amount(self, value: f64) -> Psd2RequestBuilder<ForOptional> {
        Psd2RequestBuilder {
            number: self.number,
            payee: self.payee,
            amount: value,
            options: self.options,
            stage: PhantomData,
        }
    }
}

impl Psd2RequestBuilder<ForOptional> {
    pub fn with_options(self, options: VerifyOptions) -> Self {
        Self { options, ..self }
    }

    pub fn with_country(self, value: impl Into<String>) -> Self {
        let options = VerifyOptions {
            country: Some(value.into()),
            ..self.options
        };
        Self { options, ..self }
    }

    pub fn with_code_length(self, value: u8) -> Self {
        let options = VerifyOptions {
            code_length: Some(value),
            ..self.options
        };
        Self { options, ..self }
    }

    pub fn with_language(self, value: impl Into<String>) -> Self {
        let options = VerifyOptions {
            language: Some(value.into()),
            ..self.options
        };
        Self { options, ..self }
    }

    pub fn with_pin_expiry(self, seconds: u16) -> Self {
        let options = VerifyOptions {
            pin_expiry: Some(seconds),
            ..self.options
        };
        Self { options, ..self }
    }

    pub fn with_next_event_wait(self, seconds: u16) -> Self {
        let options = VerifyOptions {
            next_event_wait: Some(seconds),
            ..self.options
        };
        Self { options, ..self }
    }

    pub fn with_workflow(self, value: VerifyWorkflow) -> Self {
        let options = VerifyOptions {
            workflow: Some(value),
            ..self.options
        };
        Self { options, ..self }
    }

    pub fn create(self) -> Result<Psd2Request, ValidationError> {
        InputEvaluation::evaluate(Psd2Request {
            number: normalize_number(self.number),
            payee: self.payee,
            amount: self.amount,
            options: self.options,
        })
        .with_rules(&[
            Psd2Request::verify_number,
            Psd2Request::verify_payee,
            Psd2Request::verify_payee_length,
            Psd2Request::verify_amount,
            Psd2Request::verify_options,
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Checks a code entered by the user (`POST /verify/check/json`).
pub struct VerifyCheckRequest {
    request_id: String,
    code: String,
    ip_address: Option<IpAddr>,
}

impl VerifyCheckRequest {
    pub const MAX_CODE_LENGTH: usize = 6;

    pub fn build() -> VerifyCheckRequestBuilder<ForRequestId> {
        VerifyCheckRequestBuilder {
            request_id: String::new(),
            code: String::new(),
            ip_address: None,
            stage: PhantomData,
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn ip_address(&self) -> Option<IpAddr> {
        self.ip_address
    }

    fn verify_request_id(&self) -> Result<(), ValidationError> {
        verify_not_empty(self, &self.request_id, "RequestId")
    }

    fn verify_code(&self) -> Result<(), ValidationError> {
        verify_not_empty(self, &self.code, "Code")?;
        verify_length_lower_or_equal_than(self, &self.code, Self::MAX_CODE_LENGTH, "Code")
    }
}

#[derive(Debug, Clone)]
/// Staged builder for [`VerifyCheckRequest`]: request id, then code.
pub struct VerifyCheckRequestBuilder<S> {
    request_id: String,
    code: String,
    ip_address: Option<IpAddr>,
    stage: PhantomData<S>,
}

impl VerifyCheckRequestBuilder<ForRequestId> {
    pub fn with_request_id(self, value: impl Into<String>) -> VerifyCheckRequestBuilder<ForCode> {
        VerifyCheckRequestBuilder {
            request_id: value.into(),
            code: self.code,
            ip_address: self.ip_address,
            stage: PhantomData,
        }
    }
}

impl VerifyCheckRequestBuilder<ForCode> {
    pub fn with_code(self, value: impl Into<String>) -> VerifyCheckRequestBuilder<ForOptional> {
        VerifyCheckRequestBuilder {
            request_id: self.request_id,
            code: value.into(),
            ip_address: self.ip_address,
            stage: PhantomData,
        }
    }
}

impl VerifyCheckRequestBuilder<ForOptional> {
    /// IP address of the end user, used by Vonage for fraud detection.
    pub fn with_ip_address(self, value: IpAddr) -> Self {
        Self {
            ip_address: Some(value),
            ..self
        }
    }

    pub fn create(self) -> Result<VerifyCheckRequest, ValidationError> {
        InputEvaluation::evaluate(VerifyCheckRequest {
            request_id: self.request_id,
            code: self.code,
            ip_address: self.ip_address,
        })
        .with_rules(&[
            VerifyCheckRequest::verify_request_id,
            VerifyCheckRequest::verify_code,
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Cancels a verification or skips to its next attempt (`POST /verify/control/json`).
pub struct VerifyControlRequest {
    request_id: String,
    command: VerifyCommand,
}

impl VerifyControlRequest {
    pub fn build() -> VerifyControlRequestBuilder<ForRequestId> {
        VerifyControlRequestBuilder {
            request_id: String::new(),
            command: VerifyCommand::Cancel,
            stage: PhantomData,
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn command(&self) -> VerifyCommand {
        self.command
    }

    fn verify_request_id(&self) -> Result<(), ValidationError> {
        verify_not_empty(self, &self.request_id, "RequestId")
    }
}

#[derive(Debug, Clone)]
/// Staged builder for [`VerifyControlRequest`]: request id, then command.
pub struct VerifyControlRequestBuilder<S> {
    request_id: String,
    command: VerifyCommand,
    stage: PhantomData<S>,
}

impl VerifyControlRequestBuilder<ForRequestId> {
    pub fn with_request_id(
        self,
        value: impl Into<String>,
    ) -> VerifyControlRequestBuilder<ForCommand> {
        VerifyControlRequestBuilder {
            request_id: value.into(),
            command: self.command,
            stage: PhantomData,
        }
    }
}

impl VerifyControlRequestBuilder<ForCommand> {
    pub fn with_command(self, value: VerifyCommand) -> VerifyControlRequestBuilder<ForOptional> {
        VerifyControlRequestBuilder {
            request_id: self.request_id,
            command: value,
            stage: PhantomData,
        }
    }
}

impl VerifyControlRequestBuilder<ForOptional> {
    pub fn create(self) -> Result<VerifyControlRequest, ValidationError> {
        InputEvaluation::evaluate(VerifyControlRequest {
            request_id: self.request_id,
            command: self.command,
        })
        .with_rules(&[VerifyControlRequest::verify_request_id])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Looks up a verification (`GET /verify/search/json`).
pub struct VerifySearchRequest {
    request_id: String,
}

impl VerifySearchRequest {
    pub fn parse(request_id: impl Into<String>) -> Result<Self, ValidationError> {
        InputEvaluation::evaluate(Self {
            request_id: request_id.into(),
        })
        .with_rules(&[Self::verify_request_id])
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    fn verify_request_id(&self) -> Result<(), ValidationError> {
        verify_not_empty(self, &self.request_id, "RequestId")
    }
}
