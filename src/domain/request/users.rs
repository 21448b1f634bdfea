use serde_json::{Map, Value};
use url::Url;

use crate::domain::evaluation::InputEvaluation;
use crate::domain::validation::{ValidationError, verify_not_empty};

#[derive(Debug, Clone, PartialEq)]
/// Creates a user (`POST /v1/users`).
///
/// Every field is optional; Vonage generates a name when none is given.
pub struct CreateUserRequest {
    name: Option<String>,
    display_name: Option<String>,
    image_url: Option<Url>,
    custom_data: Option<Map<String, Value>>,
}

impl CreateUserRequest {
    pub fn build() -> CreateUserRequestBuilder {
        CreateUserRequestBuilder::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn image_url(&self) -> Option<&Url> {
        self.image_url.as_ref()
    }

    pub fn custom_data(&self) -> Option<&Map<String, Value>> {
        self.custom_data.as_ref()
    }

    fn verify_name(&self) -> Result<(), ValidationError> {
        match self.name.as_deref() {
            Some(name) => verify_not_empty(self, name, "Name"),
            None => Ok(()),
        }
    }

    fn verify_display_name(&self) -> Result<(), ValidationError> {
        match self.display_name.as_deref() {
            Some(display_name) => verify_not_empty(self, display_name, "DisplayName"),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default)]
/// Builder for [`CreateUserRequest`]; there is no required stage.
pub struct CreateUserRequestBuilder {
    name: Option<String>,
    display_name: Option<String>,
    image_url: Option<Url>,
    custom_data: Option<Map<String, Value>>,
}

impl CreateUserRequestBuilder {
    pub fn with_name(self, value: impl Into<String>) -> Self {
        Self {
            name: Some(value.into()),
            ..self
        }
    }

    pub fn with_display_name(self, value: impl Into<String>) -> Self {
        Self {
            display_name: Some(value.into()),
            ..self
        }
    }

    pub fn with_image_url(self, value: Url) -> Self {
        Self {
            image_url: Some(value),
            ..self
        }
    }

    /// Free-form data stored under `properties.custom_data`.
    pub fn with_custom_data(self, value: Map<String, Value>) -> Self {
        Self {
            custom_data: Some(value),
            ..self
        }
    }

    pub fn create(self) -> Result<CreateUserRequest, ValidationError> {
        InputEvaluation::evaluate(CreateUserRequest {
            name: self.name,
            display_name: self.display_name,
            image_url: self.image_url,
            custom_data: self.custom_data,
        })
        .with_rules(&[
            CreateUserRequest::verify_name,
            CreateUserRequest::verify_display_name,
        ])
    }
}
