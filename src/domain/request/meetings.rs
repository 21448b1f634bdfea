use std::marker::PhantomData;

use url::Url;
use uuid::Uuid;

use crate::domain::evaluation::InputEvaluation;
use crate::domain::request::stage::{ForOptional, ForThemeId};
use crate::domain::validation::{ValidationError, verify_not_empty, verify_not_nil};
use crate::domain::value::Color;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Partially updates a meetings theme (`PATCH /v1/meetings/themes/{theme_id}`).
///
/// Only the values that were set are sent.
pub struct UpdateThemeRequest {
    theme_id: Uuid,
    theme_name: Option<String>,
    main_color: Option<Color>,
    brand_text: Option<String>,
    short_company_url: Option<Url>,
}

impl UpdateThemeRequest {
    pub fn build() -> UpdateThemeRequestBuilder<ForThemeId> {
        UpdateThemeRequestBuilder {
            theme_id: Uuid::nil(),
            theme_name: None,
            main_color: None,
            brand_text: None,
            short_company_url: None,
            stage: PhantomData,
        }
    }

    pub fn theme_id(&self) -> Uuid {
        self.theme_id
    }

    pub fn theme_name(&self) -> Option<&str> {
        self.theme_name.as_deref()
    }

    pub fn main_color(&self) -> Option<Color> {
        self.main_color
    }

    pub fn brand_text(&self) -> Option<&str> {
        self.brand_text.as_deref()
    }

    pub fn short_company_url(&self) -> Option<&Url> {
        self.short_company_url.as_ref()
    }

    fn verify_theme_id(&self) -> Result<(), ValidationError> {
        verify_not_nil(self, &self.theme_id, "ThemeId")
    }

    fn verify_theme_name(&self) -> Result<(), ValidationError> {
        match self.theme_name.as_deref() {
            Some(name) => verify_not_empty(self, name, "ThemeName"),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone)]
/// Staged builder for [`UpdateThemeRequest`].
pub struct UpdateThemeRequestBuilder<S> {
    theme_id: Uuid,
    theme_name: Option<String>,
    main_color: Option<Color>,
    brand_text: Option<String>,
    short_company_url: Option<Url>,
    stage: PhantomData<S>,
}

impl UpdateThemeRequestBuilder<ForThemeId> {
    pub fn with_theme_id(self, value: Uuid) -> UpdateThemeRequestBuilder<ForOptional> {
        UpdateThemeRequestBuilder {
            theme_id: value,
            theme_name: self.theme_name,
            main_color: self.main_color,
            brand_text: self.brand_text,
            short_company_url: self.short_company_url,
            stage: PhantomData,
        }
    }
}

impl UpdateThemeRequestBuilder<ForOptional> {
    pub fn with_name(self, value: impl Into<String>) -> Self {
        Self {
            theme_name: Some(value.into()),
            ..self
        }
    }

    pub fn with_color(self, value: Color) -> Self {
        Self {
            main_color: Some(value),
            ..self
        }
    }

    pub fn with_brand_text(self, value: impl Into<String>) -> Self {
        Self {
            brand_text: Some(value.into()),
            ..self
        }
    }

    pub fn with_short_company_url(self, value: Url) -> Self {
        Self {
            short_company_url: Some(value),
            ..self
        }
    }

    pub fn create(self) -> Result<UpdateThemeRequest, ValidationError> {
        InputEvaluation::evaluate(UpdateThemeRequest {
            theme_id: self.theme_id,
            theme_name: self.theme_name,
            main_color: self.main_color,
            brand_text: self.brand_text,
            short_company_url: self.short_company_url,
        })
        .with_rules(&[
            UpdateThemeRequest::verify_theme_id,
            UpdateThemeRequest::verify_theme_name,
        ])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Sets the default theme of the meetings application (`PATCH /v1/meetings/applications`).
pub struct UpdateApplicationRequest {
    default_theme_id: Uuid,
}

impl UpdateApplicationRequest {
    pub fn parse(default_theme_id: Uuid) -> Result<Self, ValidationError> {
        InputEvaluation::evaluate(Self { default_theme_id })
            .with_rules(&[Self::verify_default_theme_id])
    }

    pub fn default_theme_id(&self) -> Uuid {
        self.default_theme_id
    }

    fn verify_default_theme_id(&self) -> Result<(), ValidationError> {
        verify_not_nil(self, &self.default_theme_id, "DefaultThemeId")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Lists dial-in numbers for meetings (`GET /beta/meetings/dial-in-numbers`).
pub struct GetDialNumbersRequest;
