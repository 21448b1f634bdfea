use serde::Serialize;
use url::Url;
use uuid::Uuid;

use crate::domain::{
    ApiSurface, Application, DialInNumber, GetDialNumbersRequest, HttpMethod, RequestBody,
    SerializationError, Theme, UpdateApplicationRequest, UpdateThemeRequest, VonageRequest,
};

#[derive(Debug, Serialize)]
struct UpdateDetails<T> {
    update_details: T,
}

#[derive(Debug, Serialize)]
struct ThemeUpdate<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    theme_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    main_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    brand_text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    short_company_url: Option<&'a Url>,
}

#[derive(Debug, Serialize)]
struct ApplicationUpdate {
    default_theme_id: Uuid,
}

fn json_body<T: Serialize>(update_details: T) -> Result<Option<RequestBody>, SerializationError> {
    let json = serde_json::to_string(&UpdateDetails { update_details })?;
    Ok(Some(RequestBody::Json(json)))
}

impl VonageRequest for UpdateThemeRequest {
    type Response = Theme;

    const METHOD: HttpMethod = HttpMethod::Patch;

    fn surface(&self) -> ApiSurface {
        ApiSurface::Meetings
    }

    fn resource_path(&self) -> String {
        format!("/v1/meetings/themes/{}", self.theme_id())
    }

    fn body_content(&self) -> Result<Option<RequestBody>, SerializationError> {
        json_body(ThemeUpdate {
            theme_name: self.theme_name(),
            main_color: self.main_color().map(|color| color.to_hex()),
            brand_text: self.brand_text(),
            short_company_url: self.short_company_url(),
        })
    }
}

impl VonageRequest for UpdateApplicationRequest {
    type Response = Application;

    const METHOD: HttpMethod = HttpMethod::Patch;

    fn surface(&self) -> ApiSurface {
        ApiSurface::Meetings
    }

    fn resource_path(&self) -> String {
        "/v1/meetings/applications".to_owned()
    }

    fn body_content(&self) -> Result<Option<RequestBody>, SerializationError> {
        json_body(ApplicationUpdate {
            default_theme_id: self.default_theme_id(),
        })
    }
}

impl VonageRequest for GetDialNumbersRequest {
    type Response = Vec<DialInNumber>;

    const METHOD: HttpMethod = HttpMethod::Get;

    fn surface(&self) -> ApiSurface {
        ApiSurface::Meetings
    }

    fn resource_path(&self) -> String {
        "/beta/meetings/dial-in-numbers".to_owned()
    }
}
