use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

use crate::domain::{
    CreateUserRequest, HttpMethod, RequestBody, SerializationError, User, VonageRequest,
};

#[derive(Debug, Serialize)]
struct CreateUserBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<&'a Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<CreateUserProperties<'a>>,
}

#[derive(Debug, Serialize)]
struct CreateUserProperties<'a> {
    custom_data: &'a Map<String, Value>,
}

impl VonageRequest for CreateUserRequest {
    type Response = User;

    const METHOD: HttpMethod = HttpMethod::Post;

    fn resource_path(&self) -> String {
        "/v1/users".to_owned()
    }

    fn body_content(&self) -> Result<Option<RequestBody>, SerializationError> {
        let body = CreateUserBody {
            name: self.name(),
            display_name: self.display_name(),
            image_url: self.image_url(),
            properties: self
                .custom_data()
                .map(|custom_data| CreateUserProperties { custom_data }),
        };
        Ok(Some(RequestBody::Json(serde_json::to_string(&body)?)))
    }
}
