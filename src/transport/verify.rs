use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::{
    AuthPlacement, HttpMethod, Psd2Request, RequestBody, ResponseError, SerializationError,
    VerifyCheckRequest, VerifyCheckResponse, VerifyCommand, VerifyControlRequest,
    VerifyControlResponse, VerifyOptions, VerifyRequest, VerifyResponse, VerifySearchRequest,
    VerifySearchResponse, VerifyWorkflow, VonageRequest,
};

use super::{encode_query, to_form};

/// Decode a legacy Verify reply.
///
/// These endpoints answer `200 OK` even when the operation failed; the outcome is carried by
/// `status` (`"0"` on success) and `error_text`.
fn decode_verify_json_response<T: DeserializeOwned>(body: &str) -> Result<T, ResponseError> {
    let value: Value = serde_json::from_str(body)?;

    let status = match value.get("status") {
        Some(Value::String(status)) => Some(status.clone()),
        Some(Value::Number(status)) => Some(status.to_string()),
        _ => None,
    };
    let error_text = value
        .get("error_text")
        .and_then(Value::as_str)
        .map(str::to_owned);
    let failed_status = status
        .as_deref()
        .and_then(|status| status.parse::<i64>().ok())
        .is_some_and(|code| code != 0);

    if failed_status || error_text.is_some() {
        return Err(ResponseError::Verify {
            status: status.unwrap_or_default(),
            error_text,
        });
    }

    Ok(serde_json::from_value(value)?)
}

fn push_options(params: &mut Vec<(&'static str, String)>, number: &str, options: &VerifyOptions) {
    if let Some(workflow) = options.workflow {
        params.push((VerifyWorkflow::FIELD, workflow.id().to_string()));
    }
    params.push(("number", number.to_owned()));
    if let Some(country) = &options.country {
        params.push(("country", country.clone()));
    }
    if let Some(code_length) = options.code_length {
        params.push(("code_length", code_length.to_string()));
    }
    if let Some(language) = &options.language {
        params.push(("lg", language.clone()));
    }
    if let Some(pin_expiry) = options.pin_expiry {
        params.push(("pin_expiry", pin_expiry.to_string()));
    }
    if let Some(next_event_wait) = options.next_event_wait {
        params.push(("next_event_wait", next_event_wait.to_string()));
    }
}

fn encode_verify_form(request: &VerifyRequest) -> Vec<(&'static str, String)> {
    let mut params = vec![("brand", request.brand().to_owned())];
    if let Some(sender_id) = request.sender_id() {
        params.push(("sender_id", sender_id.to_owned()));
    }
    push_options(&mut params, request.number(), request.options());
    params
}

fn encode_psd2_form(request: &Psd2Request) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("payee", request.payee().to_owned()),
        ("amount", request.amount().to_string()),
    ];
    push_options(&mut params, request.number(), request.options());
    params
}

fn encode_check_form(request: &VerifyCheckRequest) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("request_id", request.request_id().to_owned()),
        ("code", request.code().to_owned()),
    ];
    if let Some(ip_address) = request.ip_address() {
        params.push(("ip_address", ip_address.to_string()));
    }
    params
}

fn encode_control_form(request: &VerifyControlRequest) -> Vec<(&'static str, String)> {
    vec![
        ("request_id", request.request_id().to_owned()),
        (VerifyCommand::FIELD, request.command().as_str().to_owned()),
    ]
}

fn form_body(params: Vec<(&str, String)>) -> Result<Option<RequestBody>, SerializationError> {
    Ok(Some(RequestBody::Form(to_form(params))))
}

impl VonageRequest for VerifyRequest {
    type Response = VerifyResponse;

    const METHOD: HttpMethod = HttpMethod::Post;

    fn auth(&self) -> AuthPlacement {
        AuthPlacement::Form
    }

    fn resource_path(&self) -> String {
        "/verify/json".to_owned()
    }

    fn body_content(&self) -> Result<Option<RequestBody>, SerializationError> {
        form_body(encode_verify_form(self))
    }

    fn decode_response(&self, body: &str) -> Result<Self::Response, ResponseError> {
        decode_verify_json_response(body)
    }
}

impl VonageRequest for Psd2Request {
    type Response = VerifyResponse;

    const METHOD: HttpMethod = HttpMethod::Post;

    fn auth(&self) -> AuthPlacement {
        AuthPlacement::Form
    }

    fn resource_path(&self) -> String {
        "/verify/psd2/json".to_owned()
    }

    fn body_content(&self) -> Result<Option<RequestBody>, SerializationError> {
        form_body(encode_psd2_form(self))
    }

    fn decode_response(&self, body: &str) -> Result<Self::Response, ResponseError> {
        decode_verify_json_response(body)
    }
}

impl VonageRequest for VerifyCheckRequest {
    type Response = VerifyCheckResponse;

    const METHOD: HttpMethod = HttpMethod::Post;

    fn auth(&self) -> AuthPlacement {
        AuthPlacement::Form
    }

    fn resource_path(&self) -> String {
        "/verify/check/json".to_owned()
    }

    fn body_content(&self) -> Result<Option<RequestBody>, SerializationError> {
        form_body(encode_check_form(self))
    }

    fn decode_response(&self, body: &str) -> Result<Self::Response, ResponseError> {
        decode_verify_json_response(body)
    }
}

impl VonageRequest for VerifyControlRequest {
    type Response = VerifyControlResponse;

    const METHOD: HttpMethod = HttpMethod::Post;

    fn auth(&self) -> AuthPlacement {
        AuthPlacement::Form
    }

    fn resource_path(&self) -> String {
        "/verify/control/json".to_owned()
    }

    fn body_content(&self) -> Result<Option<RequestBody>, SerializationError> {
        form_body(encode_control_form(self))
    }

    fn decode_response(&self, body: &str) -> Result<Self::Response, ResponseError> {
        decode_verify_json_response(body)
    }
}

impl VonageRequest for VerifySearchRequest {
    type Response = VerifySearchResponse;

    const METHOD: HttpMethod = HttpMethod::Get;

    fn auth(&self) -> AuthPlacement {
        AuthPlacement::Query
    }

    fn resource_path(&self) -> String {
        "/verify/search/json".to_owned()
    }

    fn query_string(&self) -> String {
        encode_query(&[("request_id", self.request_id().to_owned())])
    }

    fn decode_response(&self, body: &str) -> Result<Self::Response, ResponseError> {
        decode_verify_json_response(body)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const REQUEST_ID: &str = "abcdef0123456789abcdef0123456789";

    fn form_content<R: VonageRequest>(request: &R) -> String {
        match request.body_content().unwrap() {
            Some(body @ RequestBody::Form(_)) => body.content(),
            other => panic!("expected form body, got {other:?}"),
        }
    }

    #[test]
    fn verify_form_with_required_fields_only() {
        let request = VerifyRequest::build()
            .with_number("447700900000")
            .with_brand("Acme Inc")
            .create()
            .unwrap();

        assert_eq!(request.endpoint_path(), "/verify/json");
        assert_eq!(request.auth(), AuthPlacement::Form);
        assert_eq!(form_content(&request), "brand=Acme+Inc&number=447700900000");
    }

    #[test]
    fn verify_form_renders_normalized_number() {
        let request = VerifyRequest::build()
            .with_number(" +44 7700 900000 ")
            .with_brand("Acme")
            .create()
            .unwrap();

        assert_eq!(form_content(&request), "brand=Acme&number=447700900000");
    }

    #[test]
    fn verify_form_renders_every_field_in_order() {
        let request = VerifyRequest::build()
            .with_number("447700900000")
            .with_brand("Acme Inc")
            .with_sender_id("ACME")
            .with_workflow(VerifyWorkflow::SmsSms)
            .with_country("GB")
            .with_code_length(6)
            .with_language("en-gb")
            .with_pin_expiry(240)
            .with_next_event_wait(120)
            .create()
            .unwrap();

        assert_eq!(
            form_content(&request),
            "brand=Acme+Inc&sender_id=ACME&workflow_id=4&number=447700900000&country=GB\
             &code_length=6&lg=en-gb&pin_expiry=240&next_event_wait=120"
        );
    }

    #[test]
    fn psd2_form_renders_payee_and_amount_first() {
        let request = Psd2Request::build()
            .with_number("447700900000")
            .with_payee("Acme Inc")
            .with_amount(48.0)
            .with_workflow(VerifyWorkflow::Tts)
            .with_code_length(4)
            .create()
            .unwrap();

        assert_eq!(request.endpoint_path(), "/verify/psd2/json");
        assert_eq!(
            form_content(&request),
            "payee=Acme+Inc&amount=48&workflow_id=7&number=447700900000&code_length=4"
        );
    }

    #[test]
    fn check_form_includes_optional_ip_address() {
        let request = VerifyCheckRequest::build()
            .with_request_id(REQUEST_ID)
            .with_code("1234")
            .with_ip_address("123.0.0.255".parse().unwrap())
            .create()
            .unwrap();

        assert_eq!(request.endpoint_path(), "/verify/check/json");
        assert_eq!(
            form_content(&request),
            format!("request_id={REQUEST_ID}&code=1234&ip_address=123.0.0.255")
        );
    }

    #[test]
    fn control_form_renders_command() {
        let request = VerifyControlRequest::build()
            .with_request_id(REQUEST_ID)
            .with_command(VerifyCommand::TriggerNextEvent)
            .create()
            .unwrap();

        assert_eq!(request.endpoint_path(), "/verify/control/json");
        assert_eq!(
            form_content(&request),
            format!("request_id={REQUEST_ID}&cmd=trigger_next_event")
        );
    }

    #[test]
    fn search_carries_request_id_in_query() {
        let request = VerifySearchRequest::parse(REQUEST_ID).unwrap();

        assert_eq!(
            request.endpoint_path(),
            format!("/verify/search/json?request_id={REQUEST_ID}")
        );
        assert_eq!(request.auth(), AuthPlacement::Query);
        assert!(request.body_content().unwrap().is_none());
    }

    #[test]
    fn successful_verify_reply_decodes() {
        let response: VerifyResponse = decode_verify_json_response(
            r#"{ "request_id": "abcdef0123456789abcdef0123456789", "status": "0" }"#,
        )
        .unwrap();
        assert_eq!(response.request_id, REQUEST_ID);
        assert_eq!(response.status, "0");
    }

    #[test]
    fn non_zero_status_becomes_verify_error() {
        let err = decode_verify_json_response::<VerifyResponse>(
            r#"{ "request_id": "", "status": "3", "error_text": "Invalid value for param: number" }"#,
        )
        .unwrap_err();

        match err {
            ResponseError::Verify { status, error_text } => {
                assert_eq!(status, "3");
                assert_eq!(error_text.as_deref(), Some("Invalid value for param: number"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn error_text_alone_marks_failure() {
        let err = decode_verify_json_response::<VerifySearchResponse>(
            r#"{ "request_id": "abc", "status": "IN PROGRESS", "error_text": "No response found" }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ResponseError::Verify { .. }));
    }

    #[test]
    fn textual_status_is_not_an_error() {
        let request = VerifySearchRequest::parse(REQUEST_ID).unwrap();
        let response = request
            .decode_response(&format!(
                r#"{{ "request_id": "{REQUEST_ID}", "status": "SUCCESS", "checks": [], "events": [] }}"#
            ))
            .unwrap();
        assert_eq!(response.status, "SUCCESS");
    }

    #[test]
    fn control_reply_decodes_through_request() {
        let request = VerifyControlRequest::build()
            .with_request_id(REQUEST_ID)
            .with_command(VerifyCommand::Cancel)
            .create()
            .unwrap();
        let response = request
            .decode_response(r#"{ "status": "0", "command": "cancel" }"#)
            .unwrap();
        assert_eq!(response.command, "cancel");
    }
}
