use lambda_http::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_MAX_AGE, CONTENT_TYPE,
};
use lambda_http::http::StatusCode;
use lambda_http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::common::errors::Error;

const EMPTY_PAYLOAD: &[u8] = b"{}";
const ALLOWED_METHODS: &str = "POST, OPTIONS";
const PREFLIGHT_MAX_AGE: &str = "86400";

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Decodes the JSON body regardless of `Content-Type`. A blank body reads as `{}`.
pub fn extract_request<T: DeserializeOwned>(request: &Request) -> Result<T, serde_json::Error> {
    let body: &[u8] = request.body();
    if body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_slice(EMPTY_PAYLOAD);
    }

    serde_json::from_slice(body)
}

pub fn json_response<T: Serialize>(status: u16, value: &T) -> Result<Response<String>, Error> {
    let response = Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .header(ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .body(serde_json::to_string(value)?)?;

    Ok(response)
}

pub fn error_response(status: u16, message: &str) -> Result<Response<String>, Error> {
    json_response(status, &ErrorBody { error: message })
}

pub fn preflight_response() -> Result<Response<String>, Error> {
    let response = Response::builder()
        .status(StatusCode::OK)
        .header(ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .header(ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS)
        .header(ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type")
        .header(ACCESS_CONTROL_MAX_AGE, PREFLIGHT_MAX_AGE)
        .body(String::new())?;

    Ok(response)
}
