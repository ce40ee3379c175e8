use lambda_http::http::{Method, StatusCode};
use lambda_http::{Error as LambdaError, Request as LambdaRequest, Response as LambdaResponse};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::common::errors::Error;
use crate::common::utils::{error_response, extract_request, json_response, preflight_response};
use crate::fal::VideoQueue;
use crate::generator::VideoGenerator;

const METHOD_NOT_ALLOWED_ERROR: &str = "Method not allowed";

#[derive(Debug, Deserialize)]
struct Request {
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize)]
struct Response {
    pub url: String,
}

#[tracing::instrument(skip(request, generator, api_key), fields(method = %request.method()))]
pub async fn process_request<Q: VideoQueue>(
    request: LambdaRequest,
    generator: &VideoGenerator<Q>,
    api_key: Option<&str>,
) -> Result<LambdaResponse<String>, Error> {
    match *request.method() {
        Method::OPTIONS => return preflight_response(),
        Method::POST => {}
        _ => {
            let response = error_response(
                StatusCode::METHOD_NOT_ALLOWED.as_u16(),
                METHOD_NOT_ALLOWED_ERROR,
            )?;
            return Err(Error::HttpError(response));
        }
    }

    let request = match extract_request::<Request>(&request) {
        Ok(val) => val,
        Err(err) => {
            error!("Malformed request body: {}", err);
            let response =
                error_response(StatusCode::INTERNAL_SERVER_ERROR.as_u16(), &err.to_string())?;
            return Err(Error::HttpError(response));
        }
    };

    let prompt = request.prompt.unwrap_or_default();
    match generator.generate(&prompt, api_key).await {
        Ok(url) => {
            info!("Video ready");
            json_response(StatusCode::OK.as_u16(), &Response { url })
        }
        Err(err) => {
            error!(status = err.status_code(), "Video generation failed: {}", err);
            let response = error_response(err.status_code(), &err.to_string())?;
            Err(Error::HttpError(response))
        }
    }
}

/// Runs [`process_request`] and folds HTTP-shaped errors back into responses.
pub async fn handle_request<Q: VideoQueue>(
    request: LambdaRequest,
    generator: &VideoGenerator<Q>,
    api_key: Option<&str>,
) -> Result<LambdaResponse<String>, LambdaError> {
    match process_request(request, generator, api_key).await {
        Ok(val) => Ok(val),
        Err(Error::HttpError(val)) => Ok(val),
        Err(Error::LambdaError(err)) => Err(err),
    }
}
