use lambda_http::{http, Error as LambdaError, Response};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HttpError: {0:?}")]
    HttpError(Response<String>),
    #[error("LambdaError: {0}")]
    LambdaError(LambdaError),
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::LambdaError(Box::new(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::LambdaError(Box::new(err))
    }
}
