use crate::model::QuoteError;
use anyhow::Error;
use rocket::{
    http::Status,
    request::Request,
    response::{self, Responder, Response},
};
use tracing::error;

/// Failed request. The cause is logged and never sent to the client.
#[derive(Debug)]
pub struct ApiError {
    pub status: Status,
    pub error: Option<Error>,
}

impl ApiError {
    pub fn internal(error: Error) -> ApiError {
        ApiError {
            status: Status::InternalServerError,
            error: Some(error),
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        if let Some(error) = self.error {
            error!(uri = %req.uri(), error = %format!("{:#}", error), "Request failed");
        }

        Response::build().status(self.status).ok()
    }
}

impl From<QuoteError> for ApiError {
    fn from(e: QuoteError) -> Self {
        ApiError::internal(e.into())
    }
}
