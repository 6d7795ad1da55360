use super::ApiError;
use rocket::{serde::json::Json, Responder};

#[derive(Responder)]
#[response(bound = "T: rocket::serde::Serialize")]
pub enum ApiResult<T> {
    Ok(Json<T>),
    Err(ApiError),
}

impl<T> ApiResult<T> {
    pub fn new<E: Into<ApiError>>(result: Result<T, E>) -> ApiResult<T> {
        match result {
            Ok(val) => ApiResult::Ok(Json(val)),
            Err(e) => ApiResult::Err(e.into()),
        }
    }
}
