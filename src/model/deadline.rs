use crate::conf::Conf;
use rocket::{
    http::Status,
    request::{FromRequest, Outcome, Request},
};
use std::time::Duration;
use tokio::time::Instant;

/// Point in time after which work done on behalf of a request is abandoned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Deadline(Instant);

impl Deadline {
    pub fn after(budget: Duration) -> Deadline {
        Deadline(Instant::now() + budget)
    }

    /// Narrows this deadline to at most `limit` from now.
    pub fn bounded(&self, limit: Duration) -> Instant {
        self.0.min(Instant::now() + limit)
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Deadline {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match req.rocket().state::<Conf>() {
            Some(conf) => Outcome::Success(Deadline::after(conf.request_timeout())),
            None => Outcome::Error((Status::InternalServerError, ())),
        }
    }
}
