use crate::model::{Deadline, ExchangeQuote, QuoteError};

#[rocket::async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> String;

    /// Fetches the latest quote, giving up once `deadline` passes.
    async fn fetch(&self, deadline: &Deadline) -> Result<ExchangeQuote, QuoteError>;
}
