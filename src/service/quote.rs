use crate::{
    model::{Deadline, ExchangeQuote, QuoteError},
    provider::Provider,
    repository::RateRepository,
};
use tracing::info;

/// Fetches the latest quote and stores it.
///
/// A quote that can't be stored is dropped and the storage error returned.
pub async fn fetch_and_store(
    deadline: &Deadline,
    provider: &dyn Provider,
    repo: &RateRepository,
) -> Result<ExchangeQuote, QuoteError> {
    let quote = provider.fetch(deadline).await?;
    let id = repo.insert(&quote, deadline).await?;
    info!(provider = %provider.name(), id, bid = %quote.bid, "Stored quote");
    Ok(quote)
}
