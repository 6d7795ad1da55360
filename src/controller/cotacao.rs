use crate::{
    model::{ApiResult, Deadline, ExchangeQuote, QuoteError},
    provider::Provider,
    repository::RateRepository,
    service::quote,
};
use rocket::{get, Shutdown, State};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct BidView {
    pub bid: String,
}

impl From<ExchangeQuote> for BidView {
    fn from(quote: ExchangeQuote) -> BidView {
        BidView { bid: quote.bid }
    }
}

// Rocket keeps running a handler after its client disconnects, so the request
// deadline caps the work. Shutdown drops it, which aborts the fetch and rolls
// back an insert that hasn't committed.
#[get("/cotacao")]
pub async fn get(
    deadline: Deadline,
    shutdown: Shutdown,
    provider: &State<Box<dyn Provider>>,
    repo: &State<RateRepository>,
) -> ApiResult<BidView> {
    info!("/cotacao request received");
    let res = tokio::select! {
        res = quote::fetch_and_store(&deadline, provider.inner().as_ref(), repo) => {
            res.map(BidView::from)
        }
        _ = shutdown => Err(QuoteError::Cancelled),
    };
    info!(ok = res.is_ok(), "/cotacao request completed");
    ApiResult::new(res)
}
