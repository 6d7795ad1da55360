mod api_error;
pub use api_error::ApiError;
mod api_result;
pub use api_result::ApiResult;
mod deadline;
pub use deadline::Deadline;
mod error;
pub use error::QuoteError;
mod exchange_quote;
pub use exchange_quote::ExchangeQuote;
