use serde::{Deserialize, Serialize};

/// A single USD/BRL quote as published upstream.
///
/// Every value is kept as the text the provider sent. Nothing is parsed into
/// a number, so what gets stored is exactly what was fetched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExchangeQuote {
    pub code: String,
    pub codein: String,
    pub name: String,
    pub high: String,
    pub low: String,
    #[serde(rename = "varBid")]
    pub var_bid: String,
    #[serde(rename = "pctChange")]
    pub pct_change: String,
    pub bid: String,
    pub ask: String,
    pub timestamp: String,
    pub create_date: String,
}
