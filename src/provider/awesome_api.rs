use crate::{
    conf::ProviderConf,
    model::{Deadline, ExchangeQuote, QuoteError},
    provider::Provider,
};
use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::timeout_at;
use tracing::{debug, error};

pub struct AwesomeApi {
    client: Client,
    url: String,
    timeout: Duration,
}

#[derive(Deserialize)]
struct LastQuote {
    #[serde(rename = "USDBRL")]
    usdbrl: ExchangeQuote,
}

impl AwesomeApi {
    pub fn new(conf: &ProviderConf) -> Result<AwesomeApi> {
        Ok(AwesomeApi {
            client: Client::builder().build()?,
            url: conf.url.clone(),
            timeout: conf.timeout(),
        })
    }

    async fn download(&self) -> reqwest::Result<String> {
        self.client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

#[rocket::async_trait]
impl Provider for AwesomeApi {
    fn name(&self) -> String {
        "awesomeapi".into()
    }

    async fn fetch(&self, deadline: &Deadline) -> Result<ExchangeQuote, QuoteError> {
        let body = timeout_at(deadline.bounded(self.timeout), self.download())
            .await
            .map_err(|_| QuoteError::NetworkTimeout)??;
        debug!(provider = %self.name(), %body, "Got quote");

        match serde_json::from_str::<LastQuote>(&body) {
            Ok(res) => Ok(res.usdbrl),
            Err(e) => {
                error!(provider = %self.name(), error = %e, response = %body, "Failed to parse quote");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{
        model::{Deadline, QuoteError},
        provider::{AwesomeApi, Provider},
        test::{provider_conf, quote, upstream_body},
    };
    use anyhow::Result;
    use std::time::Duration;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    async fn server(response: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json/last/USD-BRL"))
            .respond_with(response)
            .expect(1)
            .mount(&server)
            .await;
        server
    }

    fn deadline() -> Deadline {
        Deadline::after(Duration::from_secs(5))
    }

    #[tokio::test]
    async fn fetch() -> Result<()> {
        let server = server(ResponseTemplate::new(200).set_body_string(upstream_body("5.42"))).await;
        let api = AwesomeApi::new(&provider_conf(&server.uri(), 2000))?;

        let res = api.fetch(&deadline()).await?;

        assert_eq!(quote("5.42"), res);
        Ok(())
    }

    #[tokio::test]
    async fn fetch_ignores_unknown_fields() -> Result<()> {
        let body = r#"{"USDBRL":{"code":"USD","codein":"BRL","name":"Dólar Americano/Real Brasileiro","high":"5.45","low":"5.40","varBid":"0.01","pctChange":"0.18","bid":"5.42","ask":"5.43","timestamp":"1700000000","create_date":"2023-11-14 19:33:20","extra":"x"},"EURBRL":{}}"#;
        let server = server(ResponseTemplate::new(200).set_body_string(body)).await;
        let api = AwesomeApi::new(&provider_conf(&server.uri(), 2000))?;

        let res = api.fetch(&deadline()).await?;

        assert_eq!("5.42", res.bid);
        assert_eq!("Dólar Americano/Real Brasileiro", res.name);
        Ok(())
    }

    #[tokio::test]
    async fn fetch_malformed() -> Result<()> {
        let server = server(ResponseTemplate::new(200).set_body_string("{\"USDBRL\": ")).await;
        let api = AwesomeApi::new(&provider_conf(&server.uri(), 2000))?;

        let res = api.fetch(&deadline()).await;

        assert!(matches!(res, Err(QuoteError::Decode(_))));
        Ok(())
    }

    #[tokio::test]
    async fn fetch_missing_field() -> Result<()> {
        let body = r#"{"USDBRL":{"code":"USD","bid":"5.42"}}"#;
        let server = server(ResponseTemplate::new(200).set_body_string(body)).await;
        let api = AwesomeApi::new(&provider_conf(&server.uri(), 2000))?;

        let res = api.fetch(&deadline()).await;

        assert!(matches!(res, Err(QuoteError::Decode(_))));
        Ok(())
    }

    #[tokio::test]
    async fn fetch_numeric_field_is_rejected() -> Result<()> {
        let body = upstream_body("5.42").replace("\"5.42\"", "5.42");
        let server = server(ResponseTemplate::new(200).set_body_string(body)).await;
        let api = AwesomeApi::new(&provider_conf(&server.uri(), 2000))?;

        let res = api.fetch(&deadline()).await;

        assert!(matches!(res, Err(QuoteError::Decode(_))));
        Ok(())
    }

    #[tokio::test]
    async fn fetch_error_status() -> Result<()> {
        let server = server(ResponseTemplate::new(503)).await;
        let api = AwesomeApi::new(&provider_conf(&server.uri(), 2000))?;

        let res = api.fetch(&deadline()).await;

        assert!(matches!(res, Err(QuoteError::Network(_))));
        Ok(())
    }

    #[tokio::test]
    async fn fetch_slower_than_timeout() -> Result<()> {
        let server = server(
            ResponseTemplate::new(200)
                .set_body_string(upstream_body("5.42"))
                .set_delay(Duration::from_secs(2)),
        )
        .await;
        let api = AwesomeApi::new(&provider_conf(&server.uri(), 100))?;

        let res = api.fetch(&deadline()).await;

        assert!(matches!(res, Err(QuoteError::NetworkTimeout)));
        Ok(())
    }

    #[tokio::test]
    async fn fetch_capped_by_request_deadline() -> Result<()> {
        let server = server(
            ResponseTemplate::new(200)
                .set_body_string(upstream_body("5.42"))
                .set_delay(Duration::from_secs(2)),
        )
        .await;
        let api = AwesomeApi::new(&provider_conf(&server.uri(), 10_000))?;

        let res = api.fetch(&Deadline::after(Duration::from_millis(100))).await;

        assert!(matches!(res, Err(QuoteError::NetworkTimeout)));
        Ok(())
    }

    #[tokio::test]
    async fn fetch_unreachable() -> Result<()> {
        let api = AwesomeApi::new(&provider_conf("http://127.0.0.1:1", 2000))?;

        let res = api.fetch(&deadline()).await;

        assert!(matches!(res, Err(QuoteError::Network(_)) | Err(QuoteError::NetworkTimeout)));
        Ok(())
    }
}
