use anyhow::Result;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::{env, net::IpAddr, path::Path, time::Duration};

#[derive(Clone, Debug, Deserialize)]
pub struct Conf {
    pub address: IpAddr,
    pub port: u16,
    pub request_timeout_ms: u64,
    pub db: DbConf,
    pub provider: ProviderConf,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DbConf {
    pub url: String,
    pub pool_size: u32,
    pub write_timeout_ms: u64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ProviderConf {
    pub url: String,
    pub timeout_ms: u64,
}

impl Conf {
    pub fn new() -> Result<Conf> {
        let default_conf = include_str!("../cotacao.conf");
        let mut figment = Figment::new().merge(Toml::string(default_conf));

        if let Ok(data_dir) = env::var("DATA_DIR") {
            figment = figment.merge(Toml::file(Path::new(&data_dir).join("cotacao.conf")));
        }

        let conf: Conf = figment
            .merge(Env::prefixed("COTACAO_").split("__"))
            .extract()?;

        Ok(conf)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl DbConf {
    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }
}

impl ProviderConf {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
