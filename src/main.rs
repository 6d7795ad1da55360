mod conf;
mod controller;
mod db;
mod log;
mod model;
mod provider;
mod repository;
mod service;

use crate::{
    conf::Conf,
    db::DbPool,
    provider::{AwesomeApi, Provider},
    repository::RateRepository,
};
use anyhow::Result;
use rocket::{
    catch, catchers,
    http::Status,
    routes,
    serde::{json::Json, Serialize},
    Build, Request, Rocket,
};
use tracing::info;

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
struct ErrorResponseBody {
    code: u16,
    message: String,
}

#[catch(default)]
fn error(status: Status, req: &Request) -> Json<ErrorResponseBody> {
    Json(ErrorResponseBody {
        code: status.code,
        message: format!("Failed to handle URI {}", req.uri()),
    })
}

pub fn prepare(conf: Conf, pool: DbPool) -> Result<Rocket<Build>> {
    let figment = rocket::Config::figment()
        .merge(("address", conf.address))
        .merge(("port", conf.port));
    let provider: Box<dyn Provider> = Box::new(AwesomeApi::new(&conf.provider)?);
    let repo = RateRepository::new(pool, conf.db.write_timeout());

    Ok(rocket::custom(figment)
        .mount("/", routes![controller::cotacao::get])
        .register("/", catchers![error])
        .manage(provider)
        .manage(repo)
        .manage(conf))
}

#[rocket::main]
async fn main() -> Result<()> {
    log::init();

    let conf = Conf::new()?;
    let pool = db::pool(&conf.db)?;
    db::migrate(&mut *pool.get()?)?;
    info!(port = conf.port, "Starting server");

    prepare(conf, pool)?.launch().await?;
    Ok(())
}
