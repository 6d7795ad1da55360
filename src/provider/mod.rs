mod provider;
pub use provider::Provider;
mod awesome_api;
pub use awesome_api::AwesomeApi;
