pub mod rate;
pub use rate::RateRepository;
