pub mod metrics;
pub mod stores;
