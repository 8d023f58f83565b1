pub mod limit;
pub mod strategy;
