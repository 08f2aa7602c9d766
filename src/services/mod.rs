pub mod dashboard;
pub mod insight;
pub mod normalizer;
pub mod query;
