pub mod advise;
pub mod config;
pub mod reporting;
pub mod validation;
