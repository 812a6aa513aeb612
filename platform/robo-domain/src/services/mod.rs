pub mod aggregation;
pub mod classifier;
pub mod trend;
pub mod windowing;
