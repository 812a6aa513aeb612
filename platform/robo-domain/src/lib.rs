//! Pure core of robo-adviser.
//!
//! Everything in this crate is free of I/O: the price model, trailing date
//! windows, per-window aggregation and the trend classifier. Network, file and
//! console access live behind the traits in [`repositories`].
//!
//! The recommendation produced here is a fixed ad hoc heuristic. It is not a
//! validated trading strategy and must not be used as investment advice.

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod value_objects;
