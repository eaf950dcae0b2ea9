//! Order statistics over the live degree multiset

pub mod order_statistics;

pub use order_statistics::{DegreeOrderStatistics, Median};
