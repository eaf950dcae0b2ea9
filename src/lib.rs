pub mod analytics;
pub mod config;
pub mod connectors;
pub mod error;
pub mod graph;
pub mod streaming;

pub use analytics::{DegreeOrderStatistics, Median};
pub use config::StreamConfig;
pub use connectors::{process_file, process_lines, PaymentRecord, RunSummary};
pub use error::{GraphError, Result};
pub use graph::{DegreeChange, DegreeGraph, Vertex};
pub use streaming::{Event, Outcome, ProcessorStats, Rejection, SlidingWindowEvictor, StreamProcessor};

pub mod prelude {
    pub use crate::analytics::{DegreeOrderStatistics, Median};
    pub use crate::config::StreamConfig;
    pub use crate::connectors::{process_file, process_lines, PaymentRecord, RunSummary};
    pub use crate::error::{GraphError, Result};
    pub use crate::graph::{DegreeChange, DegreeGraph};
    pub use crate::streaming::{Event, Outcome, Rejection, SlidingWindowEvictor, StreamProcessor};
}
