pub mod events;
pub mod processor;
pub mod window;

pub use events::{parse_timestamp, Event};
pub use processor::{Outcome, ProcessorStats, Rejection, StreamProcessor};
pub use window::SlidingWindowEvictor;
