/// Line-oriented adapters between JSON payment records and a [`StreamProcessor`]
///
/// [`StreamProcessor`]: crate::streaming::StreamProcessor
pub mod jsonl;

pub use jsonl::{process_file, process_lines, PaymentRecord, RunSummary};
