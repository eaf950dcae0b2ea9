use crate::config::StreamConfig;
use crate::error::Result;
use crate::streaming::{Event, StreamProcessor};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// One input line, e.g.
/// `{"created_time": "2016-03-29T06:04:39Z", "target": "b", "actor": "a"}`
///
/// Every field is optional so that incomplete records decode and can be
/// skipped instead of failing the run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentRecord {
    pub actor: Option<String>,
    pub target: Option<String>,
    pub created_time: Option<String>,
}

impl PaymentRecord {
    pub fn from_json(line: &str) -> Result<Self> {
        Ok(serde_json::from_str(line)?)
    }

    /// `Ok(None)` if a required field is missing
    pub fn into_event(self, config: &StreamConfig) -> Result<Option<Event>> {
        let (Some(actor), Some(target), Some(created_time)) =
            (self.actor, self.target, self.created_time)
        else {
            return Ok(None);
        };
        Event::from_created_time(actor, target, &created_time, &config.timestamp_format).map(Some)
    }
}

/// Counts for one pass over an input stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub lines_read: u64,
    /// Lines that produced a median
    pub accepted: u64,
    /// Well-formed events outside the window or forming a self-loop
    pub rejected: u64,
    /// Undecodable JSON, missing fields or bad timestamps
    pub malformed: u64,
}

/// Feed JSON lines through a fresh processor and write one median per accepted line
///
/// Output lines are joined with `\n` and carry no trailing newline.
pub fn process_lines<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    config: &StreamConfig,
) -> Result<RunSummary> {
    let mut processor = StreamProcessor::try_new(config)?;
    let mut summary = RunSummary::default();

    for (index, raw) in reader.split(b'\n').enumerate() {
        let raw = raw?;
        summary.lines_read += 1;

        let line = match std::str::from_utf8(&raw) {
            Ok(line) => line.strip_suffix('\r').unwrap_or(line),
            Err(e) => {
                log::warn!("Skipping line {}: {}", index + 1, e);
                summary.malformed += 1;
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let event = match PaymentRecord::from_json(line).and_then(|r| r.into_event(config)) {
            Ok(Some(event)) => event,
            Ok(None) => {
                log::debug!("Skipping line {}: missing required field", index + 1);
                summary.malformed += 1;
                continue;
            }
            Err(e) => {
                log::warn!("Skipping line {}: {}", index + 1, e);
                summary.malformed += 1;
                continue;
            }
        };

        match processor.process(&event)? {
            Some(median) => {
                if summary.accepted > 0 {
                    writer.write_all(b"\n")?;
                }
                write!(writer, "{}", median)?;
                summary.accepted += 1;
            }
            None => summary.rejected += 1,
        }
    }

    writer.flush()?;
    Ok(summary)
}

/// File-to-file wrapper around [`process_lines`]
pub fn process_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    config: &StreamConfig,
) -> Result<RunSummary> {
    let reader = BufReader::new(File::open(input)?);
    let writer = BufWriter::new(File::create(output)?);
    process_lines(reader, writer, config)
}
