use crate::error::{GraphError, Result};
use chrono::NaiveDateTime;

/// One pairwise event, e.g. a payment from `actor` to `target`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    actor: String,
    target: String,
    timestamp: i64,
}

impl Event {
    pub fn new<A: Into<String>, T: Into<String>>(actor: A, target: T, timestamp: i64) -> Self {
        Self {
            actor: actor.into(),
            target: target.into(),
            timestamp,
        }
    }

    /// Build an event from a UTC timestamp string such as `2016-03-29T06:04:39Z`
    pub fn from_created_time<A: Into<String>, T: Into<String>>(
        actor: A,
        target: T,
        created_time: &str,
        format: &str,
    ) -> Result<Self> {
        Ok(Self::new(actor, target, parse_timestamp(created_time, format)?))
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Seconds since the Unix epoch
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn is_self_loop(&self) -> bool {
        self.actor == self.target
    }
}

/// Convert a UTC wall-clock string to Unix seconds
pub fn parse_timestamp(created_time: &str, format: &str) -> Result<i64> {
    NaiveDateTime::parse_from_str(created_time, format)
        .map(|time| time.and_utc().timestamp())
        .map_err(|e| GraphError::timestamp(format!("{:?}: {}", created_time, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_TIMESTAMP_FORMAT;

    #[test]
    fn test_parse_timestamp() {
        let ts = parse_timestamp("2016-03-29T06:04:39Z", DEFAULT_TIMESTAMP_FORMAT).unwrap();
        assert_eq!(ts, 1459231479);

        let epoch = parse_timestamp("1970-01-01T00:00:00Z", DEFAULT_TIMESTAMP_FORMAT).unwrap();
        assert_eq!(epoch, 0);
    }

    #[test]
    fn test_parse_timestamp_single_digit_day() {
        let padded = parse_timestamp("2016-04-01T00:01:00Z", DEFAULT_TIMESTAMP_FORMAT).unwrap();
        let short = parse_timestamp("2016-04-1T00:01:00Z", DEFAULT_TIMESTAMP_FORMAT).unwrap();
        assert_eq!(padded, short);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(matches!(
            parse_timestamp("yesterday", DEFAULT_TIMESTAMP_FORMAT),
            Err(GraphError::Timestamp(_))
        ));
        assert!(parse_timestamp("2016-03-29 06:04:39", DEFAULT_TIMESTAMP_FORMAT).is_err());
    }

    #[test]
    fn test_event_from_created_time() {
        let event = Event::from_created_time(
            "Gwen-Mennear",
            "Joey_Ostreicher",
            "2016-03-29T06:04:39Z",
            DEFAULT_TIMESTAMP_FORMAT,
        )
        .unwrap();
        assert_eq!(event.actor(), "Gwen-Mennear");
        assert_eq!(event.target(), "Joey_Ostreicher");
        assert_eq!(event.timestamp(), 1459231479);
        assert!(!event.is_self_loop());
        assert!(Event::new("a", "a", 0).is_self_loop());
    }
}
