use crate::config::DEFAULT_WINDOW_SECONDS;
use crate::error::Result;
use hashbrown::HashMap;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

/// Tracks which events are inside the trailing time window
///
/// Timestamps live in a min-heap; each timestamp owns a bucket of the
/// `(actor, target)` pairs that arrived with it, in arrival order. Every
/// timestamp in the heap has a non-empty bucket and vice versa.
#[derive(Debug, Clone)]
pub struct SlidingWindowEvictor {
    window_seconds: i64,
    max_time: Option<i64>,
    timestamps: BinaryHeap<Reverse<i64>>,
    buckets: HashMap<i64, VecDeque<(String, String)>>,
    active_events: usize,
}

impl Default for SlidingWindowEvictor {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SECONDS)
    }
}

impl SlidingWindowEvictor {
    pub fn new(window_seconds: i64) -> Self {
        Self {
            window_seconds,
            max_time: None,
            timestamps: BinaryHeap::new(),
            buckets: HashMap::new(),
            active_events: 0,
        }
    }

    pub fn window_seconds(&self) -> i64 {
        self.window_seconds
    }

    /// Largest timestamp accepted so far
    pub fn max_time(&self) -> Option<i64> {
        self.max_time
    }

    /// Number of events currently contributing edges
    pub fn active_events(&self) -> usize {
        self.active_events
    }

    /// Distinct timestamps currently tracked
    pub fn active_timestamps(&self) -> usize {
        self.timestamps.len()
    }

    /// Oldest timestamp still in the window
    pub fn oldest_timestamp(&self) -> Option<i64> {
        self.timestamps.peek().map(|&Reverse(timestamp)| timestamp)
    }

    pub fn is_empty(&self) -> bool {
        self.active_events == 0
    }

    /// Whether an event at `timestamp` already falls outside the window
    pub fn is_expired(&self, timestamp: i64) -> bool {
        self.max_time
            .is_some_and(|max_time| max_time.saturating_sub(timestamp) >= self.window_seconds)
    }

    /// Pairs recorded at `timestamp`, oldest first
    pub fn bucket(&self, timestamp: i64) -> impl Iterator<Item = &(String, String)> {
        self.buckets.get(&timestamp).into_iter().flatten()
    }

    /// Raise the window end to `timestamp` and evict everything that fell out
    ///
    /// Each evicted pair is handed to `on_evict` one at a time, oldest
    /// timestamp first. Returns the number of evicted pairs.
    pub fn advance<F>(&mut self, timestamp: i64, mut on_evict: F) -> Result<usize>
    where
        F: FnMut(&str, &str) -> Result<()>,
    {
        let max_time = self.max_time.map_or(timestamp, |current| current.max(timestamp));
        self.max_time = Some(max_time);

        let mut evicted = 0;
        while let Some(&Reverse(oldest)) = self.timestamps.peek() {
            if max_time.saturating_sub(oldest) < self.window_seconds {
                break;
            }
            evicted += self.drain_oldest(&mut on_evict)?;
        }

        if evicted > 0 {
            log::debug!(
                "Evicted {} events, window now ends at {} with {} active",
                evicted,
                max_time,
                self.active_events
            );
        }
        Ok(evicted)
    }

    /// Start tracking an accepted event
    pub fn record(&mut self, timestamp: i64, actor: &str, target: &str) {
        let bucket = self.buckets.entry(timestamp).or_insert_with(|| {
            self.timestamps.push(Reverse(timestamp));
            VecDeque::new()
        });
        bucket.push_back((actor.to_string(), target.to_string()));
        self.active_events += 1;
    }

    /// Evict every tracked pair regardless of age; `max_time` is kept
    pub fn evict_all<F>(&mut self, mut on_evict: F) -> Result<usize>
    where
        F: FnMut(&str, &str) -> Result<()>,
    {
        let mut evicted = 0;
        while !self.timestamps.is_empty() {
            evicted += self.drain_oldest(&mut on_evict)?;
        }
        Ok(evicted)
    }

    /// Pop the oldest bucket's pairs one at a time, then drop the timestamp
    fn drain_oldest<F>(&mut self, on_evict: &mut F) -> Result<usize>
    where
        F: FnMut(&str, &str) -> Result<()>,
    {
        let Some(Reverse(oldest)) = self.timestamps.pop() else {
            return Ok(0);
        };
        let Some(mut bucket) = self.buckets.remove(&oldest) else {
            return Ok(0);
        };

        let mut evicted = 0;
        while let Some((actor, target)) = bucket.pop_front() {
            self.active_events -= 1;
            evicted += 1;
            if let Err(e) = on_evict(&actor, &target) {
                // Put back what was not evicted so the heap and buckets agree
                if !bucket.is_empty() {
                    self.timestamps.push(Reverse(oldest));
                    self.buckets.insert(oldest, bucket);
                }
                return Err(e);
            }
        }
        Ok(evicted)
    }
}
