use crate::analytics::{DegreeOrderStatistics, Median};
use crate::config::StreamConfig;
use crate::error::Result;
use crate::graph::DegreeGraph;
use crate::streaming::events::Event;
use crate::streaming::window::SlidingWindowEvictor;

/// Why an event produced no median
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// `max_time - timestamp` reached the window width
    OutOfWindow,
    /// `actor == target`
    SelfLoop,
}

/// Result of offering one event to a [`StreamProcessor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Accepted(Median),
    Rejected(Rejection),
}

impl Outcome {
    pub fn median(self) -> Option<Median> {
        match self {
            Outcome::Accepted(median) => Some(median),
            Outcome::Rejected(_) => None,
        }
    }
}

/// Counters over the lifetime of a processor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessorStats {
    pub accepted: u64,
    pub out_of_window: u64,
    pub self_loops: u64,
    pub evicted: u64,
}

/// Rolling median degree over a trailing time window
///
/// Owns the whole state of one stream. Events are applied strictly one at a
/// time: stale events are evicted first, then the new edge is added and the
/// median is read back.
#[derive(Debug, Clone)]
pub struct StreamProcessor {
    graph: DegreeGraph,
    degrees: DegreeOrderStatistics,
    window: SlidingWindowEvictor,
    stats: ProcessorStats,
}

impl Default for StreamProcessor {
    fn default() -> Self {
        Self::new(&StreamConfig::default())
    }
}

impl StreamProcessor {
    /// Build a processor from a configuration that was already validated
    ///
    /// A non-positive `window_seconds` rejects every event after the first;
    /// use [`try_new`](Self::try_new) for unchecked input.
    pub fn new(config: &StreamConfig) -> Self {
        Self {
            graph: DegreeGraph::new(),
            degrees: DegreeOrderStatistics::new(),
            window: SlidingWindowEvictor::new(config.window_seconds),
            stats: ProcessorStats::default(),
        }
    }

    pub fn try_new(config: &StreamConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Accept an event and return the new median, or `None` if it was rejected
    pub fn process(&mut self, event: &Event) -> Result<Option<Median>> {
        Ok(self.offer(event)?.median())
    }

    /// Like [`process`](Self::process) but reports why an event was rejected
    pub fn offer(&mut self, event: &Event) -> Result<Outcome> {
        if let Some(rejection) = self.check(event) {
            match rejection {
                Rejection::OutOfWindow => self.stats.out_of_window += 1,
                Rejection::SelfLoop => self.stats.self_loops += 1,
            }
            log::debug!(
                "Rejected {} -> {} at {}: {:?}",
                event.actor(),
                event.target(),
                event.timestamp(),
                rejection
            );
            return Ok(Outcome::Rejected(rejection));
        }

        let graph = &mut self.graph;
        let degrees = &mut self.degrees;
        let evicted = self
            .window
            .advance(event.timestamp(), |actor, target| {
                Self::retract(graph, degrees, actor, target)
            })?;
        self.stats.evicted += evicted as u64;

        self.window
            .record(event.timestamp(), event.actor(), event.target());
        for change in self.graph.add_edge(event.actor(), event.target())? {
            self.degrees.apply(change)?;
        }
        self.stats.accepted += 1;

        Ok(Outcome::Accepted(self.degrees.median()))
    }

    /// Evict every active event, leaving an empty graph
    ///
    /// `max_time` is kept, so events older than the window are still
    /// rejected afterwards.
    pub fn clear_window(&mut self) -> Result<usize> {
        let graph = &mut self.graph;
        let degrees = &mut self.degrees;
        let evicted = self
            .window
            .evict_all(|actor, target| Self::retract(graph, degrees, actor, target))?;
        self.stats.evicted += evicted as u64;
        Ok(evicted)
    }

    pub fn median(&self) -> Median {
        self.degrees.median()
    }

    pub fn max_time(&self) -> Option<i64> {
        self.window.max_time()
    }

    pub fn graph(&self) -> &DegreeGraph {
        &self.graph
    }

    pub fn order_statistics(&self) -> &DegreeOrderStatistics {
        &self.degrees
    }

    pub fn window(&self) -> &SlidingWindowEvictor {
        &self.window
    }

    pub fn active_event_count(&self) -> usize {
        self.window.active_events()
    }

    pub fn stats(&self) -> &ProcessorStats {
        &self.stats
    }

    fn check(&self, event: &Event) -> Option<Rejection> {
        if self.window.is_expired(event.timestamp()) {
            Some(Rejection::OutOfWindow)
        } else if event.is_self_loop() {
            Some(Rejection::SelfLoop)
        } else {
            None
        }
    }

    fn retract(
        graph: &mut DegreeGraph,
        degrees: &mut DegreeOrderStatistics,
        actor: &str,
        target: &str,
    ) -> Result<()> {
        for change in graph.remove_edge(actor, target) {
            degrees.apply(change)?;
        }
        Ok(())
    }
}
