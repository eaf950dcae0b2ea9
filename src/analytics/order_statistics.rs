use crate::error::{GraphError, Result};
use crate::graph::DegreeChange;
use std::fmt;

/// Median of the current degree multiset
///
/// Degrees are integers, so the median is always a whole or half value and is
/// stored in halves to keep equality exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Median {
    halves: u64,
}

impl Median {
    pub const ZERO: Median = Median { halves: 0 };

    fn of_one(value: u32) -> Self {
        Self { halves: 2 * value as u64 }
    }

    fn of_two(a: u32, b: u32) -> Self {
        Self { halves: a as u64 + b as u64 }
    }

    pub fn value(&self) -> f64 {
        self.halves as f64 / 2.0
    }
}

impl fmt::Display for Median {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.value())
    }
}

/// Degrees of every live vertex, kept in non-increasing order
///
/// Each graph mutation moves a degree by exactly one, so an entry can be
/// adjusted in place without re-sorting: an increment always lands on the
/// first slot of its run of equal values and a decrement on the last. Both
/// slots are found by binary search in O(log n); the adjustment itself is
/// O(1). New vertices enter with degree 1, the minimum, and leave with degree
/// 1, so insertion and removal only ever touch the tail.
#[derive(Debug, Clone, Default)]
pub struct DegreeOrderStatistics {
    degrees: Vec<u32>,
}

impl DegreeOrderStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.degrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.degrees.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.degrees
    }

    pub fn sum(&self) -> u64 {
        self.degrees.iter().map(|&d| d as u64).sum()
    }

    pub fn is_sorted(&self) -> bool {
        self.degrees.windows(2).all(|pair| pair[0] >= pair[1])
    }

    /// Apply one endpoint's degree change reported by the graph
    pub fn apply(&mut self, change: DegreeChange) -> Result<()> {
        match change {
            DegreeChange::Created => self.insert_new(),
            DegreeChange::Increased { from } => self.increment(from)?,
            DegreeChange::Decreased { from } => self.decrement(from)?,
            DegreeChange::Removed => self.remove_last()?,
            DegreeChange::Unchanged => {}
        }
        Ok(())
    }

    /// Track a new vertex of degree 1
    pub fn insert_new(&mut self) {
        self.degrees.push(1);
    }

    /// Move one vertex from `degree` to `degree + 1`
    pub fn increment(&mut self, degree: u32) -> Result<()> {
        let index = self.first_index(degree)?;
        self.degrees[index] += 1;
        Ok(())
    }

    /// Move one vertex from `degree` to `degree - 1`
    ///
    /// A vertex leaving degree 1 is deleted from the graph; use
    /// [`remove_last`](Self::remove_last) for that.
    pub fn decrement(&mut self, degree: u32) -> Result<()> {
        if degree < 2 {
            return Err(GraphError::invalid_parameter(format!(
                "cannot decrement degree {}, vertices at degree 1 are removed",
                degree
            )));
        }
        let index = self.last_index(degree)?;
        self.degrees[index] -= 1;
        Ok(())
    }

    /// Drop a deleted vertex; its last tracked degree was 1
    pub fn remove_last(&mut self) -> Result<()> {
        match self.degrees.last() {
            Some(1) => {
                self.degrees.pop();
                Ok(())
            }
            Some(&other) => Err(GraphError::invalid_parameter(format!(
                "tail holds degree {}, expected 1",
                other
            ))),
            None => Err(GraphError::DegreeNotFound(1)),
        }
    }

    /// Leftmost index holding `degree`
    pub fn first_index(&self, degree: u32) -> Result<usize> {
        Self::check_degree(degree)?;
        let index = self.degrees.partition_point(|&d| d > degree);
        match self.degrees.get(index) {
            Some(&d) if d == degree => Ok(index),
            _ => Err(GraphError::DegreeNotFound(degree)),
        }
    }

    /// Rightmost index holding `degree`
    pub fn last_index(&self, degree: u32) -> Result<usize> {
        Self::check_degree(degree)?;
        let end = self.degrees.partition_point(|&d| d >= degree);
        match end.checked_sub(1) {
            Some(index) if self.degrees[index] == degree => Ok(index),
            _ => Err(GraphError::DegreeNotFound(degree)),
        }
    }

    pub fn median(&self) -> Median {
        let n = self.degrees.len();
        if n == 0 {
            Median::ZERO
        } else if n % 2 == 1 {
            Median::of_one(self.degrees[n / 2])
        } else {
            Median::of_two(self.degrees[n / 2], self.degrees[n / 2 - 1])
        }
    }

    fn check_degree(degree: u32) -> Result<()> {
        if degree < 1 {
            return Err(GraphError::invalid_parameter(format!(
                "degree must be at least 1, got {}",
                degree
            )));
        }
        Ok(())
    }
}
