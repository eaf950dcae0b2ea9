use crate::error::{GraphError, Result};
use hashbrown::HashMap;

/// How one endpoint's degree moved during a single edge mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegreeChange {
    /// Vertex did not exist and now has degree 1
    Created,
    /// Degree went from `from` to `from + 1`
    Increased { from: u32 },
    /// Degree went from `from` to `from - 1`, `from > 1`
    Decreased { from: u32 },
    /// Degree went from 1 to 0 and the vertex was dropped
    Removed,
    /// Only a multiplicity changed, or the endpoint was absent
    Unchanged,
}

/// A vertex and the multiplicity of every edge to each distinct neighbor
#[derive(Debug, Clone, Default)]
pub struct Vertex {
    neighbors: HashMap<String, u32>,
}

impl Vertex {
    /// Number of distinct neighbors
    pub fn degree(&self) -> u32 {
        self.neighbors.len() as u32
    }

    pub fn multiplicity(&self, neighbor: &str) -> u32 {
        self.neighbors.get(neighbor).copied().unwrap_or(0)
    }

    fn add_neighbor(&mut self, neighbor: &str) {
        *self.neighbors.entry_ref(neighbor).or_insert(0) += 1;
    }

    /// Returns false when there was nothing to remove
    fn remove_neighbor(&mut self, neighbor: &str) -> bool {
        match self.neighbors.get_mut(neighbor) {
            Some(count) => {
                *count -= 1;
                if *count == 0 {
                    self.neighbors.remove(neighbor);
                }
                true
            }
            None => false,
        }
    }
}

/// Undirected multigraph keyed by vertex id, tracking distinct-neighbor degree
///
/// Vertices refer to each other by id only. A vertex exists exactly while it
/// has at least one neighbor.
#[derive(Debug, Clone, Default)]
pub struct DegreeGraph {
    vertices: HashMap<String, Vertex>,
}

impl DegreeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains(&self, vertex_id: &str) -> bool {
        self.vertices.contains_key(vertex_id)
    }

    pub fn vertex(&self, vertex_id: &str) -> Option<&Vertex> {
        self.vertices.get(vertex_id)
    }

    /// Degree of a vertex, 0 if it is not in the graph
    pub fn degree(&self, vertex_id: &str) -> u32 {
        self.vertices.get(vertex_id).map_or(0, Vertex::degree)
    }

    /// Number of live edges between `u` and `v`
    pub fn multiplicity(&self, u: &str, v: &str) -> u32 {
        self.vertices.get(u).map_or(0, |vertex| vertex.multiplicity(v))
    }

    pub fn degrees(&self) -> impl Iterator<Item = (&String, u32)> {
        self.vertices.iter().map(|(id, vertex)| (id, vertex.degree()))
    }

    /// Add one edge between `u` and `v`, creating missing endpoints
    pub fn add_edge(&mut self, u: &str, v: &str) -> Result<[DegreeChange; 2]> {
        if u == v {
            return Err(GraphError::SelfLoop(u.to_string()));
        }
        Ok([self.link(u, v), self.link(v, u)])
    }

    /// Remove one edge between `u` and `v`
    ///
    /// Endpoints or neighbor entries that are already gone are skipped, so
    /// this never fails. Self-loops are never stored, so `u == v` is a no-op.
    pub fn remove_edge(&mut self, u: &str, v: &str) -> [DegreeChange; 2] {
        [self.unlink(u, v), self.unlink(v, u)]
    }

    fn link(&mut self, from: &str, to: &str) -> DegreeChange {
        match self.vertices.get_mut(from) {
            Some(vertex) => {
                let before = vertex.degree();
                vertex.add_neighbor(to);
                if vertex.degree() == before {
                    DegreeChange::Unchanged
                } else {
                    DegreeChange::Increased { from: before }
                }
            }
            None => {
                let mut vertex = Vertex::default();
                vertex.add_neighbor(to);
                self.vertices.insert(from.to_string(), vertex);
                DegreeChange::Created
            }
        }
    }

    fn unlink(&mut self, from: &str, to: &str) -> DegreeChange {
        let Some(vertex) = self.vertices.get_mut(from) else {
            return DegreeChange::Unchanged;
        };

        let before = vertex.degree();
        if !vertex.remove_neighbor(to) || vertex.degree() == before {
            return DegreeChange::Unchanged;
        }

        if vertex.degree() == 0 {
            self.vertices.remove(from);
            DegreeChange::Removed
        } else {
            DegreeChange::Decreased { from: before }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_multiplicity_and_degree() {
        let mut vertex = Vertex::default();
        assert_eq!(vertex.degree(), 0);

        vertex.add_neighbor("a");
        vertex.add_neighbor("a");
        assert_eq!(vertex.multiplicity("a"), 2);
        assert_eq!(vertex.degree(), 1);

        vertex.add_neighbor("b");
        assert_eq!(vertex.degree(), 2);

        assert!(vertex.remove_neighbor("a"));
        assert_eq!(vertex.multiplicity("a"), 1);
        assert_eq!(vertex.degree(), 2);

        assert!(vertex.remove_neighbor("b"));
        assert!(vertex.remove_neighbor("a"));
        assert_eq!(vertex.degree(), 0);
        assert!(!vertex.remove_neighbor("a"));
    }

    #[test]
    fn test_add_edge_reports_changes() {
        let mut graph = DegreeGraph::new();

        let changes = graph.add_edge("a", "b").unwrap();
        assert_eq!(changes, [DegreeChange::Created, DegreeChange::Created]);

        let changes = graph.add_edge("a", "b").unwrap();
        assert_eq!(changes, [DegreeChange::Unchanged, DegreeChange::Unchanged]);
        assert_eq!(graph.multiplicity("a", "b"), 2);
        assert_eq!(graph.multiplicity("b", "a"), 2);
        let a = graph.vertex("a").unwrap();
        assert_eq!(a.degree(), 1);
        assert_eq!(a.multiplicity("b"), 2);
        assert!(graph.vertex("z").is_none());

        let changes = graph.add_edge("a", "c").unwrap();
        assert_eq!(
            changes,
            [DegreeChange::Increased { from: 1 }, DegreeChange::Created]
        );
        assert_eq!(graph.degree("a"), 2);
        assert_eq!(graph.vertex_count(), 3);
    }

    #[test]
    fn test_remove_edge_reports_changes() {
        let mut graph = DegreeGraph::new();
        graph.add_edge("a", "b").unwrap();
        graph.add_edge("a", "b").unwrap();
        graph.add_edge("a", "c").unwrap();

        // First removal only drops multiplicity
        let changes = graph.remove_edge("a", "b");
        assert_eq!(changes, [DegreeChange::Unchanged, DegreeChange::Unchanged]);

        let changes = graph.remove_edge("a", "b");
        assert_eq!(
            changes,
            [DegreeChange::Decreased { from: 2 }, DegreeChange::Removed]
        );
        assert!(!graph.contains("b"));

        let changes = graph.remove_edge("c", "a");
        assert_eq!(changes, [DegreeChange::Removed, DegreeChange::Removed]);
        assert!(graph.is_empty());
    }

    #[test]
    fn test_remove_missing_edge_is_noop() {
        let mut graph = DegreeGraph::new();
        assert_eq!(
            graph.remove_edge("x", "y"),
            [DegreeChange::Unchanged, DegreeChange::Unchanged]
        );

        graph.add_edge("a", "b").unwrap();
        assert_eq!(
            graph.remove_edge("a", "z"),
            [DegreeChange::Unchanged, DegreeChange::Unchanged]
        );
        assert_eq!(graph.degree("a"), 1);
        assert_eq!(graph.vertex_count(), 2);
    }

    #[test]
    fn test_self_loop_rejected() {
        let mut graph = DegreeGraph::new();
        assert!(matches!(graph.add_edge("a", "a"), Err(GraphError::SelfLoop(_))));
        assert!(graph.is_empty());
    }
}
