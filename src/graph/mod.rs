pub mod degree_graph;

pub use degree_graph::{DegreeChange, DegreeGraph, Vertex};
