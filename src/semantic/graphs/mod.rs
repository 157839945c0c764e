mod dependency_graph;

pub use dependency_graph::{DependencyEdges, DependencyId, FileDependency, FileDependencyManager};
