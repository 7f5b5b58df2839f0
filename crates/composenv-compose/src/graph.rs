//! Service dependency graph using `petgraph`.
//!
//! Built from `depends_on`. Edges point from a dependency to its dependent,
//! so a topological sort yields a startup order with dependencies first.
//! Targets that are not defined services are left out of the graph.

use std::collections::HashMap;

use composenv_common::error::{ComposenvError, Result};
use petgraph::Direction;
use petgraph::graph::NodeIndex;

use crate::document::ComposeDocument;

/// A dependency graph of services.
#[derive(Debug)]
pub struct DependencyGraph {
    graph: petgraph::Graph<String, ()>,
    nodes: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Creates an empty dependency graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: petgraph::Graph::new(),
            nodes: HashMap::new(),
        }
    }

    /// Builds the graph of a compose document.
    #[must_use]
    pub fn from_document(doc: &ComposeDocument) -> Self {
        let mut graph = Self::new();
        for service in doc.services() {
            let _ = graph.add_service(&service.name);
        }
        for service in doc.services() {
            for target in &service.depends_on {
                graph.add_dependency(&service.name, target);
            }
        }
        graph
    }

    /// Adds a service node, returning the existing node if already present.
    pub fn add_service(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.nodes.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        let _ = self.nodes.insert(name.to_string(), idx);
        idx
    }

    /// Records that `dependent` depends on `dependency`.
    ///
    /// Ignored when either service is unknown.
    pub fn add_dependency(&mut self, dependent: &str, dependency: &str) {
        if let (Some(&from), Some(&to)) = (self.nodes.get(dependency), self.nodes.get(dependent)) {
            let _ = self.graph.add_edge(from, to, ());
        }
    }

    /// Returns `true` if at least one service depends on `name`.
    #[must_use]
    pub fn has_dependents(&self, name: &str) -> bool {
        self.nodes.get(name).is_some_and(|&idx| {
            self.graph
                .neighbors_directed(idx, Direction::Outgoing)
                .next()
                .is_some()
        })
    }

    /// Returns the number of services in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns `true` if the graph has no services.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Returns a startup order with dependencies before their dependents.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph contains cycles.
    pub fn resolve_order(&self) -> Result<Vec<String>> {
        if self.is_empty() {
            return Ok(Vec::new());
        }
        match petgraph::algo::toposort(&self.graph, None) {
            Ok(indices) => Ok(indices
                .iter()
                .filter_map(|&idx| self.graph.node_weight(idx).cloned())
                .collect()),
            Err(cycle) => {
                let service = self
                    .graph
                    .node_weight(cycle.node_id())
                    .cloned()
                    .unwrap_or_default();
                Err(ComposenvError::Config {
                    message: format!("cyclic dependency detected involving service \"{service}\""),
                })
            }
        }
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}
