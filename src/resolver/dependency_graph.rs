//! Dependency ordering for requested libraries.
//!
//! Builds the dependency subgraph induced by the requested keys and produces
//! a stable topological order: a library never precedes its declared
//! dependencies, and keys with no ordering constraint between them keep
//! their original request order. The validator guarantees the subgraph is
//! closed (every dependency is itself requested), so the graph never has to
//! invent or drop nodes.
//!
//! Catalog data is hand-authored and acyclic in practice, but a cycle must
//! still surface as an error with the offending path rather than an infinite
//! loop or truncated output.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};

use crate::catalog::Catalog;
use crate::core::ExternalsError;

/// Color states for cycle detection using DFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Node has not been visited.
    White,
    /// Node is currently being visited (in the DFS stack).
    Gray,
    /// Node has been fully visited.
    Black,
}

/// Dependency graph over the requested library keys.
///
/// Edges point from a library to its dependencies, so a node's neighbors are
/// exactly the keys that must be emitted before it.
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
    /// Node indices in request order; drives tie-breaking in the sort.
    request_order: Vec<NodeIndex>,
}

impl DependencyGraph {
    /// Build the induced subgraph for `keys`.
    ///
    /// Edges are added only between requested keys; the validator has
    /// already rejected requests whose dependency closure is incomplete.
    pub fn from_request(keys: &[String], catalog: &Catalog) -> Self {
        let mut graph = DiGraph::new();
        let mut node_map: HashMap<String, NodeIndex> = HashMap::new();
        let mut request_order = Vec::new();

        for key in keys {
            if node_map.contains_key(key) {
                continue;
            }
            let index = graph.add_node(key.clone());
            node_map.insert(key.clone(), index);
            request_order.push(index);
        }

        for key in keys {
            let Some(descriptor) = catalog.get(key) else {
                continue;
            };
            let from = node_map[key];
            for dependency in &descriptor.dependencies {
                if let Some(&to) = node_map.get(dependency)
                    && !graph.contains_edge(from, to)
                {
                    graph.add_edge(from, to, ());
                }
            }
        }

        Self {
            graph,
            node_map,
            request_order,
        }
    }

    /// Detect cycles using DFS with colors.
    ///
    /// Returns [`ExternalsError::CyclicDependency`] carrying the cycle path.
    pub fn detect_cycles(&self) -> Result<(), ExternalsError> {
        let mut colors: HashMap<NodeIndex, Color> = HashMap::new();
        let mut path: Vec<String> = Vec::new();

        for node in self.graph.node_indices() {
            colors.insert(node, Color::White);
        }

        for node in self.graph.node_indices() {
            if matches!(colors.get(&node), Some(Color::White))
                && let Some(cycle) = self.dfs_visit(node, &mut colors, &mut path)
            {
                return Err(ExternalsError::CyclicDependency {
                    chain: cycle.join(" → "),
                });
            }
        }

        Ok(())
    }

    /// DFS visit for cycle detection.
    ///
    /// Returns `Some(cycle_path)` if a cycle is detected, None otherwise.
    fn dfs_visit(
        &self,
        node: NodeIndex,
        colors: &mut HashMap<NodeIndex, Color>,
        path: &mut Vec<String>,
    ) -> Option<Vec<String>> {
        colors.insert(node, Color::Gray);
        path.push(self.graph[node].clone());

        for neighbor in self.graph.neighbors(node) {
            match colors.get(&neighbor) {
                Some(Color::Gray) => {
                    let cycle_start =
                        path.iter().position(|key| *key == self.graph[neighbor])?;
                    let mut cycle = path[cycle_start..].to_vec();
                    // Repeat the entry node to show the cycle closes
                    cycle.push(self.graph[neighbor].clone());
                    return Some(cycle);
                }
                Some(Color::White) => {
                    if let Some(cycle) = self.dfs_visit(neighbor, colors, path) {
                        return Some(cycle);
                    }
                }
                _ => {}
            }
        }

        path.pop();
        colors.insert(node, Color::Black);
        None
    }

    /// Produce the stable topological order of the requested keys.
    ///
    /// Repeatedly emits the first key in request order whose dependencies
    /// have all been emitted. Restarting the scan from the front after each
    /// emission is what keeps ties in request order; the key set is small
    /// (bounded by catalog size), so the quadratic scan is irrelevant.
    pub fn sorted_keys(&self) -> Result<Vec<String>, ExternalsError> {
        self.detect_cycles()?;

        let mut emitted: HashSet<NodeIndex> = HashSet::new();
        let mut order = Vec::with_capacity(self.request_order.len());

        while order.len() < self.request_order.len() {
            let next = self.request_order.iter().copied().find(|index| {
                !emitted.contains(index)
                    && self.graph.neighbors(*index).all(|dep| emitted.contains(&dep))
            });
            match next {
                Some(index) => {
                    emitted.insert(index);
                    order.push(self.graph[index].clone());
                }
                None => {
                    // Unreachable once detect_cycles has passed
                    let stuck: Vec<_> = self
                        .request_order
                        .iter()
                        .filter(|index| !emitted.contains(*index))
                        .map(|&index| self.graph[index].clone())
                        .collect();
                    return Err(ExternalsError::CyclicDependency {
                        chain: stuck.join(" → "),
                    });
                }
            }
        }

        Ok(order)
    }

    /// Number of distinct keys in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of dependency edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether `key` is present in the graph.
    pub fn contains(&self, key: &str) -> bool {
        self.node_map.contains_key(key)
    }
}
