use std::hash::Hash;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::cost::Cost;
use crate::graph::IntrinsicIdentity;
use crate::graph::Node;
use crate::graph::PathNodeGraph;

/// A directed graph with explicit weighted edges.
///
/// Heuristic estimates are looked up per `(node, target)` pair and default to
/// zero, which is always admissible.
#[derive(Debug, Clone)]
pub struct WeightedDigraph<N, C>
where
    N: Node + Eq + Hash,
    C: Cost,
{
    edges: FxHashMap<N, SmallVec<[(N, C); 4]>>,
    heuristic: FxHashMap<(N, N), C>,
}

impl<N, C> WeightedDigraph<N, C>
where
    N: Node + Eq + Hash,
    C: Cost,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            edges: FxHashMap::default(),
            heuristic: FxHashMap::default(),
        }
    }

    /// Adds the edge `from -> to`.
    ///
    /// Parallel edges are kept; stepping along them costs the cheapest one.
    pub fn add_edge(&mut self, from: N, to: N, cost: C) -> &mut Self {
        self.edges.entry(from).or_default().push((to, cost));
        self
    }

    /// Adds both `a -> b` and `b -> a`.
    pub fn add_undirected_edge(&mut self, a: N, b: N, cost: C) -> &mut Self {
        self.add_edge(a.clone(), b.clone(), cost);
        self.add_edge(b, a, cost)
    }

    pub fn set_heuristic(&mut self, node: N, target: N, cost: C) -> &mut Self {
        self.heuristic.insert((node, target), cost);
        self
    }

    /// The number of nodes with outgoing edges.
    pub fn sources(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(SmallVec::len).sum()
    }
}

impl<N, C> Default for WeightedDigraph<N, C>
where
    N: Node + Eq + Hash,
    C: Cost,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, C> FromIterator<(N, N, C)> for WeightedDigraph<N, C>
where
    N: Node + Eq + Hash,
    C: Cost,
{
    fn from_iter<T: IntoIterator<Item = (N, N, C)>>(edges: T) -> Self {
        let mut graph = Self::new();
        for (from, to, cost) in edges {
            graph.add_edge(from, to, cost);
        }
        graph
    }
}

impl<N, C> PathNodeGraph<N, C> for WeightedDigraph<N, C>
where
    N: Node + Eq + Hash,
    C: Cost,
{
    type Identity = IntrinsicIdentity;

    fn heuristic_cost(&self, node: &N, target: &N) -> C {
        // Avoids cloning into a `(N, N)` key for graphs without estimates.
        if self.heuristic.is_empty() {
            return C::zero();
        }
        self.heuristic
            .get(&(node.clone(), target.clone()))
            .copied()
            .unwrap_or_else(C::zero)
    }

    fn edge_cost(&self, node: &N, neighbour: &N) -> C {
        self.edges
            .get(node)
            .into_iter()
            .flatten()
            .filter(|(to, _)| to == neighbour)
            .map(|(_, cost)| *cost)
            .min()
            .unwrap_or_else(C::infinite)
    }

    fn neighbours(&self, node: &N) -> impl IntoIterator<Item = N> {
        self.edges
            .get(node)
            .into_iter()
            .flatten()
            .map(|(to, _)| to.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges() {
        let mut graph = WeightedDigraph::<char, u32>::new();
        graph.add_edge('a', 'b', 3).add_undirected_edge('b', 'c', 1);

        assert_eq!(graph.sources(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.neighbours(&'a').into_iter().collect::<Vec<_>>(), vec!['b']);
        assert_eq!(graph.neighbours(&'b').into_iter().collect::<Vec<_>>(), vec!['c']);
        assert!(graph.neighbours(&'z').into_iter().next().is_none());
    }

    #[test]
    fn costs() {
        let mut graph = WeightedDigraph::<char, u32>::from_iter([('a', 'b', 3), ('a', 'b', 2)]);
        assert_eq!(graph.edge_cost(&'a', &'b'), 2);
        assert_eq!(graph.edge_cost(&'b', &'a'), u32::MAX);

        assert_eq!(graph.heuristic_cost(&'a', &'b'), 0);
        graph.set_heuristic('a', 'b', 1);
        assert_eq!(graph.heuristic_cost(&'a', &'b'), 1);
        assert_eq!(graph.heuristic_cost(&'b', &'a'), 0);
    }
}
