use derive_more::Display;

use crate::cost::Cost;
use crate::graph::Node;
use crate::graph::NodeIdentity;
use crate::graph::PathNodeGraph;
use crate::node_cache::NodeCache;
use crate::open_list::OpenEntry;
use crate::open_list::OpenList;
use crate::path::ReversedPath;
use crate::path_node::PathNode;
use crate::path_node::PathNodeIndex;

/// Counters of the last search.
#[derive(Copy, Clone, Debug, Default, Display, PartialEq, Eq)]
#[display(
    "expanded={expanded} opened={opened} improved={improved} created={created} found={found}"
)]
pub struct SearchStats {
    /// Nodes whose neighbours were generated.
    pub expanded: usize,
    /// Nodes pushed into the open list.
    pub opened: usize,
    /// Open nodes that got a better path.
    pub improved: usize,
    /// Nodes added to the cache.
    pub created: usize,
    /// Whether the target was reached.
    pub found: bool,
}

/// A* over a lazily evaluated graph.
///
/// Owns the graph it searches and the `PathNode` of every node value seen in
/// any search, so repeated searches on the same graph reuse them.
///
/// Searching needs `&mut self`, one search at a time.
#[derive(Debug)]
pub struct AStar<G, N, C>
where
    G: PathNodeGraph<N, C>,
    N: Node,
    C: Cost,
{
    graph: G,

    /// Amalgamation of,
    /// - The `HashMap<Key, PathNode>`
    ///   - To find existing Path Nodes from their node value.
    /// - The "Closed Set" `HashSet<Key>`
    ///   - To recall whether we had already expanded a node.
    ///
    /// Both go through the graph's `NodeIdentity`, and so does the open list
    /// as it only refers to cached nodes.
    cache: NodeCache<N, C, G::Identity>,

    /// An intrusive heap of `(AStarRank, PathNodeIndex)` that keeps the
    /// referenced node's status updated with its position.
    open: OpenList<C>,

    stats: SearchStats,
}

impl<G, N, C> AStar<G, N, C>
where
    G: PathNodeGraph<N, C>,
    N: Node,
    C: Cost,
{
    #[must_use]
    pub fn new(graph: G) -> Self {
        Self {
            graph,
            cache: NodeCache::new(),
            open: OpenList::with_capacity(64),
            stats: SearchStats::default(),
        }
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn into_graph(self) -> G {
        self.graph
    }

    pub fn cache(&self) -> &NodeCache<N, C, G::Identity> {
        &self.cache
    }

    /// Counters of the last search.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Finds the cheapest path from `start` to a node that reaches `target`.
    ///
    /// Returns the path from the target back to the start, or `None` when no
    /// node reaching the target is reachable from `start`.
    #[must_use]
    pub fn shortest_reversed_path(
        &mut self,
        start: &N,
        target: &N,
    ) -> Option<ReversedPath<N, C>> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("ShortestReversedPath");

        log::debug!("Searching path from {start:?} to {target:?}");
        let cached_nodes = self.cache.len();

        let start_index = self.cache.wrap(start);
        let end = self.end_of_shortest_path(start_index, target);
        self.stats.created = self.cache.len() - cached_nodes;
        self.stats.found = end.is_some();
        log::debug!("Search finished: {}", self.stats);

        end.map(|end| self.reversed_path(end))
    }

    /// Runs the search, returning the node that reached the target.
    fn end_of_shortest_path(&mut self, start: PathNodeIndex, target: &N) -> Option<PathNodeIndex> {
        self.cache.reset_all();
        self.open.clear();
        self.stats = SearchStats::default();

        let h = self.graph.heuristic_cost(self.cache[start].value(), target);
        debug_assert!(h >= C::zero(), "Negative heuristic {h}");
        self.cache[start].reach(None, C::zero(), h);
        self.open.push(&mut self.cache, start);
        self.stats.opened += 1;

        while let Some(node_index) = self.open.pop(&mut self.cache) {
            #[cfg(feature = "coz_profile")]
            coz::scope!("NodeExpansion");

            let node = &self.cache[node_index];
            let g = node.g();
            debug_assert!(g.valid(), "Open nodes must be reached");
            let current = node.value().clone();

            if self.graph.is_target_reached(&current, target) {
                return Some(node_index);
            }

            log::trace!("Expanding {current:?} (g={g}, f={})", node.f());
            self.stats.expanded += 1;

            for neighbour in self.graph.neighbours(&current) {
                let neighbour_index = self.cache.wrap(&neighbour);
                let neighbour_node = &self.cache[neighbour_index];
                if neighbour_node.is_closed() {
                    continue;
                }

                let c = self.graph.edge_cost(&current, &neighbour);
                debug_assert!(c >= C::zero(), "Negative edge cost {c}");
                let tentative_g = g.saturating_add(&c);
                if tentative_g >= neighbour_node.g() {
                    continue;
                }

                // Found a better path to the neighbour
                let was_open = neighbour_node.is_open();
                let h = self.graph.heuristic_cost(&neighbour, target);
                debug_assert!(h >= C::zero(), "Negative heuristic {h}");
                self.cache[neighbour_index].reach(Some(node_index), tentative_g, h);

                if was_open {
                    self.open.improve(&mut self.cache, neighbour_index);
                    self.stats.improved += 1;
                } else {
                    self.open.push(&mut self.cache, neighbour_index);
                    self.stats.opened += 1;
                }
            }
        }

        None
    }

    /// Follows the back-pointers from `end` to the start.
    #[must_use]
    fn reversed_path(&self, end: PathNodeIndex) -> ReversedPath<N, C> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("PathReconstruction");

        let mut node_index = end;
        let mut nodes = vec![self.cache[node_index].value().clone()];
        while let Some(previous) = self.cache[node_index].previous() {
            debug_assert!(node_index != previous);
            nodes.push(self.cache[previous].value().clone());
            node_index = previous;
        }

        ReversedPath::new(nodes, self.cache[end].g())
    }

    pub fn write_memory_stats<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        use size::Size;
        use std::mem::size_of;
        use thousands::Separable;

        writeln!(out, "AStar Stats:")?;
        let s = size_of::<PathNode<N, C>>();
        let l = self.cache.len();
        let c = self.cache.nodes_capacity();
        writeln!(
            out,
            "  - |Nodes|:   {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;
        writeln!(
            out,
            "  - |Nodes|*:  {} ({})",
            c.separate_with_commas(),
            Size::from_bytes(c * s)
        )?;

        let s = size_of::<OpenEntry<C>>();
        let l = self.open.len();
        let c = self.open.capacity();
        writeln!(
            out,
            "  - |Open|:    {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;
        writeln!(
            out,
            "  - |Open|*:   {} ({})",
            c.separate_with_commas(),
            Size::from_bytes(c * s)
        )?;

        let s = size_of::<(<G::Identity as NodeIdentity<N>>::Key, PathNodeIndex)>();
        let c = self.cache.index_capacity();
        writeln!(
            out,
            "  - |Index|*:  {} ({})",
            c.separate_with_commas(),
            Size::from_bytes(c * s)
        )?;

        writeln!(
            out,
            "  - Expanded nodes: {}",
            self.stats.expanded.separate_with_commas()
        )?;

        Ok(())
    }

    pub fn print_memory_stats(&self) -> std::io::Result<()> {
        self.write_memory_stats(std::io::stdout().lock())
    }
}
