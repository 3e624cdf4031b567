use std::marker::PhantomData;

use rustc_hash::FxHashMap;

use crate::cost::Cost;
use crate::graph::Node;
use crate::graph::NodeIdentity;
use crate::path_node::PathNode;
use crate::path_node::PathNodeIndex;

/// The single `PathNode` of every node value ever seen.
///
/// Nodes live in an arena and reference each other through `PathNodeIndex`.
/// The cache only grows. Nodes are reset, not dropped, between searches.
pub struct NodeCache<N, C, I>
where
    N: Node,
    C: Cost,
    I: NodeIdentity<N>,
{
    nodes: Vec<PathNode<N, C>>,
    /// Finds the `PathNode` of a node value.
    index: FxHashMap<I::Key, PathNodeIndex>,

    _phantom_identity: PhantomData<I>,
}

impl<N, C, I> NodeCache<N, C, I>
where
    N: Node,
    C: Cost,
    I: NodeIdentity<N>,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: FxHashMap::default(),
            _phantom_identity: PhantomData,
        }
    }

    /// Finds the `PathNode` for `value`, creating an unreached one if needed.
    pub fn wrap(&mut self, value: &N) -> PathNodeIndex {
        let key = I::key(value);
        if let Some(&node_index) = self.index.get(&key) {
            return node_index;
        }

        let node_index = PathNodeIndex::new(self.nodes.len());
        self.nodes.push(PathNode::new(value.clone()));
        self.index.insert(key, node_index);
        node_index
    }

    /// Finds the `PathNode` for `value` without creating one.
    #[must_use]
    pub fn find(&self, value: &N) -> Option<PathNodeIndex> {
        self.index.get(&I::key(value)).copied()
    }

    #[must_use]
    pub fn get(&self, value: &N) -> Option<&PathNode<N, C>> {
        self.find(value).map(|i| &self[i])
    }

    /// Marks every node as unreached.
    ///
    /// Must run before every search.
    pub fn reset_all(&mut self) {
        #[cfg(feature = "coz_profile")]
        coz::scope!("ResetNodes");

        for node in &mut self.nodes {
            node.reset();
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathNode<N, C>> {
        self.nodes.iter()
    }

    pub(crate) fn nodes_capacity(&self) -> usize {
        self.nodes.capacity()
    }
    pub(crate) fn index_capacity(&self) -> usize {
        self.index.capacity()
    }
}

impl<N, C, I> Default for NodeCache<N, C, I>
where
    N: Node,
    C: Cost,
    I: NodeIdentity<N>,
{
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<N, C, I> std::ops::Index<PathNodeIndex> for NodeCache<N, C, I>
where
    N: Node,
    C: Cost,
    I: NodeIdentity<N>,
{
    type Output = PathNode<N, C>;

    #[inline(always)]
    fn index(&self, index: PathNodeIndex) -> &Self::Output {
        &self.nodes[index.get()]
    }
}

impl<N, C, I> std::ops::IndexMut<PathNodeIndex> for NodeCache<N, C, I>
where
    N: Node,
    C: Cost,
    I: NodeIdentity<N>,
{
    #[inline(always)]
    fn index_mut(&mut self, index: PathNodeIndex) -> &mut Self::Output {
        &mut self.nodes[index.get()]
    }
}

impl<N, C, I> std::fmt::Debug for NodeCache<N, C, I>
where
    N: Node,
    C: Cost,
    I: NodeIdentity<N>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "NodeCache{{({} nodes)}}", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::graph::IntrinsicIdentity;
    use crate::path_node::NodeStatus;

    #[derive(Clone, Debug)]
    struct Point {
        x: i32,
        y: i32,
        name: String,
    }

    #[derive(Debug)]
    struct ByCoordinates;
    impl NodeIdentity<Point> for ByCoordinates {
        type Key = (i32, i32);
        fn key(p: &Point) -> (i32, i32) {
            (p.x, p.y)
        }
    }

    #[test]
    fn wrap_reuses_nodes() {
        let mut cache = NodeCache::<&str, u32, IntrinsicIdentity>::new();
        let a = cache.wrap(&"a");
        let b = cache.wrap(&"b");
        assert_ne!(a, b);
        assert_eq!(cache.wrap(&"a"), a);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache[a].value(), &"a");
        assert!(!cache[a].is_reached());
    }

    #[test]
    fn find_does_not_create() {
        let mut cache = NodeCache::<u8, u32, IntrinsicIdentity>::new();
        assert!(cache.find(&1).is_none());
        assert!(cache.is_empty());
        let i = cache.wrap(&1);
        assert_eq!(cache.find(&1), Some(i));
        assert!(cache.get(&2).is_none());
    }

    #[test]
    fn wrap_uses_the_identity_key() {
        let mut cache = NodeCache::<Point, u32, ByCoordinates>::new();
        let first = Point {
            x: 1,
            y: 2,
            name: "first".to_string(),
        };
        let second = Point {
            x: 1,
            y: 2,
            name: "second".to_string(),
        };
        let i = cache.wrap(&first);
        assert_eq!(cache.wrap(&second), i);
        assert_eq!(cache.len(), 1);
        // The first value seen is the one kept.
        assert_eq!(cache[i].value().name, "first");
    }

    #[test]
    fn reset_all_unreaches_every_node() {
        let mut cache = NodeCache::<u8, u32, IntrinsicIdentity>::new();
        let a = cache.wrap(&1);
        let b = cache.wrap(&2);
        cache[a].reach(None, 0, 3);
        cache[b].reach(Some(a), 5, 0);
        cache[a].set_status(NodeStatus::Closed);
        cache[b].set_status(NodeStatus::Open(0));

        cache.reset_all();

        assert_eq!(cache.len(), 2);
        for node in cache.iter() {
            assert!(!node.is_reached());
            assert_eq!(node.status(), NodeStatus::Unreached);
            assert_eq!(node.previous(), None);
        }
    }
}
