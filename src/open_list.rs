use std::cmp::min;

use crate::cost::Cost;
use crate::derank::derank;
use crate::graph::Node;
use crate::graph::NodeIdentity;
use crate::node_cache::NodeCache;
use crate::path_node::NodeStatus;
use crate::path_node::PathNodeIndex;

/// The ranking tuple for A*
///
/// We prefer better f-values, and tie break for lower h.
///
/// Intuition around higher g-value might be slightly easier, but keeping the
/// raw h value helps to avoid recomputing it later.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct AStarRank<C: Cost> {
    f: C,
    h: C,
}
impl<C> AStarRank<C>
where
    C: Cost,
{
    pub fn new(g: C, h: C) -> Self {
        Self {
            f: g.saturating_add(&h),
            h,
        }
    }
    pub fn f(&self) -> C {
        self.f
    }
    pub fn h(&self) -> C {
        self.h
    }
}

/// An entry of the open list.
///
/// Ordered by rank, then by the node index. Node indices follow the order in
/// which the cache first saw each node value, so equal ranks resolve to the
/// oldest node and the expansion order is fully deterministic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct OpenEntry<C: Cost> {
    pub rank: AStarRank<C>,
    pub node_index: PathNodeIndex,
}

/// Children per heap node.
///
/// Entries are laid out level by level, so with arity `A` the parent of `i` is
/// `(i-1)/A` and its children span `A*i+1..=A*(i+1)`.
const HEAP_ARITY: usize = 8usize;
#[inline(always)]
#[must_use]
fn up(i: usize) -> usize {
    (i - 1) / HEAP_ARITY
}
#[inline(always)]
#[must_use]
fn down_left(i: usize) -> usize {
    HEAP_ARITY * i + 1
}
#[inline(always)]
#[must_use]
fn down_right(i: usize) -> usize {
    HEAP_ARITY * (i + 1)
}

/// The open set, as an "intrusive" heap.
///
/// Every open `PathNode` knows its position in the heap
/// (`NodeStatus::Open(heap_index)`), so an improved node can be re-ranked
/// in place without searching for its entry.
///
/// ```pseudocode
/// for (i, e) in self.heap.enumerate():
///   assert_eq(cache[e.node_index].status, Open(i))
/// ```
///
/// The positions live in the `NodeCache`, so every operation that moves
/// entries borrows it.
#[derive(Debug)]
pub struct OpenList<C>
where
    C: Cost,
{
    heap: Vec<OpenEntry<C>>,
}

impl<C> OpenList<C>
where
    C: Cost,
{
    #[must_use]
    pub fn new() -> Self {
        Self { heap: vec![] }
    }
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.heap.len()
    }
    pub fn capacity(&self) -> usize {
        self.heap.capacity()
    }

    /// The best entry, if any.
    pub fn peek(&self) -> Option<&OpenEntry<C>> {
        self.heap.first()
    }

    /// Drops every entry.
    ///
    /// The node statuses are left alone, `NodeCache::reset_all` takes care of
    /// them.
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Opens a reached node.
    pub fn push<N, I>(&mut self, cache: &mut NodeCache<N, C, I>, node_index: PathNodeIndex)
    where
        N: Node,
        I: NodeIdentity<N>,
    {
        self.verify_heap(cache);
        let node = &mut cache[node_index];
        debug_assert!(node.is_reached(), "Unreached nodes can't be ranked");
        debug_assert_eq!(node.status(), NodeStatus::Unreached);

        let heap_index = self.heap.len(); // Future heap_index
        node.set_status(NodeStatus::Open(heap_index));
        self.heap.push(OpenEntry {
            rank: AStarRank::new(node.g(), node.h()),
            node_index,
        });
        self.sift_up(cache, heap_index);

        self.verify_heap(cache);
    }

    /// Re-ranks an open node after its path improved.
    pub fn improve<N, I>(&mut self, cache: &mut NodeCache<N, C, I>, node_index: PathNodeIndex)
    where
        N: Node,
        I: NodeIdentity<N>,
    {
        let node = &cache[node_index];
        let heap_index = match node.status() {
            NodeStatus::Open(heap_index) => heap_index,
            status => unreachable!("Tried improving a node that is {status:?}"),
        };
        let rank = AStarRank::new(node.g(), node.h());
        debug_assert!(rank <= self.heap[heap_index].rank, "Improving can't worsen");

        self.heap[heap_index].rank = rank;
        self.sift_up(cache, heap_index);

        self.verify_heap(cache);
    }

    /// Pops the best node, closing it.
    pub fn pop<N, I>(&mut self, cache: &mut NodeCache<N, C, I>) -> Option<PathNodeIndex>
    where
        N: Node,
        I: NodeIdentity<N>,
    {
        #[cfg(feature = "coz_profile")]
        coz::scope!("Pop");

        self.verify_heap(cache);
        if self.heap.is_empty() {
            return None;
        }

        let top = self.heap.swap_remove(0);
        if let Some(moved) = self.heap.first() {
            cache[moved.node_index].set_status(NodeStatus::Open(0));
            self.sift_down(cache, 0);
        }
        cache[top.node_index].set_status(NodeStatus::Closed);

        self.verify_heap(cache);
        Some(top.node_index)
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    pub(crate) fn verify_heap<N, I>(&self, _cache: &NodeCache<N, C, I>)
    where
        N: Node,
        I: NodeIdentity<N>,
    {
        // All good... (hopefully)
    }
    #[inline(always)]
    #[cfg(feature = "verify")]
    pub(crate) fn verify_heap<N, I>(&self, cache: &NodeCache<N, C, I>)
    where
        N: Node,
        I: NodeIdentity<N>,
    {
        // Every entry,
        for (i, e) in self.heap.iter().enumerate() {
            // - Has the right intrusive index set.
            assert_eq!(cache[e.node_index].status(), NodeStatus::Open(i));

            // - Goes after its parent entry, if any.
            if i == 0 {
                continue;
            }
            let p = up(i);
            assert!(
                self.heap[p] <= self.heap[i],
                "Entry[{p}]={:?} !<= child [{i}]={:?}. Out of heap of len={}",
                self.heap[p],
                self.heap[i],
                self.heap.len(),
            );
        }
    }

    /// Raises an entry
    /// Returns it's new index
    #[inline(always)]
    fn sift_up<N, I>(&mut self, cache: &mut NodeCache<N, C, I>, index: usize) -> usize
    where
        N: Node,
        I: NodeIdentity<N>,
    {
        debug_assert!(
            index < self.heap.len(),
            "Entry is way out of sync. Index out of bounds..."
        );

        let mut pos = index;
        while pos > 0 {
            let parent = up(pos);
            if self.heap[parent] <= self.heap[pos] {
                break;
            }
            self.swap(cache, parent, pos);
            pos = parent;
        }
        pos
    }

    /// Lowers an entry
    /// Returns it's new index
    #[inline(always)]
    fn sift_down<N, I>(&mut self, cache: &mut NodeCache<N, C, I>, mut index: usize) -> usize
    where
        N: Node,
        I: NodeIdentity<N>,
    {
        let len = self.heap.len();
        debug_assert!(
            index < len,
            "Entry is way out of sync. Index out of bounds..."
        );

        loop {
            // Find the best child
            let mut child = down_left(index);
            if child >= len {
                break;
            }

            debug_assert_eq!(child + HEAP_ARITY, down_right(index) + 1);
            child += derank(&self.heap[child..min(child + HEAP_ARITY, len)]);

            if self.heap[index] <= self.heap[child] {
                break;
            }

            self.swap(cache, index, child);
            index = child;
        }
        index
    }

    /// Swaps two entries in the heap.
    ///
    /// For consistency in calling code `l < r` is checked.
    ///
    /// Keeps the intrusive indices in sync.
    #[inline(always)]
    fn swap<N, I>(&mut self, cache: &mut NodeCache<N, C, I>, l: usize, r: usize)
    where
        N: Node,
        I: NodeIdentity<N>,
    {
        debug_assert!(l < r, "Swap({l}, {r}) uses wrong argument order");

        let len = self.heap.len();
        debug_assert!(l < len, "Left  swap index {l} is OUT OF BOUNDS({len})");
        debug_assert!(r < len, "Right swap index {r} is OUT OF BOUNDS({len})");
        self.heap.swap(l, r);
        cache[self.heap[l].node_index].set_status(NodeStatus::Open(l));
        cache[self.heap[r].node_index].set_status(NodeStatus::Open(r));
        debug_assert!(
            self.heap[l] <= self.heap[r],
            "Swaps must locally restore the heap invariant."
        );
    }
}

impl<C> Default for OpenList<C>
where
    C: Cost,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::graph::IntrinsicIdentity;

    type Cache = NodeCache<char, u32, IntrinsicIdentity>;

    fn open_node(
        cache: &mut Cache,
        open: &mut OpenList<u32>,
        value: char,
        g: u32,
        h: u32,
    ) -> PathNodeIndex {
        let i = cache.wrap(&value);
        cache[i].reach(None, g, h);
        open.push(cache, i);
        i
    }

    fn check_positions(cache: &Cache, open: &OpenList<u32>) {
        for (i, e) in open.heap.iter().enumerate() {
            assert_eq!(cache[e.node_index].status(), NodeStatus::Open(i));
        }
    }

    #[test]
    fn heap_layout() {
        assert_eq!(down_left(0), 1);
        assert_eq!(down_right(0), 8);
        assert_eq!(down_left(1), 9);
        assert_eq!(down_right(1), 16);
        for child in 1..=8 {
            assert_eq!(up(child), 0);
        }
        assert_eq!(up(9), 1);
        assert_eq!(up(73), 9);
    }

    #[test]
    fn ranking() {
        let g = 2u32;
        let h_low = 0u32;
        let h_high = 1u32;
        assert!(AStarRank::new(g, h_low) < AStarRank::new(g, h_high));
        assert!(AStarRank::new(g, h_high) == AStarRank::new(g, h_high));
        assert!(AStarRank::new(g, h_high) > AStarRank::new(g, h_low));

        // Same f-value, needs tie-breaking on h
        let low = AStarRank::new(2u32, 0u32);
        let high = AStarRank::new(0u32, 2u32);
        assert!(low < high);
        assert!(low.f() == high.f());
        assert!(low.h() < high.h());
    }

    #[test]
    fn rank_saturates_at_infinity() {
        let rank = AStarRank::new(u32::MAX, 3u32);
        assert_eq!(rank.f(), u32::MAX);
    }

    #[test]
    fn pops_in_rank_order() {
        let mut cache = Cache::new();
        let mut open = OpenList::<u32>::new();

        let gs = [
            9u32, 3, 14, 1, 7, 20, 5, 11, 2, 18, 6, 13, 0, 17, 8, 4, 16, 10, 19, 12,
        ];
        for (value, g) in ('a'..='t').zip(gs) {
            open_node(&mut cache, &mut open, value, g, 0);
            check_positions(&cache, &open);
        }
        assert_eq!(open.len(), 20);

        let mut last = 0u32;
        while let Some(i) = open.pop(&mut cache) {
            check_positions(&cache, &open);
            assert!(cache[i].is_closed());
            assert!(cache[i].f() >= last);
            last = cache[i].f();
        }
        assert_eq!(last, 20);
        assert!(open.is_empty());
    }

    #[test]
    fn ties_resolve_to_the_oldest_node() {
        let mut cache = Cache::new();
        let mut open = OpenList::<u32>::new();

        let a = open_node(&mut cache, &mut open, 'a', 1, 1);
        let b = open_node(&mut cache, &mut open, 'b', 0, 2);
        let c = open_node(&mut cache, &mut open, 'c', 2, 0);
        let d = open_node(&mut cache, &mut open, 'd', 2, 0);

        // f ties everywhere: lower h first, then cache order.
        assert_eq!(open.pop(&mut cache), Some(c));
        assert_eq!(open.pop(&mut cache), Some(d));
        assert_eq!(open.pop(&mut cache), Some(a));
        assert_eq!(open.pop(&mut cache), Some(b));
        assert_eq!(open.pop(&mut cache), None);
    }

    #[test]
    fn improve_reranks_in_place() {
        let mut cache = Cache::new();
        let mut open = OpenList::<u32>::new();

        for (value, g) in ('a'..='j').zip(10u32..) {
            open_node(&mut cache, &mut open, value, g, 0);
        }
        let j = cache.find(&'j').unwrap();
        assert_eq!(open.peek().map(|e| e.node_index), cache.find(&'a'));

        cache[j].reach(None, 1, 0);
        open.improve(&mut cache, j);
        check_positions(&cache, &open);
        assert_eq!(open.len(), 10);
        assert_eq!(open.pop(&mut cache), Some(j));
        assert_eq!(open.pop(&mut cache), cache.find(&'a'));
    }
}
