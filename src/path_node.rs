use nonmax::NonMaxUsize;

use crate::cost::Cost;
use crate::graph::Node;

/// A reference to a `PathNode<N, C>` in its `NodeCache`.
///
/// An index into the cache's arena, so back-pointers never own or borrow the
/// node they point to. `NonMaxUsize` keeps `Option<PathNodeIndex>` as small
/// as a plain `usize`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PathNodeIndex(NonMaxUsize);

impl PathNodeIndex {
    #[inline(always)]
    pub(crate) fn new(index: usize) -> Self {
        match NonMaxUsize::new(index) {
            Some(i) => Self(i),
            // An arena of non-zero-sized nodes can't reach `usize::MAX` items.
            None => unreachable!("PathNodeIndex out of range"),
        }
    }

    #[inline(always)]
    pub fn get(&self) -> usize {
        self.0.get()
    }
}

/// Membership of a `PathNode` in the current search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeStatus {
    /// Not reached since the last reset.
    Unreached,
    /// In the open list, at the given heap position.
    Open(usize),
    /// Expanded already.
    Closed,
}

/// Search bookkeeping for a single node value.
#[derive(Debug, Clone)]
pub struct PathNode<N, C>
where
    N: Node,
    C: Cost,
{
    value: N,
    previous: Option<PathNodeIndex>,
    /// The cost of the best known path from the start node to this one.
    g: C,
    /// The heuristic cost of the cheapest path from this node to the target.
    h: C,
    /// `g + h`
    f: C,
    status: NodeStatus,
}

impl<N, C> PathNode<N, C>
where
    N: Node,
    C: Cost,
{
    pub(crate) fn new(value: N) -> Self {
        Self {
            value,
            previous: None,
            g: C::infinite(),
            h: C::zero(),
            f: C::infinite(),
            status: NodeStatus::Unreached,
        }
    }

    /// Gives this node a better path, through `previous` if any.
    pub(crate) fn reach(&mut self, previous: Option<PathNodeIndex>, g: C, h: C) {
        debug_assert!(g < self.g, "Reaching a node must improve it");
        self.previous = previous;
        self.g = g;
        self.h = h;
        self.f = g.saturating_add(&h);
    }

    /// Forgets everything learnt in a previous search.
    pub(crate) fn reset(&mut self) {
        self.previous = None;
        self.g = C::infinite();
        self.f = C::infinite();
        self.status = NodeStatus::Unreached;
    }

    #[inline(always)]
    pub(crate) fn set_status(&mut self, status: NodeStatus) {
        self.status = status;
    }

    pub fn value(&self) -> &N {
        &self.value
    }
    pub fn previous(&self) -> Option<PathNodeIndex> {
        self.previous
    }
    pub fn g(&self) -> C {
        self.g
    }
    pub fn h(&self) -> C {
        self.h
    }
    pub fn f(&self) -> C {
        self.f
    }
    pub fn status(&self) -> NodeStatus {
        self.status
    }

    /// Whether the node has a finite path cost in the current search.
    #[inline(always)]
    pub fn is_reached(&self) -> bool {
        self.g.valid()
    }
    #[inline(always)]
    pub fn is_open(&self) -> bool {
        matches!(self.status, NodeStatus::Open(_))
    }
    #[inline(always)]
    pub fn is_closed(&self) -> bool {
        self.status == NodeStatus::Closed
    }
}
