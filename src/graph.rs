//! The contract a caller implements to describe an implicit graph.
//!
//! Nothing here is materialised up-front: neighbours, costs and heuristic
//! estimates are requested on demand while searching.

use std::fmt::Debug;
use std::hash::Hash;

use crate::cost::Cost;

/// A position in a graph.
///
/// Node values are cloned into the node cache the first time they are seen,
/// and into the returned path.
pub trait Node: Clone + Debug {}
impl<T> Node for T where T: Clone + Debug {}

/// The equality notion for node values.
///
/// Every place that needs to know whether two values are "the same graph
/// node" (the node cache, and through it the open and closed sets) goes
/// through the same `Key`.
pub trait NodeIdentity<N>: Debug
where
    N: Node,
{
    type Key: Eq + Hash + Debug;

    fn key(node: &N) -> Self::Key;

    #[inline(always)]
    fn same(a: &N, b: &N) -> bool {
        Self::key(a) == Self::key(b)
    }
}

/// Uses the node value's own `Eq` and `Hash`.
#[derive(Copy, Clone, Debug, Default)]
pub struct IntrinsicIdentity;

impl<N> NodeIdentity<N> for IntrinsicIdentity
where
    N: Node + Eq + Hash,
{
    type Key = N;

    #[inline(always)]
    fn key(node: &N) -> N {
        node.clone()
    }

    #[inline(always)]
    fn same(a: &N, b: &N) -> bool {
        a == b
    }
}

/// A lazily-evaluated weighted graph with a target-distance heuristic.
///
/// All methods must be deterministic and free of side effects that the search
/// could observe.
pub trait PathNodeGraph<N, C>: Debug
where
    N: Node,
    C: Cost,
{
    /// How node values are told apart.
    type Identity: NodeIdentity<N>;

    /// Whether `node` counts as having reached `target`.
    ///
    /// Defaults to identity equality. Override for approximate goals, e.g.
    /// "anywhere within a radius of the target".
    #[inline(always)]
    fn is_target_reached(&self, node: &N, target: &N) -> bool {
        Self::Identity::same(node, target)
    }

    /// Estimates the cost of the cheapest path from `node` to `target`.
    ///
    /// Must be non-negative and never overestimate for the returned paths to
    /// be optimal.
    fn heuristic_cost(&self, node: &N, target: &N) -> C;

    /// The exact cost of stepping from `node` into its `neighbour`.
    ///
    /// Must be non-negative. `C::max_value()` makes the step impassable.
    fn edge_cost(&self, node: &N, neighbour: &N) -> C;

    /// The nodes reachable from `node` in a single step.
    fn neighbours(&self, node: &N) -> impl IntoIterator<Item = N>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct Labelled {
        id: u32,
        #[allow(dead_code)]
        label: &'static str,
    }

    #[derive(Debug)]
    struct ById;
    impl NodeIdentity<Labelled> for ById {
        type Key = u32;
        fn key(node: &Labelled) -> u32 {
            node.id
        }
    }

    #[derive(Debug)]
    struct Line;
    impl PathNodeGraph<u32, u32> for Line {
        type Identity = IntrinsicIdentity;

        fn heuristic_cost(&self, node: &u32, target: &u32) -> u32 {
            node.abs_diff(*target)
        }
        fn edge_cost(&self, _node: &u32, _neighbour: &u32) -> u32 {
            1
        }
        fn neighbours(&self, node: &u32) -> impl IntoIterator<Item = u32> {
            [node.checked_sub(1), node.checked_add(1)].into_iter().flatten()
        }
    }

    #[test]
    fn intrinsic_identity_uses_value_equality() {
        assert!(<IntrinsicIdentity as NodeIdentity<u32>>::same(&3, &3));
        assert!(!<IntrinsicIdentity as NodeIdentity<u32>>::same(&3, &4));
    }

    #[test]
    fn custom_identity_ignores_other_fields() {
        let a = Labelled { id: 1, label: "a" };
        let b = Labelled { id: 1, label: "b" };
        let c = Labelled { id: 2, label: "a" };
        assert!(ById::same(&a, &b));
        assert!(!ById::same(&a, &c));
    }

    #[test]
    fn default_goal_test_is_identity() {
        let line = Line;
        assert!(line.is_target_reached(&5, &5));
        assert!(!line.is_target_reached(&5, &6));
        assert_eq!(line.neighbours(&0).into_iter().collect::<Vec<_>>(), vec![1]);
    }
}
