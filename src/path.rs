use crate::cost::Cost;
use crate::graph::Node;

const MAX_ELEMENTS_DISPLAYED: usize = 20;

/// A path found by a search, listed from the target back to the start.
///
/// The nodes come out of a search in this order while following the
/// back-pointers. Use [`ReversedPath::into_forward`] for start-to-target
/// order.
///
/// It's never empty. A start that already reaches the target yields a
/// single-node path of zero cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReversedPath<N, C>
where
    N: Node,
    C: Cost,
{
    nodes: Vec<N>,
    cost: C,
}

impl<N, C> ReversedPath<N, C>
where
    N: Node,
    C: Cost,
{
    pub(crate) fn new(nodes: Vec<N>, cost: C) -> Self {
        debug_assert!(!nodes.is_empty(), "Paths have at least a start");
        debug_assert!(cost.valid(), "Paths have a finite cost");
        Self { nodes, cost }
    }

    /// The nodes, target first and start last.
    #[inline(always)]
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// The total cost of the edges in the path.
    #[inline(always)]
    pub fn cost(&self) -> C {
        self.cost
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node that reached the target.
    pub fn target(&self) -> &N {
        &self.nodes[0]
    }

    pub fn start(&self) -> &N {
        &self.nodes[self.nodes.len() - 1]
    }

    /// The number of edges walked.
    pub fn steps(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn into_nodes(self) -> Vec<N> {
        self.nodes
    }

    /// The nodes from the start to the target.
    pub fn into_forward(mut self) -> Vec<N> {
        self.nodes.reverse();
        self.nodes
    }
}

impl<N, C> std::fmt::Display for ReversedPath<N, C>
where
    N: Node,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ReversedPath({}, {:?}:{:?}:{:?})",
            self.cost,
            self.target(),
            self.nodes
                .iter()
                .take(MAX_ELEMENTS_DISPLAYED)
                .collect::<Vec<_>>(),
            self.start(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ends() {
        let path = ReversedPath::new(vec!['d', 'b', 'a'], 2u32);
        assert_eq!(path.target(), &'d');
        assert_eq!(path.start(), &'a');
        assert_eq!(path.len(), 3);
        assert_eq!(path.steps(), 2);
        assert!(!path.is_empty());
        assert_eq!(path.cost(), 2);
    }

    #[test]
    fn forward_order() {
        let path = ReversedPath::new(vec![3, 2, 1], 9u64);
        assert_eq!(path.clone().into_nodes(), vec![3, 2, 1]);
        assert_eq!(path.into_forward(), vec![1, 2, 3]);
    }

    #[test]
    fn single_node() {
        let path = ReversedPath::new(vec!["here"], 0u32);
        assert_eq!(path.target(), path.start());
        assert_eq!(path.steps(), 0);
        assert_eq!(path.to_string(), r#"ReversedPath(0, "here":["here"]:"here")"#);
    }
}
