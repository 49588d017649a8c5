//! Composite cost hierarchy.
//!
//! A [`HierarchyNode`] is either a [`Leaf`] carrying an intrinsic cost or a
//! [`Container`] whose cost is the sum of its children. Containers own their
//! children by value: a node moved into one container cannot be attached to
//! another, and a node can never become its own ancestor.

use std::fmt;

/// Node with an intrinsic, non-derived cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    name: String,
    cost: i64,
}

impl Leaf {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cost(&self) -> i64 {
        self.cost
    }
}

/// Node whose cost is derived from its children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Container {
    /// Display label, None for anonymous containers
    label: Option<String>,
    /// Children in insertion order
    children: Vec<HierarchyNode>,
}

impl Container {
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn children(&self) -> &[HierarchyNode] {
        &self.children
    }
}

/// Immutable tree of leaves and containers.
///
/// There is no mutation API after construction; rebuilding produces a new
/// tree. `Clone` yields an independent deep copy, so cloning a subtree and
/// attaching both copies counts its cost twice.
///
/// `cost`, `depth` and iteration are iterative, but the derived `Clone` and
/// `Drop` recurse per nesting level: trees nested tens of thousands of levels
/// deep can exhaust the call stack when cloned or dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HierarchyNode {
    Leaf(Leaf),
    Container(Container),
}

impl HierarchyNode {
    pub fn new_leaf(name: impl Into<String>, cost: i64) -> Self {
        Self::Leaf(Leaf {
            name: name.into(),
            cost,
        })
    }

    /// Takes ownership of already built children.
    pub fn new_container(children: Vec<HierarchyNode>) -> Self {
        Self::Container(Container {
            label: None,
            children,
        })
    }

    pub fn labeled_container(label: impl Into<String>, children: Vec<HierarchyNode>) -> Self {
        Self::Container(Container {
            label: Some(label.into()),
            children,
        })
    }

    /// Total cost of this subtree: the sum over every reachable leaf.
    ///
    /// Traverses depth-first in child order with an explicit stack, so nesting
    /// depth is bounded by heap rather than call stack. An empty container costs 0.
    ///
    /// Addition wraps on `i64` overflow in every build profile, so the result
    /// is defined for any set of leaf costs.
    pub fn cost(&self) -> i64 {
        self.leaves()
            .fold(0i64, |total, leaf| total.wrapping_add(leaf.cost()))
    }

    /// Leaf name or container label.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Leaf(leaf) => Some(leaf.name()),
            Self::Container(container) => container.label(),
        }
    }

    /// Direct children; always empty for leaves.
    pub fn children(&self) -> &[HierarchyNode] {
        match self {
            Self::Leaf(_) => &[],
            Self::Container(container) => container.children(),
        }
    }

    /// Pre-order iterator over this node and all descendants.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    /// Leaves in depth-first, left-to-right order.
    pub fn leaves(&self) -> impl Iterator<Item = &Leaf> {
        self.iter().filter_map(|node| match node {
            Self::Leaf(leaf) => Some(leaf),
            Self::Container(_) => None,
        })
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Number of levels; a single leaf or empty container has depth 1.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 1)];

        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            for child in node.children() {
                stack.push((child, depth + 1));
            }
        }

        max_depth
    }
}

impl fmt::Display for HierarchyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({})", name, self.cost()),
            None => write!(f, "({})", self.cost()),
        }
    }
}

pub struct PreOrder<'a> {
    stack: Vec<&'a HierarchyNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a HierarchyNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        for child in node.children().iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn leaf(cost: i64) -> HierarchyNode {
        HierarchyNode::new_leaf(format!("item-{cost}"), cost)
    }

    #[rstest]
    #[case(0)]
    #[case(42)]
    #[case(-7)]
    fn given_leaf_when_cost_then_returns_stored_cost(#[case] cost: i64) {
        assert_eq!(HierarchyNode::new_leaf("x", cost).cost(), cost);
    }

    #[test]
    fn given_empty_container_when_cost_then_zero() {
        let empty = HierarchyNode::new_container(vec![]);
        assert_eq!(empty.cost(), 0);
        assert_eq!(empty.depth(), 1);
        assert_eq!(empty.leaf_count(), 0);
    }

    #[test]
    fn given_nested_boxes_when_cost_then_sums_all_leaves() {
        let tree = HierarchyNode::new_container(vec![
            leaf(10),
            leaf(20),
            HierarchyNode::new_container(vec![leaf(30), leaf(40)]),
        ]);
        assert_eq!(tree.cost(), 100);
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn given_container_when_cost_then_equals_sum_of_child_costs() {
        let tree = HierarchyNode::new_container(vec![
            HierarchyNode::new_container(vec![leaf(1), leaf(2)]),
            leaf(3),
            HierarchyNode::new_container(vec![]),
            HierarchyNode::new_container(vec![HierarchyNode::new_container(vec![leaf(4)])]),
        ]);
        let child_sum: i64 = tree.children().iter().map(HierarchyNode::cost).sum();
        assert_eq!(tree.cost(), child_sum);
        assert_eq!(tree.cost(), 10);
    }

    #[test]
    fn given_negative_leaves_when_cost_then_sums_integers() {
        let tree = HierarchyNode::new_container(vec![leaf(5), leaf(-8)]);
        assert_eq!(tree.cost(), -3);
    }

    #[test]
    fn given_sum_beyond_i64_when_cost_then_wraps_without_panic() {
        let tree = HierarchyNode::new_container(vec![leaf(i64::MAX), leaf(1)]);
        assert_eq!(tree.cost(), i64::MIN);

        let back = HierarchyNode::new_container(vec![leaf(i64::MAX), leaf(1), leaf(-1)]);
        assert_eq!(back.cost(), i64::MAX);
    }

    #[test]
    fn given_deep_nesting_when_cost_then_does_not_overflow_stack() {
        let mut node = leaf(1);
        for _ in 0..500 {
            node = HierarchyNode::new_container(vec![node, leaf(1)]);
        }
        assert_eq!(node.cost(), 501);
        assert_eq!(node.depth(), 501);
    }

    #[test]
    fn given_tree_when_iterating_leaves_then_left_to_right_order() {
        let tree = HierarchyNode::new_container(vec![
            HierarchyNode::new_leaf("a", 1),
            HierarchyNode::new_container(vec![
                HierarchyNode::new_leaf("b", 2),
                HierarchyNode::new_leaf("c", 3),
            ]),
            HierarchyNode::new_leaf("d", 4),
        ]);
        let names: Vec<&str> = tree.leaves().map(Leaf::name).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn given_cloned_subtree_attached_twice_when_cost_then_counted_twice() {
        let shared = HierarchyNode::new_container(vec![leaf(7)]);
        let tree = HierarchyNode::new_container(vec![shared.clone(), shared]);
        assert_eq!(tree.cost(), 14);
    }

    #[test]
    fn given_tree_when_cost_called_repeatedly_then_same_result() {
        let tree = HierarchyNode::new_container(vec![leaf(3), leaf(4)]);
        assert_eq!(tree.cost(), tree.cost());
    }

    #[test]
    fn given_labeled_container_when_display_then_shows_label_and_cost() {
        let tree = HierarchyNode::labeled_container("box", vec![leaf(3), leaf(4)]);
        assert_eq!(tree.to_string(), "box (7)");
        assert_eq!(HierarchyNode::new_container(vec![]).to_string(), "(0)");
    }
}
