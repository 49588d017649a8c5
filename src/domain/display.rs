/*
Rendering of hierarchies as text trees, one line per node annotated with its cost.
 */
use termtree::Tree;
use tracing::instrument;

use crate::domain::hierarchy::HierarchyNode;

pub trait TreeDisplay {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeDisplay for HierarchyNode {
    #[instrument(level = "trace", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        let label = match self {
            HierarchyNode::Leaf(leaf) => format!("{}: {}", leaf.name(), leaf.cost()),
            HierarchyNode::Container(container) => format!(
                "{} [{}]",
                container.label().unwrap_or("<box>"),
                self.cost()
            ),
        };

        let leaves: Vec<_> = self
            .children()
            .iter()
            .map(|child| child.to_tree_string())
            .collect();

        Tree::new(label).with_leaves(leaves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_nested_tree_when_rendered_then_lists_costs() {
        let tree = HierarchyNode::labeled_container(
            "shipment",
            vec![
                HierarchyNode::new_leaf("Item 1", 10),
                HierarchyNode::new_container(vec![HierarchyNode::new_leaf("Item 2", 20)]),
            ],
        );

        let rendered = tree.to_tree_string().to_string();

        assert!(rendered.starts_with("shipment [30]\n"));
        assert!(rendered.contains("Item 1: 10"));
        assert!(rendered.contains("<box> [20]"));
        assert!(rendered.contains("Item 2: 20"));
        assert_eq!(rendered.lines().count(), 4);
    }
}
