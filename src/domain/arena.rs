//! Arena-backed staging tree used while assembling a hierarchy from a manifest.

use std::collections::HashMap;
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::hierarchy::HierarchyNode;

/// Data payload for staged nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub name: String,
    /// Intrinsic cost, None for containers
    pub cost: Option<i64>,
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cost {
            Some(cost) => write!(f, "{}: {}", self.name, cost),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Staged node in the arena.
#[derive(Debug)]
pub struct ArenaNode {
    pub data: NodeData,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in insertion order
    pub children: Vec<Index>,
}

/// One staged hierarchy. Nodes refer to each other by generational index, so
/// parent links never form ownership cycles.
#[derive(Debug)]
pub struct HierarchyArena {
    arena: Arena<ArenaNode>,
    root: Option<Index>,
}

impl Default for HierarchyArena {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchyArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, data: NodeData, parent: Option<Index>) -> Index {
        let node = ArenaNode {
            data,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&ArenaNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// Convert into an owned hierarchy, building children before parents.
    ///
    /// Returns None for an empty arena.
    #[instrument(level = "debug", skip(self))]
    pub fn into_hierarchy(self) -> Option<HierarchyNode> {
        let root = self.root?;
        let order: Vec<Index> = self.iter_postorder().map(|(idx, _)| idx).collect();
        let mut built: HashMap<Index, HierarchyNode> = HashMap::with_capacity(order.len());

        for idx in order {
            let Some(node) = self.arena.get(idx) else {
                continue;
            };
            let hierarchy = match node.data.cost {
                Some(cost) => HierarchyNode::new_leaf(node.data.name.clone(), cost),
                None => {
                    let children = node
                        .children
                        .iter()
                        .filter_map(|child| built.remove(child))
                        .collect();
                    HierarchyNode::labeled_container(node.data.name.clone(), children)
                }
            };
            built.insert(idx, hierarchy);
        }

        built.remove(&root)
    }
}

pub struct PostOrderIterator<'a> {
    arena: &'a HierarchyArena,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(arena: &'a HierarchyArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push((root, false));
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a ArenaNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
