//! Hierarchy builder: turns a flat manifest into owned hierarchies.

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument};

use crate::domain::arena::{HierarchyArena, NodeData};
use crate::domain::entities::Manifest;
use crate::domain::error::DomainError;
use crate::domain::hierarchy::HierarchyNode;

/// Result type for hierarchy building.
pub type TreeResult<T> = Result<T, DomainError>;

/// Builds one [`HierarchyNode`] per root entry of a [`Manifest`].
///
/// Children keep manifest order. Every entry must be reachable from exactly
/// one root; anything else is reported as an error instead of producing a
/// tree with shared or cyclic nodes.
#[derive(Debug, Default)]
pub struct HierarchyBuilder {
    /// Parent name -> indices of child entries, in manifest order
    relationship_cache: HashMap<String, Vec<usize>>,
    visited_names: HashSet<String>,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(level = "debug", skip(self, manifest), fields(entries = manifest.entries.len()))]
    pub fn build(&mut self, manifest: &Manifest) -> TreeResult<Vec<HierarchyNode>> {
        if manifest.entries.is_empty() {
            return Err(DomainError::EmptyManifest);
        }

        // Reset state for fresh build
        self.relationship_cache.clear();
        self.visited_names.clear();

        self.index_relationships(manifest)?;

        let roots: Vec<usize> = manifest
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.parent.is_none())
            .map(|(i, _)| i)
            .collect();
        debug!("found {} root entries", roots.len());

        let mut arenas = Vec::with_capacity(roots.len());
        for root in roots {
            arenas.push(self.build_arena(manifest, root)?);
        }

        // Entries never reached from a root can only hang off each other
        if let Some(orphan) = manifest
            .entries
            .iter()
            .find(|entry| !self.visited_names.contains(&entry.name))
        {
            return Err(DomainError::CycleDetected(orphan.name.clone()));
        }

        arenas
            .into_iter()
            .map(|arena| {
                arena
                    .into_hierarchy()
                    .ok_or_else(|| DomainError::InvalidManifest {
                        message: "staged hierarchy has no root".to_string(),
                    })
            })
            .collect()
    }

    fn index_relationships(&mut self, manifest: &Manifest) -> TreeResult<()> {
        let mut by_name = HashMap::with_capacity(manifest.entries.len());
        for entry in &manifest.entries {
            if by_name.insert(entry.name.as_str(), entry).is_some() {
                return Err(DomainError::DuplicateName(entry.name.clone()));
            }
        }

        for (i, entry) in manifest.entries.iter().enumerate() {
            let Some(parent_name) = &entry.parent else {
                continue;
            };
            let parent = by_name
                .get(parent_name.as_str())
                .ok_or_else(|| DomainError::UnknownParent {
                    child: entry.name.clone(),
                    parent: parent_name.clone(),
                })?;
            if !parent.is_container() {
                return Err(DomainError::LeafAsParent {
                    child: entry.name.clone(),
                    parent: parent_name.clone(),
                });
            }
            self.relationship_cache
                .entry(parent_name.clone())
                .or_default()
                .push(i);
        }
        Ok(())
    }

    fn build_arena(&mut self, manifest: &Manifest, root: usize) -> TreeResult<HierarchyArena> {
        let mut tree = HierarchyArena::new();
        let mut stack = vec![(root, None)];

        while let Some((current, parent_idx)) = stack.pop() {
            let entry = &manifest.entries[current];

            if !self.visited_names.insert(entry.name.clone()) {
                return Err(DomainError::CycleDetected(entry.name.clone()));
            }

            let node_data = NodeData {
                name: entry.name.clone(),
                cost: entry.cost,
            };
            let current_idx = tree.insert_node(node_data, parent_idx);

            // Reverse so the first child is popped, and attached, first
            if let Some(children) = self.relationship_cache.get(&entry.name) {
                for &child in children.iter().rev() {
                    stack.push((child, Some(current_idx)));
                }
            }
        }

        Ok(tree)
    }
}
