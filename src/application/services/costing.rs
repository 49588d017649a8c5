//! Cost aggregation service
//!
//! Loads a hierarchy manifest and reports the total cost of every hierarchy in it.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{HierarchyBuilder, HierarchyNode, Manifest, TreeDisplay};
use crate::infrastructure::traits::FileSystem;

/// Cost summary of one root hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyCost {
    pub name: String,
    pub total: i64,
    pub leaves: usize,
    pub depth: usize,
}

/// Result of costing a manifest.
#[derive(Debug, Clone)]
pub struct CostReport {
    /// One hierarchy per root entry, in manifest order
    pub hierarchies: Vec<HierarchyNode>,
}

impl CostReport {
    pub fn totals(&self) -> Vec<HierarchyCost> {
        self.hierarchies
            .iter()
            .map(|node| HierarchyCost {
                name: node.name().unwrap_or("<box>").to_string(),
                total: node.cost(),
                leaves: node.leaf_count(),
                depth: node.depth(),
            })
            .collect()
    }

    /// Sum over all hierarchies, wrapping on overflow like [`HierarchyNode::cost`].
    pub fn grand_total(&self) -> i64 {
        self.hierarchies
            .iter()
            .fold(0i64, |total, node| total.wrapping_add(node.cost()))
    }

    /// Text tree of every hierarchy.
    pub fn render_trees(&self) -> Vec<String> {
        self.hierarchies
            .iter()
            .map(|node| node.to_tree_string().to_string())
            .collect()
    }
}

/// Service for costing hierarchy manifests.
pub struct CostService {
    fs: Arc<dyn FileSystem>,
}

impl CostService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Read and parse a manifest file.
    pub fn load_manifest(&self, path: &Path) -> ApplicationResult<Manifest> {
        if !self.fs.exists(path) || !self.fs.is_file(path) {
            return Err(ApplicationError::ManifestNotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read manifest", path)?;
        Ok(Manifest::parse(&content)?)
    }

    /// Build every hierarchy of the manifest at `path`.
    #[instrument(level = "debug", skip(self))]
    pub fn report(&self, path: &Path) -> ApplicationResult<CostReport> {
        let manifest = self.load_manifest(path)?;
        let report = self.report_manifest(&manifest)?;
        debug!(
            "report: {} hierarchies, grand total {}",
            report.hierarchies.len(),
            report.grand_total()
        );
        Ok(report)
    }

    pub fn report_manifest(&self, manifest: &Manifest) -> ApplicationResult<CostReport> {
        let hierarchies = HierarchyBuilder::new().build(manifest)?;
        Ok(CostReport { hierarchies })
    }
}
