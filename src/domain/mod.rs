//! Domain layer: hierarchies, behavior chains and manifest building
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod chain;
pub mod display;
pub mod entities;
pub mod error;
pub mod hierarchy;

pub use arena::{HierarchyArena, NodeData};
pub use builder::HierarchyBuilder;
pub use chain::{Behavior, BehaviorChain, Message};
pub use display::TreeDisplay;
pub use entities::*;
pub use error::DomainError;
pub use hierarchy::{Container, HierarchyNode, Leaf};
