//! rcompose: composable cost hierarchies and ordered behavior chains.
//!
//! Two independent building blocks live in [`domain`]:
//!
//! - [`HierarchyNode`]: leaves with an intrinsic cost and containers whose
//!   cost is the sum of their children, nested to any depth.
//! - [`BehaviorChain`]: an immutable chain of behaviors grown by
//!   [`BehaviorChain::decorate`]; invoking it runs the behaviors in the order
//!   they were supplied.
//!
//! ```
//! use rcompose::{BehaviorChain, HierarchyNode, Message};
//!
//! let shipment = HierarchyNode::new_container(vec![
//!     HierarchyNode::new_leaf("Item 1", 10),
//!     HierarchyNode::new_leaf("Item 2", 20),
//!     HierarchyNode::new_container(vec![
//!         HierarchyNode::new_leaf("Item 3", 30),
//!         HierarchyNode::new_leaf("Item 4", 40),
//!     ]),
//! ]);
//! assert_eq!(shipment.cost(), 100);
//!
//! let chain = BehaviorChain::new(|m: &Message| println!("email: {m}"))
//!     .decorate(|m: &Message| println!("sms: {m}"));
//! chain.invoke(&Message::new("Hello, User!"));
//! ```
//!
//! The remaining layers (manifest loading, channels, config, CLI) follow the
//! usual split: `domain` -> `application` -> `infrastructure` -> `cli`.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{Behavior, BehaviorChain, HierarchyNode, Message};
