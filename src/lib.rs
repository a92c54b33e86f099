//! rigscaffold: rig-scaffold automation for an external 3D scene host.
//!
//! Parses nested literal descriptions of a rig's organizational hierarchy
//! into arena-backed trees, and realizes them as group/null nodes in a
//! scene host through the [`SceneHost`] boundary trait, including the
//! stock simple-rig wiring. Every host build is wrapped in a single
//! undoable chunk.
//!
//! Layers:
//! - [`domain`]: description grammar, arena trees, blueprints (no I/O)
//! - [`application`]: scaffold services driving the host boundary
//! - [`infrastructure`]: the [`SceneHost`] trait and the in-memory mock
//!
//! ```
//! use rigscaffold::domain::{Description, HierarchyBuilder};
//! use serde_json::json;
//!
//! let desc = Description::parse(&json!(["ROOT", ["A", ["B", "C"]]])).unwrap();
//! let trees = HierarchyBuilder::new().build_object_tree(&desc).unwrap();
//! let root = trees[0].root().unwrap();
//! assert_eq!(trees[0].leaf_nodes(), ["B", "C"]);
//! assert!(trees[0].get_child_by_name(root, "A").is_some());
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;

pub use application::{ApplicationError, ApplicationResult, RigControls, ScaffoldService};
pub use domain::{
    Description, DomainError, DomainResult, HierarchyArena, HierarchyBuilder, NodeDesc,
};
pub use infrastructure::{HostError, MockScene, NodeHandle, SceneHost};
