//! Domain layer: hierarchy grammar, arena trees, and scaffold blueprints
//!
//! This layer is independent of external concerns (no scene host, no I/O).

pub mod arena;
pub mod blueprints;
pub mod builder;
pub mod description;
pub mod error;

pub use arena::{HierarchyArena, HierarchyNode, TreeIterator};
pub use blueprints::{control_color, default_rig_hierarchy, node_type, Rgb, ROOT_PLACEHOLDER};
pub use builder::HierarchyBuilder;
pub use description::{Description, NodeDesc};
pub use error::{DomainError, DomainResult};
