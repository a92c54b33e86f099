//! Application layer: scaffold services over the scene-host boundary

pub mod error;
pub mod scaffold;

pub use error::{ApplicationError, ApplicationResult};
pub use scaffold::{RigControls, ScaffoldService};
