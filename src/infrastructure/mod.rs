//! Infrastructure layer: the scene-host boundary
//!
//! The trait abstracts the external 3D application; services depend on it,
//! tests run against the in-memory mock.

pub mod host;
pub mod mock;

pub use host::{
    with_undo_chunk, AttrKind, AttrSpec, AttrValue, HostError, NodeHandle, SceneHost,
};
pub use mock::MockScene;
