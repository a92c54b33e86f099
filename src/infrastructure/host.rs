//! Scene-host boundary trait
//!
//! Abstracts the external 3D application that owns all persistent
//! scene-graph state, allowing services to be tested with mock
//! implementations.

use thiserror::Error;

use crate::domain::Rgb;

/// Opaque reference to a scene-host-owned object.
///
/// Valid only as long as the host has not deleted the underlying object;
/// operations on a deleted object's handle fail with
/// [`HostError::InvalidHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(u64);

impl NodeHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Failures surfaced by the scene host. Non-retryable: they represent
/// environment errors that must reach the caller.
#[derive(Error, Debug)]
pub enum HostError {
    #[error("node name already in use: {0}")]
    DuplicateName(String),

    #[error("invalid handle: object was deleted")]
    InvalidHandle,

    #[error("unknown node type: {0}")]
    UnknownNodeType(String),

    #[error("host rejected operation: {0}")]
    Rejected(String),
}

/// A plain attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// Declaration of a user attribute added to a node.
#[derive(Debug, Clone, PartialEq)]
pub struct AttrSpec {
    pub name: String,
    pub kind: AttrKind,
    pub keyable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttrKind {
    Double { default: f64, min: Option<f64> },
    Enum { fields: Vec<String> },
}

impl AttrSpec {
    pub fn double(name: impl Into<String>, default: f64, min: Option<f64>) -> Self {
        Self {
            name: name.into(),
            kind: AttrKind::Double { default, min },
            keyable: true,
        }
    }

    pub fn enumeration(name: impl Into<String>, fields: &[&str]) -> Self {
        Self {
            name: name.into(),
            kind: AttrKind::Enum {
                fields: fields.iter().map(|f| f.to_string()).collect(),
            },
            keyable: false,
        }
    }
}

/// Capability set of the external scene host.
///
/// All host interactions are blocking and atomic from the caller's
/// perspective: either the operation completed or an error is returned,
/// never a visible partial state.
pub trait SceneHost {
    /// Creates a named organizational (group/null) node.
    fn create_group(&mut self, name: &str) -> Result<NodeHandle, HostError>;

    /// Creates a utility node of the given host node type.
    fn create_node(&mut self, node_type: &str, name: &str) -> Result<NodeHandle, HostError>;

    /// Parents `child` under `parent`.
    fn set_parent(&mut self, child: NodeHandle, parent: NodeHandle) -> Result<(), HostError>;

    /// Renames a node in place.
    fn rename(&mut self, node: NodeHandle, name: &str) -> Result<(), HostError>;

    /// Connects `src.src_attr` into `dst.dst_attr`.
    fn connect_attr(
        &mut self,
        src: NodeHandle,
        src_attr: &str,
        dst: NodeHandle,
        dst_attr: &str,
    ) -> Result<(), HostError>;

    /// Sets an existing attribute.
    fn set_attr(&mut self, node: NodeHandle, attr: &str, value: AttrValue)
        -> Result<(), HostError>;

    /// Adds a user attribute.
    fn add_attr(&mut self, node: NodeHandle, spec: &AttrSpec) -> Result<(), HostError>;

    /// Locks an attribute against edits, optionally hiding it from the
    /// channel box.
    fn lock_attr(&mut self, node: NodeHandle, attr: &str, hide: bool) -> Result<(), HostError>;

    /// Sets the display override color of a node.
    fn set_color(&mut self, node: NodeHandle, color: Rgb) -> Result<(), HostError>;

    /// Opens an undo chunk. Chunks may nest; only the outermost one is a
    /// rollback boundary.
    fn begin_undo_chunk(&mut self);

    /// Closes the current undo chunk.
    fn end_undo_chunk(&mut self);

    /// Reverts everything recorded in the most recently closed chunk.
    fn undo_last_chunk(&mut self);
}

/// Runs `f` inside one undo chunk.
///
/// The chunk is closed on every exit path; when `f` fails the chunk is
/// undone before the error propagates, so a failure partway through an
/// N-step build leaves no half-built scaffold behind.
pub fn with_undo_chunk<H, T, E>(
    host: &mut H,
    f: impl FnOnce(&mut H) -> Result<T, E>,
) -> Result<T, E>
where
    H: SceneHost + ?Sized,
{
    host.begin_undo_chunk();
    let result = f(host);
    host.end_undo_chunk();
    if result.is_err() {
        host.undo_last_chunk();
    }
    result
}
