//! Host enumeration collaborator.
//!
//! A host decides which objects make up a scan context; the operations layer
//! only picks which enumeration to ask for.

use refscan_core::{FieldIntrospector, Hierarchy, HostError, ObjectId};

/// Context label used for project-wide asset scans.
pub const PROJECT_CONTEXT: &str = "Project";

/// Objects selected by the host for one scan context.
#[derive(Debug)]
pub struct Enumeration<'a, G: ?Sized> {
    /// Label copied into every finding of this context.
    pub label: String,
    /// Hierarchy the roots live in.
    pub graph: &'a G,
    /// Objects to scan, in scan order.
    pub roots: Vec<ObjectId>,
}

impl<'a, G: ?Sized> Enumeration<'a, G> {
    /// Create an enumeration.
    pub fn new(label: impl Into<String>, graph: &'a G, roots: Vec<ObjectId>) -> Self {
        Self {
            label: label.into(),
            graph,
            roots,
        }
    }
}

/// Supplies the objects of each scan context.
///
/// Returned sequences must be finite, and the objects must stay valid and
/// unmodified while a scan runs.
pub trait HostEnumerator {
    /// Hierarchy type the host exposes.
    type Graph: Hierarchy + ?Sized;

    /// Introspector for the hierarchy's components.
    type Introspector: FieldIntrospector<<Self::Graph as Hierarchy>::Component> + ?Sized;

    /// Field introspection collaborator.
    fn introspector(&self) -> &Self::Introspector;

    /// Every live object of the context currently open in the host.
    fn active_context(&self) -> Result<Enumeration<'_, Self::Graph>, HostError>;

    /// Every context the host knows about, in host order.
    fn all_contexts(&self) -> Result<Vec<Enumeration<'_, Self::Graph>>, HostError>;

    /// Project assets whose path starts with `path_prefix`.
    fn assets(&self, path_prefix: &str) -> Result<Enumeration<'_, Self::Graph>, HostError>;
}
