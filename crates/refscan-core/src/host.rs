//! Collaborator interfaces the scanner consumes.
//!
//! A host environment (an editor, an asset database, a snapshot on disk)
//! implements these traits; the scanner never references a concrete host.

use crate::error::CoreResult;
use crate::model::{ComponentHandle, FieldDescriptor, ObjectId};

/// Read-only view of an object hierarchy.
///
/// Implementations must not load additional resources while answering these
/// queries, and the graph must not change for the duration of a scan.
pub trait Hierarchy {
    /// Host component type carried by resolved component slots.
    type Component;

    /// Display name of an object.
    fn name(&self, id: ObjectId) -> CoreResult<&str>;

    /// Parent of an object, `None` at the top of the hierarchy.
    fn parent(&self, id: ObjectId) -> CoreResult<Option<ObjectId>>;

    /// Component slots of an object in attachment order.
    fn components(&self, id: ObjectId) -> CoreResult<&[ComponentHandle<Self::Component>]>;
}

/// Produces the uniform field view of a resolved component.
///
/// Reference fields must report `had_assigned_identity` faithfully; a host
/// that cannot tell "never assigned" from "assigned then lost" should report
/// `false` and let callers opt into
/// [`ScanOptions::report_empty_references`](crate::ScanOptions).
pub trait FieldIntrospector<C: ?Sized> {
    /// Fields of `component` in declaration order.
    fn fields(&self, component: &C) -> CoreResult<Vec<FieldDescriptor>>;
}

impl<C: ?Sized, F> FieldIntrospector<C> for F
where
    F: Fn(&C) -> CoreResult<Vec<FieldDescriptor>>,
{
    fn fields(&self, component: &C) -> CoreResult<Vec<FieldDescriptor>> {
        self(component)
    }
}
