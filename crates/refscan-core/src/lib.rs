//! Core domain types and the reference scanner.
//!
//! The scanner walks a host-supplied set of objects, enumerates each object's
//! components and their fields, and reports:
//!
//! - components whose backing type can no longer be resolved, and
//! - reference fields that were assigned an object which has since vanished.
//!
//! Reference fields that were simply never assigned are not defects and are
//! skipped unless [`ScanOptions::report_empty_references`] is set.
//!
//! ```rust
//! use refscan_core::{
//!     ComponentData, ComponentHandle, FieldDescriptor, ObjectGraph, RecordedFields, ReferenceScanner,
//! };
//!
//! let mut graph = ObjectGraph::new();
//! let player = graph.insert("Player", None).unwrap();
//! graph.attach(
//!     player,
//!     ComponentHandle::Resolved(
//!         ComponentData::new("Loadout").with_field(FieldDescriptor::dangling_reference("weapon")),
//!     ),
//! );
//!
//! let results = ReferenceScanner::new(&graph, &RecordedFields)
//!     .scan("Main", &graph.walk())
//!     .unwrap();
//! assert_eq!(results[0].field_name, "weapon");
//! ```

mod error;
mod host;
mod model;
mod result;
mod scanner;

#[cfg(test)]
mod test_fixtures;

pub use error::{CoreResult, GraphError, HostError, ScanError};
pub use host::{FieldIntrospector, Hierarchy};
pub use model::{
    ComponentData, ComponentHandle, FieldDescriptor, FieldKind, ObjectGraph, ObjectId,
    RecordedFields, SceneObject,
};
pub use result::{FindingReason, Navigator, ScanResult, ScanSummary};
pub use scanner::{ReferenceScanner, ScanOptions, PATH_SEPARATOR};
