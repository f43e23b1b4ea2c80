//! The reference scanner: walks objects, their components and their fields.

use std::collections::HashSet;

use tracing::{debug, trace, warn};

use crate::error::{CoreResult, ScanError};
use crate::host::{FieldIntrospector, Hierarchy};
use crate::model::{ComponentHandle, ObjectId};
use crate::result::{FindingReason, ScanResult};

/// Separator used when joining hierarchy names into a full path.
pub const PATH_SEPARATOR: &str = "/";

/// Tunables for a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Report every empty reference field, assigned or not.
    ///
    /// Only meant for hosts that cannot expose `had_assigned_identity`; the
    /// output then includes fields left empty on purpose.
    pub report_empty_references: bool,
}

/// Finds missing components and dangling references in a set of objects.
///
/// A scan is a pure, single-pass read of the hierarchy: it never mutates the
/// objects it visits and keeps no state between calls.
pub struct ReferenceScanner<'a, H: ?Sized, I: ?Sized> {
    hierarchy: &'a H,
    introspector: &'a I,
    options: ScanOptions,
}

impl<'a, H, I> ReferenceScanner<'a, H, I>
where
    H: Hierarchy + ?Sized,
    I: FieldIntrospector<H::Component> + ?Sized,
{
    /// Create a scanner over a hierarchy and the introspector for its components.
    pub fn new(hierarchy: &'a H, introspector: &'a I) -> Self {
        Self {
            hierarchy,
            introspector,
            options: ScanOptions::default(),
        }
    }

    /// Override the scan options.
    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// Scan `roots` in order and return every finding, labelled with `context`.
    ///
    /// Findings are ordered by root, then component, then field.
    pub fn scan(&self, context: &str, roots: &[ObjectId]) -> CoreResult<Vec<ScanResult>> {
        if self.options.report_empty_references {
            warn!(
                context,
                "Reporting all empty references; intentionally empty fields will be flagged"
            );
        }

        let mut results = Vec::new();
        for &root in roots {
            self.scan_object(context, root, &mut results)?;
        }

        debug!(
            context,
            roots = roots.len(),
            findings = results.len(),
            "Scan finished"
        );
        Ok(results)
    }

    fn scan_object(
        &self,
        context: &str,
        id: ObjectId,
        results: &mut Vec<ScanResult>,
    ) -> CoreResult<()> {
        let object_name = self.hierarchy.name(id)?;
        let full_path = self.full_path(id)?;
        trace!(object = %full_path, "Scanning object");

        for component in self.hierarchy.components(id)? {
            let component = match component {
                ComponentHandle::Missing => {
                    debug!(object = %full_path, "Missing component");
                    results.push(ScanResult {
                        object_name: object_name.to_string(),
                        full_path: full_path.clone(),
                        context: context.to_string(),
                        reason: FindingReason::MissingComponent,
                        field_name: String::new(),
                    });
                    continue;
                }
                ComponentHandle::Resolved(component) => component,
            };

            for field in self.introspector.fields(component)? {
                let reason = if field.is_dangling() {
                    FindingReason::DanglingReference
                } else if self.options.report_empty_references && field.is_empty_reference() {
                    FindingReason::EmptyReference
                } else {
                    continue;
                };

                debug!(object = %full_path, field = %field.name, %reason, "Reference finding");
                results.push(ScanResult {
                    object_name: object_name.to_string(),
                    full_path: full_path.clone(),
                    context: context.to_string(),
                    reason,
                    field_name: field.name,
                });
            }
        }

        Ok(())
    }

    /// Reconstruct the path of `id` by walking parent links, root-most first.
    pub fn full_path(&self, id: ObjectId) -> CoreResult<String> {
        let mut segments = Vec::new();
        let mut visited = HashSet::new();
        let mut current = Some(id);

        while let Some(node) = current {
            if !visited.insert(node) {
                return Err(ScanError::CyclicHierarchy { object: id });
            }
            segments.push(self.hierarchy.name(node)?);
            current = self.hierarchy.parent(node)?;
        }

        segments.reverse();
        Ok(segments.join(PATH_SEPARATOR))
    }
}
