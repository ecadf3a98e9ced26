//! Operation templates.
//!
//! A template is a prototype operation (usually a rest block) waiting in
//! the unassigned pool. It has no interval of its own: placing it decides
//! the window.

use serde::{Deserialize, Serialize};

use super::{OperationKind, TemplateId};

/// An unassigned operation prototype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Pool identifier.
    pub id: TemplateId,
    /// Kind of operation the template materializes into.
    pub kind: OperationKind,
}

impl Template {
    /// Creates a template.
    pub fn new(id: impl Into<TemplateId>, kind: OperationKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    /// Creates a rest template.
    pub fn rest(id: impl Into<TemplateId>) -> Self {
        Self::new(id, OperationKind::Rest)
    }
}
