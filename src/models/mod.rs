//! Board domain models.
//!
//! Plain data types for the scheduling board: intervals, operations,
//! tours and pool templates. Invariants that span several records
//! (single ownership, unique ids) live in [`crate::store`].
//!
//! # Domain Mappings
//!
//! | u-tourboard | Logistics | Healthcare |
//! |-------------|-----------|------------|
//! | Tour | Vehicle day | Room day |
//! | Operation | Transport leg / rest | Procedure / break |
//! | Template | Rest block | Cleaning slot |

mod ids;
mod interval;
mod operation;
mod template;
mod tour;

pub use ids::{OperationId, TemplateId, TourId};
pub use interval::TimeInterval;
pub use operation::{
    CarrierType, Location, Operation, OperationDraft, OperationKind, ServiceType, WorkDetail,
};
pub use template::Template;
pub use tour::Tour;
