//! Headless tour-scheduling board engine.
//!
//! Holds tours and their timed operations, maps pointer positions on a
//! tour's timeline to snapped instants, and resolves drag-and-drop
//! gestures into atomic reschedule and reassignment commands. Rendering
//! and input capture live in the caller; this crate owns the state and
//! the placement rules.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Tour`, `Operation`, `Template`, `TimeInterval`, ids
//! - **`geometry`**: Position/time conversion and snapping on a `Timeline`
//! - **`store`**: Tours, operations, and single ownership
//! - **`drag`**: Drag session lifecycle
//! - **`placement`**: Drop resolution and rest-block normalization
//! - **`pool`**: Unassigned templates and id minting
//! - **`board`**: The `Board` facade tying the above together
//! - **`seed`** / **`validation`**: JSON seed input and its integrity checks
//! - **`config`** / **`error`**: Board configuration and the error type
//!
//! # Invariants
//!
//! - Every operation has `start < end`.
//! - Every operation is owned by exactly one tour.
//! - A failed drop leaves the board unchanged.
//! - A template is either in the pool or materialized, never both.

pub mod board;
pub mod config;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod models;
pub mod placement;
pub mod pool;
pub mod seed;
pub mod store;
pub mod validation;

pub use board::Board;
pub use config::{BoardConfig, MovePolicy, SnapGranularity, TimelineSpan};
pub use drag::{DragSession, GrabPoint};
pub use error::{BoardError, RejectReason, Result};
pub use placement::{DropPlan, RestPlacement};
pub use pool::Materialized;
