//! Route definitions and reconciliation.
//!
//! # Data Flow
//! ```text
//! Route (model.rs)
//!     → stamped with @id, serialized
//!     → reconciler.rs fetches current object by @id
//!     → canonical.rs compares desired vs current
//!     → equal: done | different: delete + append | absent: append
//! ```
//!
//! # Design Decisions
//! - The wire route and the comparison model are separate types; the wire
//!   route may carry fields the comparison ignores
//! - Only reverse-proxy handlers are modelled

pub mod canonical;
pub mod model;
pub mod reconciler;

pub use canonical::{routes_equal, CanonicalRoute};
pub use model::{Route, ANY_PATH};
pub use reconciler::{Outcome, Reconciler};
