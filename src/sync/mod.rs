//! Route sync driver.
//!
//! # Data Flow
//! ```text
//! SyncConfig.routes
//!     → driver.rs (one task, fixed interval)
//!     → Reconciler::reconcile per route
//!     → SyncReport (unchanged / created / replaced / failed)
//! ```
//!
//! # Design Decisions
//! - A failed route does not stop the pass; it is reported and retried next tick
//! - Shutdown via broadcast channel, checked between passes

pub mod driver;

pub use driver::{RouteSync, SyncReport};
