//! Caddy route reconciliation client.
//!
//! Keeps routes addressed by `@id` in a live Caddy configuration equal to
//! desired definitions, through the admin HTTP API.

pub mod caddy;
pub mod config;
pub mod observability;
pub mod route;
pub mod sync;

pub use caddy::{AdminClient, AdminError};
pub use config::SyncConfig;
pub use route::{Outcome, Reconciler, Route};
pub use sync::RouteSync;
