//! Caddy admin API access.
//!
//! # Data Flow
//! ```text
//! AdminClient (client.rs)
//!     GET    /config[/...]      → configuration document
//!     GET    /id/{id}           → object or NotFound
//!     DELETE /id/{id}           → ok or NotFound
//!     POST   /config/apps/http/servers/{key}/routes → append route
//!     POST   /load              ← base skeleton (base.rs)
//! ```
//!
//! # Design Decisions
//! - Documents are passed around as JSON text; only route fragments are parsed
//! - "unknown object ID" is a typed error, distinguishable from transport failures
//! - Identifier escaping lives in codec.rs and is shared by every JSON producer

pub mod base;
pub mod client;
pub mod codec;
pub mod error;

pub use base::base_config;
pub use client::{AdminClient, DEFAULT_ADMIN_URL};
pub use error::{AdminError, AdminResult};
