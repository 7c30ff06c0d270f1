//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields (route_id, server_key, outcome, error)
//!
//! Consumers:
//!     → logging.rs installs a fmt subscriber writing to stdout
//! ```
//!
//! # Design Decisions
//! - Structured fields instead of formatted messages where values matter
//! - Probes log at debug, mutations at info, swallowed failures at warn

pub mod logging;
