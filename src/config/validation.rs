//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Route ids are non-empty and unique
//! - Every route has hosts and `host:port` upstreams
//! - Value ranges (interval and timeout > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SyncConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::SyncConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("server key must not be empty")]
    EmptyServerKey,

    #[error("admin timeout must be greater than zero")]
    ZeroTimeout,

    #[error("refresh interval must be greater than zero")]
    ZeroInterval,

    #[error("route #{0} has an empty id")]
    EmptyRouteId(usize),

    #[error("route id '{0}' is used more than once")]
    DuplicateRouteId(String),

    #[error("route '{0}' has no hosts")]
    NoHosts(String),

    #[error("route '{0}' has no upstreams")]
    NoUpstreams(String),

    #[error("route '{route}' has invalid upstream '{dial}', expected host:port")]
    InvalidUpstream { route: String, dial: String },
}

/// Validate `config`, collecting every problem found.
pub fn validate_config(config: &SyncConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.key.is_empty() {
        errors.push(ValidationError::EmptyServerKey);
    }
    if config.admin.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.refresh.enabled && config.refresh.interval_secs == 0 {
        errors.push(ValidationError::ZeroInterval);
    }

    let mut seen = HashSet::new();
    for (index, route) in config.routes.iter().enumerate() {
        if route.id.is_empty() {
            errors.push(ValidationError::EmptyRouteId(index));
        } else if !seen.insert(route.id.as_str()) {
            errors.push(ValidationError::DuplicateRouteId(route.id.clone()));
        }

        if route.hosts.is_empty() {
            errors.push(ValidationError::NoHosts(route.id.clone()));
        }
        if route.upstreams.is_empty() {
            errors.push(ValidationError::NoUpstreams(route.id.clone()));
        }
        for dial in &route.upstreams {
            if !is_host_port(dial) {
                errors.push(ValidationError::InvalidUpstream {
                    route: route.id.clone(),
                    dial: dial.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_host_port(dial: &str) -> bool {
    match dial.rsplit_once(':') {
        Some((host, port)) => !host.is_empty() && port.parse::<u16>().is_ok(),
        None => false,
    }
}
