//! Route reconciliation against the live configuration.
//!
//! # Responsibilities
//! - Converge one `@id` to a desired route definition
//! - Skip all mutation when the server already holds an equal route
//! - Replace drifted routes by delete-then-append, never leaving duplicates
//!
//! # Design Decisions
//! - Single pass, no state kept between calls; every call is idempotent
//! - NotFound on the probe means "absent", not failure
//! - Failures of the cleanup delete are logged and swallowed; the final
//!   append decides the result
//! - Calls for the same id are serialized by a per-id async mutex;
//!   different ids never wait on each other

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::caddy::{AdminClient, AdminResult};
use crate::route::canonical::routes_equal;
use crate::route::model::Route;

/// What a reconciliation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The server already held an equal route.
    Unchanged,
    /// No route had the id; it was appended.
    Created,
    /// A different route had the id; it was deleted and the new one appended.
    Replaced,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Unchanged => "unchanged",
            Outcome::Created => "created",
            Outcome::Replaced => "replaced",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keeps routes in a Caddy configuration in sync with desired definitions.
pub struct Reconciler {
    client: AdminClient,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl Reconciler {
    pub fn new(client: AdminClient) -> Self {
        Self {
            client,
            locks: DashMap::new(),
        }
    }

    /// The admin client used for every call.
    pub fn client(&self) -> &AdminClient {
        &self.client
    }

    /// Make the route marked `"@id": route_id` under `server_key` equal to `route`.
    ///
    /// A good candidate for `route_id` is the primary host name. `server_key`
    /// is the name of the `apps.http.servers` entry holding the route list.
    pub async fn reconcile(&self, server_key: &str, route_id: &str, route: &Route) -> AdminResult<Outcome> {
        let desired = route.with_id(route_id).to_json()?;

        let lock = self.lock_for(route_id);
        let _guard = lock.lock().await;

        let current = match self.client.config_by_id(route_id).await {
            Ok(current) => Some(current),
            Err(e) if e.is_not_found() => None,
            Err(e) => return Err(e),
        };

        if let Some(current) = &current {
            if routes_equal(&desired, current) {
                tracing::debug!(route_id = %route_id, "Route already up to date");
                return Ok(Outcome::Unchanged);
            }

            if let Err(e) = self.client.delete_by_id(route_id).await {
                tracing::warn!(route_id = %route_id, error = %e, "Failed to delete stale route, appending anyway");
            }
        }

        self.client.append_route(server_key, &desired).await?;

        let outcome = if current.is_some() {
            Outcome::Replaced
        } else {
            Outcome::Created
        };
        tracing::info!(
            route_id = %route_id,
            server_key = %server_key,
            outcome = %outcome,
            "Route reconciled"
        );
        Ok(outcome)
    }

    fn lock_for(&self, route_id: &str) -> Arc<Mutex<()>> {
        self.locks.entry(route_id.to_string()).or_default().clone()
    }
}
