//! Periodic route refresh.
//!
//! # Responsibilities
//! - Seed the server with the base configuration on request
//! - Reconcile every configured route, one after another
//! - Repeat on a fixed interval until shutdown

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{self, MissedTickBehavior};

use crate::caddy::{base_config, AdminClient, AdminResult};
use crate::config::{RouteSpec, SyncConfig};
use crate::route::{Outcome, Reconciler};

/// Result of one pass over all routes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub unchanged: usize,
    pub created: usize,
    pub replaced: usize,
    /// Ids whose reconciliation failed.
    pub failed: Vec<String>,
}

impl SyncReport {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Unchanged => self.unchanged += 1,
            Outcome::Created => self.created += 1,
            Outcome::Replaced => self.replaced += 1,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Drives reconciliation of a fixed set of routes.
pub struct RouteSync {
    reconciler: Arc<Reconciler>,
    server_key: String,
    routes: Vec<RouteSpec>,
}

impl RouteSync {
    pub fn new(reconciler: Arc<Reconciler>, server_key: impl Into<String>, routes: Vec<RouteSpec>) -> Self {
        Self {
            reconciler,
            server_key: server_key.into(),
            routes,
        }
    }

    /// Build the client, reconciler and route list from a validated config.
    pub fn from_config(config: &SyncConfig) -> AdminResult<Self> {
        let client = AdminClient::from_config(&config.admin)?;
        Ok(Self::new(
            Arc::new(Reconciler::new(client)),
            config.server.key.clone(),
            config.routes.clone(),
        ))
    }

    pub fn reconciler(&self) -> &Arc<Reconciler> {
        &self.reconciler
    }

    /// Replace the server's configuration with the base skeleton.
    ///
    /// With `bootstrap_url` the skeleton is loaded there; its `admin.listen`
    /// then points the server at the client's own admin address.
    pub async fn seed(&self, bootstrap_url: Option<&str>, listen_port: u16) -> AdminResult<()> {
        let client = self.reconciler.client();
        let base = base_config(&client.listen_address(), &self.server_key, listen_port);

        match bootstrap_url {
            Some(url) => client.load_to(url, &base).await?,
            None => client.load(&base).await?,
        }
        tracing::info!(server_key = %self.server_key, "Base configuration loaded");
        Ok(())
    }

    /// Reconcile every route once.
    pub async fn sync_all(&self) -> SyncReport {
        let mut report = SyncReport::default();

        for spec in &self.routes {
            let route = spec.to_route();
            match self.reconciler.reconcile(&self.server_key, &spec.id, &route).await {
                Ok(outcome) => report.record(outcome),
                Err(e) => {
                    tracing::warn!(route_id = %spec.id, error = %e, "Route reconciliation failed");
                    report.failed.push(spec.id.clone());
                }
            }
        }

        tracing::debug!(
            unchanged = report.unchanged,
            created = report.created,
            replaced = report.replaced,
            failed = report.failed.len(),
            "Sync pass finished"
        );
        report
    }

    /// Run a pass immediately, then every `interval`, until shutdown.
    ///
    /// Passes run on this task only, so they never overlap.
    pub async fn run(self, interval: Duration, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            interval_secs = interval.as_secs(),
            routes = self.routes.len(),
            "Route sync starting"
        );

        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.sync_all().await;
                }
                _ = shutdown.recv() => {
                    tracing::info!("Route sync received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
