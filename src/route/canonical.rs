//! Structural comparison of route documents.
//!
//! # Responsibilities
//! - Decode a route JSON document into the fields that matter for equality
//! - Decide whether two documents describe the same route
//!
//! # Design Decisions
//! - Caddy re-serializes routes with its own key order and whitespace, so
//!   raw text comparison alone would report drift on every pass
//! - Missing fields decode as empty, unknown fields are ignored
//! - List order is significant (declared host/path/upstream order is kept)
//! - A document that fails to decode never compares equal

use serde::Deserialize;

/// Comparable projection of a route object.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct CanonicalRoute {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "match")]
    pub match_sets: Vec<CanonicalMatch>,

    pub handle: Vec<CanonicalHandler>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct CanonicalMatch {
    pub host: Vec<String>,
    pub path: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct CanonicalHandler {
    pub handler: String,
    pub transport: CanonicalTransport,
    pub upstreams: Vec<CanonicalUpstream>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct CanonicalTransport {
    pub protocol: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct CanonicalUpstream {
    pub dial: String,
}

impl CanonicalRoute {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// True when both documents describe the same route.
pub fn routes_equal(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }

    match (CanonicalRoute::from_json(a), CanonicalRoute::from_json(b)) {
        (Ok(left), Ok(right)) => left == right,
        (Err(e), _) | (_, Err(e)) => {
            tracing::debug!(error = %e, "Route document did not decode, treating as different");
            false
        }
    }
}
