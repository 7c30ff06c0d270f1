//! Route objects as sent to the admin API.
//!
//! Mirrors the subset of Caddy's `apps.http.servers.*.routes[]` element this
//! crate produces. Field order follows Caddy's own route type so the emitted
//! JSON reads `match` before `handle`.

use serde::Serialize;

use crate::caddy::codec::ID_FIELD;

/// Transport protocol used towards upstreams.
pub const HTTP_PROTOCOL: &str = "http";

/// Path pattern matching every request path.
pub const ANY_PATH: &str = "/*";

/// A route: matcher sets plus a handler chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Route {
    /// Mutually exclusive group name; only one route of a group runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Matcher sets, OR-ed together.
    #[serde(rename = "match", skip_serializing_if = "Vec::is_empty")]
    pub match_sets: Vec<MatcherSet>,

    /// Handlers executed in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub handle: Vec<Handler>,

    /// Stop evaluating further routes after this one.
    #[serde(skip_serializing_if = "is_false")]
    pub terminal: bool,
}

/// Host and path matchers, AND-ed together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct MatcherSet {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub host: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
}

/// HTTP handler module, tagged by Caddy's `"handler"` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "handler", rename_all = "snake_case")]
pub enum Handler {
    ReverseProxy(ReverseProxy),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReverseProxy {
    pub transport: Transport,
    pub upstreams: Vec<Upstream>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transport {
    pub protocol: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Upstream {
    /// Network address to dial, `host:port`.
    pub dial: String,
}

/// A route stamped with its `@id`, serialized as one object with `@id` first.
#[derive(Debug, Serialize)]
pub struct IdentifiedRoute<'a> {
    #[serde(rename = "@id")]
    pub id: &'a str,

    #[serde(flatten)]
    pub route: &'a Route,
}

impl Route {
    /// Route proxying requests for `hosts` whose path matches `path_pattern`
    /// to `upstreams` over plain HTTP.
    ///
    /// `path_pattern` is usually [`ANY_PATH`].
    pub fn reverse_proxy<H, U>(hosts: H, path_pattern: &str, upstreams: U) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        U: IntoIterator,
        U::Item: Into<String>,
    {
        Self::reverse_proxy_paths(hosts, [path_pattern], upstreams)
    }

    /// Like [`reverse_proxy`](Self::reverse_proxy) with several path patterns.
    pub fn reverse_proxy_paths<H, P, U>(hosts: H, path_patterns: P, upstreams: U) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
        U: IntoIterator,
        U::Item: Into<String>,
    {
        let handler = Handler::ReverseProxy(ReverseProxy {
            transport: Transport {
                protocol: HTTP_PROTOCOL.to_string(),
            },
            upstreams: upstreams
                .into_iter()
                .map(|dial| Upstream { dial: dial.into() })
                .collect(),
        });

        Self {
            match_sets: vec![MatcherSet {
                host: hosts.into_iter().map(Into::into).collect(),
                path: path_patterns.into_iter().map(Into::into).collect(),
            }],
            handle: vec![handler],
            ..Default::default()
        }
    }

    /// Route proxying to a backend on `localhost:<backend_port>`.
    pub fn reverse_proxy_to_port<H>(backend_port: u16, hosts: H, path_pattern: &str) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
    {
        Self::reverse_proxy(hosts, path_pattern, [format!("localhost:{}", backend_port)])
    }

    /// Stamp the route with `id`.
    pub fn with_id<'a>(&'a self, id: &'a str) -> IdentifiedRoute<'a> {
        IdentifiedRoute { id, route: self }
    }
}

impl IdentifiedRoute<'_> {
    /// Compact JSON text with `@id` as the first key.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let json = serde_json::to_string(self)?;
        debug_assert!(json.starts_with(&format!("{{\"{}\":", ID_FIELD)));
        Ok(json)
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
