//! Admin API client.
//!
//! # Responsibilities
//! - Fetch the full or a scoped configuration document
//! - Fetch and delete objects addressed by `@id`
//! - Append route objects to a server's route list
//! - Replace the whole configuration via `/load`
//!
//! # Design Decisions
//! - One HTTP round trip per operation, no retries
//! - "unknown object ID" responses become `AdminError::NotFound`
//! - Path segments are percent-escaped by the `url` crate

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode};
use url::Url;

use crate::caddy::error::{AdminError, AdminResult, ErrorPayload};
use crate::config::AdminConfig;

/// Admin endpoint of a freshly started Caddy.
pub const DEFAULT_ADMIN_URL: &str = "http://localhost:2019";

/// Client for one Caddy admin endpoint.
#[derive(Debug, Clone)]
pub struct AdminClient {
    client: Client,
    base: Url,
}

impl AdminClient {
    /// Create a client for `admin_url`.
    ///
    /// A missing scheme is treated as `http://`, so `localhost:2019` works.
    pub fn new(admin_url: &str, timeout: Duration) -> AdminResult<Self> {
        let base = parse_admin_url(admin_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()?;

        Ok(Self { client, base })
    }

    /// Create a client from the `[admin]` configuration section.
    pub fn from_config(config: &AdminConfig) -> AdminResult<Self> {
        Self::new(&config.url, Duration::from_secs(config.timeout_secs))
    }

    /// Base URL of the admin endpoint.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Admin address as `host:port`, the form Caddy expects in `admin.listen`.
    pub fn listen_address(&self) -> String {
        let host = self.base.host_str().unwrap_or("localhost");
        match self.base.port_or_known_default() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        }
    }

    /// Full configuration including the root node. One trailing newline is removed.
    pub async fn config(&self) -> AdminResult<String> {
        self.config_at(&[]).await
    }

    /// Configuration below `/config/<path...>`. One trailing newline is removed.
    pub async fn config_at(&self, path: &[&str]) -> AdminResult<String> {
        let mut segments = vec!["config"];
        segments.extend_from_slice(path);
        let url = self.endpoint(&segments)?;

        let response = self.client.get(url).send().await?;
        let (status, body) = read_body(response).await?;
        if !status.is_success() {
            return Err(rejection(&body));
        }
        Ok(trim_newline(body))
    }

    /// Object marked with `"@id": id`, as JSON text. One trailing newline is removed.
    pub async fn config_by_id(&self, id: &str) -> AdminResult<String> {
        let url = self.endpoint(&["id", id])?;

        let response = self.client.get(url).send().await?;
        let (status, body) = read_body(response).await?;
        check_unknown_id(id, &body)?;
        if !status.is_success() {
            return Err(rejection(&body));
        }
        Ok(trim_newline(body))
    }

    /// Delete the object marked with `"@id": id`.
    ///
    /// Besides `NotFound`, whatever the server answers is ignored.
    pub async fn delete_by_id(&self, id: &str) -> AdminResult<()> {
        let url = self.endpoint(&["id", id])?;

        let response = self.client.delete(url).send().await?;
        let (status, body) = read_body(response).await?;
        check_unknown_id(id, &body)?;
        if !body.trim().is_empty() {
            tracing::debug!(id = %id, status = %status, body = %body.trim_end(), "Delete returned a body");
        }
        Ok(())
    }

    /// Append one route object to `apps.http.servers.<server_key>.routes`.
    pub async fn append_route(&self, server_key: &str, route_json: &str) -> AdminResult<()> {
        let url = self.endpoint(&["config", "apps", "http", "servers", server_key, "routes"])?;

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(route_json.to_string())
            .send()
            .await?;
        let (status, body) = read_body(response).await?;
        if !status.is_success() {
            return Err(rejection(&body));
        }
        Ok(())
    }

    /// Replace the whole configuration (Caddy's `/load`).
    pub async fn load(&self, config_json: &str) -> AdminResult<()> {
        let url = self.endpoint(&["load"])?;
        self.post_load(url, config_json).await
    }

    /// Same as [`load`](Self::load), against another admin URL.
    ///
    /// Used to push a base configuration into a server started with an empty
    /// config; if the new config moves `admin.listen`, later calls go to the
    /// new address held by `self`.
    pub async fn load_to(&self, admin_url: &str, config_json: &str) -> AdminResult<()> {
        let mut url = parse_admin_url(admin_url)?;
        push_segments(&mut url, &["load"])?;
        self.post_load(url, config_json).await
    }

    async fn post_load(&self, url: Url, config_json: &str) -> AdminResult<()> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(config_json.to_string())
            .send()
            .await?;
        let (_, body) = read_body(response).await?;
        if !body.trim().is_empty() {
            return Err(rejection(&body));
        }
        Ok(())
    }

    fn endpoint(&self, segments: &[&str]) -> AdminResult<Url> {
        let mut url = self.base.clone();
        push_segments(&mut url, segments)?;
        Ok(url)
    }
}

fn parse_admin_url(admin_url: &str) -> AdminResult<Url> {
    let with_scheme = if admin_url.contains("://") {
        admin_url.to_string()
    } else {
        format!("http://{}", admin_url)
    };
    let url = Url::parse(&with_scheme).map_err(|_| AdminError::InvalidUrl(admin_url.to_string()))?;
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(AdminError::InvalidUrl(admin_url.to_string()));
    }
    Ok(url)
}

fn push_segments(url: &mut Url, segments: &[&str]) -> AdminResult<()> {
    let original = url.to_string();
    url.path_segments_mut()
        .map_err(|_| AdminError::InvalidUrl(original))?
        .pop_if_empty()
        .extend(segments);
    Ok(())
}

async fn read_body(response: Response) -> AdminResult<(StatusCode, String)> {
    let status = response.status();
    let body = response.text().await?;
    Ok((status, body))
}

fn check_unknown_id(id: &str, body: &str) -> AdminResult<()> {
    match ErrorPayload::parse(body) {
        Some(payload) if payload.is_unknown_id() => Err(AdminError::NotFound { id: id.to_string() }),
        _ => Ok(()),
    }
}

fn rejection(body: &str) -> AdminError {
    match ErrorPayload::parse(body) {
        Some(payload) => AdminError::Rejected(payload.error),
        None => AdminError::Rejected(body.trim_end().to_string()),
    }
}

fn trim_newline(mut body: String) -> String {
    if body.ends_with('\n') {
        body.pop();
    }
    body
}
