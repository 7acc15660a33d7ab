//! Typed Rust client for the DigitalOcean v2 API.
//!
//! Covers the subset needed for managing a single dev droplet:
//! droplets (list, create, delete), droplet actions, floating IPs
//! (get, assign) and account SSH keys.

mod types;

pub use reqwest::StatusCode;
pub use types::*;

use serde::de::DeserializeOwned;
use tracing::debug;

pub const BASE_URL: &str = "https://api.digitalocean.com/v2";

/// Page size requested from list endpoints (the API maximum).
const PER_PAGE: u32 = 200;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("digitalocean api request failed")]
    Request(#[from] reqwest::Error),

    #[error("digitalocean api {endpoint} rejected credentials: {message}")]
    Unauthorized {
        endpoint: &'static str,
        message: String,
    },

    #[error("digitalocean api {endpoint} not found: {message}")]
    NotFound {
        endpoint: &'static str,
        message: String,
    },

    #[error("digitalocean api {endpoint} returned {status}: {message}")]
    DataRead {
        endpoint: &'static str,
        status: StatusCode,
        message: String,
    },
}

impl Error {
    /// Whether the error is one of the two conditions the API reports while a
    /// freshly created resource is still settling (missing, or refusing the
    /// request with a data error). Credential and transport failures are not.
    pub fn is_not_ready(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::DataRead { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Client for the DigitalOcean REST API.
#[derive(Clone)]
pub struct DoClient {
    token: String,
    base_url: String,
    http: reqwest::Client,
}

impl DoClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, BASE_URL)
    }

    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn auth(&self) -> String {
        format!("Bearer {}", self.token)
    }

    async fn check(resp: reqwest::Response, endpoint: &'static str) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or(body);

        Err(match status.as_u16() {
            401 | 403 => Error::Unauthorized { endpoint, message },
            404 => Error::NotFound { endpoint, message },
            _ => Error::DataRead {
                endpoint,
                status,
                message,
            },
        })
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        page: u32,
        endpoint: &'static str,
    ) -> Result<T> {
        let url = self.url(path);
        debug!(url = %url, page, "GET request");

        let resp = self
            .http
            .get(url)
            .header("Authorization", self.auth())
            .query(&[("page", page), ("per_page", PER_PAGE)])
            .send()
            .await?;

        Self::check(resp, endpoint)
            .await?
            .json()
            .await
            .map_err(Error::from)
    }

    // ── Droplets ─────────────────────────────────────────────────────

    /// List every droplet on the account, following pagination.
    pub async fn list_droplets(&self) -> Result<Vec<Droplet>> {
        let mut droplets = Vec::new();
        let mut page = 1;
        loop {
            let resp: DropletPage = self.get_page("/droplets", page, "list droplets").await?;
            droplets.extend(resp.droplets);
            if !resp.links.has_next() {
                return Ok(droplets);
            }
            page += 1;
        }
    }

    /// Request a new droplet. Provisioning continues asynchronously on the
    /// provider side; track it through the droplet's `create` action.
    pub async fn create_droplet(&self, req: &CreateDropletRequest) -> Result<Droplet> {
        let url = self.url("/droplets");
        debug!(url = %url, name = %req.name, "POST request");

        let resp = self
            .http
            .post(url)
            .header("Authorization", self.auth())
            .json(req)
            .send()
            .await?;

        let envelope: DropletEnvelope = Self::check(resp, "create droplet").await?.json().await?;
        Ok(envelope.droplet)
    }

    pub async fn delete_droplet(&self, droplet_id: u64) -> Result<()> {
        let url = self.url(&format!("/droplets/{droplet_id}"));
        debug!(url = %url, "DELETE request");

        let resp = self
            .http
            .delete(url)
            .header("Authorization", self.auth())
            .send()
            .await?;

        Self::check(resp, "delete droplet").await?;
        Ok(())
    }

    // ── Actions ──────────────────────────────────────────────────────

    pub async fn list_droplet_actions(&self, droplet_id: u64) -> Result<Vec<Action>> {
        let path = format!("/droplets/{droplet_id}/actions");
        let mut actions = Vec::new();
        let mut page = 1;
        loop {
            let resp: ActionPage = self.get_page(&path, page, "list droplet actions").await?;
            actions.extend(resp.actions);
            if !resp.links.has_next() {
                return Ok(actions);
            }
            page += 1;
        }
    }

    // ── Floating IPs ─────────────────────────────────────────────────

    pub async fn get_floating_ip(&self, ip: &str) -> Result<FloatingIp> {
        let url = self.url(&format!("/floating_ips/{ip}"));
        debug!(url = %url, "GET request");

        let resp = self
            .http
            .get(url)
            .header("Authorization", self.auth())
            .send()
            .await?;

        let envelope: FloatingIpEnvelope =
            Self::check(resp, "get floating ip").await?.json().await?;
        Ok(envelope.floating_ip)
    }

    pub async fn assign_floating_ip(&self, ip: &str, droplet_id: u64) -> Result<Action> {
        let url = self.url(&format!("/floating_ips/{ip}/actions"));
        debug!(url = %url, droplet_id, "POST request");

        let resp = self
            .http
            .post(url)
            .header("Authorization", self.auth())
            .json(&FloatingIpActionRequest {
                action_type: "assign",
                droplet_id,
            })
            .send()
            .await?;

        let envelope: ActionEnvelope =
            Self::check(resp, "assign floating ip").await?.json().await?;
        Ok(envelope.action)
    }

    // ── SSH keys ─────────────────────────────────────────────────────

    pub async fn list_ssh_keys(&self) -> Result<Vec<SshKey>> {
        let mut keys = Vec::new();
        let mut page = 1;
        loop {
            let resp: SshKeyPage = self.get_page("/account/keys", page, "list ssh keys").await?;
            keys.extend(resp.ssh_keys);
            if !resp.links.has_next() {
                return Ok(keys);
            }
            page += 1;
        }
    }
}
