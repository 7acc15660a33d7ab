use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Droplet types ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct CreateDropletRequest {
    pub name: String,
    pub region: String,
    pub size: String,
    pub image: String,
    pub ssh_keys: Vec<u64>,
    pub backups: bool,
    pub ipv6: bool,
    pub monitoring: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Droplet {
    pub id: u64,
    pub name: String,
    /// "new", "active", "off" or "archive".
    pub status: String,
    #[serde(default)]
    pub memory: u64,
    #[serde(default)]
    pub vcpus: u32,
    #[serde(default)]
    pub disk: u64,
    pub region: Region,
    #[serde(default)]
    pub size_slug: String,
    #[serde(default)]
    pub image: Option<Image>,
    #[serde(default)]
    pub networks: Networks,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub action_ids: Vec<u64>,
    pub created_at: DateTime<Utc>,
}

impl Droplet {
    /// First public IPv4 address, if the droplet has been given one yet.
    pub fn public_ipv4(&self) -> Option<&str> {
        self.networks
            .v4
            .iter()
            .find(|net| net.address_type == "public")
            .map(|net| net.ip_address.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Region {
    pub slug: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Image {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    pub slug: Option<String>,
    #[serde(default)]
    pub distribution: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Networks {
    #[serde(default)]
    pub v4: Vec<NetworkAddress>,
    #[serde(default)]
    pub v6: Vec<NetworkAddress>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NetworkAddress {
    pub ip_address: String,
    pub netmask: Option<String>,
    pub gateway: Option<String>,
    /// "public" or "private".
    #[serde(rename = "type")]
    pub address_type: String,
}

// ── Action types ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Action {
    pub id: u64,
    /// "in-progress", "completed" or "errored".
    pub status: String,
    #[serde(rename = "type")]
    pub action_type: String,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub resource_id: Option<u64>,
    pub resource_type: Option<String>,
}

impl Action {
    pub fn is_completed(&self) -> bool {
        self.status == "completed"
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FloatingIpActionRequest {
    #[serde(rename = "type")]
    pub action_type: &'static str,
    pub droplet_id: u64,
}

// ── Floating IP types ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FloatingIp {
    pub ip: String,
    pub region: Option<Region>,
    /// Droplet the address is currently assigned to.
    pub droplet: Option<AssignedDroplet>,
    #[serde(default)]
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssignedDroplet {
    pub id: u64,
    pub name: String,
}

// ── SSH key types ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SshKey {
    pub id: u64,
    pub name: String,
    pub fingerprint: String,
}

// ── Envelopes ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct DropletEnvelope {
    pub droplet: Droplet,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DropletPage {
    #[serde(default)]
    pub droplets: Vec<Droplet>,
    #[serde(default)]
    pub links: Links,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ActionPage {
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub links: Links,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ActionEnvelope {
    pub action: Action,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FloatingIpEnvelope {
    pub floating_ip: FloatingIp,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SshKeyPage {
    #[serde(default)]
    pub ssh_keys: Vec<SshKey>,
    #[serde(default)]
    pub links: Links,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Links {
    pub pages: Option<Pages>,
}

impl Links {
    pub fn has_next(&self) -> bool {
        self.pages.as_ref().is_some_and(|p| p.next.is_some())
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Pages {
    pub next: Option<String>,
}

/// Error body returned by the API on non-success statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}
