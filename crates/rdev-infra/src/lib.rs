pub mod digitalocean;
pub mod droplets;
pub mod machine;
pub mod rebuild;
pub mod teardown;
pub mod template;

use std::path::PathBuf;

use async_trait::async_trait;
use do_api::{Action, CreateDropletRequest, Droplet, FloatingIp, SshKey};

pub use droplets::{DropletSpec, create_droplet, destroy_droplet, find_droplet};
pub use machine::{GiveUp, Observation, RebuildMachine, RebuildState, RetryPolicy};
pub use rebuild::{RebuildConfig, RebuildReport, rebuild};
pub use teardown::{TeardownReport, teardown};
pub use template::TemplateStore;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] do_api::Error),

    #[error("failed to read cloud-init template {}", .path.display())]
    Template {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("rebuild gave up: {0}")]
    GaveUp(GiveUp),
}

pub type Result<T> = std::result::Result<T, Error>;

/// The provider capabilities the droplet workflows depend on.
///
/// Implemented by [`do_api::DoClient`] for real runs; tests substitute an
/// in-memory fake. Methods return the raw [`do_api::Error`] so callers can
/// classify transient failures with [`do_api::Error::is_not_ready`].
#[async_trait]
pub trait DropletApi: Send + Sync {
    async fn list_droplets(&self) -> do_api::Result<Vec<Droplet>>;

    async fn create_droplet(&self, req: &CreateDropletRequest) -> do_api::Result<Droplet>;

    async fn destroy_droplet(&self, droplet_id: u64) -> do_api::Result<()>;

    async fn droplet_actions(&self, droplet_id: u64) -> do_api::Result<Vec<Action>>;

    async fn load_floating_ip(&self, ip: &str) -> do_api::Result<FloatingIp>;

    async fn assign_floating_ip(&self, ip: &str, droplet_id: u64) -> do_api::Result<Action>;

    async fn list_ssh_keys(&self) -> do_api::Result<Vec<SshKey>>;
}
