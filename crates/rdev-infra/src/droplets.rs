use do_api::{CreateDropletRequest, Droplet};
use tracing::{debug, info};

use crate::{DropletApi, Result};

/// Name of the single droplet the dev-server commands manage.
pub const DEV_SERVER_NAME: &str = "remote-dev";
pub const DEFAULT_REGION: &str = "fra1";
pub const DEFAULT_SIZE: &str = "s-2vcpu-4gb";
pub const DEFAULT_IMAGE: &str = "ubuntu-22-04-x64";

/// What to create. Provider flags (backups, monitoring, IPv6, SSH keys) are
/// fixed by [`create_droplet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropletSpec {
    pub name: String,
    pub region: String,
    pub size: String,
    pub image: String,
    pub user_data: Option<String>,
    pub tags: Vec<String>,
}

impl Default for DropletSpec {
    fn default() -> Self {
        Self {
            name: DEV_SERVER_NAME.into(),
            region: DEFAULT_REGION.into(),
            size: DEFAULT_SIZE.into(),
            image: DEFAULT_IMAGE.into(),
            user_data: None,
            tags: Vec::new(),
        }
    }
}

/// Find the first droplet on the account whose name matches exactly.
pub async fn find_droplet(api: &dyn DropletApi, name: &str) -> Result<Option<Droplet>> {
    let droplets = api.list_droplets().await?;
    debug!(name, listed = droplets.len(), "looking up droplet");
    Ok(droplets.into_iter().find(|d| d.name == name))
}

/// Request a droplet with every account SSH key attached.
///
/// Returns as soon as the provider accepts the request; the droplet is
/// still being built at that point.
pub async fn create_droplet(api: &dyn DropletApi, spec: &DropletSpec) -> Result<Droplet> {
    let ssh_keys = api
        .list_ssh_keys()
        .await?
        .into_iter()
        .map(|key| key.id)
        .collect();

    let droplet = api
        .create_droplet(&CreateDropletRequest {
            name: spec.name.clone(),
            region: spec.region.clone(),
            size: spec.size.clone(),
            image: spec.image.clone(),
            ssh_keys,
            backups: false,
            ipv6: false,
            monitoring: true,
            user_data: spec.user_data.clone(),
            tags: spec.tags.clone(),
        })
        .await?;

    info!(droplet_id = droplet.id, name = %droplet.name, region = %spec.region, "droplet created");
    Ok(droplet)
}

/// Destroy the droplet named `name`, returning its last known state.
///
/// `Ok(None)` means nothing matched and no destroy request was sent.
pub async fn destroy_droplet(api: &dyn DropletApi, name: &str) -> Result<Option<Droplet>> {
    let Some(droplet) = find_droplet(api, name).await? else {
        return Ok(None);
    };

    api.destroy_droplet(droplet.id).await?;
    info!(droplet_id = droplet.id, name, "droplet destroyed");
    Ok(Some(droplet))
}
