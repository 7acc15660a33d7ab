use do_api::Droplet;
use tracing::info;

use crate::droplets;
use crate::{DropletApi, Result};

#[derive(Debug, Clone)]
pub struct TeardownReport {
    pub name: String,
    /// `None` when there was nothing to destroy.
    pub destroyed: Option<Droplet>,
}

/// Destroy the named droplet if present. Absence is not an error.
pub async fn teardown(api: &dyn DropletApi, name: &str) -> Result<TeardownReport> {
    let destroyed = droplets::destroy_droplet(api, name).await?;
    if destroyed.is_none() {
        info!(name, "no droplet to destroy");
    }

    Ok(TeardownReport {
        name: name.to_string(),
        destroyed,
    })
}
