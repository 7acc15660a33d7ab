use std::io::Write;

use do_api::Droplet;
use rdev_infra::droplets::DEV_SERVER_NAME;
use rdev_infra::{DropletApi, DropletSpec, RebuildConfig, TemplateStore};

use crate::error::Result;

pub async fn get_droplet(api: &dyn DropletApi, name: &str, out: &mut impl Write) -> Result<()> {
    match rdev_infra::find_droplet(api, name).await? {
        Some(droplet) => write_droplet(out, &droplet)?,
        None => writeln!(out, "Droplet {name} not found")?,
    }
    Ok(())
}

pub async fn destroy_droplet(api: &dyn DropletApi, name: &str, out: &mut impl Write) -> Result<()> {
    match rdev_infra::destroy_droplet(api, name).await? {
        Some(droplet) => writeln!(out, "Droplet {} destroyed", droplet.name)?,
        None => writeln!(out, "Droplet {name} not found")?,
    }
    Ok(())
}

pub async fn create_droplet(
    api: &dyn DropletApi,
    templates: &TemplateStore,
    template: &str,
    mut spec: DropletSpec,
    out: &mut impl Write,
) -> Result<()> {
    spec.user_data = Some(templates.load(template).await?);
    let droplet = rdev_infra::create_droplet(api, &spec).await?;
    writeln!(out, "Droplet {} created", droplet.name)?;
    Ok(())
}

pub async fn rebuild_dev_server(
    api: &dyn DropletApi,
    config: &RebuildConfig,
    out: &mut impl Write,
) -> Result<()> {
    let report = rdev_infra::rebuild(api, config).await?;
    writeln!(out, "Droplet {} created", report.droplet.name)?;
    writeln!(out, "Droplet ip: {}", report.reserved_ip)?;
    Ok(())
}

/// Prints "destroyed" whether or not a droplet existed; the not-found case
/// only shows in the log.
pub async fn destroy_dev_server(api: &dyn DropletApi, out: &mut impl Write) -> Result<()> {
    let report = rdev_infra::teardown(api, DEV_SERVER_NAME).await?;
    writeln!(out, "Droplet {} destroyed", report.name)?;
    Ok(())
}

pub fn write_droplet(out: &mut impl Write, droplet: &Droplet) -> std::io::Result<()> {
    let networks: Vec<String> = droplet
        .networks
        .v4
        .iter()
        .map(|net| format!("{} ({})", net.ip_address, net.address_type))
        .collect();

    writeln!(out, "Droplet {} found", droplet.name)?;
    writeln!(out, "Droplet id: {}", droplet.id)?;
    writeln!(out, "Droplet ip: {}", droplet.public_ipv4().unwrap_or("none"))?;
    writeln!(out, "Droplet status: {}", droplet.status)?;
    writeln!(out, "Droplet region: {}", droplet.region.name)?;
    writeln!(out, "Droplet created at: {}", droplet.created_at.to_rfc3339())?;
    writeln!(out, "Droplet networks: {}", networks.join(", "))?;
    writeln!(out, "Droplet tags: {}", droplet.tags.join(", "))?;
    Ok(())
}
