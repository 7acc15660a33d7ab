use clap::{Args, Parser, Subcommand};
use rdev_infra::DropletSpec;
use rdev_infra::droplets::{DEFAULT_IMAGE, DEFAULT_REGION, DEFAULT_SIZE, DEV_SERVER_NAME};
use rdev_infra::template::DEFAULT_TEMPLATE;

/// rdev - manage the remote dev droplet
#[derive(Debug, Parser)]
#[command(name = "rdev")]
#[command(about = "Create, inspect and destroy the remote dev droplet", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a droplet by name
    GetDroplet { name: String },

    /// Destroy a droplet by name
    DestroyDroplet { name: String },

    /// Create a droplet from a cloud-init template
    CreateDroplet(CreateArgs),

    /// Replace the remote-dev droplet and reattach the reserved IP
    RebuildDevServer,

    /// Destroy the remote-dev droplet
    DestroyDevServer,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(default_value = DEV_SERVER_NAME)]
    pub name: String,

    #[arg(default_value = DEFAULT_REGION)]
    pub region: String,

    #[arg(default_value = DEFAULT_SIZE)]
    pub size: String,

    #[arg(default_value = DEFAULT_IMAGE)]
    pub image: String,

    /// Template file name inside the template directory
    #[arg(default_value = DEFAULT_TEMPLATE)]
    pub template: String,

    pub tags: Vec<String>,
}

impl CreateArgs {
    /// User data is filled in from the template at run time.
    pub fn spec(&self) -> DropletSpec {
        DropletSpec {
            name: self.name.clone(),
            region: self.region.clone(),
            size: self.size.clone(),
            image: self.image.clone(),
            user_data: None,
            tags: self.tags.clone(),
        }
    }
}
