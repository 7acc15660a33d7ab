use async_trait::async_trait;
use do_api::{Action, CreateDropletRequest, DoClient, Droplet, FloatingIp, SshKey};
use tracing::info;

use crate::DropletApi;

#[async_trait]
impl DropletApi for DoClient {
    async fn list_droplets(&self) -> do_api::Result<Vec<Droplet>> {
        DoClient::list_droplets(self).await
    }

    async fn create_droplet(&self, req: &CreateDropletRequest) -> do_api::Result<Droplet> {
        let droplet = DoClient::create_droplet(self, req).await?;
        info!(droplet_id = droplet.id, name = %droplet.name, "digitalocean: droplet requested");
        Ok(droplet)
    }

    async fn destroy_droplet(&self, droplet_id: u64) -> do_api::Result<()> {
        self.delete_droplet(droplet_id).await?;
        info!(droplet_id, "digitalocean: droplet destroy requested");
        Ok(())
    }

    async fn droplet_actions(&self, droplet_id: u64) -> do_api::Result<Vec<Action>> {
        self.list_droplet_actions(droplet_id).await
    }

    async fn load_floating_ip(&self, ip: &str) -> do_api::Result<FloatingIp> {
        self.get_floating_ip(ip).await
    }

    async fn assign_floating_ip(&self, ip: &str, droplet_id: u64) -> do_api::Result<Action> {
        let action = DoClient::assign_floating_ip(self, ip, droplet_id).await?;
        info!(
            ip,
            droplet_id,
            action_id = action.id,
            "digitalocean: floating ip assignment requested"
        );
        Ok(action)
    }

    async fn list_ssh_keys(&self) -> do_api::Result<Vec<SshKey>> {
        DoClient::list_ssh_keys(self).await
    }
}
