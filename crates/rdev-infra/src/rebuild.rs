use do_api::Droplet;
use tracing::{debug, info, warn};

use crate::droplets::{self, DEV_SERVER_NAME, DropletSpec};
use crate::machine::{Observation, RebuildMachine, RebuildState, RetryPolicy};
use crate::template::{DEFAULT_TEMPLATE, TemplateStore};
use crate::{DropletApi, Error, Result};

#[derive(Debug, Clone)]
pub struct RebuildConfig {
    pub spec: DropletSpec,
    pub reserved_ip: String,
    pub templates: TemplateStore,
    pub template: String,
    pub policy: RetryPolicy,
}

impl RebuildConfig {
    /// Dev-server defaults: `remote-dev` in `fra1`, tagged `remote-dev`,
    /// booted from `remote-dev.yaml`.
    pub fn new(reserved_ip: impl Into<String>, templates: TemplateStore) -> Self {
        Self {
            spec: DropletSpec {
                tags: vec![DEV_SERVER_NAME.into()],
                ..DropletSpec::default()
            },
            reserved_ip: reserved_ip.into(),
            templates,
            template: DEFAULT_TEMPLATE.into(),
            policy: RetryPolicy::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RebuildReport {
    /// Latest snapshot of the new droplet.
    pub droplet: Droplet,
    pub reserved_ip: String,
    pub assign_attempts: u32,
    /// The droplet destroyed to make room, if one existed.
    pub replaced: Option<Droplet>,
}

/// Replace the dev droplet and point the reserved IP at the new one.
///
/// Any existing droplet with the same name is destroyed first; deletion is
/// not awaited. Errors other than the provider's "not ready yet" conditions
/// during assignment abort the rebuild immediately.
pub async fn rebuild(api: &dyn DropletApi, config: &RebuildConfig) -> Result<RebuildReport> {
    let name = config.spec.name.as_str();

    let replaced = droplets::find_droplet(api, name).await?;
    if let Some(old) = &replaced {
        info!(droplet_id = old.id, name, "droplet already exists, destroying it");
        api.destroy_droplet(old.id).await?;
    }

    let user_data = config.templates.load(&config.template).await?;
    info!(
        name,
        template = %config.template,
        dir = %config.templates.dir().display(),
        "creating droplet"
    );
    let spec = DropletSpec {
        user_data: Some(user_data),
        ..config.spec.clone()
    };
    let mut droplet = droplets::create_droplet(api, &spec).await?;

    tokio::time::sleep(config.policy.initial_delay).await;
    info!(droplet_id = droplet.id, "waiting for droplet to be ready");

    let mut machine = RebuildMachine::new(config.policy.clone());
    loop {
        match machine.state() {
            RebuildState::Done { attempts } => {
                info!(
                    droplet_id = droplet.id,
                    ip = %config.reserved_ip,
                    attempts,
                    "reserved ip assigned"
                );
                return Ok(RebuildReport {
                    droplet,
                    reserved_ip: config.reserved_ip.clone(),
                    assign_attempts: attempts,
                    replaced,
                });
            }
            RebuildState::Failed(give_up) => {
                warn!(droplet_id = droplet.id, %give_up, "giving up on reserved ip");
                return Err(Error::GaveUp(give_up));
            }
            RebuildState::Polling | RebuildState::AssignRetry { .. } => {}
        }

        if let Some(delay) = machine.next_delay() {
            tokio::time::sleep(delay).await;
        }

        let observation = poll_once(api, &mut droplet, &config.reserved_ip).await?;
        if let RebuildState::AssignRetry { attempt } = machine.observe(observation) {
            info!(
                droplet_id = droplet.id,
                attempt,
                max = machine.policy().max_assign_attempts,
                "retrying reserved ip assignment"
            );
        }
    }
}

/// One poll cycle: refresh the droplet, check its create action, and try
/// the assignment once the action has completed.
async fn poll_once(
    api: &dyn DropletApi,
    droplet: &mut Droplet,
    reserved_ip: &str,
) -> Result<Observation> {
    // Match on id: a destroyed predecessor may still be listed under the same name.
    let listed = api.list_droplets().await?;
    let Some(current) = listed.into_iter().find(|d| d.id == droplet.id) else {
        debug!(droplet_id = droplet.id, "droplet not listed yet");
        return Ok(Observation::ActionPending);
    };
    *droplet = current;

    let actions = api.droplet_actions(droplet.id).await?;
    let created = actions
        .iter()
        .any(|a| a.action_type == "create" && a.is_completed());
    if !created {
        debug!(droplet_id = droplet.id, status = %droplet.status, "create action pending");
        return Ok(Observation::ActionPending);
    }

    match assign_reserved_ip(api, reserved_ip, droplet.id).await {
        Ok(()) => Ok(Observation::AssignSucceeded),
        Err(e) if e.is_not_ready() => {
            warn!(
                droplet_id = droplet.id,
                ip = reserved_ip,
                error = %e,
                "droplet not completed yet or ip not found"
            );
            Ok(Observation::AssignNotReady)
        }
        Err(e) => Err(e.into()),
    }
}

async fn assign_reserved_ip(
    api: &dyn DropletApi,
    reserved_ip: &str,
    droplet_id: u64,
) -> do_api::Result<()> {
    let ip = api.load_floating_ip(reserved_ip).await?;
    if let Some(current) = &ip.droplet {
        debug!(ip = %ip.ip, from = current.id, to = droplet_id, "moving reserved ip");
    }
    api.assign_floating_ip(&ip.ip, droplet_id).await?;
    Ok(())
}
