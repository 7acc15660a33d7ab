#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use do_api::{
    Action, CreateDropletRequest, Droplet, FloatingIp, NetworkAddress, Networks, Region, SshKey,
    StatusCode,
};
use rdev_infra::DropletApi;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListDroplets,
    ListSshKeys,
    Create(String),
    Destroy(u64),
    Actions(u64),
    LoadIp(String),
    Assign(String, u64),
}

/// Scripted outcome for one assignment call.
#[derive(Debug, Clone, Copy)]
pub enum AssignOutcome {
    Ok,
    NotFound,
    PendingEvent,
    Unauthorized,
}

#[derive(Default)]
struct State {
    droplets: Vec<Droplet>,
    calls: Vec<Call>,
    next_id: u64,
    /// Number of action polls that report the create action as in progress.
    pending_action_polls: u32,
    assign_script: VecDeque<AssignOutcome>,
}

/// In-memory stand-in for the provider account.
pub struct FakeApi {
    state: Mutex<State>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                next_id: 1000,
                ..State::default()
            }),
        }
    }

    pub fn with_droplet(self, id: u64, name: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .droplets
            .push(droplet(id, name, &[]));
        self
    }

    pub fn pending_action_polls(self, polls: u32) -> Self {
        self.state.lock().unwrap().pending_action_polls = polls;
        self
    }

    pub fn assign_outcomes(self, outcomes: &[AssignOutcome]) -> Self {
        self.state
            .lock()
            .unwrap()
            .assign_script
            .extend(outcomes.iter().copied());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| matches(c)).count()
    }

    fn record(&self, call: Call) -> std::sync::MutexGuard<'_, State> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        state
    }
}

pub fn droplet(id: u64, name: &str, tags: &[String]) -> Droplet {
    Droplet {
        id,
        name: name.to_string(),
        status: "new".into(),
        memory: 4096,
        vcpus: 2,
        disk: 80,
        region: Region {
            slug: "fra1".into(),
            name: "Frankfurt 1".into(),
        },
        size_slug: "s-2vcpu-4gb".into(),
        image: None,
        networks: Networks {
            v4: vec![NetworkAddress {
                ip_address: format!("10.0.0.{}", id % 250),
                netmask: None,
                gateway: None,
                address_type: "public".into(),
            }],
            v6: vec![],
        },
        tags: tags.to_vec(),
        action_ids: vec![],
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
    }
}

fn action(id: u64, action_type: &str, status: &str) -> Action {
    Action {
        id,
        status: status.into(),
        action_type: action_type.into(),
        started_at: None,
        completed_at: None,
        resource_id: None,
        resource_type: None,
    }
}

#[async_trait]
impl DropletApi for FakeApi {
    async fn list_droplets(&self) -> do_api::Result<Vec<Droplet>> {
        Ok(self.record(Call::ListDroplets).droplets.clone())
    }

    async fn create_droplet(&self, req: &CreateDropletRequest) -> do_api::Result<Droplet> {
        let mut state = self.record(Call::Create(req.name.clone()));
        let id = state.next_id;
        state.next_id += 1;
        let created = droplet(id, &req.name, &req.tags);
        state.droplets.push(created.clone());
        Ok(created)
    }

    async fn destroy_droplet(&self, droplet_id: u64) -> do_api::Result<()> {
        let mut state = self.record(Call::Destroy(droplet_id));
        state.droplets.retain(|d| d.id != droplet_id);
        Ok(())
    }

    async fn droplet_actions(&self, droplet_id: u64) -> do_api::Result<Vec<Action>> {
        let mut state = self.record(Call::Actions(droplet_id));
        let status = if state.pending_action_polls > 0 {
            state.pending_action_polls -= 1;
            "in-progress"
        } else {
            "completed"
        };
        Ok(vec![action(1, "create", status)])
    }

    async fn load_floating_ip(&self, ip: &str) -> do_api::Result<FloatingIp> {
        self.record(Call::LoadIp(ip.to_string()));
        Ok(FloatingIp {
            ip: ip.to_string(),
            region: None,
            droplet: None,
            locked: false,
        })
    }

    async fn assign_floating_ip(&self, ip: &str, droplet_id: u64) -> do_api::Result<Action> {
        let mut state = self.record(Call::Assign(ip.to_string(), droplet_id));
        let outcome = state.assign_script.pop_front().unwrap_or(AssignOutcome::Ok);
        match outcome {
            AssignOutcome::Ok => Ok(action(2, "assign_ip", "in-progress")),
            AssignOutcome::NotFound => Err(do_api::Error::NotFound {
                endpoint: "assign floating ip",
                message: "The resource you were accessing could not be found.".into(),
            }),
            AssignOutcome::PendingEvent => Err(do_api::Error::DataRead {
                endpoint: "assign floating ip",
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: "Droplet already has a pending event.".into(),
            }),
            AssignOutcome::Unauthorized => Err(do_api::Error::Unauthorized {
                endpoint: "assign floating ip",
                message: "Unable to authenticate you".into(),
            }),
        }
    }

    async fn list_ssh_keys(&self) -> do_api::Result<Vec<SshKey>> {
        self.record(Call::ListSshKeys);
        Ok(vec![SshKey {
            id: 7,
            name: "laptop".into(),
            fingerprint: "3b:16:bf:e4".into(),
        }])
    }
}
