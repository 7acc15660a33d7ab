use std::env;
use std::path::PathBuf;

use do_api::DoClient;
use rdev_infra::template::DEFAULT_TEMPLATE_DIR;

use crate::error::{Error, Result};

pub const TOKEN_VAR: &str = "DIGITALOCEAN_ACCESS_TOKEN";
pub const RESERVED_IP_VAR: &str = "MY_RESERVED_IP";
pub const API_URL_VAR: &str = "DIGITALOCEAN_API_URL";
pub const TEMPLATE_DIR_VAR: &str = "RDEV_TEMPLATE_DIR";

#[derive(Debug, Clone)]
pub struct Config {
    pub access_token: String,
    pub reserved_ip: Option<String>,
    pub api_url: String,
    pub template_dir: PathBuf,
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let access_token = get(TOKEN_VAR).ok_or(Error::MissingEnv(TOKEN_VAR))?;

        Ok(Self {
            access_token,
            reserved_ip: get(RESERVED_IP_VAR),
            api_url: get(API_URL_VAR).unwrap_or_else(|| do_api::BASE_URL.into()),
            template_dir: get(TEMPLATE_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_DIR)),
        })
    }

    /// Only the rebuild needs the reserved IP, so it is checked on demand.
    pub fn reserved_ip(&self) -> Result<&str> {
        self.reserved_ip
            .as_deref()
            .ok_or(Error::MissingEnv(RESERVED_IP_VAR))
    }

    pub fn client(&self) -> DoClient {
        DoClient::with_base_url(&self.access_token, &self.api_url)
    }
}
