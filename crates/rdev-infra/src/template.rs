use std::path::{Path, PathBuf};

use crate::{Error, Result};

pub const DEFAULT_TEMPLATE_DIR: &str = "templates";

/// Template used by the dev-server commands, named after the server.
pub const DEFAULT_TEMPLATE: &str = "remote-dev.yaml";

/// Directory of cloud-init templates. Contents are passed through as
/// droplet user data without being parsed.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn load(&self, name: &str) -> Result<String> {
        let path = self.dir.join(name);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| Error::Template { path, source })
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE_DIR)
    }
}
