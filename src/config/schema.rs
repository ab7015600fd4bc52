//! Configuration schema definitions.
//!
//! Maps to the optional `.depsupply/config.yml` file in the build dir.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::planner::{BackendKind, PlanContext};

/// Name of the tool's state dir inside the build dir.
pub const STATE_DIR: &str = ".depsupply";

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplyConfig {
    /// Global settings
    pub settings: Settings,
}

/// Settings for a build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Package manager: auto, npm, yarn
    pub backend: BackendKind,

    /// Cache dir persisting across builds (relative to the build dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    /// Dir containing package.json (relative to the build dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_dir: Option<PathBuf>,

    /// Node.js installation used for native module builds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_home: Option<PathBuf>,

    /// Prefix ignored by fingerprints and change reports
    #[serde(default = "default_excluded_prefix")]
    pub excluded_prefix: String,

    /// Where the change-report marker file is created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: BackendKind::Auto,
            cache_dir: None,
            package_dir: None,
            node_home: None,
            excluded_prefix: default_excluded_prefix(),
            marker_dir: None,
        }
    }
}

fn default_excluded_prefix() -> String {
    STATE_DIR.to_string()
}

impl Settings {
    /// Cache dir for `build_dir`: configured, else the user cache dir, else
    /// inside the state dir.
    pub fn resolve_cache_dir(&self, build_dir: &Path) -> PathBuf {
        match &self.cache_dir {
            Some(dir) => build_dir.join(dir),
            None => dirs::cache_dir()
                .map(|d| d.join("depsupply"))
                .unwrap_or_else(|| build_dir.join(STATE_DIR).join("cache")),
        }
    }

    /// Planner inputs for `build_dir`.
    pub fn plan_context(&self, build_dir: &Path) -> PlanContext {
        let mut ctx = PlanContext::new(build_dir, self.resolve_cache_dir(build_dir));
        if let Some(package_dir) = &self.package_dir {
            ctx = ctx.with_package_dir(build_dir.join(package_dir));
        }
        if let Some(node_home) = &self.node_home {
            ctx = ctx.with_node_home(node_home);
        }
        ctx
    }
}
