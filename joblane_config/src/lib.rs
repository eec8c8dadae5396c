use std::path::Path;

use anyhow::Context;
use config::{File, FileFormat};
use joblane_core_job_contracts::{
    create::JobCreateServiceConfig, delete::JobDeleteServiceConfig, get::JobGetServiceConfig,
    update::JobUpdateServiceConfig, CompanyBlacklist,
};
use serde::Deserialize;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub rules: RulesConfig,
    pub pagination: PaginationConfig,
}

/// Business-rule windows and limits of the job services. The durations use
/// the `"90d"` / `"24h"` / `"5m"` format.
#[derive(Debug, Deserialize)]
pub struct RulesConfig {
    pub edit_window: Duration,
    pub company_lock_window: Duration,
    pub delete_cooldown: Duration,
    pub new_job_warning_age: Duration,
    pub duplicate_window: Duration,
    pub duplicate_scan_limit: u64,
    pub related_jobs_limit: u64,
    pub company_blacklist: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PaginationConfig {
    pub default_limit: u64,
    pub max_limit: u64,
}

impl RulesConfig {
    pub fn job_create(&self) -> JobCreateServiceConfig {
        JobCreateServiceConfig {
            duplicate_window: self.duplicate_window.into(),
            duplicate_scan_limit: self.duplicate_scan_limit,
            company_blacklist: self.blacklist(),
        }
    }

    pub fn job_get(&self) -> JobGetServiceConfig {
        JobGetServiceConfig {
            edit_window: self.edit_window.into(),
            related_limit: self.related_jobs_limit,
        }
    }

    pub fn job_update(&self) -> JobUpdateServiceConfig {
        JobUpdateServiceConfig {
            edit_window: self.edit_window.into(),
            company_lock_window: self.company_lock_window.into(),
            company_blacklist: self.blacklist(),
        }
    }

    pub fn job_delete(&self) -> JobDeleteServiceConfig {
        JobDeleteServiceConfig {
            delete_cooldown: self.delete_cooldown.into(),
            new_job_warning_age: self.new_job_warning_age.into(),
        }
    }

    fn blacklist(&self) -> CompanyBlacklist {
        CompanyBlacklist::new(self.company_blacklist.iter().map(String::as_str))
    }
}
