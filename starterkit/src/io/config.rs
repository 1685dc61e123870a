//! Generator configuration, read from `starterkit.toml`.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "starterkit.toml";

/// Generator configuration (TOML).
///
/// Missing fields default to the behaviour of a stock install.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct GeneratorConfig {
    pub installer: InstallerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InstallerConfig {
    /// Commands run in order inside the generated project (e.g. `["npm","install"]`).
    pub commands: Vec<Vec<String>>,

    /// Optional wall-clock limit per command, in seconds. Unset means wait as long as the
    /// package manager runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Trailing stderr bytes kept for the failure message.
    pub stderr_tail_bytes: usize,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            commands: vec![
                vec!["npm".to_string(), "install".to_string()],
                vec!["bower".to_string(), "install".to_string()],
            ],
            timeout_secs: None,
            stderr_tail_bytes: 2_000,
        }
    }
}

impl InstallerConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Shell-style summary of the configured commands, e.g. `npm install && bower install`.
    pub fn command_line(&self) -> String {
        self.commands
            .iter()
            .map(|cmd| cmd.join(" "))
            .collect::<Vec<_>>()
            .join(" && ")
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<()> {
        let installer = &self.installer;
        if installer.timeout_secs == Some(0) {
            return Err(anyhow!("installer.timeout_secs must be > 0 when set"));
        }
        if installer.stderr_tail_bytes == 0 {
            return Err(anyhow!("installer.stderr_tail_bytes must be > 0"));
        }
        for (idx, cmd) in installer.commands.iter().enumerate() {
            if cmd.first().is_none_or(|program| program.trim().is_empty()) {
                return Err(anyhow!(
                    "installer.commands[{idx}] must be a non-empty array with a program"
                ));
            }
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `GeneratorConfig::default()`.
pub fn load_config(path: &Path) -> Result<GeneratorConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config missing, using defaults");
        let cfg = GeneratorConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: GeneratorConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    debug!(path = %path.display(), commands = cfg.installer.commands.len(), "config loaded");
    Ok(cfg)
}
