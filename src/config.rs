use anyhow::{Context, Result};
use std::{fs, path::Path};
use tracing::warn;
use voxelstream_world::StreamingConfig;

pub const DEFAULT_STREAMING_PATH: &str = "config/streaming.toml";

/// Load configuration from an explicit path, falling back to defaults on errors.
pub fn load_from_path(path: &Path) -> StreamingConfig {
    match fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<StreamingConfig>(&contents) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!("Failed to parse {}: {err}. Using defaults", path.display());
                StreamingConfig::default()
            }
        },
        Err(err) => {
            if path != Path::new(DEFAULT_STREAMING_PATH)
                || err.kind() != std::io::ErrorKind::NotFound
            {
                warn!("Failed to read {}: {err}. Using defaults", path.display());
            } else {
                warn!(
                    "Streaming config not found at {}. Using defaults",
                    path.display()
                );
            }
            StreamingConfig::default()
        }
    }
}

/// Save configuration to an explicit path, creating parent directories.
pub fn save_to_path(config: &StreamingConfig, path: &Path) -> Result<()> {
    let toml = toml::to_string_pretty(config).context("failed to encode streaming config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, toml).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
