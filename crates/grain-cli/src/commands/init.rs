//! Config scaffolding command

use anyhow::{Context, Result};
use grain_sim::SimConfig;
use std::fs;
use std::path::Path;

pub fn run(path: &str) -> Result<()> {
    let path = Path::new(path);

    if path.exists() {
        anyhow::bail!("'{}' already exists", path.display());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let body = SimConfig::default()
        .to_toml_string()
        .context("Failed to serialize default config")?;
    fs::write(
        path,
        format!("# Grain sand simulation settings\n# seed = 42  # uncomment for reproducible runs\n\n{body}"),
    )
    .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Created {}", path.display());
    Ok(())
}
