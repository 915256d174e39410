use anyhow::{Context, Result};
use faktura_core::Markers;
use faktura_ingest::DEFAULT_SPLIT_WIDTH;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{ensure_faktura_home, faktura_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parse: ParseSection,
    /// Invoice marker strings; unset fields fall back to the Swedish preset.
    pub markers: Markers,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseSection {
    pub split_width: usize,
    /// Location alias file used when `--location-file` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_file: Option<PathBuf>,
}

impl Default for ParseSection {
    fn default() -> Self {
        Self {
            split_width: DEFAULT_SPLIT_WIDTH,
            location_file: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(faktura_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = ensure_faktura_home()?.join("config.toml");
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.parse.split_width, DEFAULT_SPLIT_WIDTH);
        assert_eq!(cfg.markers, Markers::swedish());
    }

    #[test]
    fn test_saved_default_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        save_config(&Config::default(), &p).unwrap();
        assert_eq!(load_config_from(&p).unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(
            &p,
            "[parse]\nsplit_width = 96\nlocation_file = \"/tmp/locations.txt\"\n\n[markers]\ndue_date = \"Due date\"\n",
        )
        .unwrap();

        let cfg = load_config_from(&p).unwrap();
        assert_eq!(cfg.parse.split_width, 96);
        assert_eq!(
            cfg.parse.location_file.as_deref(),
            Some(Path::new("/tmp/locations.txt"))
        );
        assert_eq!(cfg.markers.due_date, "Due date");
        assert_eq!(cfg.markers.card_begin, Markers::swedish().card_begin);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[parse\nsplit_width = ").unwrap();
        assert!(load_config_from(&p).is_err());
    }
}
