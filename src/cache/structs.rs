use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::cache_context;

/// File-based cache with two tiers: raw schedule pages and parsed seasons
pub struct Cache {
    cache_dir: PathBuf,
    raw_dir: PathBuf,
    parsed_dir: PathBuf,
}

impl Cache {
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        let cache_dir = cache_dir.as_ref().to_path_buf();
        let raw_dir = cache_dir.join("raw");
        let parsed_dir = cache_dir.join("parsed");

        fs::create_dir_all(&raw_dir).context("Failed to create raw cache directory")?;
        fs::create_dir_all(&parsed_dir).context("Failed to create parsed cache directory")?;

        Ok(Self {
            cache_dir,
            raw_dir,
            parsed_dir,
        })
    }

    /// Save a fetched page as-is
    pub fn save_raw_page(&self, key: &str, html: &str) -> Result<()> {
        let file_path = self.raw_dir.join(format!("{}.html", key));
        fs::write(&file_path, html).with_context(|| cache_context("write raw", key))?;
        debug!("Saved raw page to cache: {}", file_path.display());
        Ok(())
    }

    pub fn load_raw_page(&self, key: &str) -> Result<Option<String>> {
        let file_path = self.raw_dir.join(format!("{}.html", key));
        if !file_path.exists() {
            return Ok(None);
        }
        let html = fs::read_to_string(&file_path).with_context(|| cache_context("read raw", key))?;
        Ok(Some(html))
    }

    pub fn save_parsed<T: Serialize>(&self, key: &str, data: &T) -> Result<()> {
        let file_path = self.build_parsed_path(key);
        let json = serde_json::to_string_pretty(data).context("Failed to serialize data")?;
        fs::write(&file_path, json).with_context(|| cache_context("write parsed", key))?;
        info!("Saved parsed data to cache: {}", file_path.display());
        Ok(())
    }

    pub fn load_parsed<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<Option<T>> {
        let file_path = self.build_parsed_path(key);
        if !file_path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&file_path).with_context(|| cache_context("read parsed", key))?;
        let data = serde_json::from_str(&json).with_context(|| {
            format!(
                "Failed to parse JSON from {:?}. First 200 chars: {}",
                file_path,
                json.chars().take(200).collect::<String>()
            )
        })?;
        Ok(Some(data))
    }

    /// Clear all cached data
    pub fn clear(&self) -> Result<()> {
        fs::remove_dir_all(&self.cache_dir).context("Failed to clear cache")?;
        fs::create_dir_all(&self.raw_dir).context("Failed to recreate raw cache directory")?;
        fs::create_dir_all(&self.parsed_dir).context("Failed to recreate parsed cache directory")?;

        info!("Cleared cache directory");
        Ok(())
    }

    fn build_parsed_path(&self, key: &str) -> PathBuf {
        self.parsed_dir.join(format!("{}.json", key))
    }
}
