pub mod detail;
pub mod topline;

use anyhow::{Context, Result};
use log::info;
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::path::PathBuf;

use crate::config::settings::OutputSettings;
use crate::records::LeagueTable;

/// Writes the detail JSON and the topline CSV into the output directory
pub struct ReportWriter<'a> {
    settings: &'a OutputSettings,
}

impl<'a> ReportWriter<'a> {
    pub fn new(settings: &'a OutputSettings) -> Self {
        Self { settings }
    }

    pub fn write_detail(&self, seasons: Map<String, Value>) -> Result<PathBuf> {
        let path = self.prepare_path(self.settings.detail_filename)?;
        let json = serde_json::to_string(&Value::Object(seasons))
            .context("Failed to serialize detail report")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!("Created {}", path.display());
        Ok(path)
    }

    pub fn write_topline(&self, table: &LeagueTable) -> Result<PathBuf> {
        let path = self.prepare_path(self.settings.topline_filename)?;
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        topline::write_topline(file, table)?;

        info!("Created {}", path.display());
        Ok(path)
    }

    fn prepare_path(&self, filename: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.settings.output_dir).with_context(|| {
            format!(
                "Failed to create output directory {}",
                self.settings.output_dir.display()
            )
        })?;
        Ok(self.settings.output_dir.join(filename))
    }
}
