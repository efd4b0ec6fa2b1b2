// File-backed profile store (plain or Brotli-compressed JSON)
use crate::application::profile_store::ProfileStore;
use crate::domain::profile::EnergyProfile;
use crate::infrastructure::compression::{brotli_compress, brotli_decompress};
use crate::infrastructure::config::OutputSettings;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct FileProfileStore {
    indent: usize,
    compress: bool,
}

impl FileProfileStore {
    pub fn new(settings: &OutputSettings) -> Self {
        Self {
            indent: settings.indent,
            compress: settings.compress,
        }
    }

    fn encode_json(&self, profile: &EnergyProfile) -> Result<Vec<u8>> {
        let value = profile.to_value();
        if self.indent == 0 {
            return Ok(serde_json::to_vec(&value)?);
        }

        let indent = vec![b' '; self.indent];
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        value.serialize(&mut serializer)?;
        Ok(buffer)
    }
}

fn is_brotli(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "br")
}

#[async_trait]
impl ProfileStore for FileProfileStore {
    async fn load(&self, path: &Path) -> Result<EnergyProfile> {
        let raw = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let bytes = if is_brotli(path) {
            brotli_decompress(&raw)
                .await
                .with_context(|| format!("Failed to decompress {}", path.display()))?
        } else {
            raw
        };

        let profile = EnergyProfile::from_slice(&bytes)
            .with_context(|| format!("Failed to parse profile {}", path.display()))?;
        tracing::debug!(
            "Loaded {} samples at {} in {}",
            profile.data.len(),
            profile.interval,
            profile.unit
        );
        Ok(profile)
    }

    async fn save(&self, path: &Path, profile: &EnergyProfile) -> Result<()> {
        let json = self.encode_json(profile)?;
        let bytes = if self.compress || is_brotli(path) {
            brotli_compress(&json).await.context("Failed to compress profile")?
        } else {
            json
        };

        tokio::fs::write(path, bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}
