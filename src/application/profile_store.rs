// Store trait for loading and saving energy profiles
use crate::domain::profile::EnergyProfile;
use async_trait::async_trait;
use std::path::Path;

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Load and validate a profile
    async fn load(&self, path: &Path) -> anyhow::Result<EnergyProfile>;

    /// Persist a profile, replacing whatever is at `path`
    async fn save(&self, path: &Path, profile: &EnergyProfile) -> anyhow::Result<()>;
}
