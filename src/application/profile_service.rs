// Profile service - Use case for converting whole energy profiles
use crate::application::profile_store::ProfileStore;
use crate::application::resampler::{resample, Mode, ResamplingPlan};
use crate::domain::error::ConversionError;
use crate::domain::interval::Interval;
use crate::domain::profile::EnergyProfile;
use crate::domain::unit::EnergyUnit;
use anyhow::Context;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionTarget {
    pub interval: Interval,
    pub unit: EnergyUnit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub plan: ResamplingPlan,
    pub input_len: usize,
    pub output_len: usize,
}

/// Build the output profile for `target` from `source`, returning it with
/// the plan that produced it.
///
/// Passthrough metadata is copied unchanged; interval, unit and data are
/// replaced. Nothing is produced unless the whole series converts.
pub fn convert_profile(
    source: &EnergyProfile,
    target: ConversionTarget,
) -> Result<(EnergyProfile, ResamplingPlan), ConversionError> {
    let plan = ResamplingPlan::new(source.interval.minutes(), target.interval.minutes());
    let data = resample(&source.data, plan, source.unit, target.unit)?;

    let profile = EnergyProfile::new(target.interval, target.unit, data)
        .with_metadata(source.metadata.clone());
    Ok((profile, plan))
}

#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn ProfileStore>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    pub fn convert(
        &self,
        source: &EnergyProfile,
        target: ConversionTarget,
    ) -> Result<(EnergyProfile, ConversionSummary), ConversionError> {
        if source.unit == target.unit {
            tracing::debug!("Units {} and {} are equal, values keep their unit", source.unit, target.unit);
        } else {
            tracing::debug!("Converting values from {} to {}", source.unit, target.unit);
        }

        let (output, plan) = convert_profile(source, target)?;
        match plan.mode() {
            Mode::Downsample => tracing::debug!("Window size: {}", plan.window_size),
            Mode::Upsample => tracing::debug!("Padding size: {}", plan.padding),
        }
        tracing::trace!("Converted data: {:?}", output.data);

        let summary = ConversionSummary {
            plan,
            input_len: source.data.len(),
            output_len: output.data.len(),
        };
        Ok((output, summary))
    }

    pub async fn convert_file(
        &self,
        input: &Path,
        output: &Path,
        target: ConversionTarget,
    ) -> anyhow::Result<ConversionSummary> {
        tracing::info!("Reading profile from {}", input.display());
        let source = self.store.load(input).await?;

        let (converted, summary) = self
            .convert(&source, target)
            .with_context(|| format!("Failed to convert {}", input.display()))?;

        tracing::info!("Writing converted profile to {}", output.display());
        self.store.save(output, &converted).await?;

        Ok(summary)
    }
}
