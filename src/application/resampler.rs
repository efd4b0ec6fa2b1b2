// Resampling engine - Averages or replicates samples between intervals
use crate::domain::conversion::convert;
use crate::domain::error::ConversionError;
use crate::domain::unit::EnergyUnit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Downsample,
    Upsample,
}

/// How one run walks the source series.
///
/// Downsampling averages `window_size` samples into one; upsampling repeats
/// each sample `padding` times. Equal intervals take the upsampling path with
/// `padding == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResamplingPlan {
    pub window_size: usize,
    pub padding: usize,
}

impl ResamplingPlan {
    /// Intervals are minutes and must be positive.
    pub fn new(source_interval: u32, target_interval: u32) -> Self {
        if source_interval < target_interval {
            Self {
                window_size: (target_interval / source_interval) as usize,
                padding: 0,
            }
        } else {
            Self {
                window_size: 1,
                padding: (source_interval / target_interval) as usize,
            }
        }
    }

    pub fn mode(&self) -> Mode {
        if self.padding == 0 {
            Mode::Downsample
        } else {
            Mode::Upsample
        }
    }

    pub fn output_len(&self, input_len: usize) -> usize {
        match self.mode() {
            Mode::Downsample => input_len.div_ceil(self.window_size),
            Mode::Upsample => input_len * self.padding,
        }
    }
}

/// Splits `samples` into consecutive chunks of `window_size`. The last chunk
/// is shorter when the length is not a multiple of the window.
pub fn windows(samples: &[f64], window_size: usize) -> Result<Vec<&[f64]>, ConversionError> {
    if window_size == 0 || samples.len() < window_size {
        return Err(ConversionError::InsufficientData {
            len: samples.len(),
            window_size,
        });
    }

    let mut chunks = Vec::with_capacity(samples.len().div_ceil(window_size));
    let mut position = 0;
    while position < samples.len() {
        let end = (position + window_size).min(samples.len());
        chunks.push(&samples[position..end]);
        position += window_size;
    }
    Ok(chunks)
}

pub fn resample(
    samples: &[f64],
    plan: ResamplingPlan,
    from: EnergyUnit,
    to: EnergyUnit,
) -> Result<Vec<f64>, ConversionError> {
    let chunks = windows(samples, plan.window_size)?;
    let mut output = Vec::with_capacity(plan.output_len(samples.len()));

    for chunk in chunks {
        match plan.mode() {
            Mode::Downsample => {
                // A short final chunk is still divided by the full window size
                let average = chunk.iter().sum::<f64>() / plan.window_size as f64;
                output.push(convert(average, from, to)?);
            }
            Mode::Upsample => {
                let value = convert(chunk[0], from, to)?;
                output.extend(std::iter::repeat_n(value, plan.padding));
            }
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use EnergyUnit::*;

    #[test]
    fn test_plan_modes() {
        assert_eq!(ResamplingPlan::new(15, 60), ResamplingPlan { window_size: 4, padding: 0 });
        assert_eq!(ResamplingPlan::new(60, 15), ResamplingPlan { window_size: 1, padding: 4 });
        assert_eq!(ResamplingPlan::new(30, 30), ResamplingPlan { window_size: 1, padding: 1 });
        assert_eq!(ResamplingPlan::new(1, 1440).mode(), Mode::Downsample);
        assert_eq!(ResamplingPlan::new(1440, 5).padding, 288);
    }

    #[test]
    fn test_windows_keeps_short_tail() {
        let samples = [1.0, 2.0, 3.0, 4.0, 5.0];
        let chunks = windows(&samples, 2).unwrap();
        assert_eq!(chunks, vec![&[1.0, 2.0][..], &[3.0, 4.0][..], &[5.0][..]]);
    }

    #[test]
    fn test_windows_rejects_short_series() {
        assert_eq!(
            windows(&[1.0, 2.0], 4),
            Err(ConversionError::InsufficientData { len: 2, window_size: 4 })
        );
        assert!(windows(&[], 1).is_err());
    }

    #[test]
    fn test_downsample_averages_window() {
        let out = resample(&[1.0, 2.0, 3.0, 4.0], ResamplingPlan::new(15, 60), KilowattHour, KilowattHour).unwrap();
        assert_eq!(out, vec![2.5]);
    }

    #[test]
    fn test_downsample_short_tail_uses_nominal_window() {
        let out = resample(&[1.0, 2.0, 3.0], ResamplingPlan::new(15, 60), KilowattHour, KilowattHour);
        assert_eq!(
            out,
            Err(ConversionError::InsufficientData { len: 3, window_size: 4 })
        );

        let out = resample(
            &[4.0, 4.0, 4.0, 4.0, 1.0, 2.0, 3.0],
            ResamplingPlan::new(15, 60),
            KilowattHour,
            KilowattHour,
        )
        .unwrap();
        assert_eq!(out, vec![4.0, 1.5]);
    }

    #[test]
    fn test_upsample_replicates_converted_value() {
        let out = resample(&[2.0], ResamplingPlan::new(60, 15), KilowattHour, WattHour).unwrap();
        assert_eq!(out, vec![2000.0; 4]);
    }

    #[test]
    fn test_equal_intervals_convert_in_place() {
        let samples = [1.0, 2.5, 0.0];
        let out = resample(&samples, ResamplingPlan::new(15, 15), Kilojoule, Joule).unwrap();
        assert_eq!(out, vec![1000.0, 2500.0, 0.0]);
    }

    #[test]
    fn test_output_lengths() {
        let samples: Vec<f64> = (0..97).map(f64::from).collect();
        for (source, target) in [(1, 5), (5, 60), (15, 60), (1, 1440), (60, 15), (1440, 60), (30, 30)] {
            let plan = ResamplingPlan::new(source, target);
            if samples.len() < plan.window_size {
                continue;
            }
            let out = resample(&samples, plan, Joule, WattHour).unwrap();
            let expected = match plan.mode() {
                Mode::Downsample => samples.len().div_ceil(plan.window_size),
                Mode::Upsample => samples.len() * plan.padding,
            };
            assert_eq!(out.len(), expected, "{source} -> {target}");
            assert_eq!(out.len(), plan.output_len(samples.len()));
        }
    }
}
