// Sampling interval domain model
use super::error::ConversionError;
use std::fmt;
use std::str::FromStr;

/// Sampling intervals accepted at the system boundary, in minutes
pub const ALLOWED_INTERVALS: [u32; 6] = [1, 5, 15, 30, 60, 1440];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval(u32);

impl Interval {
    pub fn new(minutes: u32) -> Result<Self, ConversionError> {
        if ALLOWED_INTERVALS.contains(&minutes) {
            Ok(Self(minutes))
        } else {
            Err(ConversionError::UnsupportedInterval(minutes))
        }
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }
}

impl FromStr for Interval {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let minutes = s
            .trim()
            .parse::<u32>()
            .map_err(|_| ConversionError::MalformedProfile(format!("interval '{s}' is not a whole number of minutes")))?;
        Self::new(minutes)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}min", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_intervals() {
        for minutes in ALLOWED_INTERVALS {
            assert_eq!(Interval::new(minutes).unwrap().minutes(), minutes);
        }
    }

    #[test]
    fn test_rejects_other_intervals() {
        assert_eq!(Interval::new(0), Err(ConversionError::UnsupportedInterval(0)));
        assert_eq!(Interval::new(10), Err(ConversionError::UnsupportedInterval(10)));
    }

    #[test]
    fn test_parse_from_string() {
        assert_eq!(" 60".parse::<Interval>().unwrap().minutes(), 60);
        assert!(matches!(
            "hourly".parse::<Interval>(),
            Err(ConversionError::MalformedProfile(_))
        ));
    }
}
