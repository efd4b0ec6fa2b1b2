// Energy unit domain model
use super::error::ConversionError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnergyUnit {
    KilowattHour,
    WattHour,
    Kilojoule,
    Joule,
}

impl EnergyUnit {
    #[cfg(test)]
    pub const ALL: [EnergyUnit; 4] = [
        EnergyUnit::KilowattHour,
        EnergyUnit::WattHour,
        EnergyUnit::Kilojoule,
        EnergyUnit::Joule,
    ];

    /// Name used in profile records
    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyUnit::KilowattHour => "kWh",
            EnergyUnit::WattHour => "Wh",
            EnergyUnit::Kilojoule => "KJ",
            EnergyUnit::Joule => "J",
        }
    }
}

impl fmt::Display for EnergyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnergyUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kWh" => Ok(EnergyUnit::KilowattHour),
            "Wh" => Ok(EnergyUnit::WattHour),
            // Older profiles spell kilojoule both ways
            "KJ" | "kJ" => Ok(EnergyUnit::Kilojoule),
            "J" => Ok(EnergyUnit::Joule),
            other => Err(ConversionError::UnknownUnit(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_names() {
        for unit in EnergyUnit::ALL {
            assert_eq!(unit.as_str().parse::<EnergyUnit>().unwrap(), unit);
        }
        assert_eq!("kJ".parse::<EnergyUnit>().unwrap(), EnergyUnit::Kilojoule);
    }

    #[test]
    fn test_parse_rejects_unknown_unit() {
        let err = "MWh".parse::<EnergyUnit>().unwrap_err();
        assert!(matches!(err, ConversionError::UnknownUnit(ref u) if u == "MWh"));
    }
}
