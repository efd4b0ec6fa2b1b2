// Unit conversion table and converter
use super::error::ConversionError;
use super::unit::EnergyUnit;
use super::unit::EnergyUnit::{Joule, Kilojoule, KilowattHour, WattHour};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    Multiply(f64),
    Divide(f64),
}

impl Operation {
    pub fn apply(&self, value: f64) -> f64 {
        match *self {
            Operation::Multiply(factor) => value * factor,
            Operation::Divide(factor) => value / factor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitPair {
    pub from: EnergyUnit,
    pub to: EnergyUnit,
}

const fn pair(from: EnergyUnit, to: EnergyUnit) -> UnitPair {
    UnitPair { from, to }
}

/// One rule per ordered pair of distinct units. Same-unit pairs are absent,
/// `convert` returns before any lookup for those.
pub const CONVERSION_TABLE: [(UnitPair, Operation); 12] = [
    (pair(KilowattHour, WattHour), Operation::Multiply(1000.0)),
    (pair(KilowattHour, Kilojoule), Operation::Multiply(3600.0)),
    (pair(KilowattHour, Joule), Operation::Multiply(3_600_000.0)),
    (pair(WattHour, KilowattHour), Operation::Divide(1000.0)),
    (pair(WattHour, Kilojoule), Operation::Multiply(3.6)),
    (pair(WattHour, Joule), Operation::Multiply(3600.0)),
    (pair(Kilojoule, KilowattHour), Operation::Divide(3600.0)),
    (pair(Kilojoule, WattHour), Operation::Divide(3.6)),
    (pair(Kilojoule, Joule), Operation::Multiply(1000.0)),
    (pair(Joule, KilowattHour), Operation::Divide(3_600_000.0)),
    (pair(Joule, WattHour), Operation::Divide(3600.0)),
    (pair(Joule, Kilojoule), Operation::Divide(1000.0)),
];

pub fn lookup_rule(from: EnergyUnit, to: EnergyUnit) -> Option<Operation> {
    let key = pair(from, to);
    CONVERSION_TABLE
        .iter()
        .find(|(p, _)| *p == key)
        .map(|(_, op)| *op)
}

/// Convert `value` from one energy unit to another.
///
/// Identical units return the value untouched without consulting the table.
/// A missing rule is a defect in `CONVERSION_TABLE`, reported as
/// [`ConversionError::InvalidConversionRule`].
pub fn convert(value: f64, from: EnergyUnit, to: EnergyUnit) -> Result<f64, ConversionError> {
    if from == to {
        return Ok(value);
    }

    lookup_rule(from, to)
        .map(|op| op.apply(value))
        .ok_or(ConversionError::InvalidConversionRule { from, to })
}
