// Energy profile domain model
use super::error::ConversionError;
use super::interval::Interval;
use super::unit::EnergyUnit;
use serde_json::{Map, Value};

pub const INTERVAL_FIELD: &str = "interval_in_minutes";
pub const UNIT_FIELD: &str = "unit";
pub const DATA_FIELD: &str = "data";

/// A series of energy readings plus the metadata that travels with it.
///
/// Every field other than `interval_in_minutes`, `unit` and `data` is kept in
/// `metadata` verbatim and in its original order.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyProfile {
    pub metadata: Map<String, Value>,
    pub interval: Interval,
    pub unit: EnergyUnit,
    pub data: Vec<f64>,
}

impl EnergyProfile {
    pub fn new(interval: Interval, unit: EnergyUnit, data: Vec<f64>) -> Self {
        Self {
            metadata: Map::new(),
            interval,
            unit,
            data,
        }
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn to_value(&self) -> Value {
        let mut record = self.metadata.clone();
        record.insert(INTERVAL_FIELD.to_string(), Value::from(self.interval.minutes()));
        record.insert(UNIT_FIELD.to_string(), Value::from(self.unit.as_str()));
        record.insert(
            DATA_FIELD.to_string(),
            Value::Array(self.data.iter().map(|v| json_number(*v)).collect()),
        );
        Value::Object(record)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, ConversionError> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| ConversionError::MalformedProfile(format!("invalid JSON: {e}")))?;
        Self::try_from(value)
    }
}

impl TryFrom<Value> for EnergyProfile {
    type Error = ConversionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(mut metadata) = value else {
            return Err(ConversionError::MalformedProfile(
                "profile must be a JSON object".to_string(),
            ));
        };

        let interval = parse_interval(take_field(&mut metadata, INTERVAL_FIELD)?)?;
        let unit = parse_unit(take_field(&mut metadata, UNIT_FIELD)?)?;
        let data = parse_data(take_field(&mut metadata, DATA_FIELD)?)?;

        Ok(Self {
            metadata,
            interval,
            unit,
            data,
        })
    }
}

fn take_field(record: &mut Map<String, Value>, name: &str) -> Result<Value, ConversionError> {
    record
        .shift_remove(name)
        .ok_or_else(|| ConversionError::MalformedProfile(format!("missing field '{name}'")))
}

// Legacy files store the interval as a string
fn parse_interval(value: Value) -> Result<Interval, ConversionError> {
    match value {
        Value::Number(n) => {
            let minutes = n
                .as_u64()
                .and_then(|m| u32::try_from(m).ok())
                .ok_or_else(|| {
                    ConversionError::MalformedProfile(format!(
                        "'{INTERVAL_FIELD}' must be a positive whole number, got {n}"
                    ))
                })?;
            Interval::new(minutes)
        }
        Value::String(s) => s.parse(),
        other => Err(ConversionError::MalformedProfile(format!(
            "'{INTERVAL_FIELD}' must be a number, got {other}"
        ))),
    }
}

fn parse_unit(value: Value) -> Result<EnergyUnit, ConversionError> {
    match value {
        Value::String(s) => s.parse(),
        other => Err(ConversionError::MalformedProfile(format!(
            "'{UNIT_FIELD}' must be a string, got {other}"
        ))),
    }
}

/// Flattens nested groups, which older converters wrote for replicated values.
fn parse_data(value: Value) -> Result<Vec<f64>, ConversionError> {
    let Value::Array(entries) = value else {
        return Err(ConversionError::MalformedProfile(format!(
            "'{DATA_FIELD}' must be an array"
        )));
    };

    let mut samples = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match entry {
            Value::Array(group) => {
                for inner in group {
                    samples.push(sample(inner, index)?);
                }
            }
            scalar => samples.push(sample(scalar, index)?),
        }
    }
    Ok(samples)
}

fn sample(value: &Value, index: usize) -> Result<f64, ConversionError> {
    value.as_f64().ok_or_else(|| {
        ConversionError::MalformedProfile(format!(
            "'{DATA_FIELD}[{index}]' is not a number: {value}"
        ))
    })
}

// JSON has no NaN or infinity
fn json_number(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_keeps_passthrough_fields_in_order() {
        let profile = EnergyProfile::try_from(json!({
            "site": "north",
            "interval_in_minutes": 15,
            "meter": {"id": 7},
            "unit": "kWh",
            "data": [1, 2.5, 3]
        }))
        .unwrap();

        assert_eq!(profile.interval.minutes(), 15);
        assert_eq!(profile.unit, EnergyUnit::KilowattHour);
        assert_eq!(profile.data, vec![1.0, 2.5, 3.0]);
        let keys: Vec<&str> = profile.metadata.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["site", "meter"]);
    }

    #[test]
    fn test_parse_accepts_string_interval_and_nested_groups() {
        let profile = EnergyProfile::try_from(json!({
            "interval_in_minutes": "60",
            "unit": "KJ",
            "data": [[1, 1], 2, [3]]
        }))
        .unwrap();

        assert_eq!(profile.interval.minutes(), 60);
        assert_eq!(profile.data, vec![1.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_missing_fields_are_malformed() {
        for missing in [INTERVAL_FIELD, UNIT_FIELD, DATA_FIELD] {
            let mut record = json!({
                "interval_in_minutes": 15,
                "unit": "Wh",
                "data": [1]
            });
            record.as_object_mut().unwrap().remove(missing);

            let err = EnergyProfile::try_from(record).unwrap_err();
            assert_eq!(
                err,
                ConversionError::MalformedProfile(format!("missing field '{missing}'"))
            );
        }
    }

    #[test]
    fn test_rejects_non_numeric_samples() {
        let err = EnergyProfile::try_from(json!({
            "interval_in_minutes": 15,
            "unit": "Wh",
            "data": [1, "two"]
        }))
        .unwrap_err();
        assert!(matches!(err, ConversionError::MalformedProfile(msg) if msg.contains("data[1]")));
    }

    #[test]
    fn test_rejects_unsupported_interval_and_unit() {
        let interval = EnergyProfile::try_from(json!({
            "interval_in_minutes": 10, "unit": "Wh", "data": []
        }));
        assert_eq!(interval.unwrap_err(), ConversionError::UnsupportedInterval(10));

        let unit = EnergyProfile::try_from(json!({
            "interval_in_minutes": 15, "unit": "cal", "data": []
        }));
        assert_eq!(unit.unwrap_err(), ConversionError::UnknownUnit("cal".to_string()));
    }

    #[test]
    fn test_to_value_writes_wire_fields() {
        let mut metadata = Map::new();
        metadata.insert("site".to_string(), json!("north"));
        let profile = EnergyProfile::new(Interval::new(60).unwrap(), EnergyUnit::Kilojoule, vec![1.5, 2.0])
            .with_metadata(metadata);

        assert_eq!(
            profile.to_value(),
            json!({
                "site": "north",
                "interval_in_minutes": 60,
                "unit": "KJ",
                "data": [1.5, 2.0]
            })
        );
    }

    #[test]
    fn test_from_slice_reports_invalid_json() {
        let err = EnergyProfile::from_slice(b"{ not json").unwrap_err();
        assert!(matches!(err, ConversionError::MalformedProfile(msg) if msg.starts_with("invalid JSON")));
    }
}
