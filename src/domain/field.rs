// Field specifications and numeric encoding
use serde_json::Value;

/// Rendered in place of a field whose value is missing or of the wrong
/// runtime type.
pub const NOT_A_NUMBER: &str = "NaN";

/// Expected runtime type and scaling rule for a sensor field, independent of
/// what the payload actually carries for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticType {
    /// Floating-point source value, reported as the integer `trunc(v * 1000)`.
    ScaledDouble,
    /// Plain integer source value, reported verbatim.
    Integer,
}

/// One column of the output record: where to find it, how to label it, how
/// to encode it.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub semantic: SemanticType,
}

// The sibling sensor fleet (sht3x, shtc3, ds18b20) reports fixed-point
// millidegree/millipercent integers, so the floating-point Shelly values are
// scaled by 1000 to share one downstream numeric convention.
pub const SENSOR_FIELDS: [FieldSpec; 5] = [
    FieldSpec { key: "tC", label: "temp", semantic: SemanticType::ScaledDouble },
    FieldSpec { key: "rh", label: "humidity", semantic: SemanticType::ScaledDouble },
    FieldSpec { key: "rssi", label: "rssi", semantic: SemanticType::Integer },
    FieldSpec { key: "percent", label: "battery", semantic: SemanticType::Integer },
    FieldSpec { key: "V", label: "battV", semantic: SemanticType::ScaledDouble },
];

/// Encode a located value under the declared semantic type.
///
/// A missing value or a runtime-type mismatch degrades to "NaN" rather than
/// failing; one malformed field must never cost the rest of the record.
pub fn encode(value: Option<&Value>, semantic: SemanticType) -> String {
    let Some(value) = value else {
        return NOT_A_NUMBER.to_string();
    };

    match semantic {
        SemanticType::ScaledDouble => match value {
            // is_f64 distinguishes true floating-point payload values from
            // plain integers, which must not be accepted here.
            Value::Number(n) if n.is_f64() => {
                let scaled = (n.as_f64().unwrap_or_default() * 1000.0) as i64;
                scaled.to_string()
            }
            _ => NOT_A_NUMBER.to_string(),
        },
        SemanticType::Integer => match value {
            Value::Number(n) if !n.is_f64() => n.to_string(),
            _ => NOT_A_NUMBER.to_string(),
        },
    }
}
