// This is the models module containing shared data structures
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Geographic coordinate as the engine hands it to click handlers.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

/// Attribute table of a boundary feature, as deserialized from the engine's
/// feature `properties` object.
pub type FeatureProperties = serde_json::Map<String, Value>;

/// Read a field as display text. Missing fields and nulls read as the empty
/// string; non-string scalars keep their JSON rendering.
pub fn string_field(props: &FeatureProperties, field: &str) -> String {
    match props.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_field_reads_strings_and_numbers() {
        let mut props = FeatureProperties::new();
        props.insert("S_NAME".to_string(), json!("Chuo"));
        props.insert("総人口".to_string(), json!(500));

        assert_eq!(string_field(&props, "S_NAME"), "Chuo");
        assert_eq!(string_field(&props, "総人口"), "500");
    }

    #[test]
    fn string_field_treats_missing_and_null_as_empty() {
        let mut props = FeatureProperties::new();
        props.insert("AREA".to_string(), Value::Null);

        assert_eq!(string_field(&props, "AREA"), "");
        assert_eq!(string_field(&props, "S_NAME"), "");
    }
}
