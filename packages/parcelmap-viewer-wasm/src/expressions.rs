// Constructors for the engine's declarative expression language.
use serde_json::{json, Value};

/// Piecewise-linear interpolation over the map zoom level. Stops must be in
/// increasing zoom order; the engine leaves the result undefined otherwise.
pub fn zoom_interpolation(stops: &[(f64, f64)]) -> Value {
    let mut expr = vec![json!("interpolate"), json!(["linear"]), json!(["zoom"])];
    for (zoom, value) in stops {
        expr.push(json!(zoom));
        expr.push(json!(value));
    }
    Value::Array(expr)
}

/// Exact string-equality filter on a feature field.
pub fn field_equals(field: &str, value: &str) -> Value {
    json!(["==", field, value])
}

/// Layout expression reading a feature field.
pub fn get_field(field: &str) -> Value {
    json!(["get", field])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_interpolation_flattens_stops_in_order() {
        let expr = zoom_interpolation(&[(16.5, 0.0), (17.5, 0.6)]);
        assert_eq!(
            expr,
            json!(["interpolate", ["linear"], ["zoom"], 16.5, 0.0, 17.5, 0.6])
        );
    }

    #[test]
    fn field_equals_builds_an_equality_predicate() {
        assert_eq!(field_equals("S_NAME", "Chuo"), json!(["==", "S_NAME", "Chuo"]));
        assert_eq!(field_equals("S_NAME", ""), json!(["==", "S_NAME", ""]));
    }

    #[test]
    fn get_field_reads_a_property() {
        assert_eq!(get_field("表示名称"), json!(["get", "表示名称"]));
    }
}
