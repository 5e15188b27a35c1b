// Popup body shown when a district is selected.
use serde_json::Value;

use crate::models::FeatureProperties;

/// Attribute fields shown in the popup, in display order.
const DISPLAY_FIELDS: [(&str, &str); 6] = [
    ("S_NAME", "地区名"),
    ("AREA", "面積"),
    ("総人口", "人口"),
    ("世帯数", "世帯数"),
    ("男性", "男性"),
    ("女性", "女性"),
];

/// Render the attribute table of a clicked district as popup HTML. Fields
/// that are absent, null or empty are left out; the rest keep the declared
/// order regardless of how the dataset orders its columns.
pub fn district_popup_html(props: &FeatureProperties) -> String {
    let mut body = String::from(r#"<div style="font-family: sans-serif; font-size: 12px;">"#);
    body.push_str(r#"<h3 style="margin: 0 0 10px 0;">地区情報</h3>"#);

    for (field, label) in DISPLAY_FIELDS {
        if let Some(text) = display_value(props.get(field)) {
            body.push_str(&format!(
                r#"<div style="margin-bottom: 5px;"><strong>{}:</strong> {}</div>"#,
                label, text
            ));
        }
    }

    body.push_str("</div>");
    body
}

fn display_value(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(entries: &[(&str, Value)]) -> FeatureProperties {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn popup_lists_fields_in_declared_order() {
        let props = props(&[
            ("女性", json!(240)),
            ("S_NAME", json!("Chuo")),
            ("総人口", json!(500)),
        ]);
        let html = district_popup_html(&props);

        let name = html.find("地区名:</strong> Chuo").unwrap();
        let population = html.find("人口:</strong> 500").unwrap();
        let female = html.find("女性:</strong> 240").unwrap();
        assert!(name < population && population < female);
    }

    #[test]
    fn popup_omits_null_empty_and_missing_fields() {
        let props = props(&[
            ("S_NAME", json!("Chuo")),
            ("AREA", Value::Null),
            ("世帯数", json!("")),
        ]);
        let html = district_popup_html(&props);

        assert!(html.contains("地区名:</strong> Chuo"));
        assert!(!html.contains("面積"));
        assert!(!html.contains("世帯数"));
        assert!(!html.contains("人口"));
    }

    #[test]
    fn popup_always_carries_the_heading() {
        let html = district_popup_html(&FeatureProperties::new());
        assert!(html.contains("地区情報"));
        assert!(html.starts_with("<div"));
        assert!(html.ends_with("</div>"));
    }
}
