use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::DomainError;

/// Rendered in place of a feature a car's spec map does not cover.
pub const MISSING_SPEC_VALUE: &str = "-";

/// Two free-form car identifiers awaiting comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRequest {
    car1: String,
    car2: String,
}

impl ComparisonRequest {
    /// Both identifiers must be non-blank; they are otherwise taken verbatim
    /// (trimmed) and left for the model to recognize.
    pub fn new(car1: &str, car2: &str) -> Result<Self, DomainError> {
        let car1 = car1.trim();
        let car2 = car2.trim();

        if car1.is_empty() || car2.is_empty() {
            return Err(DomainError::empty_input(
                "both car identifiers are required for a comparison",
            ));
        }

        Ok(Self {
            car1: car1.to_string(),
            car2: car2.to_string(),
        })
    }

    pub fn car1(&self) -> &str {
        &self.car1
    }

    pub fn car2(&self) -> &str {
        &self.car2
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarSpecs {
    name: String,
    specs: BTreeMap<String, String>,
}

impl CarSpecs {
    pub fn new(name: impl Into<String>, specs: BTreeMap<String, String>) -> Self {
        Self {
            name: name.into(),
            specs,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn spec(&self, feature: &str) -> Option<&str> {
        self.specs.get(feature).map(String::as_str)
    }

    /// Value for `feature`, or [`MISSING_SPEC_VALUE`] when the car has none.
    pub fn display_value(&self, feature: &str) -> &str {
        self.spec(feature).unwrap_or(MISSING_SPEC_VALUE)
    }
}

/// One rendered line of a comparison table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonRow<'a> {
    pub feature: &'a str,
    pub car1_value: &'a str,
    pub car2_value: &'a str,
}

/// Side-by-side technical comparison of two cars.
///
/// `features` fixes the row order. Duplicate feature names are kept as-is and
/// features absent from a car's `specs` render as [`MISSING_SPEC_VALUE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonData {
    features: Vec<String>,
    car1: CarSpecs,
    car2: CarSpecs,
}

impl ComparisonData {
    pub fn new(features: Vec<String>, car1: CarSpecs, car2: CarSpecs) -> Self {
        Self {
            features,
            car1,
            car2,
        }
    }

    /// Output schema declared to the model for comparison requests.
    ///
    /// Uses the OpenAPI subset understood by `responseSchema`. The model treats
    /// it as a hint only; [`ComparisonData::parse`] still validates the reply.
    pub fn response_schema() -> Value {
        let car = json!({
            "type": "OBJECT",
            "properties": {
                "name": { "type": "STRING" },
                "specs": {
                    "type": "OBJECT",
                    "additionalProperties": { "type": "STRING" }
                }
            },
            "required": ["name", "specs"]
        });

        json!({
            "type": "OBJECT",
            "properties": {
                "features": { "type": "ARRAY", "items": { "type": "STRING" } },
                "car1": car.clone(),
                "car2": car
            },
            "required": ["features", "car1", "car2"]
        })
    }

    /// Parse and validate the raw text a schema-constrained call returned.
    ///
    /// Fails with [`DomainError::SchemaValidation`] on malformed JSON, a wrong
    /// top-level shape, missing or mistyped fields, or a blank car name. A
    /// single surrounding markdown code fence is tolerated; nothing else is.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let payload = strip_code_fence(raw);

        if payload.is_empty() {
            return Err(DomainError::schema_validation("model returned an empty payload"));
        }

        let data: ComparisonData = serde_json::from_str(payload).map_err(|e| {
            DomainError::schema_validation(format!("comparison payload does not match schema: {e}"))
        })?;

        for (field, car) in [("car1", &data.car1), ("car2", &data.car2)] {
            if car.name.trim().is_empty() {
                return Err(DomainError::schema_validation(format!(
                    "comparison payload has an empty {field}.name"
                )));
            }
        }

        Ok(data)
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn car1(&self) -> &CarSpecs {
        &self.car1
    }

    pub fn car2(&self) -> &CarSpecs {
        &self.car2
    }

    pub fn row_count(&self) -> usize {
        self.features.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = ComparisonRow<'_>> {
        self.features.iter().map(|feature| ComparisonRow {
            feature: feature.as_str(),
            car1_value: self.car1.display_value(feature),
            car2_value: self.car2.display_value(feature),
        })
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();

    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = inner.strip_suffix("```") else {
        return trimmed;
    };

    // Drop the optional info string ("json") on the opening fence line. A line
    // opening with `{` or `[` is already the payload.
    match inner.split_once('\n') {
        Some((info, body)) if is_info_string(info.trim()) => body.trim(),
        _ => inner.trim(),
    }
}

fn is_info_string(line: &str) -> bool {
    !line.starts_with(['{', '[']) && !line.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAMRY_ACCORD: &str = r#"{"features":["Engine"],"car1":{"name":"Toyota Camry 2024","specs":{"Engine":"2.5L"}},"car2":{"name":"Honda Accord 2024","specs":{"Engine":"1.5L Turbo"}}}"#;

    #[test]
    fn test_parse_valid_payload() {
        let data = ComparisonData::parse(CAMRY_ACCORD).unwrap();

        assert_eq!(data.row_count(), 1);
        assert_eq!(data.car1().name(), "Toyota Camry 2024");
        assert_eq!(data.car2().spec("Engine"), Some("1.5L Turbo"));
    }

    #[test]
    fn test_parse_rejects_prose() {
        let err = ComparisonData::parse("The Camry is more reliable than the Accord.").unwrap_err();
        assert!(err.is_schema_validation());
    }

    #[test]
    fn test_parse_rejects_prose_with_embedded_json() {
        let raw = format!("Here is your table: {CAMRY_ACCORD}");
        assert!(ComparisonData::parse(&raw).unwrap_err().is_schema_validation());
    }

    #[test]
    fn test_parse_rejects_missing_required_field() {
        let raw = r#"{"features":["Engine"],"car1":{"name":"A","specs":{}}}"#;
        let err = ComparisonData::parse(raw).unwrap_err();
        assert!(err.to_string().contains("car2"));
    }

    #[test]
    fn test_parse_rejects_missing_specs() {
        let raw = r#"{"features":[],"car1":{"name":"A"},"car2":{"name":"B","specs":{}}}"#;
        assert!(ComparisonData::parse(raw).unwrap_err().is_schema_validation());
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        let raw = r#"{"features":"Engine","car1":{"name":"A","specs":{}},"car2":{"name":"B","specs":{}}}"#;
        assert!(ComparisonData::parse(raw).unwrap_err().is_schema_validation());

        let raw = r#"{"features":["Power"],"car1":{"name":"A","specs":{"Power":203}},"car2":{"name":"B","specs":{}}}"#;
        assert!(ComparisonData::parse(raw).unwrap_err().is_schema_validation());
    }

    #[test]
    fn test_parse_rejects_wrong_top_level_shape() {
        assert!(ComparisonData::parse("[1, 2, 3]").unwrap_err().is_schema_validation());
        assert!(ComparisonData::parse("").unwrap_err().is_schema_validation());
    }

    #[test]
    fn test_parse_rejects_blank_name() {
        let raw = r#"{"features":[],"car1":{"name":"  ","specs":{}},"car2":{"name":"B","specs":{}}}"#;
        let err = ComparisonData::parse(raw).unwrap_err();
        assert!(err.to_string().contains("car1.name"));
    }

    #[test]
    fn test_parse_unwraps_code_fence() {
        let raw = format!("```json\n{CAMRY_ACCORD}\n```");
        let data = ComparisonData::parse(&raw).unwrap();
        assert_eq!(data.car2().name(), "Honda Accord 2024");
    }

    #[test]
    fn test_parse_keeps_json_on_opening_fence_line() {
        let raw = format!("```{CAMRY_ACCORD}\n```");
        let data = ComparisonData::parse(&raw).unwrap();
        assert_eq!(data.car1().name(), "Toyota Camry 2024");
        assert_eq!(data.row_count(), 1);

        let bare = format!("```{CAMRY_ACCORD}```");
        assert!(ComparisonData::parse(&bare).is_ok());
    }

    #[test]
    fn test_missing_spec_renders_placeholder() {
        let raw = r#"{"features":["Engine","Seats"],"car1":{"name":"A","specs":{"Engine":"V6","Seats":"5"}},"car2":{"name":"B","specs":{"Engine":"I4"}}}"#;
        let data = ComparisonData::parse(raw).unwrap();
        let rows: Vec<_> = data.rows().collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].feature, "Seats");
        assert_eq!(rows[1].car1_value, "5");
        assert_eq!(rows[1].car2_value, MISSING_SPEC_VALUE);
    }

    #[test]
    fn test_duplicate_features_are_kept() {
        let raw = r#"{"features":["Engine","Engine"],"car1":{"name":"A","specs":{"Engine":"V6"}},"car2":{"name":"B","specs":{"Engine":"I4"}}}"#;
        let data = ComparisonData::parse(raw).unwrap();
        assert_eq!(data.rows().count(), 2);
    }

    #[test]
    fn test_feature_map_survives_schema_round_trip() {
        let specs1: BTreeMap<String, String> = [
            ("Engine", "2.5L"),
            ("Horsepower", "203 hp"),
            ("Price", "$28,400"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let specs2: BTreeMap<String, String> = [("Engine", "1.5L Turbo"), ("Horsepower", "192 hp")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let features = vec![
            "Engine".to_string(),
            "Horsepower".to_string(),
            "Price".to_string(),
        ];
        let original = ComparisonData::new(
            features,
            CarSpecs::new("Toyota Camry 2024", specs1),
            CarSpecs::new("Honda Accord 2024", specs2),
        );

        let encoded = serde_json::to_string(&original).unwrap();
        let decoded = ComparisonData::parse(&encoded).unwrap();

        for feature in original.features() {
            for (before, after) in [
                (original.car1(), decoded.car1()),
                (original.car2(), decoded.car2()),
            ] {
                assert_eq!(before.spec(feature), after.spec(feature));
            }
        }
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_response_schema_requires_all_fields() {
        let schema = ComparisonData::response_schema();

        assert_eq!(schema["required"], json!(["features", "car1", "car2"]));
        assert_eq!(schema["properties"]["features"]["items"]["type"], "STRING");
        assert_eq!(
            schema["properties"]["car2"]["properties"]["specs"]["additionalProperties"]["type"],
            "STRING"
        );
    }

    #[test]
    fn test_comparison_request_requires_both_cars() {
        assert!(ComparisonRequest::new("", "Honda Accord").unwrap_err().is_empty_input());
        assert!(ComparisonRequest::new("Camry", "   ").unwrap_err().is_empty_input());

        let request = ComparisonRequest::new(" Toyota Camry 2024 ", "Honda Accord 2024").unwrap();
        assert_eq!(request.car1(), "Toyota Camry 2024");
    }
}
