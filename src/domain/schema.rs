//! Structured-output contract for one game record.
//!
//! The field table below is the single declaration of the record shape. It
//! is rendered into the provider's `responseSchema` and reused to check the
//! parsed JSON before it is turned into [`GameStats`](super::GameStats).

use crate::error::{GameError, Result};
use once_cell::sync::OnceCell;
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    StringArray,
}

impl FieldKind {
    fn schema(self) -> Value {
        match self {
            FieldKind::String => json!({ "type": "STRING" }),
            FieldKind::Number => json!({ "type": "NUMBER" }),
            FieldKind::StringArray => json!({ "type": "ARRAY", "items": { "type": "STRING" } }),
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::StringArray => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }

    fn label(self) -> &'static str {
        match self {
            FieldKind::String => "a string",
            FieldKind::Number => "a number",
            FieldKind::StringArray => "an array of strings",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub description: Option<&'static str>,
}

const fn field(name: &'static str, kind: FieldKind, required: bool) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        required,
        description: None,
    }
}

pub const GAME_FIELDS: &[FieldSpec] = &[
    field("id", FieldKind::String, true),
    field("name", FieldKind::String, true),
    field("currentPlayers", FieldKind::Number, true),
    field("peakPlayers24h", FieldKind::Number, false),
    field("allTimePeak", FieldKind::Number, false),
    FieldSpec {
        name: "totalSales",
        kind: FieldKind::String,
        required: true,
        description: Some(
            "Estimated total copies sold to date (e.g., '1.2M', '500k-1M', '25M+')",
        ),
    },
    field("currentPrice", FieldKind::String, true),
    field("discountPercentage", FieldKind::Number, false),
    field("releaseDate", FieldKind::String, false),
    field("developer", FieldKind::String, false),
    field("publisher", FieldKind::String, false),
    field("tags", FieldKind::StringArray, false),
    field("description", FieldKind::String, true),
    field("rating", FieldKind::String, false),
    field("headerImage", FieldKind::String, false),
    field("lastUpdated", FieldKind::String, false),
];

static GAME_SCHEMA: OnceCell<Value> = OnceCell::new();

/// Schema object for a single game record.
pub fn game_schema() -> &'static Value {
    GAME_SCHEMA.get_or_init(|| {
        let mut properties = Map::new();
        for spec in GAME_FIELDS {
            let mut schema = spec.kind.schema();
            if let (Some(description), Some(obj)) = (spec.description, schema.as_object_mut()) {
                obj.insert("description".to_string(), json!(description));
            }
            properties.insert(spec.name.to_string(), schema);
        }

        let required: Vec<&str> = GAME_FIELDS
            .iter()
            .filter(|spec| spec.required)
            .map(|spec| spec.name)
            .collect();

        json!({
            "type": "OBJECT",
            "properties": properties,
            "required": required,
        })
    })
}

/// Schema for the whole response: an array of game records.
pub fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": game_schema(),
    })
}

/// Checks one parsed record against [`GAME_FIELDS`].
///
/// `null` counts as absent. Unknown fields are ignored.
pub fn validate_record(index: usize, value: &Value) -> Result<()> {
    let object = value.as_object().ok_or_else(|| GameError::Schema {
        index,
        reason: "expected an object".to_string(),
    })?;

    for spec in GAME_FIELDS {
        match object.get(spec.name).filter(|v| !v.is_null()) {
            None if spec.required => {
                return Err(GameError::Schema {
                    index,
                    reason: format!("missing required field `{}`", spec.name),
                });
            }
            None => {}
            Some(v) if !spec.kind.matches(v) => {
                return Err(GameError::Schema {
                    index,
                    reason: format!("field `{}` must be {}", spec.name, spec.kind.label()),
                });
            }
            Some(_) => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_subset_matches_contract() {
        let required = game_schema()["required"].as_array().unwrap();
        let names: Vec<&str> = required.iter().filter_map(Value::as_str).collect();
        assert_eq!(
            names,
            vec!["id", "name", "currentPlayers", "totalSales", "currentPrice", "description"]
        );
    }

    #[test]
    fn every_field_is_declared_with_its_type() {
        let properties = game_schema()["properties"].as_object().unwrap();
        assert_eq!(properties.len(), 16);
        assert_eq!(properties["currentPlayers"]["type"], "NUMBER");
        assert_eq!(properties["tags"]["type"], "ARRAY");
        assert_eq!(properties["tags"]["items"]["type"], "STRING");
        assert!(properties["totalSales"]["description"]
            .as_str()
            .unwrap()
            .contains("copies sold"));
    }

    #[test]
    fn response_schema_wraps_record_in_array() {
        let schema = response_schema();
        assert_eq!(schema["type"], "ARRAY");
        assert_eq!(&schema["items"], game_schema());
    }

    #[test]
    fn rejects_wrong_primitive_type() {
        let record = json!({
            "id": "1",
            "name": "Foo",
            "currentPlayers": "lots",
            "currentPrice": "$1",
            "description": "d",
            "totalSales": "1M"
        });
        let err = validate_record(3, &record).unwrap_err();
        match err {
            GameError::Schema { index, reason } => {
                assert_eq!(index, 3);
                assert!(reason.contains("currentPlayers"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn null_required_field_counts_as_missing() {
        let record = json!({
            "id": "1",
            "name": null,
            "currentPlayers": 1,
            "currentPrice": "$1",
            "description": "d",
            "totalSales": "1M"
        });
        assert!(matches!(
            validate_record(0, &record),
            Err(GameError::Schema { .. })
        ));
    }

    #[test]
    fn rejects_non_string_tags() {
        let record = json!({
            "id": "1",
            "name": "Foo",
            "currentPlayers": 1,
            "currentPrice": "$1",
            "description": "d",
            "totalSales": "1M",
            "tags": ["FPS", 3]
        });
        assert!(validate_record(0, &record).is_err());
    }
}
