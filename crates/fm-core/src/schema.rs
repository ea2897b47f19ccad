//! JSON Schema generation for the fire document.
//!
//! ```bash
//! # List available schema types
//! fm-core schema --list
//!
//! # Generate schema for a specific type
//! fm-core schema FireDocument
//!
//! # Generate all schemas
//! fm-core schema --all
//! ```

use schemars::schema_for;
use serde_json::Value;
use std::collections::BTreeMap;

pub use fm_common::{Consumption, Fire, FireDocument, FireId, PlumeriseHour, TimeWindow};

/// Available schema types with their descriptions.
pub fn available_schemas() -> Vec<(&'static str, &'static str)> {
    vec![
        ("FireDocument", "Top-level document: a list of fire records"),
        ("Fire", "Single fire record with hourly series"),
        ("FireId", "Fire identifier"),
        (
            "PlumeriseHour",
            "Plume-rise profile: emission fractions over height bins",
        ),
        ("Consumption", "Consumption amount or category tree"),
        ("TimeWindow", "UTC met-data time window"),
    ]
}

/// Generate JSON Schema for a type by name.
///
/// Returns None if the type is unknown.
pub fn generate_schema(type_name: &str) -> Option<Value> {
    let schema = match type_name {
        "FireDocument" => schema_for!(FireDocument),
        "Fire" => schema_for!(Fire),
        "FireId" => schema_for!(FireId),
        "PlumeriseHour" => schema_for!(PlumeriseHour),
        "Consumption" => schema_for!(Consumption),
        "TimeWindow" => schema_for!(TimeWindow),
        _ => return None,
    };

    serde_json::to_value(schema).ok()
}

/// Generate all schemas as a map from type name to schema.
pub fn generate_all_schemas() -> BTreeMap<String, Value> {
    available_schemas()
        .into_iter()
        .filter_map(|(name, _)| generate_schema(name).map(|s| (name.to_string(), s)))
        .collect()
}

/// Schema output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// Pretty-printed JSON (default)
    Json,
    /// Compact single-line JSON
    JsonCompact,
}

/// Format a schema value for output.
pub fn format_schema(schema: &Value, format: SchemaFormat) -> String {
    let out = match format {
        SchemaFormat::Json => serde_json::to_string_pretty(schema),
        SchemaFormat::JsonCompact => serde_json::to_string(schema),
    };
    out.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_schemas_generate() {
        for (name, _desc) in available_schemas() {
            assert!(
                generate_schema(name).is_some(),
                "Schema for '{}' should generate",
                name
            );
        }
    }

    #[test]
    fn test_unknown_schema_returns_none() {
        assert!(generate_schema("UnknownType").is_none());
        assert!(generate_schema("").is_none());
    }

    #[test]
    fn test_fire_schema_lists_fields() {
        let schema = generate_schema("Fire").unwrap();
        let props = &schema["properties"];
        for field in ["id", "start", "end", "area", "latitude", "longitude", "plumerise"] {
            assert!(props.get(field).is_some(), "missing {}", field);
        }
    }

    #[test]
    fn test_generate_all_schemas() {
        let all = generate_all_schemas();
        assert_eq!(all.len(), available_schemas().len());
        assert!(all.contains_key("FireDocument"));
    }

    #[test]
    fn test_format_schema() {
        let schema = generate_schema("TimeWindow").unwrap();
        let pretty = format_schema(&schema, SchemaFormat::Json);
        let compact = format_schema(&schema, SchemaFormat::JsonCompact);
        assert!(pretty.contains('\n'));
        assert!(!compact.contains('\n'));
    }
}
