//! Loading the style specification document.
//!
//! The document is kept as raw JSON here; turning entries into typed
//! definitions is `lower`'s job.
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{GenerateError, Result, SchemaError};

#[derive(Debug, Clone)]
pub struct StyleSpec {
    doc: Value,
}

/// Where the document comes from and how it is preprocessed.
#[derive(Debug, Clone, Default)]
pub struct SpecSource {
    pub input: PathBuf,
    /// Deep-merged over the base document in order.
    pub overlays: Vec<PathBuf>,
    /// jq filter applied after merging.
    pub jq_expr: Option<String>,
}

impl StyleSpec {
    pub fn from_value(doc: Value) -> std::result::Result<Self, SchemaError> {
        if !doc.is_object() {
            return Err(SchemaError::InvalidDocument("root is not an object".to_string()));
        }
        Ok(Self { doc })
    }

    pub fn load(source: &SpecSource) -> Result<Self> {
        let mut doc = read_json(&source.input)?;
        for overlay in &source.overlays {
            log::debug!("merging overlay {}", overlay.display());
            merge_json(&mut doc, read_json(overlay)?);
        }
        if let Some(jq_expr) = source.jq_expr.as_ref() {
            doc = crate::jq_exec::run_jaq(jq_expr, &doc).map_err(GenerateError::Jq)?;
        }
        Ok(Self::from_value(doc)?)
    }

    pub fn as_value(&self) -> &Value {
        &self.doc
    }

    /// Layer type names in declaration order. `layer.type.values` is either
    /// an object keyed by type (the published specification) or a plain list.
    pub fn layer_types(&self) -> std::result::Result<Vec<String>, SchemaError> {
        let values = self
            .doc
            .pointer("/layer/type/values")
            .ok_or_else(|| SchemaError::MissingSection("layer.type.values".to_string()))?;
        match values {
            Value::Object(map) => Ok(map.keys().cloned().collect()),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        SchemaError::InvalidDocument(format!("layer type {item} is not a string"))
                    })
                })
                .collect(),
            _ => Err(SchemaError::InvalidDocument(
                "layer.type.values is neither an object nor an array".to_string(),
            )),
        }
    }

    pub fn layout_properties(&self, layer_type: &str) -> std::result::Result<&Map<String, Value>, SchemaError> {
        self.section(&format!("layout_{layer_type}"))
    }

    pub fn paint_properties(&self, layer_type: &str) -> std::result::Result<&Map<String, Value>, SchemaError> {
        self.section(&format!("paint_{layer_type}"))
    }

    /// The global `light` section, if the document has one.
    pub fn light_properties(&self) -> Option<&Map<String, Value>> {
        self.doc.get("light").and_then(Value::as_object)
    }

    fn section(&self, key: &str) -> std::result::Result<&Map<String, Value>, SchemaError> {
        match self.doc.get(key) {
            Some(Value::Object(map)) => Ok(map),
            Some(_) => Err(SchemaError::InvalidDocument(format!("`{key}` is not an object"))),
            None => Err(SchemaError::MissingSection(key.to_string())),
        }
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let source = std::fs::read_to_string(path).map_err(|source| GenerateError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str::<Value>(&source).map_err(|source| GenerateError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Objects merge key by key; anything else in `overlay` replaces `base`.
pub fn merge_json(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn layer_types_from_object_keep_declaration_order() {
        let spec = StyleSpec::from_value(json!({
            "layer": { "type": { "values": { "fill": {}, "line": {}, "background": {} } } }
        }))
        .unwrap();
        assert_eq!(spec.layer_types().unwrap(), ["fill", "line", "background"]);
    }

    #[test]
    fn layer_types_from_array() {
        let spec = StyleSpec::from_value(json!({ "layer": { "type": { "values": ["test"] } } })).unwrap();
        assert_eq!(spec.layer_types().unwrap(), ["test"]);
    }

    #[test]
    fn missing_sections_are_named() {
        let spec = StyleSpec::from_value(json!({ "layer": { "type": { "values": ["fill"] } } })).unwrap();
        let err = spec.layout_properties("fill").unwrap_err();
        assert_eq!(err.to_string(), "style specification is missing `layout_fill`");
        let spec = StyleSpec::from_value(json!({})).unwrap();
        assert!(matches!(spec.layer_types(), Err(SchemaError::MissingSection(_))));
    }

    #[test]
    fn root_must_be_an_object() {
        assert!(StyleSpec::from_value(json!([1, 2])).is_err());
    }

    #[test]
    fn overlays_merge_deeply() {
        let mut base = json!({ "paint_fill": { "fill-color": { "type": "color", "default": "#000000" } } });
        merge_json(&mut base, json!({ "paint_fill": { "fill-color": { "default": "#ffffff" }, "fill-opacity": { "type": "number" } } }));
        assert_eq!(
            base,
            json!({ "paint_fill": {
                "fill-color": { "type": "color", "default": "#ffffff" },
                "fill-opacity": { "type": "number" }
            } })
        );
    }

    #[test]
    fn load_reads_merges_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("spec.json");
        let overlay = dir.path().join("overrides.json");
        std::fs::write(&input, r#"{ "layout_circle": { "circle-sort-key": {}, "visibility": {} } }"#).unwrap();
        std::fs::write(&overlay, r#"{ "paint_circle": {} }"#).unwrap();

        let spec = StyleSpec::load(&SpecSource {
            input,
            overlays: vec![overlay],
            jq_expr: Some(r#"del(.layout_circle["circle-sort-key"])"#.to_string()),
        })
        .unwrap();
        assert_eq!(spec.as_value(), &json!({ "layout_circle": { "visibility": {} }, "paint_circle": {} }));
    }

    #[test]
    fn unparsable_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("spec.json");
        std::fs::write(&input, "{ not json").unwrap();
        let err = StyleSpec::load(&SpecSource { input, ..SpecSource::default() }).unwrap_err();
        assert!(matches!(err, GenerateError::Json { .. }));
    }
}
