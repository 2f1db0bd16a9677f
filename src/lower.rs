use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::ir::{LayerSchema, LightSchema, PropertyDefinition, PropertyKind, SchemaType};
use crate::naming::is_hyphenated_ident;
use crate::style_spec::StyleSpec;

/// Layout key handled by the layer base class rather than generated storage.
const VISIBILITY: &str = "visibility";

#[derive(Debug, Clone, Copy, Default)]
pub struct ModelOptions {
    /// Sort properties by name instead of keeping declaration order.
    pub sort_properties: bool,
}

/// The subset of a property entry the generator reads. Documentation and
/// expression metadata are ignored.
#[derive(Debug, Deserialize)]
struct RawProperty {
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    default: Option<Value>,
    #[serde(default)]
    length: Option<usize>,
    #[serde(default)]
    value: Option<String>,
}

pub fn lower_spec(spec: &StyleSpec, options: ModelOptions) -> Result<Vec<LayerSchema>, SchemaError> {
    spec.layer_types()?
        .iter()
        .map(|layer_type| lower_layer(spec, layer_type, options))
        .collect()
}

pub fn lower_layer(spec: &StyleSpec, layer_type: &str, options: ModelOptions) -> Result<LayerSchema, SchemaError> {
    if !is_hyphenated_ident(layer_type) {
        return Err(SchemaError::InvalidDocument(format!("`{layer_type}` is not a valid layer type")));
    }
    let layout_properties = lower_properties(spec.layout_properties(layer_type)?, Some(VISIBILITY), false, options)?;
    let paint_properties = lower_properties(spec.paint_properties(layer_type)?, None, false, options)?;
    log::debug!(
        "layer {layer_type}: {} layout, {} paint properties",
        layout_properties.len(),
        paint_properties.len()
    );
    Ok(LayerSchema {
        layer_type: layer_type.to_string(),
        layout_properties,
        paint_properties,
    })
}

pub fn lower_light(spec: &StyleSpec, options: ModelOptions) -> Result<Option<LightSchema>, SchemaError> {
    let Some(section) = spec.light_properties() else {
        return Ok(None);
    };
    let properties = lower_properties(section, None, true, options)?;
    log::debug!("light: {} properties", properties.len());
    Ok(Some(LightSchema { properties }))
}

fn lower_properties(
    section: &Map<String, Value>,
    skip: Option<&str>,
    light: bool,
    options: ModelOptions,
) -> Result<Vec<PropertyDefinition>, SchemaError> {
    let mut out = section
        .iter()
        .filter(|(name, _)| Some(name.as_str()) != skip)
        .map(|(name, raw)| lower_property(name, raw, light))
        .collect::<Result<Vec<_>, _>>()?;
    if options.sort_properties {
        out.sort_by(|a, b| a.name.cmp(&b.name));
    }
    Ok(out)
}

pub fn lower_property(name: &str, raw: &Value, light: bool) -> Result<PropertyDefinition, SchemaError> {
    if !is_hyphenated_ident(name) {
        return Err(SchemaError::InvalidPropertyName(name.to_string()));
    }
    let raw: RawProperty = crate::path_de::from_value_with_path(raw).map_err(|message| {
        SchemaError::MalformedProperty { property: name.to_string(), message }
    })?;
    let ty = SchemaType::from_tag(&raw.ty);
    if ty == SchemaType::Array && raw.value.is_none() {
        return Err(SchemaError::MissingElementType(name.to_string()));
    }
    Ok(PropertyDefinition {
        name: name.to_string(),
        ty,
        default: raw.default,
        length: raw.length,
        value: raw.value,
        kind: PropertyKind::classify(name),
        light,
    })
}
