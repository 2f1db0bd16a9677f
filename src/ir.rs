// Strongly-typed property model for codegen. Raw schema JSON stops at `lower`.

use serde_json::Value;

/// Declared `type` tag of a style property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaType {
    Boolean,
    Number,
    String,
    Enum,
    Color,
    Array,
    /// Any tag this generator has no mapping for (`formatted`, `resolvedImage`, ...).
    /// Kept verbatim so type resolution can name it in the error.
    Other(String),
}

impl SchemaType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "boolean" => Self::Boolean,
            "number" => Self::Number,
            "string" => Self::String,
            "enum" => Self::Enum,
            "color" => Self::Color,
            "array" => Self::Array,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Enum => "enum",
            Self::Color => "color",
            Self::Array => "array",
            Self::Other(tag) => tag,
        }
    }
}

/// Name-based special cases, classified once per property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// `*-translate-anchor`: shares the `TranslateAnchorType` enum.
    TranslateAnchor,
    /// `*-rotation-alignment`: shares the `RotationAlignmentType` enum.
    RotationAlignment,
    /// `*-pattern` and `line-dasharray`: evaluated with the cross-fading evaluator.
    CrossFaded,
    /// `fill-outline-color`: starts unset so the renderer can fall back to `fill-color`.
    UnsetOutlineColor,
    Plain,
}

impl PropertyKind {
    pub fn classify(name: &str) -> Self {
        if name.ends_with("-translate-anchor") {
            Self::TranslateAnchor
        } else if name.ends_with("-rotation-alignment") {
            Self::RotationAlignment
        } else if name.ends_with("-pattern") || name == "line-dasharray" {
            Self::CrossFaded
        } else if name == "fill-outline-color" {
            Self::UnsetOutlineColor
        } else {
            Self::Plain
        }
    }
}

#[derive(Debug, Clone)]
pub struct PropertyDefinition {
    pub name: String,
    pub ty: SchemaType,
    pub default: Option<Value>,
    /// Fixed size for arrays; `None` means a variable-length list.
    pub length: Option<usize>,
    /// Element type tag for arrays.
    pub value: Option<String>,
    pub kind: PropertyKind,
    /// Declared in the global `light` section rather than a layer.
    pub light: bool,
}

impl PropertyDefinition {
    /// Definition for one element of an array property. Elements keep the
    /// property name (enum elements need it) but none of its special cases.
    pub fn element(&self, ty: SchemaType, default: Option<Value>) -> Self {
        Self {
            name: self.name.clone(),
            ty,
            default,
            length: None,
            value: None,
            kind: PropertyKind::Plain,
            light: self.light,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LayerSchema {
    pub layer_type: String,
    pub layout_properties: Vec<PropertyDefinition>,
    pub paint_properties: Vec<PropertyDefinition>,
}

/// How a layer binds to its data source, which decides the source accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceBinding {
    None,
    SourceOnly,
    SourceAndLayer,
}

impl LayerSchema {
    pub fn source_binding(&self) -> SourceBinding {
        match self.layer_type.as_str() {
            "background" => SourceBinding::None,
            "raster" => SourceBinding::SourceOnly,
            _ => SourceBinding::SourceAndLayer,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LightSchema {
    pub properties: Vec<PropertyDefinition>,
}
