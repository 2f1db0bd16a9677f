//! Default value literals for generated property storage.
pub mod color;

use serde_json::Value;

use crate::error::SchemaError;
use crate::ir::{PropertyDefinition, PropertyKind, SchemaType};
use crate::naming::camelize;
use crate::types::{array_element, property_type};

/// `fill-outline-color` starts out unset (negative alpha) so the renderer can
/// fall back to the layer's fill color.
pub const UNSET_COLOR: &str = "{ 0, 0, 0, -1 }";

/// Aggregate-initializer spelling for array defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum AggregateSyntax {
    /// `{{ 1, 2 }}`
    #[default]
    #[value(name = "double")]
    DoubleBrace,
    /// `{ 1, 2 }`
    #[value(name = "single")]
    SingleBrace,
}

/// Spelling of fixed-size array and variable-length list defaults. Both
/// default to double braces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArrayInitRule {
    pub fixed: AggregateSyntax,
    pub list: AggregateSyntax,
}

/// Default literal with the stock array spelling.
pub fn default_value(property: &PropertyDefinition) -> Result<String, SchemaError> {
    default_value_with(property, ArrayInitRule::default())
}

pub fn default_value_with(
    property: &PropertyDefinition,
    rule: ArrayInitRule,
) -> Result<String, SchemaError> {
    let default = property.default.as_ref();
    match &property.ty {
        SchemaType::Number => match default {
            None => Ok("0".to_string()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(other) => Err(invalid(property, format!("expected a number, found {other}"))),
        },
        SchemaType::String => match default {
            None => Ok("\"\"".to_string()),
            Some(Value::String(s)) => Ok(Value::String(s.clone()).to_string()),
            Some(other) => Err(invalid(property, format!("expected a string, found {other}"))),
        },
        SchemaType::Enum => {
            let ty = property_type(property)?;
            match default {
                None => Ok(format!("{ty}::Undefined")),
                Some(Value::String(s)) => Ok(format!("{ty}::{}", camelize(s))),
                Some(other) => Err(invalid(property, format!("expected an enum value, found {other}"))),
            }
        }
        SchemaType::Color => match default {
            None => Ok("{ 0, 0, 0, 0 }".to_string()),
            Some(Value::String(s)) => {
                let [r, g, b, a] = color::parse_css_color(s).ok_or_else(|| SchemaError::InvalidColor {
                    property: property.name.clone(),
                    value: s.clone(),
                })?;
                Ok(format!("{{ {}, {}, {}, {} }}", r / 255.0 * a, g / 255.0 * a, b / 255.0 * a, a))
            }
            Some(other) => Err(SchemaError::InvalidColor {
                property: property.name.clone(),
                value: other.to_string(),
            }),
        },
        SchemaType::Array => {
            let element = array_element(property)?;
            let items = match default {
                None => Vec::new(),
                Some(Value::Array(items)) => items.clone(),
                Some(other) => return Err(invalid(property, format!("expected an array, found {other}"))),
            };
            let parts = items
                .into_iter()
                .map(|item| default_value_with(&property.element(element.ty.clone(), Some(item)), rule))
                .collect::<Result<Vec<_>, _>>()?;
            let syntax = if property.length.is_some() { rule.fixed } else { rule.list };
            Ok(aggregate(&parts, syntax))
        }
        SchemaType::Boolean => Ok(passthrough(default).unwrap_or_else(|| "false".to_string())),
        SchemaType::Other(_) => Ok(passthrough(default).unwrap_or_else(|| "{}".to_string())),
    }
}

/// Initial value of the generated storage field, which differs from the
/// schema default only for special-cased properties.
pub fn storage_default(property: &PropertyDefinition, rule: ArrayInitRule) -> Result<String, SchemaError> {
    match property.kind {
        PropertyKind::UnsetOutlineColor => Ok(UNSET_COLOR.to_string()),
        _ => default_value_with(property, rule),
    }
}

fn aggregate(parts: &[String], syntax: AggregateSyntax) -> String {
    match (syntax, parts.is_empty()) {
        (AggregateSyntax::DoubleBrace, true) => "{{}}".to_string(),
        (AggregateSyntax::DoubleBrace, false) => format!("{{{{ {} }}}}", parts.join(", ")),
        (AggregateSyntax::SingleBrace, true) => "{}".to_string(),
        (AggregateSyntax::SingleBrace, false) => format!("{{ {} }}", parts.join(", ")),
    }
}

fn passthrough(default: Option<&Value>) -> Option<String> {
    default.map(|v| match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

fn invalid(property: &PropertyDefinition, reason: String) -> SchemaError {
    SchemaError::InvalidDefault { property: property.name.clone(), reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tests::{prop, prop_with_default};
    use serde_json::json;

    #[test]
    fn numbers() {
        assert_eq!(default_value(&prop_with_default("line-width", "number", json!(1))).unwrap(), "1");
        assert_eq!(default_value(&prop_with_default("line-blur", "number", json!(0.5))).unwrap(), "0.5");
        assert_eq!(default_value(&prop("line-gap-width", "number")).unwrap(), "0");
    }

    #[test]
    fn strings() {
        assert_eq!(default_value(&prop_with_default("text-field", "string", json!("x\"y"))).unwrap(), r#""x\"y""#);
        assert_eq!(default_value(&prop("icon-image", "string")).unwrap(), r#""""#);
    }

    #[test]
    fn enums() {
        let cap = prop_with_default("line-cap", "enum", json!("butt"));
        assert_eq!(default_value(&cap).unwrap(), "LineCapType::Butt");
        let placement = prop_with_default("symbol-placement", "enum", json!("line-center"));
        assert_eq!(default_value(&placement).unwrap(), "SymbolPlacementType::LineCenter");
        let anchor = prop_with_default("fill-translate-anchor", "enum", json!("map"));
        assert_eq!(default_value(&anchor).unwrap(), "TranslateAnchorType::Map");
        assert_eq!(default_value(&prop("text-justify", "enum")).unwrap(), "TextJustifyType::Undefined");
    }

    #[test]
    fn colors() {
        let red = prop_with_default("fill-color", "color", json!("#ff0000"));
        assert_eq!(default_value(&red).unwrap(), "{ 1, 0, 0, 1 }");
        let half = prop_with_default("fill-color", "color", json!("rgba(0,0,0,0.5)"));
        assert_eq!(default_value(&half).unwrap(), "{ 0, 0, 0, 0.5 }");
        let premultiplied = prop_with_default("fill-color", "color", json!("rgba(255,255,255,0.5)"));
        assert_eq!(default_value(&premultiplied).unwrap(), "{ 0.5, 0.5, 0.5, 0.5 }");
        let black = prop_with_default("text-color", "color", json!("#000000"));
        assert_eq!(default_value(&black).unwrap(), "{ 0, 0, 0, 1 }");
        assert_eq!(default_value(&prop("text-halo-color", "color")).unwrap(), "{ 0, 0, 0, 0 }");
    }

    #[test]
    fn malformed_color_names_the_property() {
        let bad = prop_with_default("fill-color", "color", json!("#12"));
        let err = default_value(&bad).unwrap_err();
        assert_eq!(err.to_string(), "invalid color `#12` for property `fill-color`");
    }

    #[test]
    fn arrays() {
        let translate = PropertyDefinition {
            length: Some(2),
            value: Some("number".into()),
            ..prop_with_default("fill-translate", "array", json!([0, 0]))
        };
        assert_eq!(default_value(&translate).unwrap(), "{{ 0, 0 }}");

        let fonts = PropertyDefinition {
            value: Some("string".into()),
            ..prop_with_default("text-font", "array", json!(["Open Sans Regular", "Arial Unicode MS Regular"]))
        };
        assert_eq!(
            default_value(&fonts).unwrap(),
            r#"{{ "Open Sans Regular", "Arial Unicode MS Regular" }}"#
        );

        let empty = PropertyDefinition { value: Some("number".into()), ..prop("line-dasharray", "array") };
        assert_eq!(default_value(&empty).unwrap(), "{{}}");
    }

    #[test]
    fn array_spelling_is_configurable() {
        let rule = ArrayInitRule { fixed: AggregateSyntax::DoubleBrace, list: AggregateSyntax::SingleBrace };
        let list = PropertyDefinition {
            value: Some("number".into()),
            ..prop_with_default("line-dasharray", "array", json!([1, 2]))
        };
        assert_eq!(default_value_with(&list, rule).unwrap(), "{ 1, 2 }");
        let fixed = PropertyDefinition { length: Some(2), ..list.clone() };
        assert_eq!(default_value_with(&fixed, rule).unwrap(), "{{ 1, 2 }}");
        let empty = PropertyDefinition { default: None, ..list };
        assert_eq!(default_value_with(&empty, rule).unwrap(), "{}");
    }

    #[test]
    fn passthrough_types() {
        assert_eq!(default_value(&prop_with_default("fill-antialias", "boolean", json!(true))).unwrap(), "true");
        assert_eq!(default_value(&prop("icon-allow-overlap", "boolean")).unwrap(), "false");
        assert_eq!(default_value(&prop_with_default("text-field", "formatted", json!(""))).unwrap(), "");
        assert_eq!(default_value(&prop_with_default("custom", "padding", json!(2))).unwrap(), "2");
    }

    #[test]
    fn outline_color_storage_is_unset() {
        let outline = prop_with_default("fill-outline-color", "color", json!("#000000"));
        assert_eq!(storage_default(&outline, ArrayInitRule::default()).unwrap(), UNSET_COLOR);
        assert_eq!(default_value(&outline).unwrap(), "{ 0, 0, 0, 1 }");
    }
}
