//! Schema type → C++ type name.
use crate::error::SchemaError;
use crate::ir::{PropertyDefinition, PropertyKind, SchemaType};
use crate::naming::camelize;

pub const TRANSLATE_ANCHOR_TYPE: &str = "TranslateAnchorType";
pub const ROTATION_ALIGNMENT_TYPE: &str = "RotationAlignmentType";

/// Resolve the evaluated C++ type of a property. Name-based overrides win
/// over the declared schema type.
pub fn property_type(property: &PropertyDefinition) -> Result<String, SchemaError> {
    match property.kind {
        PropertyKind::TranslateAnchor => return Ok(TRANSLATE_ANCHOR_TYPE.to_string()),
        PropertyKind::RotationAlignment => return Ok(ROTATION_ALIGNMENT_TYPE.to_string()),
        _ => {}
    }
    match &property.ty {
        SchemaType::Boolean => Ok("bool".to_string()),
        SchemaType::Number => Ok("float".to_string()),
        SchemaType::String => Ok("std::string".to_string()),
        SchemaType::Enum => Ok(enum_type_name(property)),
        SchemaType::Color => Ok("Color".to_string()),
        SchemaType::Array => {
            let element = array_element(property)?;
            let element_ty = property_type(&element)?;
            match property.length {
                Some(length) => Ok(format!("std::array<{element_ty}, {length}>")),
                None => Ok(format!("std::vector<{element_ty}>")),
            }
        }
        SchemaType::Other(tag) => Err(SchemaError::UnknownType {
            property: property.name.clone(),
            ty: tag.clone(),
        }),
    }
}

/// `line-cap` → `LineCapType`; light properties get a `Light` prefix.
pub fn enum_type_name(property: &PropertyDefinition) -> String {
    let prefix = if property.light { "Light" } else { "" };
    format!("{prefix}{}Type", camelize(&property.name))
}

/// Element definition of an array property, without a default.
pub(crate) fn array_element(property: &PropertyDefinition) -> Result<PropertyDefinition, SchemaError> {
    let tag = property
        .value
        .as_deref()
        .ok_or_else(|| SchemaError::MissingElementType(property.name.clone()))?;
    Ok(property.element(SchemaType::from_tag(tag), None))
}
