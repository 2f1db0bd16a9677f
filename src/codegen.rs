//! Rendering of the C++ layer sources from the property model.
//!
//! Every artifact is rendered into memory first. Nothing here touches the
//! filesystem; writing is left to [`crate::writer`].
mod layer_cpp;
mod layer_hpp;
mod light;
mod properties_cpp;
mod properties_hpp;

use std::path::PathBuf;

use crate::defaults::{storage_default, ArrayInitRule};
use crate::error::SchemaError;
use crate::ir::{LayerSchema, LightSchema, PropertyDefinition, PropertyKind};
use crate::naming::{camelize, camelize_lower, file_stem};
use crate::types::property_type;

pub const GENERATOR_NAME: &str = "style-codegen";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Relative to the output root.
    pub path: PathBuf,
    pub content: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CodegenOptions {
    pub array_init: ArrayInitRule,
}

pub struct Codegen {
    options: CodegenOptions,
    artifacts: Vec<GeneratedArtifact>,
}

impl Codegen {
    pub fn new(options: CodegenOptions) -> Self {
        Self { options, artifacts: Vec::new() }
    }

    /// Render the four sources of one layer type.
    pub fn emit_layer(&mut self, layer: &LayerSchema) -> Result<(), SchemaError> {
        let ctx = LayerCtx::new(layer, self.options)?;
        let stem = file_stem(&layer.layer_type);
        self.push(
            format!("include/mbgl/style/layers/{stem}_layer.hpp"),
            layer_hpp::render(&ctx),
        );
        self.push(
            format!("src/mbgl/style/layers/{stem}_layer.cpp"),
            layer_cpp::render(&ctx),
        );
        self.push(
            format!("src/mbgl/style/layers/{stem}_layer_properties.hpp"),
            properties_hpp::render(&ctx),
        );
        self.push(
            format!("src/mbgl/style/layers/{stem}_layer_properties.cpp"),
            properties_cpp::render(&ctx),
        );
        Ok(())
    }

    pub fn emit_light(&mut self, light: &LightSchema) -> Result<(), SchemaError> {
        let properties = resolve_all(&light.properties, Storage::Paint, self.options)?;
        self.push("include/mbgl/style/light.hpp".to_string(), light::render_hpp(&properties));
        self.push("src/mbgl/style/light.cpp".to_string(), light::render_cpp(&properties));
        Ok(())
    }

    pub fn into_artifacts(self) -> Vec<GeneratedArtifact> {
        self.artifacts
    }

    fn push(&mut self, path: String, content: String) {
        self.artifacts.push(GeneratedArtifact { path: PathBuf::from(path), content });
    }
}

/// Convenience: render a whole model in one go.
pub fn render_all(
    layers: &[LayerSchema],
    light: Option<&LightSchema>,
    options: CodegenOptions,
) -> Result<Vec<GeneratedArtifact>, SchemaError> {
    let mut cg = Codegen::new(options);
    for layer in layers {
        cg.emit_layer(layer)?;
    }
    if let Some(light) = light {
        cg.emit_light(light)?;
    }
    Ok(cg.into_artifacts())
}

// ————————————————————————————————————————————————————————————————————————————
// SHARED RENDER STATE
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Storage {
    Layout,
    Paint,
}

/// A property with every name and literal the templates need, resolved once.
#[derive(Debug, Clone)]
pub(crate) struct Resolved {
    /// Hyphenated schema name, used as the parse key.
    pub name: String,
    /// `LineCap`, as in `getLineCap`.
    pub accessor: String,
    /// `lineCap`, the storage field.
    pub field: String,
    /// Evaluated C++ type.
    pub ty: String,
    /// Storage wrapper type, e.g. `PaintProperty<Color>`.
    pub storage_ty: String,
    pub default: String,
}

pub(crate) fn resolve(
    property: &PropertyDefinition,
    storage: Storage,
    options: CodegenOptions,
) -> Result<Resolved, SchemaError> {
    let ty = property_type(property)?;
    let storage_ty = match (storage, property.kind) {
        (Storage::Layout, _) => format!("LayoutProperty<{ty}>"),
        (Storage::Paint, PropertyKind::CrossFaded) => {
            format!("PaintProperty<{ty}, CrossFadedPropertyEvaluator>")
        }
        (Storage::Paint, _) => format!("PaintProperty<{ty}>"),
    };
    Ok(Resolved {
        name: property.name.clone(),
        accessor: camelize(&property.name),
        field: camelize_lower(&property.name),
        default: storage_default(property, options.array_init)?,
        ty,
        storage_ty,
    })
}

pub(crate) fn resolve_all(
    properties: &[PropertyDefinition],
    storage: Storage,
    options: CodegenOptions,
) -> Result<Vec<Resolved>, SchemaError> {
    properties.iter().map(|p| resolve(p, storage, options)).collect()
}

pub(crate) struct LayerCtx<'a> {
    pub layer: &'a LayerSchema,
    /// `FillExtrusion`
    pub camel: String,
    /// `fill_extrusion`
    pub stem: String,
    pub layout: Vec<Resolved>,
    pub paint: Vec<Resolved>,
}

impl<'a> LayerCtx<'a> {
    fn new(layer: &'a LayerSchema, options: CodegenOptions) -> Result<Self, SchemaError> {
        Ok(Self {
            layer,
            camel: camelize(&layer.layer_type),
            stem: file_stem(&layer.layer_type),
            layout: resolve_all(&layer.layout_properties, Storage::Layout, options)?,
            paint: resolve_all(&layer.paint_properties, Storage::Paint, options)?,
        })
    }

    /// `FillExtrusionLayer`
    pub fn class(&self) -> String {
        format!("{}Layer", self.camel)
    }
}

pub(crate) fn generated_header() -> String {
    format!(
        "// This file is generated. Edit the style specification or {GENERATOR_NAME}, then rerun {GENERATOR_NAME}.\n"
    )
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lower::{lower_light, lower_spec, ModelOptions};
    use crate::style_spec::StyleSpec;
    use serde_json::json;

    fn render_doc(doc: serde_json::Value) -> Vec<GeneratedArtifact> {
        let spec = StyleSpec::from_value(doc).unwrap();
        let layers = lower_spec(&spec, ModelOptions::default()).unwrap();
        let light = lower_light(&spec, ModelOptions::default()).unwrap();
        render_all(&layers, light.as_ref(), CodegenOptions::default()).unwrap()
    }

    fn find<'a>(artifacts: &'a [GeneratedArtifact], path: &str) -> &'a str {
        artifacts
            .iter()
            .find(|a| a.path == PathBuf::from(path))
            .map(|a| a.content.as_str())
            .unwrap_or_else(|| panic!("no artifact at {path}"))
    }

    fn minimal_test_layer() -> serde_json::Value {
        json!({
            "layer": { "type": { "values": ["test"] } },
            "layout_test": { "test-size": { "type": "number", "default": 1 } },
            "paint_test": { "test-color": { "type": "color", "default": "#000000" } }
        })
    }

    #[test]
    fn minimal_layer_end_to_end() {
        let artifacts = render_doc(minimal_test_layer());
        let paths: Vec<_> = artifacts.iter().map(|a| a.path.to_string_lossy().into_owned()).collect();
        assert_eq!(
            paths,
            [
                "include/mbgl/style/layers/test_layer.hpp",
                "src/mbgl/style/layers/test_layer.cpp",
                "src/mbgl/style/layers/test_layer_properties.hpp",
                "src/mbgl/style/layers/test_layer_properties.cpp",
            ]
        );

        let hpp = find(&artifacts, "include/mbgl/style/layers/test_layer.hpp");
        assert!(hpp.contains("PropertyValue<float> getTestSize() const;"));
        assert!(hpp.contains("void setTestSize(PropertyValue<float>);"));
        assert!(hpp.contains("PropertyValue<Color> getTestColor() const;"));
        assert!(hpp.contains("void setTestColor(PropertyValue<Color>);"));

        let props = find(&artifacts, "src/mbgl/style/layers/test_layer_properties.hpp");
        assert!(props.contains("LayoutProperty<float> testSize { 1 };"));
        assert!(props.contains("PaintProperty<Color> testColor { { 0, 0, 0, 1 } };"));

        for artifact in &artifacts {
            assert!(artifact.content.starts_with("// This file is generated."), "{:?}", artifact.path);
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(render_doc(minimal_test_layer()), render_doc(minimal_test_layer()));
    }

    #[test]
    fn source_accessors_depend_on_layer_type() {
        let artifacts = render_doc(json!({
            "layer": { "type": { "values": ["raster", "background", "fill-extrusion"] } },
            "layout_raster": {}, "paint_raster": {},
            "layout_background": {}, "paint_background": {},
            "layout_fill-extrusion": {}, "paint_fill-extrusion": {}
        }));

        let raster = find(&artifacts, "include/mbgl/style/layers/raster_layer.hpp");
        assert!(raster.contains("const std::string& getSourceID() const;"));
        assert!(!raster.contains("getSourceLayer"));
        assert!(raster.contains("RasterLayer(const std::string& layerID, const std::string& sourceID);"));

        let background = find(&artifacts, "include/mbgl/style/layers/background_layer.hpp");
        assert!(!background.contains("getSourceID"));
        assert!(background.contains("BackgroundLayer(const std::string& layerID);"));

        let extrusion = find(&artifacts, "include/mbgl/style/layers/fill_extrusion_layer.hpp");
        assert!(extrusion.contains("class FillExtrusionLayer : public Layer {"));
        assert!(extrusion.contains("void setSourceLayer(const std::string& sourceLayer);"));
        let cpp = find(&artifacts, "src/mbgl/style/layers/fill_extrusion_layer.cpp");
        assert!(cpp.contains("LayerType::FillExtrusion"));
        assert!(cpp.contains("return impl->sourceLayer;"));
    }

    #[test]
    fn layout_storage_only_when_needed() {
        let artifacts = render_doc(json!({
            "layer": { "type": { "values": ["background"] } },
            "layout_background": { "visibility": { "type": "enum", "default": "visible" } },
            "paint_background": { "background-opacity": { "type": "number", "default": 1 } }
        }));
        let hpp = find(&artifacts, "src/mbgl/style/layers/background_layer_properties.hpp");
        assert!(!hpp.contains("BackgroundLayoutProperties"));
        assert!(hpp.contains("class BackgroundPaintProperties {"));
        let cpp = find(&artifacts, "src/mbgl/style/layers/background_layer_properties.cpp");
        assert!(!cpp.contains("BackgroundLayoutProperties"));
        let header = find(&artifacts, "include/mbgl/style/layers/background_layer.hpp");
        assert!(!header.contains("Visibility"));
    }

    #[test]
    fn special_cased_paint_storage() {
        let artifacts = render_doc(json!({
            "layer": { "type": { "values": ["fill", "line"] } },
            "layout_fill": {},
            "paint_fill": {
                "fill-color": { "type": "color", "default": "#000000" },
                "fill-outline-color": { "type": "color", "default": "#ff0000" },
                "fill-pattern": { "type": "string" }
            },
            "layout_line": {},
            "paint_line": {
                "line-dasharray": { "type": "array", "value": "number" }
            }
        }));
        let fill = find(&artifacts, "src/mbgl/style/layers/fill_layer_properties.hpp");
        assert!(fill.contains("PaintProperty<Color> fillOutlineColor { { 0, 0, 0, -1 } };"));
        assert!(fill.contains("PaintProperty<std::string, CrossFadedPropertyEvaluator> fillPattern { \"\" };"));
        let line = find(&artifacts, "src/mbgl/style/layers/line_layer_properties.hpp");
        assert!(line.contains("PaintProperty<std::vector<float>, CrossFadedPropertyEvaluator> lineDasharray { {{}} };"));
    }

    #[test]
    fn storage_methods_visit_every_field() {
        let artifacts = render_doc(json!({
            "layer": { "type": { "values": ["line"] } },
            "layout_line": { "line-cap": { "type": "enum", "default": "butt" } },
            "paint_line": {
                "line-width": { "type": "number", "default": 1 },
                "line-opacity": { "type": "number", "default": 1 }
            }
        }));
        let cpp = find(&artifacts, "src/mbgl/style/layers/line_layer_properties.cpp");
        assert!(cpp.contains("void LineLayoutProperties::parse(const JSValue& value) {\n    lineCap.parse(\"line-cap\", value);\n}"));
        assert!(cpp.contains("    lineCap.calculate(parameters);"));
        assert!(cpp.contains("    lineWidth.cascade(parameters);\n    lineOpacity.cascade(parameters);"));
        assert!(cpp.contains("    hasTransitions |= lineWidth.calculate(parameters);\n    hasTransitions |= lineOpacity.calculate(parameters);"));
        assert!(cpp.contains("    return hasTransitions;"));

        let layer_cpp = find(&artifacts, "src/mbgl/style/layers/line_layer.cpp");
        assert!(layer_cpp.contains("return impl->layout.lineCap.get();"));
        assert!(layer_cpp.contains("impl->paint.lineWidth.set(value);"));
        assert!(layer_cpp.contains("std::unique_ptr<Layer> LineLayer::Impl::clone() const {"));
    }

    #[test]
    fn unresolvable_property_fails_the_whole_render() {
        let spec = StyleSpec::from_value(json!({
            "layer": { "type": { "values": ["symbol"] } },
            "layout_symbol": { "text-field": { "type": "formatted", "default": "" } },
            "paint_symbol": {}
        }))
        .unwrap();
        let layers = lower_spec(&spec, ModelOptions::default()).unwrap();
        let err = render_all(&layers, None, CodegenOptions::default()).unwrap_err();
        assert!(err.to_string().contains("text-field"));
    }

    #[test]
    fn light_sources() {
        let artifacts = render_doc(json!({
            "layer": { "type": { "values": [] } },
            "light": {
                "anchor": { "type": "enum", "default": "viewport" },
                "color": { "type": "color", "default": "#ffffff" },
                "position": { "type": "array", "value": "number", "length": 3, "default": [1.15, 210, 30] }
            }
        }));
        let hpp = find(&artifacts, "include/mbgl/style/light.hpp");
        assert!(hpp.contains("class Light {\npublic:\n    // Properties\n\n    PropertyValue<LightAnchorType> getAnchor() const;"));
        assert!(hpp.contains("PropertyValue<LightAnchorType> getAnchor() const;"));
        assert!(hpp.contains("PaintProperty<LightAnchorType> anchor { LightAnchorType::Viewport };"));
        assert!(hpp.contains("PaintProperty<std::array<float, 3>> position { {{ 1.15, 210, 30 }} };"));
        let cpp = find(&artifacts, "src/mbgl/style/light.cpp");
        assert!(cpp.contains("void Light::setColor(PropertyValue<Color> value) {\n    properties.color.set(value);\n}"));
        assert!(cpp.contains("    hasTransitions |= position.calculate(parameters);"));
    }
}
