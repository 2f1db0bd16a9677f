//! load → lower → render → write, plus the debugging view of the model.
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;

use crate::codegen::{render_all, CodegenOptions, GeneratedArtifact};
use crate::defaults::{default_value_with, storage_default};
use crate::error::{Result, SchemaError};
use crate::ir::{LayerSchema, LightSchema, PropertyDefinition};
use crate::lower::{lower_light, lower_spec, ModelOptions};
use crate::style_spec::{SpecSource, StyleSpec};
use crate::types::property_type;
use crate::writer::{BuildManifest, WriteOutcome, Writer};

/// Everything one generator invocation is configured with.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    pub source: SpecSource,
    pub out_dir: PathBuf,
    pub dry_run: bool,
    pub model: ModelOptions,
    pub codegen: CodegenOptions,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            source: SpecSource::default(),
            out_dir: PathBuf::from("."),
            dry_run: false,
            model: ModelOptions::default(),
            codegen: CodegenOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub manifest: BuildManifest,
    pub updated: usize,
    pub unchanged: usize,
    pub dry_run: bool,
}

pub struct Model {
    pub layers: Vec<LayerSchema>,
    pub light: Option<LightSchema>,
}

pub fn build_model(spec: &StyleSpec, options: ModelOptions) -> std::result::Result<Model, SchemaError> {
    Ok(Model {
        layers: lower_spec(spec, options)?,
        light: lower_light(spec, options)?,
    })
}

/// Render every artifact without touching the disk.
pub fn generate(spec: &StyleSpec, model: ModelOptions, codegen: CodegenOptions) -> std::result::Result<Vec<GeneratedArtifact>, SchemaError> {
    let model = build_model(spec, model)?;
    render_all(&model.layers, model.light.as_ref(), codegen)
}

/// Full run. All artifacts are rendered before the first write, so a schema
/// error leaves the output tree untouched.
pub fn run(options: &GeneratorOptions) -> Result<RunSummary> {
    let spec = StyleSpec::load(&options.source)?;
    let artifacts = generate(&spec, options.model, options.codegen)?;
    write_artifacts(&artifacts, &Writer::new(&options.out_dir, options.dry_run))
}

pub fn write_artifacts(artifacts: &[GeneratedArtifact], writer: &Writer) -> Result<RunSummary> {
    let mut summary = RunSummary { dry_run: writer.dry_run(), ..RunSummary::default() };
    for artifact in artifacts {
        match writer.write_if_modified(artifact, &mut summary.manifest)? {
            WriteOutcome::Unchanged => summary.unchanged += 1,
            WriteOutcome::Updated | WriteOutcome::WouldUpdate => summary.updated += 1,
        }
    }

    // Dry run only suppresses artifact writes; the manifest is always flushed.
    summary.manifest.write_to(&BuildManifest::default_path(writer.root()))?;
    Ok(summary)
}

// ————————————————————————————————————————————————————————————————————————————
// MODEL VIEW
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Serialize)]
struct PropertyView {
    #[serde(rename = "type")]
    schema_type: String,
    cpp_type: String,
    default: String,
    storage_default: String,
    kind: String,
}

#[derive(Debug, Serialize)]
struct LayerView {
    layout: IndexMap<String, PropertyView>,
    paint: IndexMap<String, PropertyView>,
}

#[derive(Debug, Serialize)]
struct ModelView {
    layers: IndexMap<String, LayerView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    light: Option<IndexMap<String, PropertyView>>,
}

/// Resolved types and defaults for every property, as JSON.
pub fn describe_model(model: &Model, codegen: CodegenOptions) -> std::result::Result<serde_json::Value, SchemaError> {
    let view = ModelView {
        layers: model
            .layers
            .iter()
            .map(|layer| -> std::result::Result<_, SchemaError> {
                Ok((
                    layer.layer_type.clone(),
                    LayerView {
                        layout: describe_properties(&layer.layout_properties, codegen)?,
                        paint: describe_properties(&layer.paint_properties, codegen)?,
                    },
                ))
            })
            .collect::<std::result::Result<_, SchemaError>>()?,
        light: model
            .light
            .as_ref()
            .map(|light| describe_properties(&light.properties, codegen))
            .transpose()?,
    };
    serde_json::to_value(&view).map_err(|e| SchemaError::InvalidDocument(e.to_string()))
}

fn describe_properties(
    properties: &[PropertyDefinition],
    codegen: CodegenOptions,
) -> std::result::Result<IndexMap<String, PropertyView>, SchemaError> {
    properties
        .iter()
        .map(|p| -> std::result::Result<_, SchemaError> {
            Ok((
                p.name.clone(),
                PropertyView {
                    schema_type: p.ty.tag().to_string(),
                    cpp_type: property_type(p)?,
                    default: default_value_with(p, codegen.array_init)?,
                    storage_default: storage_default(p, codegen.array_init)?,
                    kind: format!("{:?}", p.kind),
                },
            ))
        })
        .collect()
}
