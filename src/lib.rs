//! Style schema code generator.
//!
//! Reads a versioned style specification (a JSON document mapping each layer
//! type to its layout and paint property definitions) and renders the C++
//! layer classes and property-storage structs of the map renderer:
//!
//! ```text
//! style_spec  →  lower (ir, types)  →  defaults  →  codegen  →  writer
//!  (JSON)         property model       literals     sources     idempotent
//! ```
pub mod cli;
pub mod codegen;
pub mod defaults;
pub mod error;
pub mod ir;
pub mod jq_exec;
pub mod lower;
pub mod naming;
pub mod path_de;
pub mod pipeline;
pub mod style_spec;
pub mod types;
pub mod writer;

pub use codegen::{Codegen, CodegenOptions, GeneratedArtifact};
pub use error::{GenerateError, SchemaError};
pub use pipeline::{generate, run, GeneratorOptions, RunSummary};
pub use writer::BuildManifest;
