//! Property storage bodies: `<type>_layer_properties.cpp`.
use std::fmt::Write;

use super::{generated_header, LayerCtx, Resolved, Storage};

pub(super) fn render(ctx: &LayerCtx<'_>) -> String {
    let mut out = generated_header();

    writeln!(out).unwrap();
    writeln!(out, "#include <mbgl/style/layers/{}_layer_properties.hpp>", ctx.stem).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "namespace mbgl {{").unwrap();
    writeln!(out, "namespace style {{").unwrap();

    if !ctx.layout.is_empty() {
        storage_methods(&mut out, &format!("{}LayoutProperties", ctx.camel), Storage::Layout, &ctx.layout);
    }
    storage_methods(&mut out, &format!("{}PaintProperties", ctx.camel), Storage::Paint, &ctx.paint);

    writeln!(out).unwrap();
    writeln!(out, "}} // namespace style").unwrap();
    writeln!(out, "}} // namespace mbgl").unwrap();
    out
}

/// `parse`, `cascade` (paint only) and `recalculate` of one storage class.
pub(super) fn storage_methods(out: &mut String, class: &str, storage: Storage, properties: &[Resolved]) {
    writeln!(out).unwrap();
    writeln!(out, "void {class}::parse(const JSValue& value) {{").unwrap();
    for p in properties {
        writeln!(out, "    {field}.parse(\"{name}\", value);", field = p.field, name = p.name).unwrap();
    }
    writeln!(out, "}}").unwrap();

    match storage {
        Storage::Layout => {
            writeln!(out).unwrap();
            writeln!(out, "void {class}::recalculate(const CalculationParameters& parameters) {{").unwrap();
            for p in properties {
                writeln!(out, "    {field}.calculate(parameters);", field = p.field).unwrap();
            }
            writeln!(out, "}}").unwrap();
        }
        Storage::Paint => {
            writeln!(out).unwrap();
            writeln!(out, "void {class}::cascade(const CascadeParameters& parameters) {{").unwrap();
            for p in properties {
                writeln!(out, "    {field}.cascade(parameters);", field = p.field).unwrap();
            }
            writeln!(out, "}}").unwrap();
            writeln!(out).unwrap();
            writeln!(out, "bool {class}::recalculate(const CalculationParameters& parameters) {{").unwrap();
            writeln!(out, "    bool hasTransitions = false;").unwrap();
            writeln!(out).unwrap();
            for p in properties {
                writeln!(out, "    hasTransitions |= {field}.calculate(parameters);", field = p.field).unwrap();
            }
            writeln!(out).unwrap();
            writeln!(out, "    return hasTransitions;").unwrap();
            writeln!(out, "}}").unwrap();
        }
    }
}
