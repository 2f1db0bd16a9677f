//! Property storage declarations: `<type>_layer_properties.hpp`.
use std::fmt::Write;

use super::{generated_header, LayerCtx, Resolved, Storage};

pub(super) fn render(ctx: &LayerCtx<'_>) -> String {
    let mut out = generated_header();

    writeln!(out).unwrap();
    writeln!(out, "#pragma once").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "#include <mbgl/style/types.hpp>").unwrap();
    writeln!(out, "#include <mbgl/style/layout_property.hpp>").unwrap();
    writeln!(out, "#include <mbgl/style/paint_property.hpp>").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "namespace mbgl {{").unwrap();
    writeln!(out, "namespace style {{").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "class CascadeParameters;").unwrap();
    writeln!(out, "class CalculationParameters;").unwrap();

    if !ctx.layout.is_empty() {
        writeln!(out).unwrap();
        storage_class(&mut out, &format!("{}LayoutProperties", ctx.camel), Storage::Layout, &ctx.layout);
    }

    writeln!(out).unwrap();
    storage_class(&mut out, &format!("{}PaintProperties", ctx.camel), Storage::Paint, &ctx.paint);

    writeln!(out).unwrap();
    writeln!(out, "}} // namespace style").unwrap();
    writeln!(out, "}} // namespace mbgl").unwrap();
    out
}

/// Declaration of one storage class with a field per property.
pub(super) fn storage_class(out: &mut String, class: &str, storage: Storage, properties: &[Resolved]) {
    writeln!(out, "class {class} {{").unwrap();
    writeln!(out, "public:").unwrap();
    writeln!(out, "    void parse(const JSValue&);").unwrap();
    match storage {
        Storage::Layout => {
            writeln!(out, "    void recalculate(const CalculationParameters&);").unwrap();
        }
        Storage::Paint => {
            writeln!(out, "    void cascade(const CascadeParameters&);").unwrap();
            writeln!(out, "    bool recalculate(const CalculationParameters&);").unwrap();
        }
    }
    if !properties.is_empty() {
        writeln!(out).unwrap();
    }
    for p in properties {
        writeln!(out, "    {ty} {field} {{ {default} }};", ty = p.storage_ty, field = p.field, default = p.default).unwrap();
    }
    writeln!(out, "}};").unwrap();
}
