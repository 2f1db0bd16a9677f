//! Layer implementation: `src/mbgl/style/layers/<type>_layer.cpp`.
use std::fmt::Write;

use super::{generated_header, LayerCtx, Resolved};
use crate::ir::SourceBinding;

pub(super) fn render(ctx: &LayerCtx<'_>) -> String {
    let class = ctx.class();
    let camel = &ctx.camel;
    let binding = ctx.layer.source_binding();
    let mut out = generated_header();

    writeln!(out).unwrap();
    writeln!(out, "#include <mbgl/style/layers/{}_layer.hpp>", ctx.stem).unwrap();
    writeln!(out, "#include <mbgl/style/layers/{}_layer_impl.hpp>", ctx.stem).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "namespace mbgl {{").unwrap();
    writeln!(out, "namespace style {{").unwrap();
    writeln!(out).unwrap();

    // Fresh construction
    match binding {
        SourceBinding::None => {
            writeln!(out, "{class}::{class}(const std::string& layerID)").unwrap();
        }
        SourceBinding::SourceOnly | SourceBinding::SourceAndLayer => {
            writeln!(out, "{class}::{class}(const std::string& layerID, const std::string& sourceID)").unwrap();
        }
    }
    writeln!(out, "    : Layer(LayerType::{camel}, std::make_unique<Impl>())").unwrap();
    writeln!(out, "    , impl(static_cast<Impl*>(baseImpl.get())) {{").unwrap();
    writeln!(out, "    impl->id = layerID;").unwrap();
    if binding != SourceBinding::None {
        writeln!(out, "    impl->source = sourceID;").unwrap();
    }
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();

    // Copy from an existing implementation
    writeln!(out, "{class}::{class}(const Impl& other)").unwrap();
    writeln!(out, "    : Layer(LayerType::{camel}, std::make_unique<Impl>(other))").unwrap();
    writeln!(out, "    , impl(static_cast<Impl*>(baseImpl.get())) {{").unwrap();
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "{class}::~{class}() = default;").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "std::unique_ptr<Layer> {class}::Impl::clone() const {{").unwrap();
    writeln!(out, "    return std::make_unique<{class}>(*this);").unwrap();
    writeln!(out, "}}").unwrap();

    if binding != SourceBinding::None {
        writeln!(out).unwrap();
        writeln!(out, "// Source").unwrap();
        writeln!(out).unwrap();
        writeln!(out, "const std::string& {class}::getSourceID() const {{").unwrap();
        writeln!(out, "    return impl->source;").unwrap();
        writeln!(out, "}}").unwrap();
    }
    if binding == SourceBinding::SourceAndLayer {
        writeln!(out).unwrap();
        writeln!(out, "void {class}::setSourceLayer(const std::string& sourceLayer) {{").unwrap();
        writeln!(out, "    impl->sourceLayer = sourceLayer;").unwrap();
        writeln!(out, "}}").unwrap();
        writeln!(out).unwrap();
        writeln!(out, "const std::string& {class}::getSourceLayer() const {{").unwrap();
        writeln!(out, "    return impl->sourceLayer;").unwrap();
        writeln!(out, "}}").unwrap();
    }

    if !ctx.layout.is_empty() {
        writeln!(out).unwrap();
        writeln!(out, "// Layout properties").unwrap();
        accessor_bodies(&mut out, &class, "impl->layout", &ctx.layout);
    }

    writeln!(out).unwrap();
    writeln!(out, "// Paint properties").unwrap();
    accessor_bodies(&mut out, &class, "impl->paint", &ctx.paint);

    writeln!(out).unwrap();
    writeln!(out, "}} // namespace style").unwrap();
    writeln!(out, "}} // namespace mbgl").unwrap();
    out
}

/// Getter/setter bodies delegating to `<storage>.<field>`.
pub(super) fn accessor_bodies(out: &mut String, class: &str, storage: &str, properties: &[Resolved]) {
    for p in properties {
        writeln!(out).unwrap();
        writeln!(out, "PropertyValue<{ty}> {class}::get{name}() const {{", ty = p.ty, name = p.accessor).unwrap();
        writeln!(out, "    return {storage}.{field}.get();", field = p.field).unwrap();
        writeln!(out, "}}").unwrap();
        writeln!(out).unwrap();
        writeln!(out, "void {class}::set{name}(PropertyValue<{ty}> value) {{", ty = p.ty, name = p.accessor).unwrap();
        writeln!(out, "    {storage}.{field}.set(value);", field = p.field).unwrap();
        writeln!(out, "}}").unwrap();
    }
}
