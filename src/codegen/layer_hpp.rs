//! Public layer interface: `include/mbgl/style/layers/<type>_layer.hpp`.
use std::fmt::Write;

use super::{generated_header, LayerCtx, Resolved};
use crate::ir::SourceBinding;

pub(super) fn render(ctx: &LayerCtx<'_>) -> String {
    let class = ctx.class();
    let mut out = generated_header();

    writeln!(out).unwrap();
    writeln!(out, "#pragma once").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "#include <mbgl/style/layer.hpp>").unwrap();
    writeln!(out, "#include <mbgl/style/filter.hpp>").unwrap();
    writeln!(out, "#include <mbgl/style/property_value.hpp>").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "#include <mbgl/util/color.hpp>").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "#include <array>").unwrap();
    writeln!(out, "#include <string>").unwrap();
    writeln!(out, "#include <vector>").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "namespace mbgl {{").unwrap();
    writeln!(out, "namespace style {{").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "class {class} : public Layer {{").unwrap();
    writeln!(out, "public:").unwrap();

    match ctx.layer.source_binding() {
        SourceBinding::None => {
            writeln!(out, "    {class}(const std::string& layerID);").unwrap();
            writeln!(out, "    ~{class}() final;").unwrap();
        }
        SourceBinding::SourceOnly => {
            writeln!(out, "    {class}(const std::string& layerID, const std::string& sourceID);").unwrap();
            writeln!(out, "    ~{class}() final;").unwrap();
            writeln!(out).unwrap();
            writeln!(out, "    // Source").unwrap();
            writeln!(out, "    const std::string& getSourceID() const;").unwrap();
        }
        SourceBinding::SourceAndLayer => {
            writeln!(out, "    {class}(const std::string& layerID, const std::string& sourceID);").unwrap();
            writeln!(out, "    ~{class}() final;").unwrap();
            writeln!(out).unwrap();
            writeln!(out, "    // Source").unwrap();
            writeln!(out, "    const std::string& getSourceID() const;").unwrap();
            writeln!(out, "    const std::string& getSourceLayer() const;").unwrap();
            writeln!(out, "    void setSourceLayer(const std::string& sourceLayer);").unwrap();
        }
    }

    if !ctx.layout.is_empty() {
        writeln!(out).unwrap();
        writeln!(out, "    // Layout properties").unwrap();
        accessor_decls(&mut out, &ctx.layout);
    }

    writeln!(out).unwrap();
    writeln!(out, "    // Paint properties").unwrap();
    accessor_decls(&mut out, &ctx.paint);

    writeln!(out).unwrap();
    writeln!(out, "    // Private implementation").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "    class Impl;").unwrap();
    writeln!(out, "    Impl* const impl;").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "    {class}(const Impl&);").unwrap();
    writeln!(out, "    {class}() = delete;").unwrap();
    writeln!(out, "}};").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "}} // namespace style").unwrap();
    writeln!(out, "}} // namespace mbgl").unwrap();
    out
}

/// `get<Name>`/`set<Name>` declarations, shared with the light header.
pub(super) fn accessor_decls(out: &mut String, properties: &[Resolved]) {
    for p in properties {
        writeln!(out).unwrap();
        writeln!(out, "    PropertyValue<{ty}> get{name}() const;", ty = p.ty, name = p.accessor).unwrap();
        writeln!(out, "    void set{name}(PropertyValue<{ty}>);", ty = p.ty, name = p.accessor).unwrap();
    }
}
