//! The global light: `include/mbgl/style/light.hpp` and `src/mbgl/style/light.cpp`.
//!
//! Light properties behave like paint properties (cascaded and transitioned)
//! but live on a single `Light` object rather than a layer.
use std::fmt::Write;

use super::layer_cpp::accessor_bodies;
use super::layer_hpp::accessor_decls;
use super::properties_cpp::storage_methods;
use super::properties_hpp::storage_class;
use super::{generated_header, Resolved, Storage};

pub(super) fn render_hpp(properties: &[Resolved]) -> String {
    let mut out = generated_header();

    writeln!(out).unwrap();
    writeln!(out, "#pragma once").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "#include <mbgl/style/types.hpp>").unwrap();
    writeln!(out, "#include <mbgl/style/property_value.hpp>").unwrap();
    writeln!(out, "#include <mbgl/style/paint_property.hpp>").unwrap();
    writeln!(out, "#include <mbgl/util/color.hpp>").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "#include <array>").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "namespace mbgl {{").unwrap();
    writeln!(out, "namespace style {{").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "class CascadeParameters;").unwrap();
    writeln!(out, "class CalculationParameters;").unwrap();
    writeln!(out).unwrap();
    storage_class(&mut out, "LightProperties", Storage::Paint, properties);
    writeln!(out).unwrap();
    writeln!(out, "class Light {{").unwrap();
    writeln!(out, "public:").unwrap();
    writeln!(out, "    // Properties").unwrap();
    accessor_decls(&mut out, properties);
    writeln!(out).unwrap();
    writeln!(out, "    LightProperties properties;").unwrap();
    writeln!(out, "}};").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "}} // namespace style").unwrap();
    writeln!(out, "}} // namespace mbgl").unwrap();
    out
}

pub(super) fn render_cpp(properties: &[Resolved]) -> String {
    let mut out = generated_header();

    writeln!(out).unwrap();
    writeln!(out, "#include <mbgl/style/light.hpp>").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "namespace mbgl {{").unwrap();
    writeln!(out, "namespace style {{").unwrap();
    accessor_bodies(&mut out, "Light", "properties", properties);
    storage_methods(&mut out, "LightProperties", Storage::Paint, properties);
    writeln!(out).unwrap();
    writeln!(out, "}} // namespace style").unwrap();
    writeln!(out, "}} // namespace mbgl").unwrap();
    out
}
