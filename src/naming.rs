//! Identifier conventions shared by the model and the renderers.
use once_cell::sync::Lazy;
use regex::Regex;

static HYPHENATED_IDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9]*(-[a-z0-9]+)*$").unwrap());

/// True for names that survive camel-casing as valid C++ identifiers.
pub fn is_hyphenated_ident(name: &str) -> bool {
    HYPHENATED_IDENT.is_match(name)
}

/// `line-cap` → `LineCap`
pub fn camelize(name: &str) -> String {
    name.split('-')
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect()
}

/// `line-cap` → `lineCap`
pub fn camelize_lower(name: &str) -> String {
    let mut parts = name.split('-').filter(|part| !part.is_empty());
    let mut out = parts.next().unwrap_or_default().to_string();
    for part in parts {
        out.push_str(&capitalize(part));
    }
    out
}

/// `fill-extrusion` → `fill_extrusion`
pub fn file_stem(layer_type: &str) -> String {
    layer_type.replace('-', "_")
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
