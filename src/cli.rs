//! Minimal CLI: style specification → (C++ sources | model view)
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::codegen::CodegenOptions;
use crate::defaults::{AggregateSyntax, ArrayInitRule};
use crate::lower::ModelOptions;
use crate::pipeline::{GeneratorOptions, RunSummary};
use crate::style_spec::{SpecSource, StyleSpec};

pub const DRY_RUN_ENV: &str = "STYLE_CODEGEN_DRY_RUN";

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate C++ style layer sources from a JSON style specification
#[derive(Parser, Debug)]
#[command(name = "style-codegen")]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// render layer sources and write the ones that changed
    Generate(GenerateOut),
    /// print the resolved property model as JSON
    Model(ModelOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// style specification JSON document
    #[arg(long, short)]
    input: PathBuf,

    /// documents deep-merged over the input, in order. Literal paths or quoted glob patterns
    #[arg(long, num_args = 1..)]
    overlay: Vec<String>,

    /// jq filter applied to the merged document (must yield one document)
    #[arg(long)]
    jq_expr: Option<String>,

    /// sort properties by name instead of declaration order
    #[arg(long, default_value_t = false)]
    sort_properties: bool,

    /// aggregate syntax for fixed-size array defaults
    #[arg(long, value_enum, default_value_t = AggregateSyntax::DoubleBrace)]
    fixed_array_init: AggregateSyntax,

    /// aggregate syntax for variable-length list defaults
    #[arg(long, value_enum, default_value_t = AggregateSyntax::DoubleBrace)]
    list_init: AggregateSyntax,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// root directory generated paths are relative to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// compute and log changes without writing generated sources
    #[arg(long, env = DRY_RUN_ENV, default_value_t = false)]
    dry_run: bool,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct ModelOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn source(&self) -> anyhow::Result<SpecSource> {
        Ok(SpecSource {
            input: self.input.clone(),
            overlays: resolve_file_path_patterns(&self.overlay)?,
            jq_expr: self.jq_expr.clone(),
        })
    }

    fn model_options(&self) -> ModelOptions {
        ModelOptions { sort_properties: self.sort_properties }
    }

    fn codegen_options(&self) -> CodegenOptions {
        CodegenOptions {
            array_init: ArrayInitRule { fixed: self.fixed_array_init, list: self.list_init },
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Generate(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                let settings = &target.input_settings;
                let options = GeneratorOptions {
                    source: settings.source()?,
                    out_dir: target.out_dir.clone(),
                    dry_run: target.dry_run,
                    model: settings.model_options(),
                    codegen: settings.codegen_options(),
                };
                let summary = crate::pipeline::run(&options)?;
                print_summary(&summary);
            }
            Command::Model(target) => {
                let settings = &target.input_settings;
                let spec = StyleSpec::load(&settings.source()?)?;
                let model = crate::pipeline::build_model(&spec, settings.model_options())?;
                let view = crate::pipeline::describe_model(&model, settings.codegen_options())?;
                let view_src = serde_json::to_string_pretty(&view)?;

                if let Some(out) = target.out.as_ref() {
                    if let Some(parent) = out.parent() {
                        std::fs::create_dir_all(parent)
                            .with_context(|| format!("failed to create {}", parent.display()))?;
                    }
                    std::fs::write(out, &view_src)
                        .with_context(|| format!("failed to write {}", out.display()))?;
                } else {
                    println!("{view_src}");
                }
            }
        }
        Ok(())
    }
}

fn print_summary(summary: &RunSummary) {
    let updated = format!("{} updated", summary.updated);
    let unchanged = format!("{} unchanged", summary.unchanged);
    let mode = if summary.dry_run { " (dry run)".yellow() } else { "".normal() };
    eprintln!(
        "{} {}, {}{}",
        "style-codegen:".bold(),
        if summary.updated > 0 { updated.green() } else { updated.normal() },
        unchanged.dimmed(),
        mode,
    );
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_file_path_patterns<I>(patterns: I) -> anyhow::Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            // Sorted so overlay precedence does not depend on directory order
            let mut matched = glob::glob(pattern)?.collect::<Result<Vec<_>, _>>()?;
            if matched.is_empty() {
                anyhow::bail!("glob pattern matched no files: {pattern}");
            }
            matched.sort();
            out.extend(matched);
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generate_flags() {
        let cli = CommandLineInterface::try_parse_from([
            "style-codegen",
            "generate",
            "--input",
            "v8.json",
            "--overlay",
            "a.json",
            "b.json",
            "--list-init",
            "single",
            "--dry-run",
        ])
        .unwrap();
        let Command::Generate(target) = cli.cmd else { panic!("expected generate") };
        assert!(target.dry_run);
        assert_eq!(target.out_dir, PathBuf::from("."));
        assert_eq!(target.input_settings.overlay, ["a.json", "b.json"]);
        let rule = target.input_settings.codegen_options().array_init;
        assert_eq!(rule.fixed, AggregateSyntax::DoubleBrace);
        assert_eq!(rule.list, AggregateSyntax::SingleBrace);
    }

    #[test]
    fn glob_patterns_expand_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.json"), "{}").unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        let pattern = format!("{}/*.json", dir.path().display());
        let paths = resolve_file_path_patterns([pattern.as_str(), "literal.json"]).unwrap();
        assert_eq!(paths, [dir.path().join("a.json"), dir.path().join("b.json"), PathBuf::from("literal.json")]);

        let missing = format!("{}/*.toml", dir.path().display());
        assert!(resolve_file_path_patterns([missing.as_str()]).is_err());
    }
}
