//! Smoke runs of the generator against the bundled samples. Each case
//! generates into a scratch directory twice; the second pass must find
//! every file already up to date.
use std::path::{Path, PathBuf};

use colored::Colorize;
use style_codegen::style_spec::SpecSource;
use style_codegen::{GeneratorOptions, RunSummary};

struct Case {
    label: &'static str,
    jq_expr: Option<String>,
    expected_artifacts: usize,
}

fn samples_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("samples")
}

fn run_case(case: &Case) -> anyhow::Result<()> {
    let scratch = tempfile::tempdir()?;
    let options = GeneratorOptions {
        source: SpecSource {
            input: samples_dir().join("v8-subset.json"),
            overlays: Vec::new(),
            jq_expr: case.jq_expr.clone(),
        },
        out_dir: scratch.path().to_path_buf(),
        ..GeneratorOptions::default()
    };

    let first: RunSummary = style_codegen::run(&options)?;
    anyhow::ensure!(
        first.updated == case.expected_artifacts,
        "first pass updated {} files, expected {}",
        first.updated,
        case.expected_artifacts
    );

    let second = style_codegen::run(&options)?;
    anyhow::ensure!(second.updated == 0, "second pass updated {} files", second.updated);
    anyhow::ensure!(first.manifest == second.manifest, "manifest changed between passes");

    let listed = std::fs::read_to_string(scratch.path().join("style-codegen.list"))?;
    anyhow::ensure!(
        listed.lines().count() == case.expected_artifacts,
        "manifest lists {} paths",
        listed.lines().count()
    );
    Ok(())
}

fn main() {
    let no_light_filter = std::fs::read_to_string(samples_dir().join("no-light.jq"))
        .map(|src| src.trim().to_string())
        .ok();

    let cases = [
        Case { label: "v8-subset", jq_expr: None, expected_artifacts: 22 },
        Case { label: "v8-subset | no-light.jq", jq_expr: no_light_filter, expected_artifacts: 20 },
    ];

    let mut failures = 0;
    for case in &cases {
        eprintln!("{} {}", "▶".cyan(), case.label.bold());
        match run_case(case) {
            Ok(()) => eprintln!("✅ success"),
            Err(error) => {
                failures += 1;
                eprintln!("❌ failed: {}", format!("{error:#}").red());
            }
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }
}
