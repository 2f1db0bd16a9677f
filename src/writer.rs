//! Writing generated sources without touching files whose content is unchanged,
//! so downstream builds do not see spurious modifications.
use std::path::{Path, PathBuf};

use crate::codegen::{GeneratedArtifact, GENERATOR_NAME};
use crate::error::{GenerateError, Result};

/// Every path the writer was asked to produce during one run, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildManifest {
    touched: Vec<PathBuf>,
}

impl BuildManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, path: impl Into<PathBuf>) {
        self.touched.push(path.into());
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.touched
    }

    /// One path per line, `/`-separated regardless of platform.
    pub fn to_list(&self) -> String {
        let mut out = String::new();
        for path in &self.touched {
            let line = path
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    /// `<root>/style-codegen.list`
    pub fn default_path(root: &Path) -> PathBuf {
        root.join(format!("{GENERATOR_NAME}.list"))
    }

    /// Overwrite the manifest file. Always written, even when nothing changed.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        write_file(path, &self.to_list())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Unchanged,
    Updated,
    /// Content differs but dry-run suppressed the write.
    WouldUpdate,
}

#[derive(Debug, Clone)]
pub struct Writer {
    root: PathBuf,
    dry_run: bool,
}

impl Writer {
    pub fn new(root: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self { root: root.into(), dry_run }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn write_if_modified(
        &self,
        artifact: &GeneratedArtifact,
        manifest: &mut BuildManifest,
    ) -> Result<WriteOutcome> {
        manifest.record(&artifact.path);
        let target = self.root.join(&artifact.path);

        let existing = match std::fs::read(&target) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            // Some ancestor of the target is a regular file, so it can never be written.
            Err(source) if source.kind() == std::io::ErrorKind::NotADirectory => {
                return Err(GenerateError::Write { path: target, source });
            }
            Err(source) => return Err(GenerateError::Read { path: target, source }),
        };
        if existing.as_deref() == Some(artifact.content.as_bytes()) {
            log::info!("skipping {}", artifact.path.display());
            return Ok(WriteOutcome::Unchanged);
        }

        log::info!("updating {}", artifact.path.display());
        if self.dry_run {
            return Ok(WriteOutcome::WouldUpdate);
        }
        write_file(&target, &artifact.content)?;
        Ok(WriteOutcome::Updated)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| GenerateError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, content).map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })
}
