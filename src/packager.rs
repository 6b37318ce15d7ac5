use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::error::{PackagerError, Result};
use crate::metadata::PackageMetadata;
use crate::template::Template;

/// Everything one invocation needs, as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequest {
    pub template_path: PathBuf,
    pub output_path: PathBuf,
    pub release_version: String,
    pub checksum: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Render and echo but leave the output path untouched
    pub dry_run: bool,
    /// Fail instead of warning when a placeholder has no value
    pub strict: bool,
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub metadata: PackageMetadata,
    pub content: String,
    pub written: bool,
}

impl PackageRequest {
    pub fn new(
        template_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        release_version: impl Into<String>,
        checksum: impl Into<String>,
    ) -> Self {
        Self {
            template_path: template_path.into(),
            output_path: output_path.into(),
            release_version: release_version.into(),
            checksum: checksum.into(),
        }
    }

    pub fn metadata(&self) -> PackageMetadata {
        PackageMetadata::for_release(&self.release_version, &self.checksum)
    }
}

/// Load the template and substitute `metadata` into it.
///
/// Placeholders without a value are logged, and rejected when `strict` is set.
pub fn render(template_path: &Path, metadata: &PackageMetadata, strict: bool) -> Result<String> {
    let template = Template::from_file(template_path)?;
    debug!(
        bytes = template.text().len(),
        placeholders = ?template.identifiers(),
        "loaded template"
    );

    let unresolved = template.unresolved(metadata);
    for name in &unresolved {
        warn!(placeholder = %name, "no value for placeholder, leaving it in place");
    }
    if strict && !unresolved.is_empty() {
        return Err(PackagerError::UnresolvedPlaceholders(
            unresolved.into_iter().map(String::from).collect(),
        ));
    }

    Ok(template.safe_substitute(metadata))
}

/// Generate the formula and echo progress to `out`.
///
/// The template is read and rendered before the output file is touched, so
/// a failed read never creates or truncates the output.
#[instrument(
    skip_all,
    fields(
        template = %request.template_path.display(),
        output = %request.output_path.display(),
    )
)]
pub fn generate<W: Write>(
    request: &PackageRequest,
    options: RenderOptions,
    out: &mut W,
) -> Result<Rendered> {
    writeln!(
        out,
        "Generating {} from template {}",
        request.output_path.display(),
        request.template_path.display()
    )?;

    let metadata = request.metadata();
    writeln!(out, "Metadata:")?;
    for (key, value) in metadata.iter() {
        writeln!(out, "* {}: {}", key, value)?;
    }

    let content = render(&request.template_path, &metadata, options.strict)?;
    writeln!(out, "{}", content)?;

    if options.dry_run {
        info!("dry run, output not written");
        writeln!(out, "Dry run: {} not written", request.output_path.display())?;
        return Ok(Rendered { metadata, content, written: false });
    }

    write_output(&request.output_path, &content)?;
    info!(bytes = content.len(), "wrote formula");
    writeln!(out, "Generated {}", request.output_path.display())?;

    Ok(Rendered { metadata, content, written: true })
}

/// Create or overwrite `path`. Missing parent directories are an error.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| PackagerError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}
