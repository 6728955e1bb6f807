//! `toolmint export` - convert a tool document to another format.

use crate::ExportFormat;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;
use toolmint_store::{export_csv, load_document, save_document};

/// Runs the export command.
///
/// # Errors
///
/// Returns an error if the tool document cannot be loaded or the export
/// cannot be written.
pub fn run(input: &Path, output: &Path, format: ExportFormat) -> Result<()> {
    let document = load_document(input)
        .with_context(|| format!("failed to load tool document {}", input.display()))?;

    match format {
        ExportFormat::Csv => export_csv(output, &document),
        ExportFormat::Json => save_document(output, &document),
    }
    .with_context(|| format!("failed to write export {}", output.display()))?;

    println!(
        "{} Exported {} tools to {}",
        style("✓").green(),
        style(document.len()).bold(),
        output.display()
    );
    Ok(())
}
