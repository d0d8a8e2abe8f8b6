//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use std::env;
use untgz_core::DirectoryConflict;
use untgz_core::ExtractionConfig;
use untgz_core::extract_package_with_config;

pub fn execute(args: &ExtractArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let output_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let config = build_config(args);
    tracing::debug!(?config, "extracting");

    let report = add_archive_context(
        extract_package_with_config(&args.archive, &output_dir, &config),
        &args.archive,
    )?;

    formatter.format_extraction_result(&report)
}

fn build_config(args: &ExtractArgs) -> ExtractionConfig {
    let conflict = if args.replace_conflicting_files {
        DirectoryConflict::ReplaceFile
    } else {
        DirectoryConflict::Fail
    };

    ExtractionConfig::default()
        .with_package_dir(args.package_dir.clone())
        .with_verify_before_write(!args.no_verify)
        .with_directory_conflict(conflict)
        .with_cleanup_on_failure(args.cleanup_on_failure)
}
