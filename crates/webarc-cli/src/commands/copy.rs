//! Copy command implementation

use crate::cli::CopyArgs;
use crate::error::add_archive_context;
use crate::output::CopySummary;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use std::fs;
use std::path::Path;
use webarc_core::ArchiveConfig;
use webarc_core::RecordFormat;
use webarc_core::copy_records;
use webarc_core::formats::detect::detect_path_format;
use webarc_core::open_with_config;

pub fn execute(
    args: &CopyArgs,
    config: &ArchiveConfig,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let mut source = add_archive_context(open_with_config(&args.input, "r", config), &args.input)?;

    // Opening the output truncates or extends it, so it must not be the input.
    if args.output.exists() && same_file(&args.input, &args.output)? {
        bail!(
            "Input and output are the same file: {}\n\
             HINT: Copy to a different path, then rename it over the original.",
            args.output.display()
        );
    }

    // Refuse before the output file is created or truncated.
    let output_format = detect_path_format(&args.output);
    if output_format.is_recognized() && output_format.name() != source.format_name() {
        bail!(
            "Cannot copy {} archive '{}' to {} archive '{}'\n\
             HINT: Input and output must use the same format.",
            source.format_name(),
            args.input.display(),
            output_format.name(),
            args.output.display()
        );
    }
    if !args.append && !args.force && args.output.exists() {
        bail!(
            "Output file already exists: {}\n\
             HINT: Use --force to overwrite or --append to add records.",
            args.output.display()
        );
    }

    let output_config = config
        .clone()
        .with_compression_level(args.compression_level);
    let mode = if args.append { "a" } else { "w" };
    let mut dest = add_archive_context(
        open_with_config(&args.output, mode, &output_config),
        &args.output,
    )?;
    let compressed = dest.is_compressed();

    let records_copied = add_archive_context(copy_records(&mut source, &mut dest), &args.output)?;
    add_archive_context(dest.close(), &args.output)?;

    let bytes_written = fs::metadata(&args.output)
        .with_context(|| format!("failed to stat output '{}'", args.output.display()))?
        .len();

    formatter.format_copy_result(&CopySummary {
        input: args.input.display().to_string(),
        output: args.output.display().to_string(),
        format: source.format_name().to_string(),
        compressed,
        records_copied,
        bytes_written,
    })
}

fn same_file(input: &Path, output: &Path) -> Result<bool> {
    let input = fs::canonicalize(input)
        .with_context(|| format!("failed to resolve input '{}'", input.display()))?;
    let output = fs::canonicalize(output)
        .with_context(|| format!("failed to resolve output '{}'", output.display()))?;
    Ok(input == output)
}
