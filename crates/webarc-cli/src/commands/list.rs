//! List command implementation

use crate::cli::ListArgs;
use crate::commands::record_entry;
use crate::error::add_archive_context;
use crate::output::Listing;
use crate::output::OutputFormatter;
use anyhow::Result;
use webarc_core::ArchiveConfig;
use webarc_core::RecordFormat;
use webarc_core::open_with_config;

pub fn execute(
    args: &ListArgs,
    config: &ArchiveConfig,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let mut archive = add_archive_context(
        open_with_config(&args.archive, "r", config),
        &args.archive,
    )?;

    let mut records = Vec::new();
    for (index, entry) in archive.browse().enumerate() {
        let (record, offset) = add_archive_context(entry, &args.archive)?;
        records.push(record_entry(index, offset, &record));
    }

    if records.is_empty() {
        formatter.format_warning(&format!("no records found in '{}'", args.archive.display()));
    }

    let listing = Listing {
        archive: args.archive.display().to_string(),
        format: archive.format_name().to_string(),
        compressed: archive.is_compressed(),
        records,
    };

    formatter.format_listing(&listing, args.long, args.human_readable)
}
