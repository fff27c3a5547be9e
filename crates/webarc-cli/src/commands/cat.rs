//! Cat command implementation

use crate::cli::CatArgs;
use crate::commands::record_entry;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use anyhow::bail;
use webarc_core::ArchiveConfig;
use webarc_core::RecordFormat;
use webarc_core::open_with_config;

pub fn execute(
    args: &CatArgs,
    config: &ArchiveConfig,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let mut archive = add_archive_context(
        open_with_config(&args.archive, "r", config),
        &args.archive,
    )?;

    let Some(entry) = archive.browse().nth(args.index) else {
        bail!(
            "Record index {} out of range: '{}' has fewer than {} records\n\
             HINT: Use 'webarc list' to see the available records.",
            args.index,
            args.archive.display(),
            args.index.saturating_add(1)
        );
    };
    let (record, offset) = add_archive_context(entry, &args.archive)?;

    tracing::debug!(index = args.index, offset, "writing record payload");
    formatter.format_record(&record_entry(args.index, offset, &record), record.payload())
}
