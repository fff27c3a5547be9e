//! Human-readable output formatter with colors and styling.

use super::formatter::CopySummary;
use super::formatter::Detection;
use super::formatter::Listing;
use super::formatter::OutputFormatter;
use super::formatter::RecordEntry;
use anyhow::Result;
use console::Term;
use console::style;
use std::io::Write;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }

    /// Type column: the WARC record type, or the content type for ARC.
    fn record_kind(entry: &RecordEntry) -> &str {
        entry
            .record_type
            .as_deref()
            .or(entry.content_type.as_deref())
            .unwrap_or("-")
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_detection(&self, results: &[Detection]) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for result in results {
            let format = if result.recognized {
                result.format.clone()
            } else if self.use_colors {
                style(format!("unsupported ('{}')", result.format))
                    .red()
                    .to_string()
            } else {
                format!("unsupported ('{}')", result.format)
            };
            let compression = if result.compressed { "gzip" } else { "none" };
            let _ = self.term.write_line(&format!(
                "{}: {} (compression: {})",
                result.path, format, compression
            ));
        }

        Ok(())
    }

    fn format_listing(&self, listing: &Listing, long: bool, human_readable: bool) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.verbose {
            let _ = self.term.write_line(&format!(
                "{} ({}{})",
                listing.archive,
                listing.format,
                if listing.compressed { ", gzip" } else { "" }
            ));
        }

        for entry in &listing.records {
            let size_str = if human_readable {
                Self::format_size(entry.length)
            } else {
                entry.length.to_string()
            };

            let _ = self.term.write_line(&format!(
                "{:>10}  {:<10} {:>10}  {}",
                entry.offset,
                Self::record_kind(entry),
                size_str,
                entry.url.as_deref().unwrap_or("-")
            ));

            if long {
                for (name, value) in &entry.headers {
                    let name = if self.use_colors {
                        style(name).dim().to_string()
                    } else {
                        name.clone()
                    };
                    let _ = self.term.write_line(&format!("    {name}: {value}"));
                }
            }
        }

        if long || self.verbose {
            let _ = self.term.write_line("");
            let _ = self.term.write_line(&format!(
                "Total: {} records, {}",
                Self::format_number(listing.records.len()),
                Self::format_size(listing.total_length())
            ));
        }

        Ok(())
    }

    fn format_record(&self, _entry: &RecordEntry, payload: &[u8]) -> Result<()> {
        // Payload bytes go out verbatim, even in quiet mode.
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(payload)?;
        stdout.flush()?;
        Ok(())
    }

    fn format_copy_result(&self, summary: &CopySummary) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            let _ = self.term.write_line(&format!(
                "{} Copied to {}",
                style("✓").green().bold(),
                summary.output
            ));
        } else {
            let _ = self
                .term
                .write_line(&format!("Copied to {}", summary.output));
        }

        let _ = self.term.write_line(&format!(
            "  Records copied:   {}",
            Self::format_number(usize::try_from(summary.records_copied).unwrap_or(usize::MAX))
        ));
        let _ = self.term.write_line(&format!(
            "  Output size:      {}",
            Self::format_size(summary.bytes_written)
        ));

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Format:           {}", summary.format));
            let _ = self.term.write_line(&format!(
                "  Compression:      {}",
                if summary.compressed { "gzip" } else { "none" }
            ));
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.term.write_line(&format!("ERROR: {error:?}"));
        }
    }

    fn format_success(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(message);
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.term.write_line(&format!("WARNING: {message}"));
        }
    }
}
