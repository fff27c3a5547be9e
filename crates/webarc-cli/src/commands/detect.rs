//! Detect command implementation

use crate::cli::DetectArgs;
use crate::output::Detection;
use crate::output::OutputFormatter;
use anyhow::Result;
use webarc_core::formats::detect::detect_path_compression;
use webarc_core::formats::detect::detect_path_format;

pub fn execute(args: &DetectArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let results: Vec<Detection> = args
        .files
        .iter()
        .map(|path| {
            let format = detect_path_format(path);
            Detection {
                path: path.display().to_string(),
                format: format.name().to_string(),
                recognized: format.is_recognized(),
                compressed: detect_path_compression(path),
            }
        })
        .collect();

    formatter.format_detection(&results)
}
