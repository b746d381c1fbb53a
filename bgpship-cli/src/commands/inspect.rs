//! `bgpship inspect` command handler

use std::io::Write;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use bgpship_core::config::BgpshipConfig;
use bgpship_shipper::{DumpReader, FlatRecord, reader_from_config};

use crate::cli::InspectArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `inspect` command.
///
/// Reads and flattens `args.path` with the configured reader. Nothing is
/// rotated, no credentials are fetched and nothing is sent.
pub async fn execute(
    args: InspectArgs,
    config: BgpshipConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let reader: Arc<dyn DumpReader> = Arc::from(reader_from_config(&config.reader)?);
    let reader_name = reader.name().to_owned();

    info!(path = %args.path.display(), reader = %reader_name, "inspecting dump");
    let batch = bgpship_shipper::shipper::inspect(reader, args.path.clone()).await?;

    let report = InspectReport {
        path: args.path.display().to_string(),
        reader: reader_name,
        records: batch.len(),
        dropped_keys: batch.dropped_keys(),
        batch: batch.into_records(),
    };
    writer.render(&report)?;

    Ok(())
}

/// Flattened contents of one dump file.
#[derive(Serialize)]
pub struct InspectReport {
    /// Inspected file
    pub path: String,
    /// Reader used to decode the file
    pub reader: String,
    /// Number of records
    pub records: usize,
    /// Keys dropped while flattening
    pub dropped_keys: usize,
    /// Flattened records as they would be sent
    pub batch: Vec<FlatRecord>,
}

impl Render for InspectReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(
            w,
            "Inspect: {} (reader: {})",
            self.path.bold(),
            self.reader
        )?;
        writeln!(
            w,
            "  Records: {}  Dropped keys: {}",
            self.records, self.dropped_keys
        )?;

        for record in &self.batch {
            serde_json::to_writer(&mut *w, record)?;
            writeln!(w)?;
        }

        Ok(())
    }
}
