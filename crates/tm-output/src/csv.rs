//! CSV output backend.
//!
//! Creates `tick_summaries.csv` in the configured output directory.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, TickSummaryRow};

/// Writes tick telemetry to a CSV file.
pub struct CsvWriter {
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) `tick_summaries.csv` in `dir` and write the header.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick",
            "unix_ms",
            "completed_units",
            "produced_entries",
            "queue_len",
            "unit_weight",
            "rescaled",
            "funds",
        ])?;

        Ok(Self {
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.unix_ms.to_string(),
            row.completed_units.to_string(),
            row.produced_entries.to_string(),
            row.queue_len.to_string(),
            row.unit_weight.to_string(),
            (row.rescaled as u8).to_string(),
            row.funds.clone(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        Ok(())
    }
}
