//! `tm-output` — tick telemetry writers for tickmint.
//!
//! One backend is provided: CSV, creating `tick_summaries.csv` in the
//! configured output directory.  It implements [`OutputWriter`] and is driven
//! by [`TelemetryObserver`], which implements `tm_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tm_output::{CsvWriter, TelemetryObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = TelemetryObserver::new(writer, start, pace);
//! game.run_for(total_ticks, &mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("telemetry error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TelemetryObserver;
pub use row::TickSummaryRow;
pub use writer::OutputWriter;
