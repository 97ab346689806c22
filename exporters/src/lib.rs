//! Exporters Crate
//!
//! Turns activity records of unknown schema into a row/column table and
//! writes it out as CSV.
//!
//! # Example
//!
//! ```rust,ignore
//! use exporters::{ActivityTable, CsvExporter};
//!
//! let table = ActivityTable::from_records(&records);
//! CsvExporter::new().write(&table, &accession.output_path(&output_dir))?;
//! ```

pub mod csv_writer;
pub mod table;

pub use csv_writer::CsvExporter;
pub use table::ActivityTable;
