//! Spreadsheet exchange for the ledger.
//!
//! A file is decoded into a plain [Sheet] grid first. The importer then
//! validates and partitions the grid into record batches, and the exporter
//! builds a grid for the codecs to write back out. The grid is the only
//! thing the codecs and the engine share, so adding a file format never
//! touches the import rules.

mod codec;
mod export;
mod grid;
mod import;
#[cfg(feature = "xlsx")]
mod xlsx;

pub use codec::{read_sheet_file, sheet_from_csv, sheet_to_csv, write_sheet_file};
pub use export::{BALANCE_LABEL, DEFAULT_EXPORT_FILE, EXPORT_HEADER, export_sheet};
pub use grid::{Cell, Sheet};
pub use import::{
    ImportSummary, SHEET_COLUMNS, SheetBatches, SheetLanguage, import_sheet, partition_sheet,
};
#[cfg(feature = "xlsx")]
pub use xlsx::{sheet_from_xlsx, sheet_from_xlsx_file};
