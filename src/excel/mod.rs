//! Dataset ingestion from Excel workbooks.

mod importer;

pub use importer::ExcelImporter;
