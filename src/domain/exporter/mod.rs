pub mod download;
pub mod file_name;

// --- public re-exports ---
pub use download::{BlobEncoder, ExportError, ExportMethod, ExportPath, ExportReport, Exporter};
pub use file_name::{badge_file_name, sanitize_file_stem};
