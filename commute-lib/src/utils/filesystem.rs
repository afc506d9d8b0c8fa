use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::utils::get_utc_iso_datetime;

/// Centralized function to append error reports to an errors log file
///
/// # Arguments
/// * `log_path` - File the entry is appended to (created if missing)
/// * `error_type` - A description of the error type/category (e.g., "Workbook Read Error")
/// * `error_message` - The actual error message content
pub fn write_error_to_log(log_path: &Path, error_type: &str, error_message: &str) {
    let timestamp = get_utc_iso_datetime();
    let log_entry = format!("\n[{}] {}:\n{}\n", timestamp, error_type, error_message);

    match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(mut file) => {
            if let Err(e) = writeln!(file, "{}", log_entry) {
                tracing::warn!(path = %log_path.display(), "could not write errors log: {e}");
            }
        }
        Err(e) => {
            tracing::warn!(path = %log_path.display(), "could not open errors log: {e}");
        }
    }
}
