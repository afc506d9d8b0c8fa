use calamine::{Reader, open_workbook_auto_from_rs};
use std::collections::HashSet;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::thread;

use crate::commute_validator::CommuteValidator;
use crate::error::{CommuteError, Result};
use crate::extraction_result::{ExtractionResult, Verdict};
use crate::utils::write_error_to_log;

const WORKBOOK_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// Result for one submitted file
#[derive(Debug)]
pub enum FileOutcome {
    Validated(ExtractionResult),
    /// The file could not be read as a workbook; other files are unaffected
    Unreadable { name: String, error: CommuteError },
}

impl FileOutcome {
    pub fn name(&self) -> &str {
        match self {
            FileOutcome::Validated(result) => result.name(),
            FileOutcome::Unreadable { name, .. } => name,
        }
    }

    /// `None` for unreadable files
    pub fn status(&self) -> Option<Verdict> {
        self.result().map(ExtractionResult::status)
    }

    pub fn result(&self) -> Option<&ExtractionResult> {
        match self {
            FileOutcome::Validated(result) => Some(result),
            FileOutcome::Unreadable { .. } => None,
        }
    }
}

/// Validate workbook bytes already in memory (xlsx, xls, xlsb or ods)
pub fn validate_bytes(
    name: &str,
    bytes: Vec<u8>,
    validator: &CommuteValidator,
) -> Result<ExtractionResult> {
    let unreadable = |message: String| CommuteError::SourceUnreadable {
        name: name.to_string(),
        message,
    };

    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| unreadable(e.to_string()))?;

    let range = match validator.config().sheet_name.as_deref() {
        Some(sheet_name) => workbook
            .worksheet_range(sheet_name)
            .map_err(|e| unreadable(format!("Error reading sheet '{}': {}", sheet_name, e)))?,
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| unreadable("The workbook has no sheets".to_string()))?
            .map_err(|e| unreadable(e.to_string()))?,
    };

    Ok(validator.validate_range(name, &range))
}

/// Read a file and validate it. Reading the bytes is the only I/O.
pub fn validate_path(path: &Path, validator: &CommuteValidator) -> Result<ExtractionResult> {
    let name = display_name(path);
    let bytes = std::fs::read(path).map_err(|e| CommuteError::SourceUnreadable {
        name: name.clone(),
        message: e.to_string(),
    })?;
    tracing::debug!(file = %name, bytes = bytes.len(), "read workbook");
    validate_bytes(&name, bytes, validator)
}

/// Validate files concurrently, one scoped thread per file.
///
/// Outcomes come back in submission order. Files whose verdict is not
/// acceptable, and unreadable files, are reported to the errors log when
/// one is configured.
pub fn validate_files(paths: &[PathBuf], validator: &CommuteValidator) -> Vec<FileOutcome> {
    let outcomes = validate_each(paths, |path| validate_path(path, validator));

    if let Some(log_path) = validator.config().errors_log.as_deref() {
        log_outcomes(log_path, &outcomes);
    }

    outcomes
}

/// Run `validate` on every path in its own scoped thread.
/// A panicking worker becomes `Unreadable` for its file only.
fn validate_each<F>(paths: &[PathBuf], validate: F) -> Vec<FileOutcome>
where
    F: Fn(&Path) -> Result<ExtractionResult> + Sync,
{
    let validate = &validate;
    thread::scope(|scope| {
        let handles: Vec<_> = paths
            .iter()
            .map(|path| (path, scope.spawn(move || validate(path))))
            .collect();

        handles
            .into_iter()
            .map(|(path, handle)| {
                let result = handle.join().unwrap_or_else(|_| {
                    Err(CommuteError::SourceUnreadable {
                        name: display_name(path),
                        message: "validation thread panicked".to_string(),
                    })
                });
                match result {
                    Ok(result) => FileOutcome::Validated(result),
                    Err(error) => {
                        tracing::warn!(file = %path.display(), "{error}");
                        FileOutcome::Unreadable {
                            name: display_name(path),
                            error,
                        }
                    }
                }
            })
            .collect()
    })
}

/// Keep `.xlsx`/`.xls` files, dropping any whose file name was already accepted
pub fn accept_workbook_paths(paths: impl IntoIterator<Item = PathBuf>) -> Vec<PathBuf> {
    let mut seen_names: HashSet<String> = HashSet::new();

    paths
        .into_iter()
        .filter(|path| {
            let is_workbook = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| {
                    WORKBOOK_EXTENSIONS
                        .iter()
                        .any(|known| ext.eq_ignore_ascii_case(known))
                });
            if !is_workbook {
                tracing::debug!(file = %path.display(), "skipping non-workbook file");
            }
            is_workbook
        })
        .filter(|path| {
            let name = display_name(path);
            let first_time = seen_names.insert(name);
            if !first_time {
                tracing::debug!(file = %path.display(), "skipping file with a duplicate name");
            }
            first_time
        })
        .collect()
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn log_outcomes(log_path: &Path, outcomes: &[FileOutcome]) {
    for outcome in outcomes {
        match outcome {
            FileOutcome::Unreadable { error, .. } => {
                write_error_to_log(log_path, "Workbook Read Error", &error.to_string());
            }
            FileOutcome::Validated(result) if result.status() != Verdict::Acceptable => {
                write_error_to_log(
                    log_path,
                    "Commuting Claim Validation Report",
                    &result.format_report(),
                );
            }
            FileOutcome::Validated(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{commuting_trip, create_validator_with_defaults, sheet_from_rows};

    #[test]
    fn test_garbage_bytes_are_unreadable() {
        let validator = create_validator_with_defaults();
        let err = validate_bytes("broken.xlsx", b"not a workbook".to_vec(), &validator).unwrap_err();
        match err {
            CommuteError::SourceUnreadable { name, .. } => assert_eq!(name, "broken.xlsx"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let validator = create_validator_with_defaults();
        let err = validate_path(Path::new("/nonexistent/claim.xlsx"), &validator).unwrap_err();
        assert!(matches!(err, CommuteError::SourceUnreadable { ref name, .. } if name == "claim.xlsx"));
    }

    #[test]
    fn test_accept_workbook_paths() {
        let accepted = accept_workbook_paths(vec![
            PathBuf::from("a/claim.xlsx"),
            PathBuf::from("notes.txt"),
            PathBuf::from("b/claim.xlsx"),
            PathBuf::from("old.XLS"),
            PathBuf::from("no_extension"),
        ]);
        assert_eq!(
            accepted,
            vec![PathBuf::from("a/claim.xlsx"), PathBuf::from("old.XLS")]
        );
    }

    #[test]
    fn test_panicking_worker_only_fails_its_own_file() {
        let validator = create_validator_with_defaults();
        let sheet = sheet_from_rows(vec![commuting_trip(1, "新宿", "渋谷", "電車", 500.0)]);
        let paths = vec![
            PathBuf::from("first.xlsx"),
            PathBuf::from("panics.xlsx"),
            PathBuf::from("third.xlsx"),
        ];

        let outcomes = validate_each(&paths, |path| {
            let name = display_name(path);
            if name == "panics.xlsx" {
                panic!("worker failure");
            }
            Ok(validator.validate_range(&name, &sheet))
        });

        let names: Vec<&str> = outcomes.iter().map(FileOutcome::name).collect();
        assert_eq!(names, vec!["first.xlsx", "panics.xlsx", "third.xlsx"]);
        assert_eq!(outcomes[0].status(), Some(Verdict::Acceptable));
        assert!(matches!(
            &outcomes[1],
            FileOutcome::Unreadable { error: CommuteError::SourceUnreadable { message, .. }, .. }
                if message.contains("panicked")
        ));
        assert_eq!(outcomes[2].status(), Some(Verdict::Acceptable));
    }
}
