#![allow(clippy::needless_return)]

mod batch;
mod commute_validator;
pub mod config;
pub mod display;
mod error;
mod extraction_result;
mod route_clusterer;
mod row_extractor;
mod trip_record;
pub mod utils;

// Test utilities - only compiled when testing or with test feature
// #[cfg(test)] alone doesn't work for integration tests (they're external crates)
// The feature flag makes it available to integration tests via dev-dependencies
#[cfg(any(test, feature = "test"))]
pub mod test_utils;

pub use batch::{FileOutcome, accept_workbook_paths, validate_bytes, validate_files, validate_path};
pub use commute_validator::{CommuteValidator, CommuteValidatorBuilder};
pub use config::{AmountBounds, ColumnLayout, CoverageRatio, ValidationConfig};
pub use error::{CommuteError, Result, ValidationFinding};
pub use extraction_result::{ExtractionResult, TripColumns, Verdict};
pub use route_clusterer::{Route, RouteKey, cluster_routes, commuting_records};
pub use row_extractor::RowExtractor;
pub use trip_record::{TripDate, TripRecord};

// Re-exported so callers can build sheets without a direct calamine dependency
pub use calamine;

pub const ERRORS_LOG_FILE: &str = "errors.log";

/// Expense-type marker of a commuting row
pub const COMMUTING_MARKER: &str = "通勤費";
