use calamine::{Data, Range};

use crate::config::{AmountBounds, ColumnLayout, CoverageRatio, ValidationConfig};
use crate::error::{Result, ValidationFinding};
use crate::extraction_result::{ExtractionResult, Verdict};
use crate::route_clusterer::{Route, cluster_routes, commuting_records};
use crate::row_extractor::RowExtractor;
use crate::trip_record::TripRecord;

/// Checks commuting claims against the configured rules.
///
/// Shared read-only between files; validating never mutates it.
#[derive(Debug, Clone)]
pub struct CommuteValidator {
    config: ValidationConfig,
}

pub struct CommuteValidatorBuilder {
    config: ValidationConfig,
}

impl Default for CommuteValidatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CommuteValidatorBuilder {
    /// Start from the default configuration
    pub fn new() -> Self {
        CommuteValidatorBuilder {
            config: ValidationConfig::default(),
        }
    }

    /// Start from an existing configuration (e.g. one loaded from TOML)
    pub fn from_config(config: ValidationConfig) -> Self {
        CommuteValidatorBuilder { config }
    }

    pub fn columns(mut self, columns: ColumnLayout) -> Self {
        self.config.columns = columns;
        self
    }

    pub fn commuting_marker(mut self, marker: &str) -> Self {
        self.config.commuting_marker = marker.to_string();
        self
    }

    pub fn coverage(mut self, coverage: CoverageRatio) -> Self {
        self.config.coverage = coverage;
        self
    }

    pub fn amount_bounds(mut self, min: f64, max: f64) -> Self {
        self.config.amount_bounds = AmountBounds { min, max };
        self
    }

    pub fn route_seed_slots(mut self, slots: usize) -> Self {
        self.config.route_seed_slots = slots;
        self
    }

    pub fn sheet_name(mut self, sheet_name: Option<&str>) -> Self {
        self.config.sheet_name = sheet_name.map(str::to_string);
        self
    }

    pub fn errors_log(mut self, path: Option<std::path::PathBuf>) -> Self {
        self.config.errors_log = path;
        self
    }

    /// Validate the configuration and build the validator
    pub fn build(self) -> Result<CommuteValidator> {
        CommuteValidator::new(self.config)
    }
}

impl CommuteValidator {
    //////////////////////////////////////////////////////////////
    ///  Public API
    //////////////////////////////////////////////////////////////

    pub fn new(config: ValidationConfig) -> Result<Self> {
        config.validate()?;
        Ok(CommuteValidator { config })
    }

    pub fn builder() -> CommuteValidatorBuilder {
        CommuteValidatorBuilder::new()
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Lazy claim rows of a sheet range
    pub fn extract<'a>(&'a self, range: &'a Range<Data>) -> RowExtractor<'a> {
        RowExtractor::new(range, &self.config.columns)
    }

    /// Extract and validate one sheet
    pub fn validate_range(&self, name: &str, range: &Range<Data>) -> ExtractionResult {
        let mut extractor = self.extract(range);
        let records: Vec<TripRecord> = extractor.by_ref().collect();
        if let Some(row) = extractor.truncated_at() {
            tracing::info!(file = name, row, kept = records.len(), "rows truncated at first incomplete row");
        }
        self.validate_records(name, records)
    }

    /// Validate already extracted records.
    ///
    /// Priority: coverage, then route consistency, then amounts.
    pub fn validate_records(&self, name: &str, records: Vec<TripRecord>) -> ExtractionResult {
        let commuting = commuting_records(&records, &self.config.commuting_marker);
        let routes = cluster_routes(commuting.iter().copied(), self.config.route_seed_slots);
        let total = records.len();

        if total == 0 {
            tracing::warn!(file = name, "no claim rows were extracted");
        }

        let mut findings: Vec<ValidationFinding> = Vec::new();
        let status = if let Some(finding) = self.check_coverage(commuting.len(), total) {
            findings.push(finding);
            Verdict::Problem
        } else {
            let inconsistencies: Vec<ValidationFinding> = routes
                .iter()
                .enumerate()
                .flat_map(|(index, route)| Self::route_inconsistencies(index + 1, route))
                .collect();
            let amount_findings = self.check_amounts(commuting.iter().copied());

            let status = if !inconsistencies.is_empty() {
                Verdict::Problem
            } else if !amount_findings.is_empty() {
                Verdict::Attention
            } else {
                Verdict::Acceptable
            };
            findings.extend(inconsistencies);
            findings.extend(amount_findings);
            status
        };

        tracing::info!(
            file = name,
            rows = total,
            commuting = commuting.len(),
            routes = routes.len(),
            status = %status,
            "claim validated"
        );

        ExtractionResult::new(name.to_string(), status, records, routes, findings)
    }

    /// Smallest commuting count that passes for `total` rows
    pub fn coverage_threshold(&self, total: usize) -> usize {
        self.config.coverage.threshold(total)
    }

    /// `None` when commuting rows make up enough of the file
    pub fn check_coverage(&self, commuting: usize, total: usize) -> Option<ValidationFinding> {
        let threshold = self.coverage_threshold(total);
        if commuting >= threshold {
            return None;
        }
        Some(ValidationFinding::InsufficientCoverage {
            commuting,
            total,
            threshold,
        })
    }

    /// Every member matches the first one on all attributes except the date
    pub fn route_is_homogeneous(route: &Route) -> bool {
        let first = route.first();
        route
            .members()
            .iter()
            .all(|member| member.first_difference(first).is_none())
    }

    pub fn routes_are_consistent(routes: &[Route]) -> bool {
        routes.iter().all(Self::route_is_homogeneous)
    }

    pub fn amount_in_bounds(&self, amount: f64) -> bool {
        self.config.amount_bounds.contains(amount)
    }

    //////////////////////////////////////////////////////////////
    ///  Private methods
    //////////////////////////////////////////////////////////////

    fn route_inconsistencies(route_number: usize, route: &Route) -> Vec<ValidationFinding> {
        let first = route.first();
        route
            .members()
            .iter()
            .skip(1)
            .filter_map(|member| {
                member
                    .first_difference(first)
                    .map(|attribute| ValidationFinding::InconsistentRoute {
                        route: route_number,
                        row_number: member.row_number,
                        first_row: first.row_number,
                        attribute: attribute.to_string(),
                    })
            })
            .collect()
    }

    fn check_amounts<'a>(
        &self,
        commuting: impl Iterator<Item = &'a TripRecord>,
    ) -> Vec<ValidationFinding> {
        let bounds = self.config.amount_bounds;
        commuting
            .filter(|record| !bounds.contains(record.amount))
            .map(|record| ValidationFinding::AmountOutOfRange {
                row_number: record.row_number,
                amount: record.amount,
                min: bounds.min,
                max: bounds.max,
            })
            .collect()
    }
}
