use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{CommuteError, Result};
use crate::{COMMUTING_MARKER, ERRORS_LOG_FILE};

/// Serial number of 1970-01-01 in the 1900 date system
pub const DEFAULT_EPOCH_OFFSET_DAYS: i64 = 25569;

/// Absolute 0-based sheet column offsets of the claim fields.
/// The defaults follow the claim form: flag in B, date in C, stations in D and F, then G..K.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    pub flag: u32,
    pub date: u32,
    pub boarding_station: u32,
    pub alighting_station: u32,
    pub trip_type: u32,
    pub expense_type: u32,
    pub destination: u32,
    pub transport_type: u32,
    pub amount: u32,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        ColumnLayout {
            flag: 1,
            date: 2,
            boarding_station: 3,
            alighting_station: 5,
            trip_type: 6,
            expense_type: 7,
            destination: 8,
            transport_type: 9,
            amount: 10,
        }
    }
}

impl ColumnLayout {
    fn named_offsets(&self) -> [(&'static str, u32); 9] {
        [
            ("flag", self.flag),
            ("date", self.date),
            ("boarding_station", self.boarding_station),
            ("alighting_station", self.alighting_station),
            ("trip_type", self.trip_type),
            ("expense_type", self.expense_type),
            ("destination", self.destination),
            ("transport_type", self.transport_type),
            ("amount", self.amount),
        ]
    }
}

/// Minimum share of commuting rows, applied with floor division
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageRatio {
    pub numerator: usize,
    pub denominator: usize,
}

impl Default for CoverageRatio {
    fn default() -> Self {
        CoverageRatio {
            numerator: 1,
            denominator: 2,
        }
    }
}

impl CoverageRatio {
    /// `floor(total * numerator / denominator)`
    pub fn threshold(&self, total: usize) -> usize {
        if self.denominator == 0 {
            return total;
        }
        total.saturating_mul(self.numerator) / self.denominator
    }
}

/// Inclusive bounds for a plausible commuting amount
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmountBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for AmountBounds {
    fn default() -> Self {
        AmountBounds {
            min: 410.0,
            max: 1000.0,
        }
    }
}

impl AmountBounds {
    pub fn contains(&self, amount: f64) -> bool {
        (self.min..=self.max).contains(&amount)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub columns: ColumnLayout,
    pub commuting_marker: String,
    pub coverage: CoverageRatio,
    pub amount_bounds: AmountBounds,
    /// Number of empty route buckets the clusterer starts with. Not a limit.
    pub route_seed_slots: usize,
    /// Display only; never consulted by validation
    pub date_epoch_offset_days: i64,
    /// Sheet to read; the first sheet when unset
    pub sheet_name: Option<String>,
    /// Where batch reports are appended; disabled when unset
    pub errors_log: Option<PathBuf>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        ValidationConfig {
            columns: ColumnLayout::default(),
            commuting_marker: COMMUTING_MARKER.to_string(),
            coverage: CoverageRatio::default(),
            amount_bounds: AmountBounds::default(),
            route_seed_slots: 2,
            date_epoch_offset_days: DEFAULT_EPOCH_OFFSET_DAYS,
            sheet_name: None,
            errors_log: Some(PathBuf::from(ERRORS_LOG_FILE)),
        }
    }
}

impl ValidationConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ValidationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "loaded configuration file");
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        let mut problems: Vec<String> = Vec::new();

        if self.coverage.denominator == 0 {
            problems.push("coverage.denominator must be greater than zero".to_string());
        } else if self.coverage.numerator > self.coverage.denominator {
            problems.push(format!(
                "coverage ratio {}/{} exceeds 1",
                self.coverage.numerator, self.coverage.denominator
            ));
        }

        if !self.amount_bounds.min.is_finite() || !self.amount_bounds.max.is_finite() {
            problems.push("amount_bounds must be finite numbers".to_string());
        } else if self.amount_bounds.min > self.amount_bounds.max {
            problems.push(format!(
                "amount_bounds.min ({}) is greater than amount_bounds.max ({})",
                self.amount_bounds.min, self.amount_bounds.max
            ));
        }

        if self.commuting_marker.trim().is_empty() {
            problems.push("commuting_marker must not be empty".to_string());
        }

        let mut column_positions: HashMap<u32, Vec<&str>> = HashMap::new();
        for (name, offset) in self.columns.named_offsets() {
            column_positions.entry(offset).or_default().push(name);
        }
        let mut shared: Vec<String> = column_positions
            .into_iter()
            .filter(|(_, names)| names.len() > 1)
            .map(|(offset, names)| format!("column {} is used by {}", offset, names.join(", ")))
            .collect();
        shared.sort();
        problems.extend(shared);

        if problems.is_empty() {
            Ok(())
        } else {
            Err(CommuteError::InvalidConfig {
                message: problems.join("; "),
            })
        }
    }
}
