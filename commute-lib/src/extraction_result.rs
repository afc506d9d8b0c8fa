use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::ValidationFinding;
use crate::route_clusterer::Route;
use crate::trip_record::{TripDate, TripRecord};

/// Outcome of validating one claim file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Verdict {
    #[serde(rename = "OK")]
    Acceptable,
    #[serde(rename = "要確認")]
    Attention,
    #[serde(rename = "問題あり")]
    Problem,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Acceptable => "OK",
            Verdict::Attention => "要確認",
            Verdict::Problem => "問題あり",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extracted rows as eight index-aligned columns
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripColumns {
    pub dates: Vec<TripDate>,
    pub boarding_stations: Vec<String>,
    pub alighting_stations: Vec<String>,
    pub trip_types: Vec<String>,
    pub expense_types: Vec<String>,
    pub destinations: Vec<String>,
    pub transport_types: Vec<String>,
    pub amounts: Vec<f64>,
}

impl TripColumns {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl<'a> FromIterator<&'a TripRecord> for TripColumns {
    fn from_iter<I: IntoIterator<Item = &'a TripRecord>>(iter: I) -> Self {
        let mut columns = TripColumns::default();
        for record in iter {
            columns.dates.push(record.date.clone());
            columns.boarding_stations.push(record.boarding_station.clone());
            columns.alighting_stations.push(record.alighting_station.clone());
            columns.trip_types.push(record.trip_type.clone());
            columns.expense_types.push(record.expense_type.clone());
            columns.destinations.push(record.destination.clone());
            columns.transport_types.push(record.transport_type.clone());
            columns.amounts.push(record.amount);
        }
        columns
    }
}

/// Everything produced for one file. Immutable once assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    name: String,
    status: Verdict,
    records: Vec<TripRecord>,
    routes: Vec<Route>,
    findings: Vec<ValidationFinding>,
}

impl ExtractionResult {
    pub(crate) fn new(
        name: String,
        status: Verdict,
        records: Vec<TripRecord>,
        routes: Vec<Route>,
        findings: Vec<ValidationFinding>,
    ) -> Self {
        ExtractionResult {
            name,
            status,
            records,
            routes,
            findings,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> Verdict {
        self.status
    }

    /// Every extracted record, commuting or not, in sheet order
    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn findings(&self) -> &[ValidationFinding] {
        &self.findings
    }

    pub fn columns(&self) -> TripColumns {
        self.records.iter().collect()
    }

    /// Plain-text report for the errors log
    pub fn format_report(&self) -> String {
        let mut report = String::new();

        report.push_str("=============================\n");
        report.push_str(&format!("File: {}\n", self.name));
        report.push_str(&format!("Status: {}\n", self.status));
        report.push_str(&format!(
            "Extracted rows: {}, routes: {}\n\n",
            self.records.len(),
            self.routes.len()
        ));

        if self.findings.is_empty() {
            report.push_str("No findings\n");
        } else {
            report.push_str("Findings:\n");
            for finding in &self.findings {
                report.push_str(&format!("  - {}\n", finding));
            }
        }

        report
    }
}

#[derive(Serialize)]
struct ExtractionOutput<'a> {
    name: &'a str,
    status: Verdict,
    #[serde(flatten)]
    columns: TripColumns,
    findings: &'a [ValidationFinding],
}

impl Serialize for ExtractionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ExtractionOutput {
            name: &self.name,
            status: self.status,
            columns: self.columns(),
            findings: &self.findings,
        }
        .serialize(serializer)
    }
}
