//! Presentation helpers: date rendering, status filtering, text tables and CSV export.
//! Nothing here feeds back into validation.

use std::path::Path;

use crate::batch::FileOutcome;
use crate::error::Result;
use crate::extraction_result::{ExtractionResult, Verdict};
use crate::trip_record::TripDate;
use crate::utils::serial_to_utc_datetime;

/// Column titles as printed on the claim form
pub const COLUMN_TITLES: [&str; 8] = [
    "日付",
    "乗車駅",
    "降車駅",
    "片道・往復",
    "通勤・業務",
    "目的地",
    "交通機関種類",
    "金額",
];

/// Render a date as `month/day`. Text dates are shown unchanged.
pub fn format_display_date(date: &TripDate, epoch_offset_days: i64) -> String {
    match date {
        TripDate::Serial(serial) => serial_to_utc_datetime(*serial, epoch_offset_days)
            .map(|datetime| datetime.format("%-m/%-d").to_string())
            .unwrap_or_else(|| serial.to_string()),
        TripDate::Text(text) => text.clone(),
    }
}

pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        format!("{}", amount as i64)
    } else {
        amount.to_string()
    }
}

/// Outcomes that were validated with the given verdict
pub fn filter_by_status(outcomes: &[FileOutcome], status: Verdict) -> Vec<&FileOutcome> {
    outcomes
        .iter()
        .filter(|outcome| outcome.status() == Some(status))
        .collect()
}

/// Display rows: one vector of eight cells per record
pub fn table_rows(result: &ExtractionResult, epoch_offset_days: i64) -> Vec<[String; 8]> {
    result
        .records()
        .iter()
        .map(|record| {
            [
                format_display_date(&record.date, epoch_offset_days),
                record.boarding_station.clone(),
                record.alighting_station.clone(),
                record.trip_type.clone(),
                record.expense_type.clone(),
                record.destination.clone(),
                record.transport_type.clone(),
                format_amount(record.amount),
            ]
        })
        .collect()
}

/// `name - status` heading followed by a tab separated table
pub fn render_table(result: &ExtractionResult, epoch_offset_days: i64) -> String {
    let mut output = format!("{} - {}\n", result.name(), result.status());
    output.push_str(&COLUMN_TITLES.join("\t"));
    output.push('\n');
    for row in table_rows(result, epoch_offset_days) {
        output.push_str(&row.join("\t"));
        output.push('\n');
    }
    output
}

/// Export the extracted rows of one file to CSV
pub fn export_to_csv(
    result: &ExtractionResult,
    csv_path: &Path,
    epoch_offset_days: i64,
) -> Result<()> {
    // Quote fields only when necessary (e.g., when they contain commas)
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_path(csv_path)?;

    wtr.write_record(COLUMN_TITLES)?;
    for row in table_rows(result, epoch_offset_days) {
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    tracing::debug!(path = %csv_path.display(), rows = result.records().len(), "exported CSV");

    Ok(())
}
