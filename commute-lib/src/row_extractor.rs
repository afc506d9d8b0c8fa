use calamine::{Data, Range};
use std::iter::FusedIterator;
use std::ops::RangeInclusive;

use crate::config::ColumnLayout;
use crate::trip_record::{TripDate, TripRecord};
use crate::utils::{is_blank, parse_numeric_text};

/// Lazy reader of claim rows.
///
/// Walks every row of the sheet range using absolute cell positions. Rows
/// whose flag cell is not a number >= 1 are skipped. The first flagged row
/// with a missing field ends the sequence: nothing at or after that row is
/// produced, even rows that are complete.
pub struct RowExtractor<'a> {
    range: &'a Range<Data>,
    columns: &'a ColumnLayout,
    rows: RangeInclusive<u32>,
    truncated_at: Option<usize>,
}

impl<'a> RowExtractor<'a> {
    pub fn new(range: &'a Range<Data>, columns: &'a ColumnLayout) -> Self {
        #[allow(clippy::reversed_empty_ranges)]
        let rows = match (range.start(), range.end()) {
            (Some((first, _)), Some((last, _))) => first..=last,
            _ => 1..=0,
        };

        RowExtractor {
            range,
            columns,
            rows,
            truncated_at: None,
        }
    }

    /// 1-based sheet row of the incomplete row that ended extraction, if any
    pub fn truncated_at(&self) -> Option<usize> {
        self.truncated_at
    }

    fn cell(&self, row: u32, column: u32) -> Option<&'a Data> {
        self.range.get_value((row, column))
    }

    fn read_record(&self, row: u32) -> Option<TripRecord> {
        let columns = self.columns;
        Some(TripRecord {
            row_number: row as usize + 1,
            date: cell_date(self.cell(row, columns.date))?,
            boarding_station: cell_text(self.cell(row, columns.boarding_station))?,
            alighting_station: cell_text(self.cell(row, columns.alighting_station))?,
            trip_type: cell_text(self.cell(row, columns.trip_type))?,
            expense_type: cell_text(self.cell(row, columns.expense_type))?,
            destination: cell_text(self.cell(row, columns.destination))?,
            transport_type: cell_text(self.cell(row, columns.transport_type))?,
            amount: cell_amount(self.cell(row, columns.amount))?,
        })
    }
}

impl Iterator for RowExtractor<'_> {
    type Item = TripRecord;

    fn next(&mut self) -> Option<TripRecord> {
        if self.truncated_at.is_some() {
            return None;
        }

        while let Some(row) = self.rows.next() {
            if !is_flagged(self.cell(row, self.columns.flag)) {
                continue;
            }

            match self.read_record(row) {
                Some(record) => return Some(record),
                None => {
                    let row_number = row as usize + 1;
                    tracing::debug!(row = row_number, "flagged row is incomplete; extraction stops");
                    self.truncated_at = Some(row_number);
                    return None;
                }
            }
        }

        None
    }
}

impl FusedIterator for RowExtractor<'_> {}

/// Flag cell compares as a number of at least 1: numbers, dates by serial,
/// `true` as 1 and plain numeric text. Text with separators is not a number.
fn is_flagged(cell: Option<&Data>) -> bool {
    let value = match cell {
        Some(Data::Float(f)) => Some(*f),
        Some(Data::Int(i)) => Some(*i as f64),
        Some(Data::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        Some(Data::DateTime(dt)) => Some(dt.as_f64()),
        Some(Data::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value.is_some_and(|v| v >= 1.0)
}

// Missing means empty, an error value, blank text, numeric zero or false.

fn cell_text(cell: Option<&Data>) -> Option<String> {
    match cell? {
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            (!is_blank(s)).then(|| s.clone())
        }
        Data::Float(f) => (*f != 0.0 && !f.is_nan()).then(|| f.to_string()),
        Data::Int(i) => (*i != 0).then(|| i.to_string()),
        Data::Bool(b) => b.then(|| "true".to_string()),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            (serial != 0.0).then(|| serial.to_string())
        }
        Data::Empty | Data::Error(_) => None,
    }
}

fn cell_date(cell: Option<&Data>) -> Option<TripDate> {
    let date = match cell? {
        Data::DateTime(dt) => TripDate::Serial(dt.as_f64()),
        Data::Float(f) => TripDate::Serial(*f),
        Data::Int(i) => TripDate::Serial(*i as f64),
        Data::String(s) | Data::DateTimeIso(s) if !is_blank(s) => TripDate::Text(s.clone()),
        _ => return None,
    };
    match date {
        TripDate::Serial(serial) if serial == 0.0 || !serial.is_finite() => None,
        date => Some(date),
    }
}

fn cell_amount(cell: Option<&Data>) -> Option<f64> {
    let amount = match cell? {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::String(s) => parse_numeric_text(s)?,
        _ => return None,
    };
    (amount != 0.0 && amount.is_finite()).then_some(amount)
}
