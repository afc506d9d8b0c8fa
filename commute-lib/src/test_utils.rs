// Test utilities available to both unit and integration tests
// Only compiled when testing

use calamine::{Data, Range};

use crate::trip_record::{TripDate, TripRecord};
use crate::{COMMUTING_MARKER, CommuteValidator, ValidationConfig};

/// Column headers of the claim form, A..K
pub const HEADER_ROW: [&str; 11] = [
    "", "No.", "日付", "乗車駅", "", "降車駅", "片道・往復", "通勤・業務", "目的地", "交通機関種類", "金額",
];

/// Boarding, alighting, trip type, expense type, destination, transport and amount
/// of the commute used by workbook fixtures
pub const COMMUTING_TEST_ROUTE: (&str, &str, &str, &str, &str, &str, f64) =
    ("新宿", "渋谷", "往復", COMMUTING_MARKER, "本社", "電車", 500.0);

/// Spreadsheet serial number of the given day of January 2024
pub fn serial_for_day(day: u32) -> f64 {
    45291.0 + day as f64
}

/// Build one sheet row (columns A..K) in the default claim layout
#[allow(clippy::too_many_arguments)]
pub fn trip_row(
    flag: f64,
    date: f64,
    boarding_station: &str,
    alighting_station: &str,
    trip_type: &str,
    expense_type: &str,
    destination: &str,
    transport_type: &str,
    amount: f64,
) -> Vec<Data> {
    vec![
        Data::Empty,
        Data::Float(flag),
        Data::Float(date),
        Data::String(boarding_station.to_string()),
        Data::Empty,
        Data::String(alighting_station.to_string()),
        Data::String(trip_type.to_string()),
        Data::String(expense_type.to_string()),
        Data::String(destination.to_string()),
        Data::String(transport_type.to_string()),
        Data::Float(amount),
    ]
}

/// Flagged round-trip commute to the head office
pub fn commuting_trip(
    day: u32,
    boarding_station: &str,
    alighting_station: &str,
    transport_type: &str,
    amount: f64,
) -> Vec<Data> {
    trip_row(
        1.0,
        serial_for_day(day),
        boarding_station,
        alighting_station,
        "往復",
        COMMUTING_MARKER,
        "本社",
        transport_type,
        amount,
    )
}

/// Flagged one-way business trip
pub fn business_trip(day: u32) -> Vec<Data> {
    trip_row(
        1.0,
        serial_for_day(day),
        "東京",
        "横浜",
        "片道",
        "業務",
        "取引先",
        "電車",
        480.0,
    )
}

/// Place a header row followed by `rows` into a sheet range starting at A1
pub fn sheet_from_rows(rows: Vec<Vec<Data>>) -> Range<Data> {
    let width = rows
        .iter()
        .map(|row| row.len())
        .chain(std::iter::once(HEADER_ROW.len()))
        .max()
        .unwrap_or(HEADER_ROW.len()) as u32;
    let mut range = Range::new((0, 0), (rows.len() as u32, width - 1));

    for (column, title) in HEADER_ROW.iter().enumerate() {
        if !title.is_empty() {
            range.set_value((0, column as u32), Data::String(title.to_string()));
        }
    }
    for (row_index, row) in rows.into_iter().enumerate() {
        for (column, cell) in row.into_iter().enumerate() {
            range.set_value((row_index as u32 + 1, column as u32), cell);
        }
    }

    range
}

/// Commuting record built directly, without going through a sheet
pub fn commuting_record(
    row_number: usize,
    boarding_station: &str,
    alighting_station: &str,
    transport_type: &str,
    amount: f64,
) -> TripRecord {
    TripRecord {
        row_number,
        date: TripDate::Serial(serial_for_day(row_number as u32)),
        boarding_station: boarding_station.to_string(),
        alighting_station: alighting_station.to_string(),
        trip_type: "往復".to_string(),
        expense_type: COMMUTING_MARKER.to_string(),
        destination: "本社".to_string(),
        transport_type: transport_type.to_string(),
        amount,
    }
}

/// Validator with the default configuration and the errors log disabled
pub fn create_validator_with_defaults() -> CommuteValidator {
    let config = ValidationConfig {
        errors_log: None,
        ..ValidationConfig::default()
    };
    CommuteValidator::new(config).unwrap()
}
