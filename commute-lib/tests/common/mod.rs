use commute_lib::calamine::{Data, Range};
use commute_lib::{CommuteValidator, ExtractionResult};

// Re-export shared test utilities from src/test_utils.rs
// These are the core functions used by most tests
// Not every test target uses each one
#[allow(unused_imports)]
pub use commute_lib::test_utils::{
    business_trip, commuting_trip, create_validator_with_defaults, sheet_from_rows,
};

/// Build a sheet of `business` business trips followed by the given commuting rows
#[allow(dead_code)]
pub fn claim_sheet(business: u32, commuting: Vec<Vec<Data>>) -> Range<Data> {
    let mut rows: Vec<Vec<Data>> = (1..=business).map(business_trip).collect();
    rows.extend(commuting);
    sheet_from_rows(rows)
}

/// Validate a sheet with the default rules
#[allow(dead_code)]
pub fn validate_sheet(range: &Range<Data>) -> ExtractionResult {
    let validator: CommuteValidator = create_validator_with_defaults();
    validator.validate_range("claim.xlsx", range)
}

/// `count` identical commuting rows on one route, starting at `first_day`
#[allow(dead_code)]
pub fn repeated_commute(
    first_day: u32,
    count: u32,
    boarding_station: &str,
    alighting_station: &str,
    transport_type: &str,
    amount: f64,
) -> Vec<Vec<Data>> {
    (first_day..first_day + count)
        .map(|day| commuting_trip(day, boarding_station, alighting_station, transport_type, amount))
        .collect()
}
