use serde::Serialize;
use std::fmt;

/// Date cell as stored in the sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TripDate {
    /// Spreadsheet serial day number
    Serial(f64),
    /// Date typed as text (or an ISO value from an ods sheet)
    Text(String),
}

impl fmt::Display for TripDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripDate::Serial(serial) => write!(f, "{}", serial),
            TripDate::Text(text) => write!(f, "{}", text),
        }
    }
}

/// One complete claim row. Every field is present and non-empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRecord {
    /// 1-based sheet row, used for reports only
    #[serde(skip)]
    pub row_number: usize,
    pub date: TripDate,
    pub boarding_station: String,
    pub alighting_station: String,
    pub trip_type: String,
    pub expense_type: String,
    pub destination: String,
    pub transport_type: String,
    pub amount: f64,
}

impl TripRecord {
    /// Same transport type, boarding station and alighting station
    pub fn shares_route_with(&self, other: &TripRecord) -> bool {
        self.transport_type == other.transport_type
            && self.boarding_station == other.boarding_station
            && self.alighting_station == other.alighting_station
    }

    /// First attribute (date excluded) whose value differs from `other`
    pub fn first_difference(&self, other: &TripRecord) -> Option<&'static str> {
        if self.boarding_station != other.boarding_station {
            Some("boarding station")
        } else if self.alighting_station != other.alighting_station {
            Some("alighting station")
        } else if self.trip_type != other.trip_type {
            Some("trip type")
        } else if self.expense_type != other.expense_type {
            Some("expense type")
        } else if self.destination != other.destination {
            Some("destination")
        } else if self.transport_type != other.transport_type {
            Some("transport type")
        } else if self.amount != other.amount {
            Some("amount")
        } else {
            None
        }
    }
}
