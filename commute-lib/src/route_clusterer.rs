use serde::Serialize;

use crate::trip_record::TripRecord;

/// Identity of a route: transport type plus boarding and alighting stations
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteKey {
    pub transport_type: String,
    pub boarding_station: String,
    pub alighting_station: String,
}

impl From<&TripRecord> for RouteKey {
    fn from(record: &TripRecord) -> Self {
        RouteKey {
            transport_type: record.transport_type.clone(),
            boarding_station: record.boarding_station.clone(),
            alighting_station: record.alighting_station.clone(),
        }
    }
}

/// Non-empty run of commuting trips sharing one [`RouteKey`], in sheet order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    key: RouteKey,
    members: Vec<TripRecord>,
}

impl Route {
    /// `None` for an empty bucket
    fn from_bucket(members: Vec<TripRecord>) -> Option<Self> {
        let key = RouteKey::from(members.first()?);
        Some(Route { key, members })
    }

    pub fn key(&self) -> &RouteKey {
        &self.key
    }

    pub fn members(&self) -> &[TripRecord] {
        &self.members
    }

    /// Trip every other member is compared against
    pub fn first(&self) -> &TripRecord {
        &self.members[0]
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false for a frozen route
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Records whose expense type equals `marker`, in their original order
pub fn commuting_records<'a>(
    records: impl IntoIterator<Item = &'a TripRecord>,
    marker: &str,
) -> Vec<&'a TripRecord> {
    records
        .into_iter()
        .filter(|record| record.expense_type == marker)
        .collect()
}

/// Group commuting records into routes by exact key equality.
///
/// Buckets are scanned in order and a record joins the first one that is
/// empty or whose first member has the same key; otherwise it opens a new
/// bucket. The seed of empty buckets never limits the number of routes.
/// Buckets still empty at the end are dropped.
pub fn cluster_routes<'a>(
    records: impl IntoIterator<Item = &'a TripRecord>,
    seed_slots: usize,
) -> Vec<Route> {
    let seed: Vec<Vec<TripRecord>> = vec![Vec::new(); seed_slots];

    let buckets = records.into_iter().fold(seed, |mut buckets, record| {
        let slot = buckets.iter().position(|bucket| {
            bucket
                .first()
                .is_none_or(|first| first.shares_route_with(record))
        });
        match slot {
            Some(index) => buckets[index].push(record.clone()),
            None => buckets.push(vec![record.clone()]),
        }
        buckets
    });

    let routes: Vec<Route> = buckets.into_iter().filter_map(Route::from_bucket).collect();
    tracing::debug!(routes = routes.len(), "clustered commuting records");
    routes
}
