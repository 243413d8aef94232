//! Data types produced by the aggregation pipeline.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::city::City;
use crate::records::Value;

/// Result of one statistic. Columns a city does not report and selections
/// with no rows are represented here rather than as errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Stat<T> {
    Value(T),
    MissingColumn,
    NoData,
}

impl<T> Stat<T> {
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Stat::NoData, Stat::Value)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Stat::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Stat<U> {
        match self {
            Stat::Value(v) => Stat::Value(f(v)),
            Stat::MissingColumn => Stat::MissingColumn,
            Stat::NoData => Stat::NoData,
        }
    }
}

/// Occurrences of each distinct value in a column, in ascending value order.
pub type Counts = BTreeMap<Value, usize>;

/// Minimum, maximum and most common value of a numeric column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeAndMode {
    pub min: Value,
    pub max: Value,
    pub mode: Value,
}

/// The most frequent (start, end) station combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationPair {
    pub start_station: String,
    pub end_station: String,
    pub count: usize,
}

/// Total and mean trip duration, each rounded up to whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationSummary {
    pub total_minutes: u64,
    pub mean_minutes: u64,
}

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    pub most_common_month: Stat<Value>,
    pub most_common_day: Stat<Value>,
    pub most_common_hour: Stat<u32>,
}

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub most_common_start_station: Stat<Value>,
    pub most_common_end_station: Stat<Value>,
    pub most_common_trip: Stat<StationPair>,
}

/// Trip duration totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub travel_time: Stat<DurationSummary>,
}

/// Rider demographics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub user_types: Stat<Counts>,
    pub genders: Stat<Counts>,
    pub birth_years: Stat<RangeAndMode>,
}

/// Everything computed for one analysis request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsReport {
    pub city: City,
    pub record_count: usize,
    pub time: TimeStats,
    pub stations: StationStats,
    pub duration: DurationStats,
    pub users: UserStats,
}
