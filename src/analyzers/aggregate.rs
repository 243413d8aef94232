use tracing::debug;

use crate::analyzers::types::{
    Counts, DurationStats, DurationSummary, RangeAndMode, Stat, StationPair, StationStats,
    StatisticsReport, TimeStats, UserStats,
};
use crate::analyzers::utility::{ceil_minutes, counts, mean, mode};
use crate::records::{Column, RecordSet, Value};

/// Computes every statistic for `records` into a fresh [`StatisticsReport`].
#[tracing::instrument(skip(records), fields(city = %records.city, rows = records.len()))]
pub fn aggregate(records: &RecordSet) -> StatisticsReport {
    StatisticsReport {
        city: records.city,
        record_count: records.len(),
        time: time_stats(records),
        stations: station_stats(records),
        duration: duration_stats(records),
        users: user_stats(records),
    }
}

#[tracing::instrument(skip_all)]
fn time_stats(records: &RecordSet) -> TimeStats {
    TimeStats {
        most_common_month: most_common(records, Column::Month),
        most_common_day: most_common(records, Column::DayOfWeek),
        most_common_hour: most_common_hour(records),
    }
}

#[tracing::instrument(skip_all)]
fn station_stats(records: &RecordSet) -> StationStats {
    StationStats {
        most_common_start_station: most_common(records, Column::StartStation),
        most_common_end_station: most_common(records, Column::EndStation),
        most_common_trip: most_common_station_pair(records),
    }
}

#[tracing::instrument(skip_all)]
fn duration_stats(records: &RecordSet) -> DurationStats {
    DurationStats {
        travel_time: total_and_mean_duration(records),
    }
}

#[tracing::instrument(skip_all)]
fn user_stats(records: &RecordSet) -> UserStats {
    UserStats {
        user_types: count_all(records, Column::UserType),
        genders: count_all(records, Column::Gender),
        birth_years: range_and_mode(records, Column::BirthYear),
    }
}

/// Most frequent value of `column`; ties go to the lowest value.
pub fn most_common(records: &RecordSet, column: Column) -> Stat<Value> {
    if !records.has_column(column) {
        return Stat::MissingColumn;
    }
    Stat::from_option(mode(records.values(column)))
}

/// Number of occurrences of each distinct non-missing value of `column`.
pub fn count_all(records: &RecordSet, column: Column) -> Stat<Counts> {
    if !records.has_column(column) {
        debug!(%column, "Column absent for this city");
        return Stat::MissingColumn;
    }

    let c = counts(records.values(column));
    if c.is_empty() {
        Stat::NoData
    } else {
        Stat::Value(c)
    }
}

/// Minimum, maximum and most common value of `column`.
pub fn range_and_mode(records: &RecordSet, column: Column) -> Stat<RangeAndMode> {
    if !records.has_column(column) {
        return Stat::MissingColumn;
    }

    let values: Vec<Value> = records.values(column).collect();
    let (Some(min), Some(max)) = (values.iter().min(), values.iter().max()) else {
        return Stat::NoData;
    };
    let (min, max) = (min.clone(), max.clone());

    Stat::from_option(mode(values)).map(|mode| RangeAndMode { min, max, mode })
}

/// The most frequent (start station, end station) combination.
///
/// Ties go to the lexicographically lowest pair.
pub fn most_common_station_pair(records: &RecordSet) -> Stat<StationPair> {
    let pairs = counts(
        records
            .iter()
            .map(|r| (r.start_station.as_str(), r.end_station.as_str())),
    );

    let mut best: Option<((&str, &str), usize)> = None;
    for (pair, count) in pairs {
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((pair, count));
        }
    }

    Stat::from_option(best.map(|((start, end), count)| StationPair {
        start_station: start.to_string(),
        end_station: end.to_string(),
        count,
    }))
}

/// Total and mean trip duration in minutes, both rounded up.
pub fn total_and_mean_duration(records: &RecordSet) -> Stat<DurationSummary> {
    if records.is_empty() {
        return Stat::NoData;
    }

    let durations: Vec<f64> = records.iter().map(|r| r.trip_duration).collect();
    let total: f64 = durations.iter().sum();

    Stat::Value(DurationSummary {
        total_minutes: ceil_minutes(total),
        mean_minutes: ceil_minutes(mean(&durations)),
    })
}

/// Most frequent hour of day (0-23) of the trip start times.
pub fn most_common_hour(records: &RecordSet) -> Stat<u32> {
    Stat::from_option(mode(records.iter().map(|r| r.hour())))
}
