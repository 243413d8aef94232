//! Month and day-of-week filtering of a [`RecordSet`].

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::choice::{Choice, match_choice};
use crate::city::City;
use crate::records::{RecordSet, weekday_name};

/// Months covered by the source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
}

impl Month {
    pub const ALL: [Month; 6] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
    ];

    /// 1-based calendar month.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "january",
            Month::February => "february",
            Month::March => "march",
            Month::April => "april",
            Month::May => "may",
            Month::June => "june",
        }
    }
}

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("'{input}' is not a valid {kind}")]
    NoMatch { kind: &'static str, input: String },
    #[error("'{input}' is an ambiguous {kind}, could be any of: {}", .candidates.join(", "))]
    Ambiguous {
        kind: &'static str,
        input: String,
        candidates: Vec<String>,
    },
}

fn resolve<T: Clone + fmt::Display>(
    kind: &'static str,
    input: &str,
    options: &[(&str, T)],
) -> Result<T, SelectionError> {
    match match_choice(input, options) {
        Choice::Match(value) => Ok(value),
        Choice::Ambiguous(values) => Err(SelectionError::Ambiguous {
            kind,
            input: input.to_string(),
            candidates: values.iter().map(ToString::to_string).collect(),
        }),
        Choice::NoMatch => Err(SelectionError::NoMatch {
            kind,
            input: input.to_string(),
        }),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum MonthFilter {
    #[default]
    All,
    Only(Month),
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("all"),
            MonthFilter::Only(m) => f.write_str(m.name()),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut options = vec![("all", MonthFilter::All)];
        options.extend(Month::ALL.iter().map(|m| (m.name(), MonthFilter::Only(*m))));
        resolve("month (january to june, or all)", s, &options)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DayFilter {
    #[default]
    All,
    Only(Weekday),
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str("all"),
            DayFilter::Only(d) => f.write_str(&weekday_name(*d).to_lowercase()),
        }
    }
}

impl FromStr for DayFilter {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let names: Vec<String> = WEEKDAYS
            .iter()
            .map(|d| weekday_name(*d).to_lowercase())
            .collect();
        let mut options = vec![("all", DayFilter::All)];
        options.extend(
            names
                .iter()
                .zip(WEEKDAYS)
                .map(|(name, d)| (name.as_str(), DayFilter::Only(d))),
        );
        resolve("day of week (or all)", s, &options)
    }
}

impl Serialize for DayFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The city and the month / day restrictions for one analysis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

/// Returns the records of `records` matching `month` and `day`, in their
/// original order. `All` leaves that dimension unfiltered; an empty result is
/// not an error.
#[tracing::instrument(skip(records), fields(city = %records.city, rows = records.len()))]
pub fn filter(records: &RecordSet, month: MonthFilter, day: DayFilter) -> RecordSet {
    let kept = records
        .iter()
        .filter(|r| match month {
            MonthFilter::All => true,
            MonthFilter::Only(m) => r.month() == m.number(),
        })
        .filter(|r| match day {
            DayFilter::All => true,
            DayFilter::Only(d) => r.weekday() == d,
        })
        .cloned()
        .collect::<Vec<_>>();

    debug!(kept = kept.len(), "Filter applied");
    RecordSet::new(records.city, records.schema, kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Schema, TIMESTAMP_FORMAT, TripRecord};
    use chrono::NaiveDateTime;

    fn trip(start: &str) -> TripRecord {
        let t = NaiveDateTime::parse_from_str(start, TIMESTAMP_FORMAT).unwrap();
        TripRecord::new(t, 60.0, "A", "B")
    }

    fn sample() -> RecordSet {
        RecordSet::new(
            City::Chicago,
            Schema::full(),
            vec![
                trip("2017-01-02 08:00:00"), // Monday
                trip("2017-01-03 09:00:00"), // Tuesday
                trip("2017-03-06 10:00:00"), // Monday
                trip("2017-06-05 11:00:00"), // Monday
                trip("2017-06-10 12:00:00"), // Saturday
            ],
        )
    }

    #[test]
    fn test_all_all_is_identity() {
        let set = sample();
        assert_eq!(filter(&set, MonthFilter::All, DayFilter::All), set);
    }

    #[test]
    fn test_month_filter() {
        let out = filter(&sample(), MonthFilter::Only(Month::June), DayFilter::All);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.month() == 6));
    }

    #[test]
    fn test_day_filter() {
        let out = filter(&sample(), MonthFilter::All, DayFilter::Only(Weekday::Mon));
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|r| r.weekday() == Weekday::Mon));
    }

    #[test]
    fn test_combined_filter_and_idempotence() {
        let set = sample();
        let once = filter(&set, MonthFilter::Only(Month::June), DayFilter::Only(Weekday::Sat));
        assert_eq!(once.len(), 1);

        let twice = filter(&once, MonthFilter::Only(Month::June), DayFilter::Only(Weekday::Sat));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let out = filter(&sample(), MonthFilter::Only(Month::April), DayFilter::All);
        assert!(out.is_empty());
        assert_eq!(out.schema, Schema::full());
    }

    #[test]
    fn test_filter_leaves_source_untouched() {
        let set = sample();
        let _ = filter(&set, MonthFilter::Only(Month::January), DayFilter::All);
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn test_parse_month_filter() {
        assert_eq!("all".parse::<MonthFilter>().unwrap(), MonthFilter::All);
        assert_eq!(
            "Feb".parse::<MonthFilter>().unwrap(),
            MonthFilter::Only(Month::February)
        );
        assert!(matches!(
            "ma".parse::<MonthFilter>(),
            Err(SelectionError::Ambiguous { .. })
        ));
        assert!(matches!(
            "july".parse::<MonthFilter>(),
            Err(SelectionError::NoMatch { .. })
        ));
    }

    #[test]
    fn test_parse_day_filter_is_case_insensitive() {
        assert_eq!(
            "SUNDAY".parse::<DayFilter>().unwrap(),
            DayFilter::Only(Weekday::Sun)
        );
        assert_eq!(
            "th".parse::<DayFilter>().unwrap(),
            DayFilter::Only(Weekday::Thu)
        );
        assert!("t".parse::<DayFilter>().is_err());
    }

    #[test]
    fn test_month_numbers() {
        assert_eq!(Month::January.number(), 1);
        assert_eq!(Month::June.number(), 6);
    }
}
