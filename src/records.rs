//! In-memory trip records and the columns they expose to the aggregators.

use std::fmt;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;

use crate::city::City;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Columns of a trip table, both read from the source and derived at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    StartTime,
    EndTime,
    TripDuration,
    StartStation,
    EndStation,
    UserType,
    Gender,
    BirthYear,
    Month,
    DayOfWeek,
    Hour,
}

impl Column {
    pub const SOURCE: [Column; 8] = [
        Column::StartTime,
        Column::EndTime,
        Column::TripDuration,
        Column::StartStation,
        Column::EndStation,
        Column::UserType,
        Column::Gender,
        Column::BirthYear,
    ];

    /// Header used by the source files (or the derived column name).
    pub fn name(self) -> &'static str {
        match self {
            Column::StartTime => "Start Time",
            Column::EndTime => "End Time",
            Column::TripDuration => "Trip Duration",
            Column::StartStation => "Start Station",
            Column::EndStation => "End Station",
            Column::UserType => "User Type",
            Column::Gender => "Gender",
            Column::BirthYear => "Birth Year",
            Column::Month => "month",
            Column::DayOfWeek => "day_of_week",
            Column::Hour => "hour",
        }
    }

    pub fn from_name(name: &str) -> Option<Column> {
        let name = name.trim();
        [Column::Month, Column::DayOfWeek, Column::Hour]
            .into_iter()
            .chain(Column::SOURCE)
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    /// Whether a city file may legitimately omit this column.
    pub fn is_optional(self) -> bool {
        matches!(
            self,
            Column::EndTime | Column::UserType | Column::Gender | Column::BirthYear
        )
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single cell value. Integers sort before text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// Full English weekday name, as used for day-of-week filtering and display.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// One trip. `month` and `weekday` are derived from `start_time` on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub id: Option<String>,
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    /// Seconds.
    pub trip_duration: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i64>,
    month: u32,
    weekday: Weekday,
}

impl TripRecord {
    pub fn new(
        start_time: NaiveDateTime,
        trip_duration: f64,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
    ) -> Self {
        TripRecord {
            id: None,
            start_time,
            end_time: None,
            trip_duration,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type: None,
            gender: None,
            birth_year: None,
            month: start_time.month(),
            weekday: start_time.weekday(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn hour(&self) -> u32 {
        self.start_time.hour()
    }

    /// Value of `column` for this trip, `None` when the cell is empty.
    ///
    /// `Trip Duration` is exposed as whole seconds.
    pub fn get(&self, column: Column) -> Option<Value> {
        match column {
            Column::StartTime => Some(Value::Text(
                self.start_time.format(TIMESTAMP_FORMAT).to_string(),
            )),
            Column::EndTime => self
                .end_time
                .map(|t| Value::Text(t.format(TIMESTAMP_FORMAT).to_string())),
            Column::TripDuration => Some(Value::Integer(self.trip_duration as i64)),
            Column::StartStation => Some(Value::Text(self.start_station.clone())),
            Column::EndStation => Some(Value::Text(self.end_station.clone())),
            Column::UserType => self.user_type.clone().map(Value::Text),
            Column::Gender => self.gender.clone().map(Value::Text),
            Column::BirthYear => self.birth_year.map(Value::Integer),
            Column::Month => Some(Value::Integer(i64::from(self.month))),
            Column::DayOfWeek => Some(Value::Text(weekday_name(self.weekday).to_string())),
            Column::Hour => Some(Value::Integer(i64::from(self.hour()))),
        }
    }
}

/// Which optional columns a city's source file carried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Schema {
    pub end_time: bool,
    pub user_type: bool,
    pub gender: bool,
    pub birth_year: bool,
}

impl Schema {
    /// Schema with every optional column present.
    pub fn full() -> Self {
        Schema {
            end_time: true,
            user_type: true,
            gender: true,
            birth_year: true,
        }
    }

    pub fn has(&self, column: Column) -> bool {
        match column {
            Column::EndTime => self.end_time,
            Column::UserType => self.user_type,
            Column::Gender => self.gender,
            Column::BirthYear => self.birth_year,
            _ => true,
        }
    }
}

/// An ordered table of trips for one city.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    pub city: City,
    pub schema: Schema,
    records: Vec<TripRecord>,
}

impl RecordSet {
    pub fn new(city: City, schema: Schema, records: Vec<TripRecord>) -> Self {
        RecordSet {
            city,
            schema,
            records,
        }
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TripRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.schema.has(column)
    }

    /// Non-missing values of `column`, in record order.
    pub fn values(&self, column: Column) -> impl Iterator<Item = Value> + '_ {
        self.records.iter().filter_map(move |r| r.get(column))
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a TripRecord;
    type IntoIter = std::slice::Iter<'a, TripRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap()
    }

    #[test]
    fn test_derived_fields_follow_start_time() {
        // 2017-06-23 was a Friday
        let r = TripRecord::new(ts("2017-06-23 15:09:32"), 321.0, "A", "B");
        assert_eq!(r.month(), 6);
        assert_eq!(r.weekday(), Weekday::Fri);
        assert_eq!(r.hour(), 15);
        assert_eq!(r.get(Column::DayOfWeek), Some(Value::Text("Friday".into())));
    }

    #[test]
    fn test_missing_optional_cell_is_none() {
        let r = TripRecord::new(ts("2017-01-01 00:07:57"), 61.0, "A", "B");
        assert_eq!(r.get(Column::Gender), None);
        assert_eq!(r.get(Column::BirthYear), None);
        assert_eq!(r.get(Column::TripDuration), Some(Value::Integer(61)));
    }

    #[test]
    fn test_value_ordering_puts_integers_first() {
        assert!(Value::Integer(2000) < Value::Text("1999".into()));
        assert!(Value::Text("Customer".into()) < Value::Text("Subscriber".into()));
    }

    #[test]
    fn test_column_from_name() {
        assert_eq!(Column::from_name("gender"), Some(Column::Gender));
        assert_eq!(Column::from_name("Birth Year"), Some(Column::BirthYear));
        assert_eq!(Column::from_name("month"), Some(Column::Month));
        assert_eq!(Column::from_name("Bike ID"), None);
    }

    #[test]
    fn test_schema_presence() {
        let schema = Schema {
            user_type: true,
            ..Default::default()
        };
        assert!(schema.has(Column::StartStation));
        assert!(schema.has(Column::UserType));
        assert!(!schema.has(Column::Gender));
        assert!(Schema::full().has(Column::BirthYear));
    }
}
