//! Reads a city's trip CSV into a [`RecordSet`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::{debug, info};

use crate::city::City;
use crate::error::{BikeshareError, Result};
use crate::records::{Column, RecordSet, Schema, TIMESTAMP_FORMAT, TripRecord};

/// A row as it appears in the source file. Columns a city does not report
/// deserialize to `None`.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "", default)]
    id: Option<String>,
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time", default)]
    end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    trip_duration: String,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<String>,
}

/// Loads `city`'s trips from its file under `data_dir`.
///
/// # Errors
///
/// Returns [`BikeshareError::SourceRead`] if the file cannot be opened, and
/// any error from [`load_from_reader`].
#[tracing::instrument(skip_all, fields(city = %city, data_dir = %data_dir.display()))]
pub fn load(city: City, data_dir: &Path) -> Result<RecordSet> {
    let path = data_dir.join(city.file_name());
    let file = File::open(&path).map_err(|source| BikeshareError::SourceRead {
        path: path.clone(),
        source,
    })?;

    let records = load_from_reader(city, file)?;
    info!(path = %path.display(), rows = records.len(), "City data loaded");
    Ok(records)
}

/// Parses CSV trip data for `city` from any reader.
///
/// # Errors
///
/// Fails if a required column is missing from the header, a row is
/// malformed, or a timestamp or number cannot be parsed.
pub fn load_from_reader<R: Read>(city: City, reader: R) -> Result<RecordSet> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let schema = read_schema(rdr.headers()?)?;
    debug!(?schema, "Source schema");

    let mut records = Vec::new();
    for (i, result) in rdr.deserialize().enumerate() {
        let raw: RawTrip = result?;
        records.push(to_record(raw, i + 1)?);
    }

    Ok(RecordSet::new(city, schema, records))
}

fn read_schema(headers: &csv::StringRecord) -> Result<Schema> {
    let present = |column: Column| headers.iter().any(|h| h == column.name());

    for column in Column::SOURCE {
        if !column.is_optional() && !present(column) {
            return Err(BikeshareError::MissingRequiredColumn(column.name()));
        }
    }

    Ok(Schema {
        end_time: present(Column::EndTime),
        user_type: present(Column::UserType),
        gender: present(Column::Gender),
        birth_year: present(Column::BirthYear),
    })
}

fn to_record(raw: RawTrip, row: usize) -> Result<TripRecord> {
    let start_time = parse_timestamp(&raw.start_time, row, Column::StartTime)?;
    let trip_duration = parse_number(&raw.trip_duration, row, Column::TripDuration)?;

    let mut record = TripRecord::new(start_time, trip_duration, raw.start_station, raw.end_station);
    record.id = raw.id;
    record.end_time = raw
        .end_time
        .map(|t| parse_timestamp(&t, row, Column::EndTime))
        .transpose()?;
    record.user_type = raw.user_type;
    record.gender = raw.gender;
    // Birth years are written as floats ("1992.0")
    record.birth_year = raw
        .birth_year
        .map(|y| parse_number(&y, row, Column::BirthYear).map(|y| y as i64))
        .transpose()?;

    Ok(record)
}

fn parse_timestamp(value: &str, row: usize, column: Column) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|e| BikeshareError::Parse {
        row,
        column: column.name(),
        message: format!("'{value}': {e}"),
    })
}

fn parse_number(value: &str, row: usize, column: Column) -> Result<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| BikeshareError::Parse {
            row,
            column: column.name(),
            message: format!("'{value}' is not a number"),
        })
}
