//! Rendering of statistics reports and raw trip rows.
//!
//! Supports a human-readable text report, JSON serialization, and a CSV
//! preview of loaded rows.

use std::io::Write;

use anyhow::Result;
use csv::WriterBuilder;
use tracing::debug;

use crate::analyzers::types::{
    Counts, DurationStats, Stat, StationStats, StatisticsReport, TimeStats, UserStats,
};
use crate::records::{Column, RecordSet, TIMESTAMP_FORMAT};

const RULE: &str = "----------------------------------------";
const NO_DATA: &str = "No data for the selected filters";

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &StatisticsReport) {
    debug!("{:#?}", report);
}

/// Writes a report as pretty-printed JSON.
pub fn write_json<W: Write>(mut out: W, report: &StatisticsReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, report)?;
    writeln!(out)?;
    Ok(())
}

/// Writes all four report sections as text.
pub fn write_report<W: Write>(mut out: W, report: &StatisticsReport) -> Result<()> {
    writeln!(
        out,
        "Statistics for {} ({} trips)",
        report.city, report.record_count
    )?;
    writeln!(out, "{RULE}")?;
    write_time(&mut out, &report.time)?;
    write_stations(&mut out, &report.stations)?;
    write_duration(&mut out, &report.duration)?;
    write_users(&mut out, &report.users)?;
    Ok(())
}

fn line<W: Write, T>(
    out: &mut W,
    label: &str,
    stat: &Stat<T>,
    column: Column,
    fmt: impl FnOnce(&T) -> String,
) -> Result<()> {
    match stat {
        Stat::Value(v) => writeln!(out, "{label}{}", fmt(v))?,
        Stat::MissingColumn => writeln!(out, "There is no {column} data in this file")?,
        Stat::NoData => writeln!(out, "{label}{NO_DATA}")?,
    }
    Ok(())
}

fn write_time<W: Write>(out: &mut W, time: &TimeStats) -> Result<()> {
    writeln!(out, "\nThe Most Frequent Times of Travel\n")?;
    line(
        out,
        "The most common month for bikeshare is: ",
        &time.most_common_month,
        Column::Month,
        ToString::to_string,
    )?;
    line(
        out,
        "The most common day of the week for bikeshare is: ",
        &time.most_common_day,
        Column::DayOfWeek,
        ToString::to_string,
    )?;
    line(
        out,
        "The most common hour for bikeshare is: ",
        &time.most_common_hour,
        Column::Hour,
        ToString::to_string,
    )?;
    writeln!(out, "{RULE}")?;
    Ok(())
}

fn write_stations<W: Write>(out: &mut W, stations: &StationStats) -> Result<()> {
    writeln!(out, "\nThe Most Popular Stations and Trip\n")?;
    line(
        out,
        "The most common start station for bikeshare is: ",
        &stations.most_common_start_station,
        Column::StartStation,
        ToString::to_string,
    )?;
    line(
        out,
        "The most common end station for bikeshare is: ",
        &stations.most_common_end_station,
        Column::EndStation,
        ToString::to_string,
    )?;
    line(
        out,
        "The most common combination of start and end stations is ",
        &stations.most_common_trip,
        Column::StartStation,
        |p| {
            format!(
                "{} (start) and {} (end), {} trips",
                p.start_station, p.end_station, p.count
            )
        },
    )?;
    writeln!(out, "{RULE}")?;
    Ok(())
}

fn write_duration<W: Write>(out: &mut W, duration: &DurationStats) -> Result<()> {
    writeln!(out, "\nTrip Duration\n")?;
    match &duration.travel_time {
        Stat::Value(d) => {
            writeln!(out, "Total travel time is : {} minutes", d.total_minutes)?;
            writeln!(out, "Mean travel time is : {} minutes", d.mean_minutes)?;
        }
        _ => writeln!(out, "Travel time: {NO_DATA}")?,
    }
    writeln!(out, "{RULE}")?;
    Ok(())
}

fn write_counts<W: Write>(out: &mut W, column: Column, counts: &Stat<Counts>) -> Result<()> {
    match counts {
        Stat::Value(counts) => {
            writeln!(out, "{column} counts:")?;
            let width = counts.keys().map(|k| k.to_string().len()).max().unwrap_or(0);
            for (value, count) in counts {
                writeln!(out, "  {:<width$}  {count}", value.to_string())?;
            }
        }
        Stat::MissingColumn => writeln!(out, "There is no {column} data in this file")?,
        Stat::NoData => writeln!(out, "{column} counts: {NO_DATA}")?,
    }
    Ok(())
}

fn write_users<W: Write>(out: &mut W, users: &UserStats) -> Result<()> {
    writeln!(out, "\nUser Stats\n")?;
    write_counts(out, Column::UserType, &users.user_types)?;
    writeln!(out)?;
    write_counts(out, Column::Gender, &users.genders)?;
    writeln!(out)?;
    match &users.birth_years {
        Stat::Value(years) => {
            writeln!(out, "The earliest birth year: {}", years.min)?;
            writeln!(out, "The most recent birth year: {}", years.max)?;
            writeln!(out, "The most common birth year: {}", years.mode)?;
        }
        Stat::MissingColumn => writeln!(out, "There is no Birth Year data in this file")?,
        Stat::NoData => writeln!(out, "Birth Year: {NO_DATA}")?,
    }
    writeln!(out, "{RULE}")?;
    Ok(())
}

/// Writes the first `rows` trips of `records` as CSV, with the unnamed index
/// column headed `IDs`. `rows` is clamped to `1..=records.len()`.
pub fn write_preview<W: Write>(out: W, records: &RecordSet, rows: usize) -> Result<usize> {
    let rows = rows.clamp(1, records.len().max(1)).min(records.len());

    let columns: Vec<Column> = Column::SOURCE
        .into_iter()
        .filter(|c| records.has_column(*c))
        .collect();

    let mut writer = WriterBuilder::new().from_writer(out);

    let mut header = vec!["IDs"];
    header.extend(columns.iter().map(|c| c.name()));
    writer.write_record(&header)?;

    for record in records.iter().take(rows) {
        let mut row = vec![record.id.clone().unwrap_or_default()];
        row.extend(columns.iter().map(|c| match c {
            Column::StartTime => record.start_time.format(TIMESTAMP_FORMAT).to_string(),
            Column::TripDuration => record.trip_duration.to_string(),
            _ => record.get(*c).map(|v| v.to_string()).unwrap_or_default(),
        }));
        writer.write_record(&row)?;
    }

    writer.flush()?;
    debug!(rows, "Raw rows written");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::aggregate;
    use crate::city::City;
    use crate::records::{Schema, TripRecord};
    use chrono::NaiveDateTime;

    fn sample(schema: Schema) -> RecordSet {
        let t = |s| NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap();
        let mut a = TripRecord::new(t("2017-06-23 15:09:32"), 321.0, "Wood St", "Damen Ave");
        a.id = Some("1423854".into());
        a.user_type = Some("Subscriber".into());
        let mut b = TripRecord::new(t("2017-05-25 18:19:03"), 1610.5, "Lake", "Waveland");
        b.id = Some("955915".into());
        b.user_type = Some("Customer".into());
        RecordSet::new(City::Washington, schema, vec![a, b])
    }

    fn render(report: &StatisticsReport) -> String {
        let mut buf = Vec::new();
        write_report(&mut buf, report).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&aggregate(&sample(Schema::full())));
    }

    #[test]
    fn test_text_report_mentions_missing_columns() {
        let schema = Schema {
            user_type: true,
            ..Default::default()
        };
        let text = render(&aggregate(&sample(schema)));

        assert!(text.contains("There is no Gender data in this file"));
        assert!(text.contains("There is no Birth Year data in this file"));
        assert!(text.contains("Customer"));
        assert!(text.contains("Total travel time is : 33 minutes"));
    }

    #[test]
    fn test_text_report_empty_selection() {
        let empty = RecordSet::new(City::Chicago, Schema::full(), vec![]);
        let text = render(&aggregate(&empty));

        assert!(text.contains("The most common hour for bikeshare is: No data for the selected filters"));
        assert!(text.contains("Travel time: No data for the selected filters"));
    }

    #[test]
    fn test_json_report() {
        let mut buf = Vec::new();
        write_json(&mut buf, &aggregate(&sample(Schema::full()))).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(json["city"], "washington");
        assert_eq!(json["record_count"], 2);
        assert_eq!(json["time"]["most_common_hour"]["status"], "value");
        assert_eq!(json["users"]["genders"]["status"], "no_data");
        assert_eq!(json["users"]["user_types"]["value"]["Subscriber"], 1);
    }

    #[test]
    fn test_preview_clamps_rows() {
        let records = sample(Schema {
            user_type: true,
            ..Default::default()
        });
        let mut buf = Vec::new();
        let written = write_preview(&mut buf, &records, 10).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(written, 2);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "IDs,Start Time,Trip Duration,Start Station,End Station,User Type"
        );
        assert!(lines[1].starts_with("1423854,2017-06-23 15:09:32,321,"));
    }

    #[test]
    fn test_preview_at_least_one_row() {
        let records = sample(Schema::full());
        let mut buf = Vec::new();
        assert_eq!(write_preview(&mut buf, &records, 0).unwrap(), 1);
    }
}
