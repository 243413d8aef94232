//! Trip statistics and the report model they are collected into.
//!
//! Every function here is pure: it borrows a [`RecordSet`](crate::records::RecordSet)
//! and returns owned results. Absent columns and empty selections come back as
//! [`Stat::MissingColumn`](types::Stat::MissingColumn) and
//! [`Stat::NoData`](types::Stat::NoData).

pub mod aggregate;
pub mod types;
pub mod utility;

pub use aggregate::aggregate;
pub use types::{Stat, StatisticsReport};
