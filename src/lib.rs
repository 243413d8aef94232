//! Bikeshare trip statistics: load a city's trips, filter them by month and
//! day of week, and aggregate them into a [`StatisticsReport`].

pub mod analyzers;
pub mod choice;
pub mod city;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod output;
pub mod records;

pub use analyzers::{StatisticsReport, aggregate};
pub use filter::filter;
pub use loader::load;
