//! Supported cities and the source file each one is loaded from.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::choice::{Choice, match_choice};
use crate::error::BikeshareError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lower-case display name, also accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// Name of the CSV file holding this city's trips.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let options: Vec<(&str, City)> = City::ALL.iter().map(|c| (c.name(), *c)).collect();
        match match_choice(s, &options) {
            Choice::Match(city) => Ok(city),
            Choice::Ambiguous(_) | Choice::NoMatch => Err(BikeshareError::UnknownCity(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_city_names() {
        assert_eq!("chicago".parse::<City>().unwrap(), City::Chicago);
        assert_eq!("New_York_City".parse::<City>().unwrap(), City::NewYorkCity);
        assert_eq!("new".parse::<City>().unwrap(), City::NewYorkCity);
        assert_eq!("wash".parse::<City>().unwrap(), City::Washington);
    }

    #[test]
    fn test_unknown_city() {
        let err = "boston".parse::<City>().unwrap_err();
        assert!(matches!(err, BikeshareError::UnknownCity(ref c) if c == "boston"));
    }

    #[test]
    fn test_file_names() {
        assert_eq!(City::NewYorkCity.file_name(), "new_york_city.csv");
        assert_eq!(City::Washington.to_string(), "washington");
    }
}
