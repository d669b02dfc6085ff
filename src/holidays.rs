//! Public holiday data turned into calendar annotations.
//!
//! The layout engines never fetch anything themselves; callers load holidays
//! through a [`HolidaySource`] beforehand and pass the result on as ordinary
//! annotations.

use chrono::{Datelike, NaiveDate};
use derive_more::Constructor;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::calendar::Annotation;
use crate::error::{Error, Result};
use crate::font::Font;

#[derive(Debug, Clone, PartialEq, Constructor)]
pub struct Holiday {
    pub date: NaiveDate,
    pub title: String,
    pub notes: Option<String>,
}

pub trait HolidaySource {
    fn holidays(&self, year: i32) -> Result<Vec<Holiday>>;
}

/// Any failure of the source means "no holidays".
pub fn holidays_or_empty(source: &dyn HolidaySource, year: i32) -> Vec<Holiday> {
    match source.holidays(year) {
        Ok(holidays) => holidays,
        Err(err) => {
            log::warn!("Holidays for {} unavailable: {}", year, err);
            Vec::new()
        }
    }
}

pub fn to_annotations(holidays: &[Holiday], font: &Font) -> Vec<Annotation> {
    holidays
        .iter()
        .filter(|holiday| !holiday.title.trim().is_empty())
        .map(|holiday| Annotation::new(holiday.date, holiday.title.as_str()).font(font.clone()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Division {
    EnglandAndWales,
    Scotland,
    NorthernIreland,
}

impl Default for Division {
    fn default() -> Self {
        Division::EnglandAndWales
    }
}

impl FromStr for Division {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "england-and-wales" => Ok(Division::EnglandAndWales),
            "scotland" => Ok(Division::Scotland),
            "northern-ireland" => Ok(Division::NorthernIreland),
            _ => Err(Error::config(&format!("Unknown holiday division '{}'", s))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct BankHolidayEvent {
    #[serde(default)]
    title: String,
    date: NaiveDate,
    #[serde(default)]
    notes: String,
}

#[derive(Debug, Deserialize)]
struct DivisionEvents {
    #[serde(default)]
    events: Vec<BankHolidayEvent>,
}

#[derive(Debug, Deserialize)]
struct BankHolidays {
    #[serde(rename = "england-and-wales")]
    england_and_wales: Option<DivisionEvents>,
    scotland: Option<DivisionEvents>,
    #[serde(rename = "northern-ireland")]
    northern_ireland: Option<DivisionEvents>,
}

/// Parses a UK `bank-holidays.json` document and returns the entries of one
/// division for `year`, in document order.
pub fn parse_bank_holidays(json: &str, division: Division, year: i32) -> Result<Vec<Holiday>> {
    let document: BankHolidays = serde_json::from_str(json)?;

    let events = match division {
        Division::EnglandAndWales => document.england_and_wales,
        Division::Scotland => document.scotland,
        Division::NorthernIreland => document.northern_ireland,
    }
    .map(|d| d.events)
    .unwrap_or_default();

    Ok(events
        .into_iter()
        .filter(|event| event.date.year() == year)
        .map(|event| {
            let notes = Some(event.notes).filter(|n| !n.is_empty());
            Holiday::new(event.date, event.title, notes)
        })
        .collect())
}

/// A locally stored copy of the UK bank holiday feed.
#[derive(Debug, Clone)]
pub struct BankHolidaysFile {
    path: PathBuf,
    division: Division,
}

impl BankHolidaysFile {
    pub fn new<P: AsRef<Path>>(path: P, division: Division) -> Self {
        BankHolidaysFile {
            path: path.as_ref().to_owned(),
            division,
        }
    }
}

impl HolidaySource for BankHolidaysFile {
    fn holidays(&self, year: i32) -> Result<Vec<Holiday>> {
        let json = fs::read_to_string(&self.path)?;
        let holidays = parse_bank_holidays(&json, self.division, year)?;
        log::debug!(
            "Loaded {} holiday(s) for {} from {}",
            holidays.len(),
            year,
            self.path.display()
        );
        Ok(holidays)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"{
        "england-and-wales": {
            "division": "england-and-wales",
            "events": [
                {"title": "New Year’s Day", "date": "2023-01-02", "notes": "Substitute day", "bunting": true},
                {"title": "Good Friday", "date": "2023-04-07", "notes": "", "bunting": false},
                {"title": "", "date": "2023-05-01", "notes": "", "bunting": true},
                {"title": "New Year’s Day", "date": "2024-01-01", "notes": "", "bunting": true}
            ]
        },
        "scotland": {
            "division": "scotland",
            "events": [
                {"title": "St Andrew’s Day", "date": "2023-11-30", "notes": "", "bunting": true}
            ]
        }
    }"#;

    struct Unavailable;

    impl HolidaySource for Unavailable {
        fn holidays(&self, _year: i32) -> Result<Vec<Holiday>> {
            Err(Error::from(std::io::Error::from(std::io::ErrorKind::TimedOut)))
        }
    }

    #[test]
    fn parses_one_division_and_year() {
        let holidays = parse_bank_holidays(FEED, Division::EnglandAndWales, 2023).unwrap();
        assert_eq!(holidays.len(), 3);
        assert_eq!(holidays[0].notes.as_deref(), Some("Substitute day"));
        assert_eq!(holidays[1].notes, None);
        assert_eq!(holidays[1].date, NaiveDate::from_ymd_opt(2023, 4, 7).unwrap());

        let scotland = parse_bank_holidays(FEED, Division::Scotland, 2023).unwrap();
        assert_eq!(scotland[0].title, "St Andrew’s Day");

        let ni = parse_bank_holidays(FEED, Division::NorthernIreland, 2023).unwrap();
        assert!(ni.is_empty());
    }

    #[test]
    fn empty_titles_do_not_become_annotations() {
        let holidays = parse_bank_holidays(FEED, Division::EnglandAndWales, 2023).unwrap();
        let annotations = to_annotations(&holidays, &Annotation::default_font());
        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[1].title, "Good Friday");
    }

    #[test]
    fn failures_become_empty_lists() {
        assert!(holidays_or_empty(&Unavailable, 2023).is_empty());

        let missing = BankHolidaysFile::new("/nonexistent/bank-holidays.json", Division::Scotland);
        assert!(holidays_or_empty(&missing, 2023).is_empty());
        assert!(parse_bank_holidays("not json", Division::Scotland, 2023).is_err());
    }

    #[test]
    fn division_names() {
        assert_eq!(
            "northern-ireland".parse::<Division>().unwrap(),
            Division::NorthernIreland
        );
        assert!("wales".parse::<Division>().is_err());
    }
}
